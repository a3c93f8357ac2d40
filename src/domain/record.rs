use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Deposit { amount: Decimal },
    ConfirmDeposit,
    Submission { reward: Decimal },
    ApproveSubmission,
    RejectSubmission,
    Withdrawal { amount: Decimal },
    CompleteWithdrawal,
    CancelWithdrawal,
}

impl RecordKind {
    /// Name used for this kind in ledger files.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Deposit { .. } => "deposit",
            RecordKind::ConfirmDeposit => "confirm_deposit",
            RecordKind::Submission { .. } => "submission",
            RecordKind::ApproveSubmission => "approve_submission",
            RecordKind::RejectSubmission => "reject_submission",
            RecordKind::Withdrawal { .. } => "withdrawal",
            RecordKind::CompleteWithdrawal => "complete_withdrawal",
            RecordKind::CancelWithdrawal => "cancel_withdrawal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: RecordKind,
    pub account_id: u32,
    pub record_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Pending,
    Settled,
    Rejected,
}

/// An opening record as kept in the ledger, with its lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub record: Record,
    pub status: RecordStatus,
}

impl LedgerEntry {
    pub fn pending(record: Record) -> Self {
        Self {
            record,
            status: RecordStatus::Pending,
        }
    }
}

impl core::fmt::Display for Record {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{},account={},id={}",
            self.kind.name(),
            self.account_id,
            self.record_id
        )?;
        match self.kind {
            RecordKind::Deposit { amount } | RecordKind::Withdrawal { amount } => {
                write!(f, ",amount={}", amount)
            }
            RecordKind::Submission { reward } => write!(f, ",reward={}", reward),
            _ => Ok(()),
        }
    }
}
