use futures::StreamExt;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{
    AccountRepository, DeadLetterQueue, Error, Record, RecordKind, RecordStatus, RecordStream,
};

/// Counts from one processing run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub rejected: usize,
}

/// Replays ledger records into an account repository.
///
/// Records are applied one at a time through `&mut self`, so every
/// read-modify-write of an account's cached balance is serialized.
#[derive(Debug)]
pub struct Engine<I, O, D>
where
    I: RecordStream,
    O: AccountRepository,
    D: DeadLetterQueue,
{
    ingestion: I,
    repository: O,
    dlq: D,
}

impl<I, O, D> Engine<I, O, D>
where
    I: RecordStream,
    O: AccountRepository,
    D: DeadLetterQueue,
{
    pub fn new(ingestion: I, repository: O, dlq: D) -> Self {
        Self {
            ingestion,
            repository,
            dlq,
        }
    }

    pub async fn process(&mut self) -> Summary {
        let mut summary = Summary::default();
        let mut records = self.ingestion.stream();

        while let Some(record) = records.next().await {
            match record.and_then(|record| self.apply(record)) {
                Ok(()) => summary.applied += 1,
                Err(e) => {
                    summary.rejected += 1;
                    self.dlq.report(&e);
                }
            }
        }

        summary
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.repository.flush()
    }

    fn apply(&mut self, record: Record) -> Result<(), Error> {
        debug!(%record, "applying record");

        match record.kind {
            RecordKind::Deposit { .. } => self.repository.open_entry(&record),
            RecordKind::Submission { .. } => self.open_submission(&record),
            RecordKind::Withdrawal { amount } => self.open_withdrawal(&record, amount),
            RecordKind::ConfirmDeposit
            | RecordKind::ApproveSubmission
            | RecordKind::CompleteWithdrawal => self.settle(&record, true),
            RecordKind::RejectSubmission | RecordKind::CancelWithdrawal => {
                self.settle(&record, false)
            }
        }
    }

    fn open_submission(&mut self, record: &Record) -> Result<(), Error> {
        let unlocked = self
            .repository
            .get_account(record.account_id)
            .is_some_and(|account| account.has_deposited);
        if !unlocked {
            return Err(Error::TasksLocked(record.account_id));
        }
        self.repository.open_entry(record)
    }

    fn open_withdrawal(&mut self, record: &Record, amount: Decimal) -> Result<(), Error> {
        let balance = self
            .repository
            .get_account(record.account_id)
            .map_or(Decimal::ZERO, |account| account.balance);
        let available =
            balance.saturating_sub(self.repository.pending_withdrawals(record.account_id));

        if amount > available {
            return Err(Error::InsufficientBalance {
                account_id: record.account_id,
                requested: amount,
                available: available.max(Decimal::ZERO),
            });
        }
        self.repository.open_entry(record)
    }

    /// Settles the pending entry `record` refers to. `accept` credits the
    /// entry's amount to the account; otherwise it is only marked rejected.
    /// A failed credit leaves the entry pending.
    fn settle(&mut self, record: &Record, accept: bool) -> Result<(), Error> {
        let kind = self.pending_kind(record)?;

        if accept {
            let account = self.repository.get_or_create_account(record.account_id);
            match kind {
                RecordKind::Deposit { amount } => account.confirm_deposit(amount)?,
                RecordKind::Submission { reward } => account.credit_reward(reward)?,
                RecordKind::Withdrawal { amount } => account.complete_withdrawal(amount)?,
                _ => {}
            }
            debug!(
                account = record.account_id,
                balance = %account.balance,
                has_deposited = account.has_deposited,
                "balance recomputed"
            );
        }

        let entry = self
            .repository
            .get_entry_mut(record.record_id)
            .ok_or(Error::UnknownRecord(record.record_id))?;
        entry.status = if accept {
            RecordStatus::Settled
        } else {
            RecordStatus::Rejected
        };
        Ok(())
    }

    /// Kind of the pending opening entry a settling `record` may act on.
    fn pending_kind(&mut self, record: &Record) -> Result<RecordKind, Error> {
        let entry = self
            .repository
            .get_entry_mut(record.record_id)
            .ok_or(Error::UnknownRecord(record.record_id))?;

        if entry.record.account_id != record.account_id {
            return Err(Error::AccountMismatch {
                record_id: record.record_id,
                account_id: record.account_id,
            });
        }

        let matches_kind = matches!(
            (entry.record.kind, record.kind),
            (RecordKind::Deposit { .. }, RecordKind::ConfirmDeposit)
                | (
                    RecordKind::Submission { .. },
                    RecordKind::ApproveSubmission | RecordKind::RejectSubmission
                )
                | (
                    RecordKind::Withdrawal { .. },
                    RecordKind::CompleteWithdrawal | RecordKind::CancelWithdrawal
                )
        );
        if !matches_kind {
            return Err(Error::InvalidState {
                record_id: record.record_id,
                reason: format!("{:?} does not apply to {:?}", record.kind, entry.record.kind),
            });
        }
        if entry.status != RecordStatus::Pending {
            return Err(Error::InvalidState {
                record_id: record.record_id,
                reason: format!("already {:?}", entry.status),
            });
        }

        Ok(entry.record.kind)
    }
}
