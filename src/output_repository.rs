use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use rust_decimal::Decimal;

use crate::domain::{
    Account, AccountRepository, Error, LedgerEntry, Record, RecordKind, RecordStatus,
};

/// In-memory accounts and ledger, written out as CSV on flush.
#[derive(Debug)]
pub struct CsvOutput<W: Write> {
    accounts: BTreeMap<u32, Account>,
    ledger: HashMap<u32, LedgerEntry>,
    writer: W,
}

impl<W: Write> CsvOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            accounts: BTreeMap::new(),
            ledger: HashMap::new(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AccountRepository for CsvOutput<W> {
    fn get_or_create_account(&mut self, account_id: u32) -> &mut Account {
        self.accounts.entry(account_id).or_default()
    }

    fn get_account(&self, account_id: u32) -> Option<&Account> {
        self.accounts.get(&account_id)
    }

    fn open_entry(&mut self, record: &Record) -> Result<(), Error> {
        match self.ledger.entry(record.record_id) {
            Entry::Vacant(e) => {
                e.insert(LedgerEntry::pending(record.clone()));
                Ok(())
            }
            Entry::Occupied(_) => Err(Error::DuplicateRecord(record.record_id)),
        }
    }

    fn get_entry_mut(&mut self, record_id: u32) -> Option<&mut LedgerEntry> {
        self.ledger.get_mut(&record_id)
    }

    fn pending_withdrawals(&self, account_id: u32) -> Decimal {
        self.ledger
            .values()
            .filter(|e| e.status == RecordStatus::Pending && e.record.account_id == account_id)
            .filter_map(|e| match e.record.kind {
                RecordKind::Withdrawal { amount } => Some(amount),
                _ => None,
            })
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    fn flush(&mut self) -> Result<(), Error> {
        let mut out = csv::Writer::from_writer(&mut self.writer);
        out.write_record([
            "account",
            "deposits",
            "task_rewards",
            "withdrawn",
            "balance",
            "has_deposited",
        ])
        .map_err(csv_error)?;

        for (account_id, account) in &self.accounts {
            out.write_record([
                account_id.to_string(),
                format!("{:.4}", account.total_deposits),
                format!("{:.4}", account.total_task_rewards),
                format!("{:.4}", account.total_withdrawn),
                format!("{:.4}", account.balance),
                account.has_deposited.to_string(),
            ])
            .map_err(csv_error)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> Error {
    Error::IO(std::io::Error::other(e))
}
