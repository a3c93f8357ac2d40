use futures::Stream;

use crate::domain::{Account, Error, LedgerEntry, Record};

pub trait RecordStream {
    type Stream: Stream<Item = Result<Record, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::Stream;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

pub trait AccountRepository {
    fn get_or_create_account(&mut self, account_id: u32) -> &mut Account;
    fn get_account(&self, account_id: u32) -> Option<&Account>;
    fn flush(&mut self) -> Result<(), Error>;

    /// Stores an opening record as pending. Fails if the id is taken.
    fn open_entry(&mut self, record: &Record) -> Result<(), Error>;

    fn get_entry_mut(&mut self, record_id: u32) -> Option<&mut LedgerEntry>;

    /// Sum of withdrawal amounts still pending for the account.
    fn pending_withdrawals(&self, account_id: u32) -> rust_decimal::Decimal;
}
