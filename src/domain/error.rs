#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Record {0} not found")]
    UnknownRecord(u32),

    #[error("Record ID {0} already exists")]
    DuplicateRecord(u32),

    #[error("Record {record_id} does not belong to account {account_id}")]
    AccountMismatch { record_id: u32, account_id: u32 },

    #[error("Record {record_id} cannot be settled: {reason}")]
    InvalidState { record_id: u32, reason: String },

    #[error("Arithmetic overflow on total {0}")]
    Overflow(&'static str),

    #[error("Account {0} has not unlocked tasks yet")]
    TasksLocked(u32),

    #[error("Insufficient balance for account {account_id}: requested {requested}, available {available}")]
    InsufficientBalance {
        account_id: u32,
        requested: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },
}
