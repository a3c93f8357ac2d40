pub mod account;
pub mod balance;
pub mod error;
pub mod money;
pub mod record;
pub mod traits;

pub use account::Account;
pub use error::Error;
pub use money::Money;
pub use record::{LedgerEntry, Record, RecordKind, RecordStatus};
pub use traits::{AccountRepository, DeadLetterQueue, RecordStream};
