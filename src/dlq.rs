use tracing::warn;

use crate::domain::{DeadLetterQueue, Error};

/// Reports rejected records through the log on stderr.
#[derive(Default, Debug)]
pub struct LogDlq {}

impl DeadLetterQueue for LogDlq {
    fn report(&self, error: &Error) {
        warn!(%error, "record rejected");
    }
}
