use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::domain::traits::RecordStream;
use crate::domain::{Error, Money, Record, RecordKind};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    account: u32,
    id: u32,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    amount: Option<Money>,
}

fn positive(kind: &str, money: Money) -> Result<rust_decimal::Decimal, Error> {
    if money.is_negative() || money.amount().is_zero() {
        return Err(Error::Ingestion(format!(
            "Amount {} for {} must be positive",
            money, kind
        )));
    }
    Ok(money.amount())
}

impl TryFrom<CsvRow> for Record {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let name = row.kind.trim().to_ascii_lowercase();
        let kind = match (name.as_str(), row.amount) {
            ("deposit", Some(m)) => RecordKind::Deposit {
                amount: positive(&name, m)?,
            },
            ("submission", Some(m)) => RecordKind::Submission {
                reward: positive(&name, m)?,
            },
            ("withdrawal", Some(m)) => RecordKind::Withdrawal {
                amount: positive(&name, m)?,
            },
            ("confirm_deposit", None) => RecordKind::ConfirmDeposit,
            ("approve_submission", None) => RecordKind::ApproveSubmission,
            ("reject_submission", None) => RecordKind::RejectSubmission,
            ("complete_withdrawal", None) => RecordKind::CompleteWithdrawal,
            ("cancel_withdrawal", None) => RecordKind::CancelWithdrawal,
            ("deposit" | "submission" | "withdrawal", None) => {
                return Err(Error::Ingestion(format!(
                    "Missing amount for {} record {}",
                    name, row.id
                )));
            }
            (other, _) => {
                return Err(Error::Ingestion(format!(
                    "Invalid record type or unexpected amount: {}",
                    other
                )));
            }
        };

        Ok(Record {
            kind,
            account_id: row.account,
            record_id: row.id,
        })
    }
}

impl<R: Read + Send + 'static> RecordStream for CsvReader<R> {
    type Stream = Pin<Box<dyn Stream<Item = Result<Record, Error>> + Send>>;

    fn stream(&mut self) -> Self::Stream {
        // Already consumed readers yield nothing.
        let Some(reader) = self.reader.take() else {
            return Box::pin(stream::empty::<Result<Record, Error>>());
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Record::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use rust_decimal::Decimal;

    async fn read_all(input: &'static str) -> Vec<Result<Record, Error>> {
        CsvReader::new(input.as_bytes()).stream().collect().await
    }

    #[tokio::test]
    async fn parses_every_record_type() {
        let rows = read_all(
            "type, account, id, amount\n\
             deposit, 1, 1, 12.5\n\
             confirm_deposit, 1, 1,\n\
             submission, 1, 2, 3\n\
             approve_submission, 1, 2,\n\
             reject_submission, 1, 2,\n\
             withdrawal, 1, 3, 1.25\n\
             Complete_Withdrawal, 1, 3,\n\
             cancel_withdrawal, 1, 3\n",
        )
        .await;

        let kinds: Vec<RecordKind> = rows.into_iter().map(|r| r.unwrap().kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecordKind::Deposit {
                    amount: Decimal::new(125, 1)
                },
                RecordKind::ConfirmDeposit,
                RecordKind::Submission {
                    reward: Decimal::from(3)
                },
                RecordKind::ApproveSubmission,
                RecordKind::RejectSubmission,
                RecordKind::Withdrawal {
                    amount: Decimal::new(125, 2)
                },
                RecordKind::CompleteWithdrawal,
                RecordKind::CancelWithdrawal,
            ]
        );
    }

    #[tokio::test]
    async fn bad_rows_do_not_stop_the_stream() {
        let rows = read_all(
            "type, account, id, amount\n\
             deposit, 1, 1, -5\n\
             deposit, 1, 2,\n\
             bonus, 1, 3, 1\n\
             confirm_deposit, 1, 1, 4\n\
             deposit, x, 4, 1\n\
             withdrawal, 9, 6, 0\n\
             submission, 1, 7, 0.00001\n\
             deposit, 1, 5, 20\n",
        )
        .await;

        assert_eq!(rows.len(), 8);
        assert!(
            rows[..7]
                .iter()
                .all(|r| matches!(r, Err(Error::Ingestion(_))))
        );
        assert_eq!(rows[7].as_ref().unwrap().record_id, 5);
    }

    #[tokio::test]
    async fn stream_is_consumed_once() {
        let mut reader = CsvReader::new("type,account,id,amount\ndeposit,1,1,1\n".as_bytes());
        assert_eq!(reader.stream().count().await, 1);
        assert_eq!(reader.stream().count().await, 0);
    }
}
