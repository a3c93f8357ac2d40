mod dlq;
mod domain;
mod engine;
mod ingestion;
mod output_repository;

use std::{env, fs::File, io};

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    dlq::LogDlq, domain::Error, engine::Engine, ingestion::CsvReader,
    output_repository::CsvOutput,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid CSV.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let file_path = env::args().nth(1).ok_or_else(|| {
        Error::Ingestion("usage: easyearn_ledger <records.csv>".to_string())
    })?;
    let file = File::open(&file_path)?;

    let mut engine = Engine::new(
        CsvReader::new(file),
        CsvOutput::new(io::stdout()),
        LogDlq::default(),
    );

    let summary = engine.process().await;
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        path = %file_path,
        "ledger replayed"
    );

    engine.flush()?;

    Ok(())
}
