use std::path::PathBuf;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use backend_domain::{ReferenceDatasetRepository, TransactionTable};

/// Labelled reference dataset stored as a CSV file on local disk.
pub struct CsvDatasetRepository {
    path: PathBuf,
}

impl CsvDatasetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReferenceDatasetRepository for CsvDatasetRepository {
    async fn load_reference(&self) -> anyhow::Result<TransactionTable> {
        let bytes = fs::read(&self.path).await.with_context(|| {
            format!(
                "failed to read reference dataset {}",
                self.path.display()
            )
        })?;
        let table = TransactionTable::from_csv_reader(bytes.as_slice())?;
        debug!(
            path = %self.path.display(),
            rows = table.len(),
            "reference dataset loaded"
        );
        Ok(table)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let metadata = fs::metadata(&self.path).await.with_context(|| {
            format!("reference dataset {} not found", self.path.display())
        })?;
        if !metadata.is_file() {
            return Err(anyhow!(
                "reference dataset {} is not a file",
                self.path.display()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn loads_reference_rows_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "Time,V1,Amount,Class").expect("write");
        writeln!(file, "0,-1.35,149.62,0").expect("write");
        writeln!(file, "406,-2.31,0.0,1").expect("write");
        file.flush().expect("flush");

        let repo = CsvDatasetRepository::new(file.path());
        repo.ping().await.expect("ping");
        let table = repo.load_reference().await.expect("load");
        assert_eq!(table.len(), 2);
        assert!(table.has_column("Class"));
        let amounts = table.numeric_column("Amount").expect("amounts");
        assert_eq!(amounts, vec![Some(149.62), Some(0.0)]);
    }

    #[tokio::test]
    async fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("creditcard.csv");
        let repo = CsvDatasetRepository::new(&path);
        assert!(repo.ping().await.is_err());
        let err = repo.load_reference().await.expect_err("missing");
        assert!(format!("{:#}", err).contains("creditcard.csv"));
    }

    #[tokio::test]
    async fn directories_are_not_ready() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = CsvDatasetRepository::new(dir.path());
        assert!(repo.ping().await.is_err());
    }
}
