use async_trait::async_trait;

use crate::entities::TransactionTable;

#[async_trait]
pub trait ReferenceDatasetRepository: Send + Sync {
    /// Loads the full labelled reference dataset.
    async fn load_reference(&self) -> anyhow::Result<TransactionTable>;
    /// Cheap availability check used by the readiness probe.
    async fn ping(&self) -> anyhow::Result<()>;
}
