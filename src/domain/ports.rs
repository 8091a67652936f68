use crate::domain::model::{ClassificationResult, SeedRecord, TriageResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn seed_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
}

/// Seam between request intake and the rule engine.
pub trait Classifier: Send + Sync {
    fn classify(&self, summary: &str, description: &str, channel: &str) -> ClassificationResult;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SeedRecord>>;
    async fn transform(&self, data: Vec<SeedRecord>) -> Result<TriageResult>;
    async fn load(&self, result: TriageResult) -> Result<String>;
}
