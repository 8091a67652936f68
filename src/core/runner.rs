use crate::core::Pipeline;
use crate::domain::model::Priority;
use crate::utils::error::Result;
use std::time::Instant;

/// Drives a [`Pipeline`] through extract, transform and load.
pub struct TriageRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> TriageRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting intake run...");

        let seeds = self.pipeline.extract().await?;
        tracing::info!("Extracted {} seed requests", seeds.len());

        let result = self.pipeline.transform(seeds).await?;
        let count = |priority: &Priority| {
            result.summary.by_priority.get(priority).copied().unwrap_or(0)
        };
        tracing::info!(
            "Classified {} requests (High: {}, Medium: {}, Low: {})",
            result.summary.total,
            count(&Priority::High),
            count(&Priority::Medium),
            count(&Priority::Low),
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Reports saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
