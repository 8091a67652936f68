use crate::core::classifier::KeywordClassifier;
use crate::core::store::RequestStore;
use crate::core::{Classifier, ConfigProvider, Pipeline, SeedRecord, Storage, TriageResult};
use crate::domain::model::ServiceRequest;
use crate::utils::error::{Result, TriageError};
use serde::Serialize;

pub const CSV_FILENAME: &str = "triaged_requests.csv";
pub const JSON_FILENAME: &str = "triaged_requests.json";
pub const SUMMARY_FILENAME: &str = "summary.json";

/// Output formats understood by [`IntakePipeline::load`].
pub const OUTPUT_FORMATS: [&str; 3] = ["csv", "json", "summary"];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: u64,
    channel: &'a str,
    requester_type: &'a str,
    status: &'static str,
    priority: &'static str,
    department: &'static str,
    category: &'static str,
    summary: &'a str,
}

impl<'a> From<&'a ServiceRequest> for CsvRow<'a> {
    fn from(request: &'a ServiceRequest) -> Self {
        Self {
            id: request.id,
            channel: &request.channel,
            requester_type: &request.requester_type,
            status: request.status.as_str(),
            priority: request.priority.map_or("", |p| p.as_str()),
            department: request.department.map_or("", |d| d.as_str()),
            category: request.category.map_or("", |c| c.as_str()),
            summary: &request.summary,
        }
    }
}

fn render_csv(requests: &[ServiceRequest]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for request in requests {
        writer.serialize(CsvRow::from(request))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TriageError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| TriageError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// Bootstrap intake: seed file in, classified requests and reports out.
pub struct IntakePipeline<S: Storage, C: ConfigProvider, K: Classifier = KeywordClassifier> {
    storage: S,
    config: C,
    classifier: K,
}

impl<S: Storage, C: ConfigProvider> IntakePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            classifier: KeywordClassifier,
        }
    }
}

impl<S: Storage, C: ConfigProvider, K: Classifier> IntakePipeline<S, C, K> {
    pub fn with_classifier(storage: S, config: C, classifier: K) -> Self {
        Self {
            storage,
            config,
            classifier,
        }
    }

    fn output_file(&self, filename: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), filename)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, K: Classifier> Pipeline for IntakePipeline<S, C, K> {
    async fn extract(&self) -> Result<Vec<SeedRecord>> {
        let seed_file = self.config.seed_file();
        tracing::debug!("Reading seed requests from: {}", seed_file);

        let bytes = match self.storage.read_file(seed_file).await {
            Ok(bytes) => bytes,
            Err(TriageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Seed file {} not found, starting with no requests", seed_file);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("Seed file {} is empty", seed_file);
            return Ok(Vec::new());
        }

        let records: Vec<SeedRecord> = serde_json::from_slice(&bytes)?;
        tracing::debug!("Parsed {} seed requests", records.len());
        Ok(records)
    }

    async fn transform(&self, data: Vec<SeedRecord>) -> Result<TriageResult> {
        let mut store = RequestStore::new();

        for seed in data {
            match store.insert_seed(seed, &self.classifier) {
                Ok(request) => tracing::debug!(
                    "Seed #{} routed to {} ({})",
                    request.id,
                    request.department.map_or("-", |d| d.as_str()),
                    request.priority.map_or("-", |p| p.as_str())
                ),
                Err(TriageError::DuplicateRequest { id }) => {
                    tracing::warn!("Skipping duplicate seed request #{}", id);
                }
                Err(e) => return Err(e),
            }
        }

        let summary = store.summary();
        let requests = store.into_requests();
        let csv_output = render_csv(&requests)?;

        Ok(TriageResult {
            requests,
            csv_output,
            summary,
        })
    }

    async fn load(&self, result: TriageResult) -> Result<String> {
        for format in self.config.output_formats() {
            match format.as_str() {
                "csv" => {
                    self.storage
                        .write_file(&self.output_file(CSV_FILENAME), result.csv_output.as_bytes())
                        .await?;
                }
                "json" => {
                    let json = serde_json::to_vec_pretty(&result.requests)?;
                    self.storage
                        .write_file(&self.output_file(JSON_FILENAME), &json)
                        .await?;
                }
                "summary" => {
                    let json = serde_json::to_vec_pretty(&result.summary)?;
                    self.storage
                        .write_file(&self.output_file(SUMMARY_FILENAME), &json)
                        .await?;
                }
                other => {
                    return Err(TriageError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: format!("Valid formats: {}", OUTPUT_FORMATS.join(", ")),
                    });
                }
            }
            tracing::debug!("Wrote {} output", format);
        }

        Ok(self.config.output_path().to_string())
    }
}
