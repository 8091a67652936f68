use service_triage::core::Pipeline;
use service_triage::{
    Department, IntakePipeline, LocalStorage, Priority, ServiceRequest, TomlConfig, TriageRunner,
    WorkflowStatus,
};
use std::path::Path;
use tempfile::TempDir;

fn sample_seed_file() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("sample_requests.json")
        .to_string_lossy()
        .into_owned()
}

fn config_for(seed_file: &str, output_path: &str, formats: &str) -> TomlConfig {
    let toml_content = format!(
        r#"
[intake]
name = "integration"
seed_file = "{}"

[output]
output_path = "{}"
output_formats = {}
"#,
        seed_file.replace('\\', "/"),
        output_path.replace('\\', "/"),
        formats
    );
    TomlConfig::from_toml_str(&toml_content).unwrap()
}

#[tokio::test]
async fn test_end_to_end_intake_of_sample_requests() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = config_for(
        &sample_seed_file(),
        &output_path,
        r#"["csv", "json", "summary"]"#,
    );
    let pipeline = IntakePipeline::new(LocalStorage::default(), config);
    let result = TriageRunner::new(pipeline).run().await;

    assert!(result.is_ok(), "intake failed: {:?}", result.err());
    assert_eq!(result.unwrap(), output_path);

    let csv_content =
        std::fs::read_to_string(temp_dir.path().join("triaged_requests.csv")).unwrap();
    assert!(csv_content.starts_with("id,channel,requester_type,status,priority,department,category,summary"));
    assert_eq!(csv_content.lines().count(), 7);
    assert!(csv_content.contains("Permits & Licenses"));

    let json_content = std::fs::read(temp_dir.path().join("triaged_requests.json")).unwrap();
    let requests: Vec<ServiceRequest> = serde_json::from_slice(&json_content).unwrap();
    assert_eq!(requests.len(), 6);

    let routed: Vec<(u64, Option<Department>, Option<Priority>)> = requests
        .iter()
        .map(|r| (r.id, r.department, r.priority))
        .collect();
    assert_eq!(
        routed,
        vec![
            (1, Some(Department::PublicWorks), Some(Priority::High)),
            (2, Some(Department::It), Some(Priority::Medium)),
            (3, Some(Department::Licensing), Some(Priority::Low)),
            (4, Some(Department::Hr), Some(Priority::Low)),
            (5, Some(Department::PublicWorks), Some(Priority::High)),
            (6, Some(Department::GeneralServices), Some(Priority::Low)),
        ]
    );
    assert_eq!(requests[3].status, WorkflowStatus::InProgress);

    let summary_content = std::fs::read(temp_dir.path().join("summary.json")).unwrap();
    let summary: serde_json::Value = serde_json::from_slice(&summary_content).unwrap();
    assert_eq!(summary["total"], 6);
    assert_eq!(summary["by_status"]["NEW"], 2);
    assert_eq!(summary["by_status"]["CLOSED"], 0);
    assert_eq!(summary["by_priority"]["High"], 2);
    assert_eq!(summary["by_priority"]["Low"], 3);
    assert_eq!(summary["by_department"]["Public Works"], 2);
    assert_eq!(summary["by_department"]["General Services"], 1);
}

#[tokio::test]
async fn test_only_requested_formats_are_written() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = config_for(&sample_seed_file(), &output_path, r#"["summary"]"#);
    let pipeline = IntakePipeline::new(LocalStorage::default(), config);
    TriageRunner::new(pipeline).run().await.unwrap();

    assert!(temp_dir.path().join("summary.json").exists());
    assert!(!temp_dir.path().join("triaged_requests.csv").exists());
    assert!(!temp_dir.path().join("triaged_requests.json").exists());
}

#[tokio::test]
async fn test_missing_seed_file_produces_empty_reports() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let missing = temp_dir.path().join("missing.json");

    let config = config_for(missing.to_str().unwrap(), &output_path, r#"["csv", "summary"]"#);
    let pipeline = IntakePipeline::new(LocalStorage::default(), config);

    let seeds = pipeline.extract().await.unwrap();
    assert!(seeds.is_empty());

    let result = pipeline.transform(seeds).await.unwrap();
    assert!(result.requests.is_empty());
    assert_eq!(result.summary.total, 0);
    assert_eq!(result.summary.by_status.len(), 6);

    pipeline.load(result).await.unwrap();
    let summary = std::fs::read_to_string(temp_dir.path().join("summary.json")).unwrap();
    assert!(summary.contains("\"total\": 0"));
}

#[tokio::test]
async fn test_malformed_seed_file_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let seed_path = temp_dir.path().join("broken.json");
    std::fs::write(&seed_path, "[{\"id\": 1,").unwrap();

    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();
    let config = config_for(seed_path.to_str().unwrap(), &output_path, r#"["csv"]"#);
    let pipeline = IntakePipeline::new(LocalStorage::default(), config);

    let err = TriageRunner::new(pipeline).run().await.unwrap_err();
    assert_eq!(
        err.category(),
        service_triage::utils::error::ErrorCategory::Data
    );
    assert!(!temp_dir.path().join("out").exists());
}
