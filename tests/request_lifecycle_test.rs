use service_triage::{
    Department, KeywordClassifier, NewRequest, Priority, RequestFilter, RequestStore,
    TriageError, WorkflowStatus,
};

fn submit(store: &mut RequestStore, summary: &str, description: &str) -> u64 {
    store
        .create(
            NewRequest {
                channel: "Walk-in".to_string(),
                requester_type: "Resident".to_string(),
                summary: summary.to_string(),
                description: description.to_string(),
            },
            &KeywordClassifier,
        )
        .unwrap()
        .id
}

#[test]
fn test_request_walks_full_lifecycle() {
    let mut store = RequestStore::new();
    let id = submit(&mut store, "Trash not collected", "Bins full since Monday");

    let request = store.get(id).unwrap();
    assert_eq!(request.status, WorkflowStatus::New);
    assert_eq!(request.department, Some(Department::PublicWorks));
    assert_eq!(request.priority, Some(Priority::Low));

    let visited: Vec<WorkflowStatus> = (0..6).map(|_| store.advance(id).unwrap()).collect();
    assert_eq!(
        visited,
        vec![
            WorkflowStatus::Triage,
            WorkflowStatus::Assigned,
            WorkflowStatus::InProgress,
            WorkflowStatus::Resolved,
            WorkflowStatus::Closed,
            WorkflowStatus::Closed,
        ]
    );
}

#[test]
fn test_dashboard_filters() {
    let mut store = RequestStore::new();
    let pothole = submit(&mut store, "Pothole", "Deep one on 5th");
    submit(&mut store, "Email outage", "Nobody in the office can send mail");
    submit(&mut store, "Benefits enrollment", "When does it open?");
    store.advance(pothole).unwrap();

    let triage = store.filter(RequestFilter {
        department: None,
        status: Some(WorkflowStatus::Triage),
    });
    assert_eq!(triage.len(), 1);
    assert_eq!(triage[0].id, pothole);

    assert_eq!(
        store.departments(),
        vec![Department::Hr, Department::It, Department::PublicWorks]
    );

    let summary = store.summary();
    assert_eq!(summary.by_status[&WorkflowStatus::New], 2);
    assert_eq!(summary.by_status[&WorkflowStatus::Triage], 1);
}

#[test]
fn test_blank_submission_is_rejected() {
    let mut store = RequestStore::new();
    let err = store
        .create(
            NewRequest {
                channel: "Phone".to_string(),
                requester_type: "Employee".to_string(),
                summary: String::new(),
                description: "Something".to_string(),
            },
            &KeywordClassifier,
        )
        .unwrap_err();

    assert!(matches!(err, TriageError::ValidationError { .. }));
    assert_eq!(
        err.user_friendly_message(),
        "Please fill in both summary and description."
    );
}
