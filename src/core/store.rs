use crate::domain::model::{
    Department, NewRequest, Priority, SeedRecord, ServiceRequest, TriageSummary, WorkflowStatus,
};
use crate::domain::ports::Classifier;
use crate::utils::error::{Result, TriageError};
use chrono::Utc;
use std::collections::BTreeSet;

/// Dashboard-style filter; `None` means "All".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub department: Option<Department>,
    pub status: Option<WorkflowStatus>,
}

impl RequestFilter {
    pub fn matches(&self, request: &ServiceRequest) -> bool {
        let department_ok = self
            .department
            .map_or(true, |department| request.department == Some(department));
        let status_ok = self.status.map_or(true, |status| request.status == status);
        department_ok && status_ok
    }
}

/// In-memory collection of service requests, owned by whoever orchestrates intake.
///
/// Requests are kept in insertion order. The classifier is passed in per call so
/// the store never holds rule state of its own.
#[derive(Debug, Clone, Default)]
pub struct RequestStore {
    requests: Vec<ServiceRequest>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceRequest> {
        self.requests.iter()
    }

    pub fn get(&self, id: u64) -> Option<&ServiceRequest> {
        self.requests.iter().find(|request| request.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut ServiceRequest> {
        self.requests
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or(TriageError::RequestNotFound { id })
    }

    fn next_id(&self) -> Result<u64> {
        self.requests
            .iter()
            .map(|request| request.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| TriageError::validation("No request ids left to assign."))
    }

    pub fn into_requests(self) -> Vec<ServiceRequest> {
        self.requests
    }

    /// Submits a new request: validates it, assigns the next id and routes it.
    pub fn create<C: Classifier + ?Sized>(
        &mut self,
        new_request: NewRequest,
        classifier: &C,
    ) -> Result<&ServiceRequest> {
        if new_request.summary.trim().is_empty() || new_request.description.trim().is_empty() {
            return Err(TriageError::validation(
                "Please fill in both summary and description.",
            ));
        }

        let id = self.next_id()?;
        let classification = classifier.classify(
            &new_request.summary,
            &new_request.description,
            &new_request.channel,
        );
        let now = Utc::now();

        let mut request = ServiceRequest {
            id,
            channel: new_request.channel,
            requester_type: new_request.requester_type,
            summary: new_request.summary,
            description: new_request.description,
            status: WorkflowStatus::New,
            department: None,
            category: None,
            priority: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        request.apply_classification(&classification);

        tracing::info!(
            "Request #{} created: {} / {} (confidence {}%)",
            id,
            classification.department,
            classification.priority,
            classification.confidence
        );

        self.requests.push(request);
        Ok(&self.requests[self.requests.len() - 1])
    }

    /// Loads a bootstrap record, keeping its id and status.
    pub fn insert_seed<C: Classifier + ?Sized>(
        &mut self,
        seed: SeedRecord,
        classifier: &C,
    ) -> Result<&ServiceRequest> {
        if seed.id == 0 {
            return Err(TriageError::validation("Request ids must be positive."));
        }
        if self.get(seed.id).is_some() {
            return Err(TriageError::DuplicateRequest { id: seed.id });
        }

        let status = seed.status.parse::<WorkflowStatus>().unwrap_or_else(|_| {
            tracing::debug!(
                "Seed request #{} has unrecognised status '{}', starting at NEW",
                seed.id,
                seed.status
            );
            WorkflowStatus::New
        });

        let classification = classifier.classify(&seed.summary, &seed.description, &seed.channel);
        let now = Utc::now();

        let mut request = ServiceRequest {
            id: seed.id,
            channel: seed.channel,
            requester_type: seed.requester_type,
            summary: seed.summary,
            description: seed.description,
            status,
            department: None,
            category: None,
            priority: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        request.apply_classification(&classification);

        self.requests.push(request);
        Ok(&self.requests[self.requests.len() - 1])
    }

    /// Moves a request one step along the workflow and returns its new status.
    pub fn advance(&mut self, id: u64) -> Result<WorkflowStatus> {
        let request = self.get_mut(id)?;
        let previous = request.status;
        request.status = previous.next();
        request.updated_at = Some(Utc::now());

        tracing::info!("Request #{} advanced: {} -> {}", id, previous, request.status);
        Ok(request.status)
    }

    /// Re-derives routing from the request's current text.
    pub fn reclassify<C: Classifier + ?Sized>(
        &mut self,
        id: u64,
        classifier: &C,
    ) -> Result<&ServiceRequest> {
        let request = self.get_mut(id)?;
        let classification =
            classifier.classify(&request.summary, &request.description, &request.channel);
        request.apply_classification(&classification);
        request.updated_at = Some(Utc::now());

        tracing::debug!(
            "Request #{} reclassified: {} / {}",
            id,
            classification.department,
            classification.priority
        );
        Ok(&*request)
    }

    pub fn filter(&self, filter: RequestFilter) -> Vec<&ServiceRequest> {
        self.requests
            .iter()
            .filter(|request| filter.matches(request))
            .collect()
    }

    /// Distinct departments currently holding requests, sorted by name.
    pub fn departments(&self) -> Vec<Department> {
        let mut departments: Vec<Department> = self
            .requests
            .iter()
            .filter_map(|request| request.department)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        departments.sort_by_key(|department| department.as_str());
        departments
    }

    pub fn summary(&self) -> TriageSummary {
        let mut summary = TriageSummary {
            total: self.requests.len(),
            ..TriageSummary::default()
        };

        for status in WorkflowStatus::ALL {
            summary.by_status.insert(status, 0);
        }
        for priority in Priority::ALL {
            summary.by_priority.insert(priority, 0);
        }

        for request in &self.requests {
            *summary.by_status.entry(request.status).or_insert(0) += 1;
            if let Some(priority) = request.priority {
                *summary.by_priority.entry(priority).or_insert(0) += 1;
            }
            if let Some(department) = request.department {
                *summary.by_department.entry(department).or_insert(0) += 1;
            }
        }

        summary
    }
}
