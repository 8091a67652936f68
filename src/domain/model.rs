use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    #[default]
    New,
    Triage,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl WorkflowStatus {
    /// Every state in lifecycle order.
    pub const ALL: [WorkflowStatus; 6] = [
        WorkflowStatus::New,
        WorkflowStatus::Triage,
        WorkflowStatus::Assigned,
        WorkflowStatus::InProgress,
        WorkflowStatus::Resolved,
        WorkflowStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::New => "NEW",
            WorkflowStatus::Triage => "TRIAGE",
            WorkflowStatus::Assigned => "ASSIGNED",
            WorkflowStatus::InProgress => "IN_PROGRESS",
            WorkflowStatus::Resolved => "RESOLVED",
            WorkflowStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown workflow status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for WorkflowStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing target. `GeneralServices` is the fallback when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Public Works")]
    PublicWorks,
    Licensing,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "General Services")]
    GeneralServices,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::PublicWorks => "Public Works",
            Department::Licensing => "Licensing",
            Department::It => "IT",
            Department::Hr => "HR",
            Department::GeneralServices => "General Services",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Department::PublicWorks => Category::Infrastructure,
            Department::Licensing => Category::PermitsAndLicenses,
            Department::It => Category::Technology,
            Department::Hr => Category::HumanResources,
            Department::GeneralServices => Category::GeneralServices,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Infrastructure,
    #[serde(rename = "Permits & Licenses")]
    PermitsAndLicenses,
    Technology,
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "General Services")]
    GeneralServices,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Infrastructure => "Infrastructure",
            Category::PermitsAndLicenses => "Permits & Licenses",
            Category::Technology => "Technology",
            Category::HumanResources => "Human Resources",
            Category::GeneralServices => "General Services",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub priority: Priority,
    pub department: Department,
    pub category: Category,
    /// Percentage in `60..=95`, driven by the raw match count.
    pub confidence: u8,
    pub keywords_detected: BTreeSet<String>,
    pub department_reason: String,
    pub priority_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: u64,
    pub channel: String,
    pub requester_type: String,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub status: WorkflowStatus,
    pub department: Option<Department>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    pub fn apply_classification(&mut self, classification: &ClassificationResult) {
        self.department = Some(classification.department);
        self.category = Some(classification.category);
        self.priority = Some(classification.priority);
    }
}

/// Caller-supplied fields for a request submitted through the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRequest {
    pub channel: String,
    pub requester_type: String,
    pub summary: String,
    pub description: String,
}

/// One entry of the sample-data file loaded at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub id: u64,
    pub channel: String,
    pub requester_type: String,
    pub summary: String,
    pub description: String,
    #[serde(default = "default_seed_status")]
    pub status: String,
}

fn default_seed_status() -> String {
    WorkflowStatus::New.as_str().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TriageSummary {
    pub total: usize,
    pub by_status: BTreeMap<WorkflowStatus, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
    pub by_department: BTreeMap<Department, usize>,
}

#[derive(Debug, Clone)]
pub struct TriageResult {
    pub requests: Vec<ServiceRequest>,
    pub csv_output: String,
    pub summary: TriageSummary,
}
