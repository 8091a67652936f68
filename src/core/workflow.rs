//! Fixed request lifecycle: `NEW → TRIAGE → ASSIGNED → IN_PROGRESS → RESOLVED → CLOSED`.

use crate::domain::model::WorkflowStatus;

impl WorkflowStatus {
    /// Successor in the lifecycle. `Closed` is terminal and maps to itself.
    pub fn next(self) -> WorkflowStatus {
        if self == WorkflowStatus::Closed {
            return WorkflowStatus::Closed;
        }

        let states = WorkflowStatus::ALL;
        match states.iter().position(|state| *state == self) {
            Some(index) if index + 1 < states.len() => states[index + 1],
            _ => WorkflowStatus::Closed,
        }
    }
}

/// Advances a status given in its wire form.
///
/// Unrecognised input is not an error: the request restarts at `NEW`.
pub fn advance_workflow(current_status: &str) -> WorkflowStatus {
    match current_status.parse::<WorkflowStatus>() {
        Ok(status) => status.next(),
        Err(_) => WorkflowStatus::New,
    }
}
