use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

fn default_num_days() -> i64 {
    28
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffRequest {
    pub name: String,
    pub role: String,
    pub target_shifts: i64,
    #[serde(default)]
    pub unavailable_days: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterRequest {
    pub staff: Vec<StaffRequest>,
    pub start_date: String,
    #[serde(default = "default_num_days")]
    pub num_days: i64,
    #[serde(default)]
    pub random_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScheduleEntry {
    Solo(String),
    Pair {
        senior: String,
        junior: String,
        display: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffAssignment {
    pub role: String,
    pub target: i64,
    pub actual: i64,
    pub weekend_shifts: i64,
    pub friday_shifts: i64,
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterSuccess {
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub schedule: BTreeMap<String, ScheduleEntry>,
    pub staff_assignments: BTreeMap<String, StaffAssignment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterFailure {
    pub status: String,
    pub message: String,
}

impl RosterFailure {
    pub fn new(message: impl Into<String>) -> Self {
        RosterFailure {
            status: "no_solution".to_string(),
            message: message.into(),
        }
    }
}

impl From<SchedulerError> for RosterFailure {
    fn from(error: SchedulerError) -> Self {
        RosterFailure::new(error.to_string())
    }
}

/// The response envelope spec.md §6 describes: either the success shape or the failure shape,
/// never both. `#[serde(untagged)]` picks whichever variant's fields match, which is how the two
/// shapes are told apart on the wire (by presence of `schedule` vs `message`), not by a tag field.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RosterResponse {
    Success(RosterSuccess),
    Failure(RosterFailure),
}

impl RosterResponse {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_serializes_with_status_field() {
        let success = RosterSuccess {
            status: "success".to_string(),
            start_date: "2024-12-02".to_string(),
            end_date: "2024-12-08".to_string(),
            schedule: BTreeMap::new(),
            staff_assignments: BTreeMap::new(),
        };
        let json = RosterResponse::Success(success).to_json().unwrap();
        assert!(json.contains("\"status\":\"success\""));
    }

    #[test]
    fn failure_envelope_serializes_with_message() {
        let failure = RosterFailure::from(SchedulerError::InsufficientStaff(1));
        let json = RosterResponse::Failure(failure).to_json().unwrap();
        assert!(json.contains("\"status\":\"no_solution\""));
        assert!(json.contains("At least 2 staff members"));
    }
}
