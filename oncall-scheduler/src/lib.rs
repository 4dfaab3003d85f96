//! Fair, rule-compliant on-call roster generation for a small clinical team.
//!
//! Given a start date, a block length, and a roster of staff with roles and personal
//! unavailability, [`generate_roster`] produces a day-by-day assignment that covers every day,
//! respects role-based pairing rules, and distributes load (total, weekend, Friday) evenly.

pub mod calendar;
pub mod decode;
pub mod dto;
pub mod error;
pub mod model;
pub mod solver;
pub mod staff;

use std::sync::Arc;

use tracing::instrument;

use calendar::Block;
use dto::{RosterFailure, RosterRequest, RosterResponse, RosterSuccess};
use error::SchedulerError;
use staff::{Role, StaffMember};

/// Validates the request at the semantic level, builds the calendar/staff model, solves, and
/// decodes. Semantic validation runs in full before any model is built, so an invalid request
/// never touches the solver.
#[instrument(skip(request), fields(staff_count = request.staff.len(), num_days = request.num_days))]
pub fn generate_roster(request: &RosterRequest) -> Result<RosterSuccess, SchedulerError> {
    validate_request(request)?;

    let start_date = Block::parse_date(&request.start_date)?;
    let block = Arc::new(Block::new(start_date, request.num_days)?);

    let mut staff = Vec::with_capacity(request.staff.len());
    for staff_request in &request.staff {
        staff.push(StaffMember::new(
            staff_request.name.clone(),
            &staff_request.role,
            staff_request.target_shifts,
            &staff_request.unavailable_days,
            &block,
        )?);
    }
    let staff = Arc::new(staff);

    let seed = solver::resolve_seed(request.random_seed);
    let solution = solver::solve(staff, block.clone(), seed)?;
    let decoded = decode::decode(&solution)?;

    Ok(RosterSuccess {
        status: "success".to_string(),
        start_date: block.start_date.format("%Y-%m-%d").to_string(),
        end_date: block.end_date().format("%Y-%m-%d").to_string(),
        schedule: decoded.schedule,
        staff_assignments: decoded.staff_assignments,
    })
}

/// Same orchestration as [`generate_roster`], but formats the result as the success-or-failure
/// response envelope spec.md §6 describes, ready to hand to a caller over the wire.
#[instrument(skip(request), fields(staff_count = request.staff.len(), num_days = request.num_days))]
pub fn generate_roster_response(request: &RosterRequest) -> RosterResponse {
    match generate_roster(request) {
        Ok(success) => RosterResponse::Success(success),
        Err(error) => RosterResponse::Failure(RosterFailure::from(error)),
    }
}

/// Semantic validation the CP model itself is silent about: without these checks, infeasibility
/// would be the only signal for a roster that can never be scheduled.
fn validate_request(request: &RosterRequest) -> Result<(), SchedulerError> {
    if !(calendar::MIN_NUM_DAYS..=calendar::MAX_NUM_DAYS).contains(&request.num_days) {
        return Err(SchedulerError::InvalidRange {
            field: "num_days".to_string(),
            min: calendar::MIN_NUM_DAYS,
            max: calendar::MAX_NUM_DAYS,
            actual: request.num_days,
        });
    }

    if request.staff.len() < 2 {
        return Err(SchedulerError::InsufficientStaff(request.staff.len()));
    }

    let has_junior = request.staff.iter().any(|s| s.role == "Junior");
    let has_senior = request.staff.iter().any(|s| s.role == "Senior");
    if has_junior && !has_senior {
        return Err(SchedulerError::MissingSenior);
    }

    for staff_request in &request.staff {
        Role::parse(&staff_request.role)?;

        if staff_request.target_shifts < 1 {
            return Err(SchedulerError::InvalidRange {
                field: "target_shifts".to_string(),
                min: 1,
                max: i64::MAX,
                actual: staff_request.target_shifts,
            });
        }

        for day in &staff_request.unavailable_days {
            Block::parse_date(day)?;
        }
    }

    Block::parse_date(&request.start_date)?;

    Ok(())
}
