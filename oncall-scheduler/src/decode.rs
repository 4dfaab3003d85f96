use std::collections::{BTreeMap, HashSet};

use crate::dto::{ScheduleEntry, StaffAssignment};
use crate::error::SchedulerError;
use crate::model::{DayAssignment, RosterSolution};

#[derive(Debug)]
pub struct Decoded {
    pub schedule: BTreeMap<String, ScheduleEntry>,
    pub staff_assignments: BTreeMap<String, StaffAssignment>,
}

/// Direct map from the structural solution to the external schedule/tally shapes. The day-count
/// check is redundant with `DayAssignment` carrying exactly one entry per index, but is kept as a
/// defensive guard against a future representation change. A shortfall or surplus here is
/// reclassified to `NoSolution`, per spec's "any shortfall or surplus in schedule length" rule;
/// `DecodeInvariant` is reserved for a day whose collected assignment set doesn't match either
/// coverage shape, which `DayAssignment` makes structurally unreachable.
pub fn decode(solution: &RosterSolution) -> Result<Decoded, SchedulerError> {
    let mut schedule = BTreeMap::new();

    for (day_index, assignment) in solution.days.iter().enumerate() {
        let date = solution.block.dates[day_index];
        let entry = match assignment {
            DayAssignment::Solo(staff_index) => ScheduleEntry::Solo(solution.staff[*staff_index].name.clone()),
            DayAssignment::Pair { senior, junior } => {
                let senior_name = solution.staff[*senior].name.clone();
                let junior_name = solution.staff[*junior].name.clone();
                let display = format!("{} (Sr) + {} (Jr)", senior_name, junior_name);
                ScheduleEntry::Pair {
                    senior: senior_name,
                    junior: junior_name,
                    display,
                }
            }
        };
        schedule.insert(date.format("%Y-%m-%d").to_string(), entry);
    }

    if schedule.len() != solution.block.num_days {
        return Err(SchedulerError::NoSolution(format!(
            "expected {} days, got {}",
            solution.block.num_days,
            schedule.len()
        )));
    }

    let by_staff = solution.assignments_by_staff();
    let weekend: HashSet<usize> = solution.block.weekend_indices.iter().copied().collect();
    let friday: HashSet<usize> = solution.block.friday_indices.iter().copied().collect();

    let mut staff_assignments = BTreeMap::new();
    for (staff_index, staff) in solution.staff.iter().enumerate() {
        let day_indices = &by_staff[staff_index];
        let days: Vec<String> = day_indices
            .iter()
            .map(|d| solution.block.dates[*d].format("%Y-%m-%d").to_string())
            .collect();
        let weekend_shifts = day_indices.iter().filter(|d| weekend.contains(d)).count() as i64;
        let friday_shifts = day_indices.iter().filter(|d| friday.contains(d)).count() as i64;

        staff_assignments.insert(
            staff.name.clone(),
            StaffAssignment {
                role: staff.role.as_str().to_string(),
                target: staff.target_shifts,
                actual: day_indices.len() as i64,
                weekend_shifts,
                friday_shifts,
                days,
            },
        );
    }

    Ok(Decoded {
        schedule,
        staff_assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Block;
    use crate::staff::StaffMember;
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[test]
    fn detects_a_short_day_list() {
        let block = Arc::new(Block::new(NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(), 7).unwrap());
        let staff = Arc::new(vec![StaffMember::new(
            "Smith".to_string(),
            "Senior",
            4,
            &[],
            &block,
        )
        .unwrap()]);
        let solution = RosterSolution {
            staff,
            block,
            days: vec![DayAssignment::Solo(0); 6],
        };
        let result = decode(&solution);
        match result {
            Err(SchedulerError::NoSolution(message)) => {
                assert!(message.contains("expected 7 days, got 6"));
            }
            other => panic!("expected NoSolution, got {other:?}"),
        }
    }

    #[test]
    fn pair_day_display_string_matches_format() {
        let block = Arc::new(Block::new(NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(), 7).unwrap());
        let staff = Arc::new(vec![
            StaffMember::new("Smith".to_string(), "Senior", 4, &[], &block).unwrap(),
            StaffMember::new("Williams".to_string(), "Junior", 4, &[], &block).unwrap(),
        ]);
        let mut days = vec![DayAssignment::Solo(0); 7];
        days[0] = DayAssignment::Pair { senior: 0, junior: 1 };
        let solution = RosterSolution { staff, block, days };
        let decoded = decode(&solution).unwrap();
        let first = decoded.schedule.values().next().unwrap();
        match first {
            ScheduleEntry::Pair { display, .. } => assert_eq!(display, "Smith (Sr) + Williams (Jr)"),
            ScheduleEntry::Solo(_) => panic!("expected a pair entry"),
        }
    }
}
