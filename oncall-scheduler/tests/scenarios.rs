use oncall_scheduler::dto::{RosterRequest, ScheduleEntry, StaffRequest};
use oncall_scheduler::error::SchedulerError;
use oncall_scheduler::generate_roster;

fn staff(name: &str, role: &str, target: i64, unavailable_days: &[&str]) -> StaffRequest {
    StaffRequest {
        name: name.to_string(),
        role: role.to_string(),
        target_shifts: target,
        unavailable_days: unavailable_days.iter().map(|d| d.to_string()).collect(),
    }
}

#[test]
fn scenario_1_canonical_block() {
    let request = RosterRequest {
        staff: vec![
            staff("Smith", "Senior", 10, &[]),
            staff("Brown", "Senior", 8, &[]),
            staff("Jones", "Intermediate", 10, &[]),
            staff("Williams", "Junior", 8, &[]),
        ],
        start_date: "2024-12-02".to_string(),
        num_days: 28,
        random_seed: Some(1),
    };

    let result = generate_roster(&request).expect("canonical block should be schedulable");
    assert_eq!(result.schedule.len(), 28);

    for entry in result.schedule.values() {
        if let ScheduleEntry::Solo(name) = entry {
            assert_ne!(name, "Williams", "a Junior must never cover a day solo");
        }
    }

    for name in ["Smith", "Brown", "Jones"] {
        let assignment = &result.staff_assignments[name];
        assert!(
            (assignment.actual - assignment.target).abs() <= 1,
            "{name} actual {} vs target {}",
            assignment.actual,
            assignment.target
        );
    }

    let weekend_counts: Vec<i64> = result.staff_assignments.values().map(|a| a.weekend_shifts).collect();
    let friday_counts: Vec<i64> = result.staff_assignments.values().map(|a| a.friday_shifts).collect();
    assert!(weekend_counts.iter().max().unwrap() - weekend_counts.iter().min().unwrap() <= 1);
    assert!(friday_counts.iter().max().unwrap() - friday_counts.iter().min().unwrap() <= 1);
}

#[test]
fn scenario_2_missing_senior() {
    let request = RosterRequest {
        staff: vec![staff("A", "Intermediate", 14, &[]), staff("B", "Junior", 14, &[])],
        start_date: "2024-12-02".to_string(),
        num_days: 28,
        random_seed: Some(1),
    };
    assert!(matches!(generate_roster(&request), Err(SchedulerError::MissingSenior)));
}

#[test]
fn scenario_3_too_few_staff() {
    let request = RosterRequest {
        staff: vec![staff("A", "Senior", 28, &[])],
        start_date: "2024-12-02".to_string(),
        num_days: 28,
        random_seed: Some(1),
    };
    assert!(matches!(
        generate_roster(&request),
        Err(SchedulerError::InsufficientStaff(1))
    ));
}

#[test]
fn scenario_4_over_constrained_has_no_solution() {
    let all_seven_days = [
        "2024-12-02",
        "2024-12-03",
        "2024-12-04",
        "2024-12-05",
        "2024-12-06",
        "2024-12-07",
        "2024-12-08",
    ];
    let request = RosterRequest {
        staff: vec![
            staff("A", "Senior", 14, &all_seven_days),
            staff("B", "Senior", 14, &all_seven_days),
        ],
        start_date: "2024-12-02".to_string(),
        num_days: 7,
        random_seed: Some(1),
    };
    assert!(matches!(generate_roster(&request), Err(SchedulerError::NoSolution(_))));
}

#[test]
fn scenario_5_relaxation_recovers_from_back_to_back_infeasibility() {
    let request = RosterRequest {
        staff: vec![staff("A", "Senior", 7, &[]), staff("B", "Senior", 7, &[])],
        start_date: "2024-12-02".to_string(),
        num_days: 7,
        random_seed: Some(1),
    };
    let result = generate_roster(&request).expect("relaxed phase should recover a feasible split");
    assert_eq!(result.schedule.len(), 7);
    for assignment in result.staff_assignments.values() {
        assert!(assignment.actual >= 1);
    }
}

#[test]
fn scenario_6_unavailability_is_honoured() {
    let request = RosterRequest {
        staff: vec![
            staff("Smith", "Senior", 10, &["2024-12-14"]),
            staff("Brown", "Senior", 10, &[]),
            staff("Jones", "Intermediate", 8, &[]),
        ],
        start_date: "2024-12-02".to_string(),
        num_days: 28,
        random_seed: Some(1),
    };
    let result = generate_roster(&request).expect("should be schedulable");
    assert!(!result.staff_assignments["Smith"].days.contains(&"2024-12-14".to_string()));
}
