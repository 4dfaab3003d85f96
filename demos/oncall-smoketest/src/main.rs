use oncall_scheduler::dto::{RosterRequest, ScheduleEntry, StaffRequest};
use oncall_scheduler::generate_roster;

fn staff(name: &str, role: &str, target: i64) -> StaffRequest {
    StaffRequest {
        name: name.to_string(),
        role: role.to_string(),
        target_shifts: target,
        unavailable_days: Vec::new(),
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("on-call roster smoke test");

    let request = RosterRequest {
        staff: vec![
            staff("Smith", "Senior", 10),
            staff("Brown", "Senior", 8),
            staff("Jones", "Intermediate", 10),
            staff("Williams", "Junior", 8),
        ],
        start_date: "2024-12-02".to_string(),
        num_days: 28,
        random_seed: Some(1),
    };

    match generate_roster(&request) {
        Ok(result) => {
            println!("{} .. {}", result.start_date, result.end_date);
            for (date, entry) in &result.schedule {
                match entry {
                    ScheduleEntry::Solo(name) => println!("{date}: {name}"),
                    ScheduleEntry::Pair { display, .. } => println!("{date}: {display}"),
                }
            }
            println!();
            for (name, assignment) in &result.staff_assignments {
                println!(
                    "{name}: {} shifts (target {}), {} weekend, {} Friday",
                    assignment.actual, assignment.target, assignment.weekend_shifts, assignment.friday_shifts
                );
            }
        }
        Err(error) => {
            eprintln!("could not generate roster: {error}");
            std::process::exit(1);
        }
    }
}
