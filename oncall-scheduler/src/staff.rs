use std::collections::HashSet;

use chrono::NaiveDate;

use crate::calendar::Block;
use crate::error::SchedulerError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Role {
    Junior,
    Intermediate,
    Senior,
}

impl Role {
    pub fn parse(s: &str) -> Result<Role, SchedulerError> {
        match s {
            "Junior" => Ok(Role::Junior),
            "Intermediate" => Ok(Role::Intermediate),
            "Senior" => Ok(Role::Senior),
            other => Err(SchedulerError::InvalidRole(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Junior => "Junior",
            Role::Intermediate => "Intermediate",
            Role::Senior => "Senior",
        }
    }
}

/// A normalised staff record: role, target shift count, and unavailable dates intersected with
/// the active block. Immutable for the duration of a solve.
#[derive(Clone, Debug)]
pub struct StaffMember {
    pub name: String,
    pub role: Role,
    pub target_shifts: i64,
    /// Indices into the active `Block`, not raw dates: out-of-block unavailable dates are
    /// dropped here rather than carried around and re-checked at score time.
    pub unavailable_indices: HashSet<usize>,
}

impl StaffMember {
    pub fn new(
        name: String,
        role_str: &str,
        target_shifts: i64,
        unavailable_days: &[String],
        block: &Block,
    ) -> Result<Self, SchedulerError> {
        let role = Role::parse(role_str)?;

        if target_shifts < 1 {
            return Err(SchedulerError::InvalidRange {
                field: "target_shifts".to_string(),
                min: 1,
                max: i64::MAX,
                actual: target_shifts,
            });
        }

        let mut unavailable_indices = HashSet::new();
        for day in unavailable_days {
            let date: NaiveDate = Block::parse_date(day)?;
            if let Some(index) = block.index_of(date) {
                unavailable_indices.insert(index);
            }
        }

        Ok(StaffMember {
            name,
            role,
            target_shifts,
            unavailable_indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn block() -> Block {
        Block::new(NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(), 28).unwrap()
    }

    #[test]
    fn parses_canonical_roles() {
        assert_eq!(Role::parse("Senior").unwrap(), Role::Senior);
        assert_eq!(Role::parse("Intermediate").unwrap(), Role::Intermediate);
        assert_eq!(Role::parse("Junior").unwrap(), Role::Junior);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(matches!(Role::parse("Attending"), Err(SchedulerError::InvalidRole(_))));
    }

    #[test]
    fn drops_out_of_block_unavailable_days() {
        let block = block();
        let staff = StaffMember::new(
            "Smith".to_string(),
            "Senior",
            10,
            &["2024-01-01".to_string(), "2024-12-14".to_string()],
            &block,
        )
        .unwrap();
        assert_eq!(staff.unavailable_indices.len(), 1);
    }

    #[test]
    fn rejects_non_positive_target() {
        let block = block();
        let result = StaffMember::new("Smith".to_string(), "Senior", 0, &[], &block);
        assert!(matches!(result, Err(SchedulerError::InvalidRange { .. })));
    }
}
