use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::SchedulerError;

pub const MIN_NUM_DAYS: i64 = 7;
pub const MAX_NUM_DAYS: i64 = 90;

/// A contiguous run of `num_days` dates starting at `start_date`, with weekend and Friday
/// membership precomputed by index so scoring never has to re-derive weekday classification.
#[derive(Clone, Debug)]
pub struct Block {
    pub start_date: NaiveDate,
    pub num_days: usize,
    pub dates: Vec<NaiveDate>,
    pub weekend_indices: Vec<usize>,
    pub friday_indices: Vec<usize>,
    date_to_index: HashMap<NaiveDate, usize>,
}

impl Block {
    pub fn new(start_date: NaiveDate, num_days: i64) -> Result<Self, SchedulerError> {
        if !(MIN_NUM_DAYS..=MAX_NUM_DAYS).contains(&num_days) {
            return Err(SchedulerError::InvalidRange {
                field: "num_days".to_string(),
                min: MIN_NUM_DAYS,
                max: MAX_NUM_DAYS,
                actual: num_days,
            });
        }
        let num_days = num_days as usize;

        let mut dates = Vec::with_capacity(num_days);
        let mut date_to_index = HashMap::with_capacity(num_days);
        let mut weekend_indices = Vec::new();
        let mut friday_indices = Vec::new();

        let mut current = start_date;
        for index in 0..num_days {
            dates.push(current);
            date_to_index.insert(current, index);
            match current.weekday() {
                Weekday::Sat | Weekday::Sun => weekend_indices.push(index),
                Weekday::Fri => friday_indices.push(index),
                _ => {}
            }
            current = current
                .checked_add_days(Days::new(1))
                .ok_or(SchedulerError::InternalError)?;
        }

        Ok(Block {
            start_date,
            num_days,
            dates,
            weekend_indices,
            friday_indices,
            date_to_index,
        })
    }

    pub fn end_date(&self) -> NaiveDate {
        self.dates[self.num_days - 1]
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.date_to_index.get(&date).copied()
    }

    pub fn parse_date(s: &str) -> Result<NaiveDate, SchedulerError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| SchedulerError::InvalidDate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_consecutive_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let block = Block::new(start, 28).unwrap();
        assert_eq!(block.dates.len(), 28);
        assert_eq!(block.dates[0], start);
        assert_eq!(block.end_date(), start + chrono::Duration::days(27));
    }

    #[test]
    fn classifies_weekends_and_fridays() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(); // a Monday
        let block = Block::new(start, 7).unwrap();
        assert_eq!(block.friday_indices, vec![4]);
        assert_eq!(block.weekend_indices, vec![5, 6]);
    }

    #[test]
    fn rejects_out_of_range_num_days() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        assert!(matches!(Block::new(start, 6), Err(SchedulerError::InvalidRange { .. })));
        assert!(matches!(Block::new(start, 91), Err(SchedulerError::InvalidRange { .. })));
    }
}
