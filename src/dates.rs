use chrono::{Datelike, Months, NaiveDate};

/// whole calendar months between two dates.
///
/// a month only counts once the day-of-month of `to` reaches the
/// day-of-month of `from`; partial months count as zero.
pub fn full_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }

    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// step a date forward by whole months, clamping the day-of-month to the
/// target month's length (jan 31 + 1 month -> feb 28/29)
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_full_months_simple() {
        assert_eq!(full_months_between(d(2024, 1, 1), d(2024, 2, 1)), 1);
        assert_eq!(full_months_between(d(2024, 1, 1), d(2024, 4, 1)), 3);
        assert_eq!(full_months_between(d(2023, 11, 15), d(2024, 1, 15)), 2);
    }

    #[test]
    fn test_partial_month_does_not_count() {
        assert_eq!(full_months_between(d(2024, 1, 15), d(2024, 2, 14)), 0);
        assert_eq!(full_months_between(d(2024, 1, 15), d(2024, 2, 15)), 1);
        assert_eq!(full_months_between(d(2024, 1, 31), d(2024, 2, 29)), 0);
    }

    #[test]
    fn test_same_or_earlier_date() {
        assert_eq!(full_months_between(d(2024, 3, 10), d(2024, 3, 10)), 0);
        assert_eq!(full_months_between(d(2024, 3, 10), d(2024, 1, 10)), 0);
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(d(2024, 1, 31), 1), Some(d(2024, 2, 29)));
        assert_eq!(add_months(d(2023, 1, 31), 1), Some(d(2023, 2, 28)));
        assert_eq!(add_months(d(2024, 1, 15), 12), Some(d(2025, 1, 15)));
        assert_eq!(add_months(d(2024, 10, 31), 2), Some(d(2024, 12, 31)));
    }
}
