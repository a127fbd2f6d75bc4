use chrono::{DateTime, Utc};

/// Share of `total` represented by `value`, as a percentage rounded to
/// two decimals. A zero or negative total yields 0.
pub fn calculate_percentage(value: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    (value / total * 10_000.0).round() / 100.0
}

/// Whole days elapsed between two instants.
pub fn number_of_days(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

/// True once `date` is no longer in the future of `compared_to`.
/// Reaching the instant exactly counts as expired.
pub fn is_date_expired(date: DateTime<Utc>, compared_to: DateTime<Utc>) -> bool {
    date <= compared_to
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn percentages_round_to_two_decimals() {
        assert_eq!(calculate_percentage(10.0, 23.0), 43.48);
        assert_eq!(calculate_percentage(32.0, 427.0), 7.49);
        assert_eq!(calculate_percentage(684.0, 8765.0), 7.8);
        assert_eq!(calculate_percentage(0.0, 10.0), 0.0);
        assert_eq!(calculate_percentage(5.0, 0.0), 0.0);
    }

    #[test]
    fn day_counts_between_dates() {
        assert_eq!(number_of_days(day(2017, 2, 28), day(2017, 2, 14)), 14);
        assert_eq!(number_of_days(day(2017, 3, 16), day(2017, 2, 13)), 31);
        assert_eq!(number_of_days(day(2017, 5, 15), day(2017, 2, 14)), 90);
        assert_eq!(number_of_days(day(2017, 5, 17), day(2017, 2, 14)), 92);
        assert_eq!(number_of_days(day(2018, 2, 14), day(2017, 2, 14)), 365);
    }

    #[test]
    fn expiry_includes_the_boundary() {
        let deadline = day(2017, 6, 1);
        assert!(is_date_expired(day(2017, 5, 31), deadline));
        assert!(is_date_expired(deadline, deadline));
        assert!(!is_date_expired(day(2017, 6, 2), deadline));
    }
}
