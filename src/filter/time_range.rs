use chrono::{DateTime, Duration, Months, Utc};

/// Relative window for report queries, measured back from "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    /// Unknown values mean "no time filter"
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "week" => Some(TimeRange::Week),
            "month" => Some(TimeRange::Month),
            "quarter" => Some(TimeRange::Quarter),
            "year" => Some(TimeRange::Year),
            _ => None,
        }
    }

    /// Start of the window. Month-based ranges step back calendar months,
    /// clamping to the last day of shorter months.
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let start = match self {
            TimeRange::Week => Some(now - Duration::days(7)),
            TimeRange::Month => now.checked_sub_months(Months::new(1)),
            TimeRange::Quarter => now.checked_sub_months(Months::new(3)),
            TimeRange::Year => now.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_known_ranges_only() {
        assert_eq!(TimeRange::parse("week"), Some(TimeRange::Week));
        assert_eq!(TimeRange::parse("quarter"), Some(TimeRange::Quarter));
        assert_eq!(TimeRange::parse("decade"), None);
        assert_eq!(TimeRange::parse(""), None);
    }

    #[test]
    fn computes_calendar_windows() {
        let now = at(2024, 3, 31);
        assert_eq!(TimeRange::Week.start(now), at(2024, 3, 24));
        assert_eq!(TimeRange::Month.start(now), at(2024, 2, 29));
        assert_eq!(TimeRange::Quarter.start(now), at(2023, 12, 31));
        assert_eq!(TimeRange::Year.start(now), at(2023, 3, 31));
    }

    #[test]
    fn forty_days_back_falls_between_month_and_quarter() {
        let now = at(2024, 6, 15);
        let dated = now - Duration::days(40);

        assert!(dated < TimeRange::Week.start(now));
        assert!(dated < TimeRange::Month.start(now));
        assert!(dated >= TimeRange::Quarter.start(now));
        assert!(dated >= TimeRange::Year.start(now));
    }
}
