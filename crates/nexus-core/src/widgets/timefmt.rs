use chrono::{DateTime, Local, TimeZone};

/// Human relative age of `then` as seen from `now`.
///
/// Anything older than thirty days is shown as a calendar date instead.
pub fn format_relative<Tz: TimeZone>(then: DateTime<Tz>, now: DateTime<Tz>) -> String {
    let diff = now.clone().signed_duration_since(then.clone());
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if days > 30 {
        then.with_timezone(&Local).format("%Y-%m-%d").to_string()
    } else if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        "Just now".to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n > 1 {
        format!("{n} {unit}s ago")
    } else {
        format!("{n} {unit} ago")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn test_relative_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative(now, now), "Just now");
        assert_eq!(format_relative(now - Duration::seconds(59), now), "Just now");
        assert_eq!(format_relative(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_relative(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(format_relative(now - Duration::days(1), now), "1 day ago");
        assert_eq!(format_relative(now - Duration::days(30), now), "30 days ago");
    }

    #[test]
    fn test_old_dates_show_calendar_date() {
        let now = Utc::now();
        let then = now - Duration::days(31);
        let expected = then.with_timezone(&Local).format("%Y-%m-%d").to_string();
        assert_eq!(format_relative(then, now), expected);
    }

    #[test]
    fn test_future_dates_are_just_now() {
        let now = Utc::now();
        assert_eq!(format_relative(now + Duration::hours(2), now), "Just now");
    }
}
