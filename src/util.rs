//! Small shared helpers.

use chrono::{DateTime, Utc};

/// `1 week` / `2 weeks` style counted nouns.
pub fn pluralize(count: i64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Human-friendly description of how long ago `then` was, relative to `now`.
///
/// Picks the two most significant units, e.g. `"2 hours, 5 minutes ago"`.
/// Future or zero-distance times render as `"just now"`.
pub fn describe_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let secs = elapsed.num_seconds();
    if secs <= 0 {
        return "just now".to_string();
    }

    let weeks = secs / (7 * 86_400);
    let days = (secs % (7 * 86_400)) / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;

    if weeks > 0 {
        format!(
            "{}, {} ago",
            pluralize(weeks, "week", "weeks"),
            pluralize(days, "day", "days")
        )
    } else if days > 0 {
        format!(
            "{}, {} ago",
            pluralize(days, "day", "days"),
            pluralize(hours, "hour", "hours")
        )
    } else if hours > 0 {
        format!(
            "{}, {} ago",
            pluralize(hours, "hour", "hours"),
            pluralize(minutes, "minute", "minutes")
        )
    } else if minutes > 0 {
        format!(
            "{}, {} ago",
            pluralize(minutes, "minute", "minutes"),
            pluralize(seconds, "second", "seconds")
        )
    } else {
        format!("{} ago", pluralize(seconds, "second", "seconds"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn pluralize_picks_form_by_count() {
        assert_eq!(pluralize(1, "day", "days"), "1 day");
        assert_eq!(pluralize(0, "day", "days"), "0 days");
        assert_eq!(pluralize(3, "day", "days"), "3 days");
    }

    #[test]
    fn describe_since_two_most_significant_units() {
        let now = Utc::now();
        let cases = [
            (TimeDelta::seconds(42), "42 seconds ago"),
            (TimeDelta::seconds(125), "2 minutes, 5 seconds ago"),
            (TimeDelta::hours(3) + TimeDelta::minutes(7), "3 hours, 7 minutes ago"),
            (TimeDelta::days(2) + TimeDelta::hours(1), "2 days, 1 hour ago"),
            (TimeDelta::days(15), "2 weeks, 1 day ago"),
        ];
        for (delta, expected) in cases {
            assert_eq!(describe_since(now - delta, now), expected);
        }
    }

    #[test]
    fn describe_since_future_is_just_now() {
        let now = Utc::now();
        assert_eq!(describe_since(now + TimeDelta::seconds(30), now), "just now");
        assert_eq!(describe_since(now, now), "just now");
    }
}
