use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

/// Loose `something@something.something` check used by every email input.
pub const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// `YYYY-MM-DD`, as produced by a date input
pub fn is_valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_ok()
}

/// `HH:MM`, 24-hour, as produced by a time input
pub fn is_valid_time(time: &str) -> bool {
    NaiveTime::parse_from_str(time.trim(), "%H:%M").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@mail.co.uk"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ana@localhost"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn date_and_time_inputs() {
        assert!(is_valid_date("2026-11-02"));
        assert!(!is_valid_date("02/11/2026"));
        assert!(is_valid_time("09:30"));
        assert!(!is_valid_time("9.30am"));
    }
}
