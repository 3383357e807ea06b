use chrono::{DateTime, NaiveDate, Utc};

/// Extract the calendar date (`YYYY-MM-DD`) from a backend date value.
///
/// Accepts plain dates ("2024-03-15"), local date-times
/// ("2024-03-15T10:20:00") and RFC 3339 instants, which are converted to UTC
/// first. Returns `None` for anything else.
pub fn date_prefix(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc).format("%Y-%m-%d").to_string());
    }
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_local_dates() {
        assert_eq!(date_prefix("2024-03-15").as_deref(), Some("2024-03-15"));
        assert_eq!(
            date_prefix("2024-03-15T10:20:00").as_deref(),
            Some("2024-03-15")
        );
    }

    #[test]
    fn test_instant_is_converted_to_utc() {
        assert_eq!(
            date_prefix("2024-03-15T23:30:00-03:00").as_deref(),
            Some("2024-03-16")
        );
        assert_eq!(
            date_prefix("2024-03-15T14:02:26.123Z").as_deref(),
            Some("2024-03-15")
        );
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(date_prefix(""), None);
        assert_eq!(date_prefix("15/03/2024"), None);
        assert_eq!(date_prefix("2024-13-40"), None);
    }
}
