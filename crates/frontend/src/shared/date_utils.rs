/// Utilities for date, time and amount formatting
///
/// Provides consistent formatting across the admin pages
use chrono::NaiveDate;
use contracts::shared::dates::date_prefix;

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    match date_prefix(date_str).and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => date_str.to_string(),
    }
}

/// Format an optional ISO date, empty when absent
pub fn format_opt_date(date_str: Option<&str>) -> String {
    date_str.map(format_date).unwrap_or_default()
}

/// Format ISO datetime string to DD/MM/YYYY HH:MM format
/// Example: "2024-03-15T14:02:26.123" -> "15/03/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let date = format_date(date_part);
        let time: String = time_part.chars().take(5).collect();
        if date != date_part && time.len() == 5 {
            return format!("{} {}", date, time);
        }
    }
    datetime_str.to_string()
}

/// Whole amount with '.' thousands separators, es-ES style.
///
/// Four-digit values stay ungrouped ("1500"), as the browser locale prints them.
/// Example: 1234567 -> "1.234.567"
pub fn format_amount(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = if digits.len() <= 4 {
        digits
    } else {
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out
    };
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Amount with currency sign: 12500 -> "$12.500"
pub fn format_money(value: i64) -> String {
    format!("${}", format_amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123"), "15/03/2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59"), "31/12/2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26"), "15/03/2024");
        assert_eq!(format_opt_date(None), "");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(1500), "1500");
        assert_eq!(format_amount(12500), "12.500");
        assert_eq!(format_amount(1234567), "1.234.567");
        assert_eq!(format_amount(-25000), "-25.000");
        assert_eq!(format_money(990000), "$990.000");
    }
}
