use chrono::{DateTime, Datelike, NaiveDate};

/// Accepts `YYYY-MM-DD` (what the date input posts) or a full RFC 3339
/// timestamp, whose calendar date is taken as written.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Render the invoice date the way the locale writes short dates. Missing or
/// unparseable input falls back to `today`.
pub fn format_date(value: Option<&str>, locale: &str, today: NaiveDate) -> String {
    let date = value.and_then(parse_date).unwrap_or(today);
    let locale = locale.trim().to_ascii_lowercase().replace('_', "-");
    let language = locale.split('-').next().unwrap_or("");

    let (y, m, d) = (date.year(), date.month(), date.day());
    match (language, locale.as_str()) {
        (_, "en-us") | (_, "en") => format!("{}/{}/{}", m, d, y),
        (_, "en-gb") | ("fr", _) => format!("{:02}/{:02}/{}", d, m, y),
        (_, "en-in") => format!("{}/{}/{}", d, m, y),
        ("de", _) => format!("{}.{}.{}", d, m, y),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn us_short_date() {
        assert_eq!(format_date(Some("2024-03-05"), "en-US", today()), "3/5/2024");
    }

    #[test]
    fn european_short_dates() {
        assert_eq!(format_date(Some("2024-03-05"), "en-GB", today()), "05/03/2024");
        assert_eq!(format_date(Some("2024-03-05"), "fr-FR", today()), "05/03/2024");
        assert_eq!(format_date(Some("2024-03-05"), "de-DE", today()), "5.3.2024");
        assert_eq!(format_date(Some("2024-03-05"), "en-IN", today()), "5/3/2024");
    }

    #[test]
    fn unknown_locale_uses_iso() {
        assert_eq!(format_date(Some("2024-03-05"), "ja-JP", today()), "2024-03-05");
    }

    #[test]
    fn rfc3339_keeps_written_calendar_date() {
        assert_eq!(
            format_date(Some("2024-12-31T23:30:00-05:00"), "en-US", today()),
            "12/31/2024"
        );
    }

    #[test]
    fn missing_or_garbage_dates_fall_back_to_today() {
        assert_eq!(format_date(None, "en-US", today()), "10/18/2026");
        assert_eq!(format_date(Some("next tuesday"), "en-US", today()), "10/18/2026");
    }
}
