use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const STANDARD_TIME_FORMAT: &str = "%H:%M";
    /// Format used to pre-fill the custom range inputs
    pub const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";
    /// Format written to CSV timestamp cells
    pub const CSV_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

fn utc_from_ms(epoch_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(epoch_ms)
}

pub fn epoch_ms_to_utc_date(epoch_ms: i64) -> String {
    // Used for display purposes
    utc_from_ms(epoch_ms)
        .map(|dt| dt.format(TimeUtils::STANDARD_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn epoch_ms_to_utc_time(epoch_ms: i64) -> String {
    utc_from_ms(epoch_ms)
        .map(|dt| dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn epoch_ms_to_input(epoch_ms: i64) -> String {
    utc_from_ms(epoch_ms)
        .map(|dt| dt.format(TimeUtils::INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn epoch_ms_to_csv_timestamp(epoch_ms: i64) -> String {
    utc_from_ms(epoch_ms)
        .map(|dt| dt.format(TimeUtils::CSV_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse a timestamp cell from the data file into epoch milliseconds (UTC).
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD` and integer epoch
/// milliseconds. Naive values are read as UTC.
pub fn parse_timestamp_ms(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // Epoch values chrono cannot represent are rejected like any other bad cell
    if let Ok(ms) = text.parse::<i64>() {
        return utc_from_ms(ms).map(|_| ms);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(text, TimeUtils::STANDARD_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAN_2_2024_MS: i64 = 1_704_153_600_000;

    #[test]
    fn parses_supported_formats() {
        assert_eq!(parse_timestamp_ms("2024-01-02"), Some(JAN_2_2024_MS));
        assert_eq!(parse_timestamp_ms("2024-01-02 00:00:00"), Some(JAN_2_2024_MS));
        assert_eq!(parse_timestamp_ms("2024-01-02T00:00"), Some(JAN_2_2024_MS));
        assert_eq!(parse_timestamp_ms("2024-01-02T00:00:00Z"), Some(JAN_2_2024_MS));
        assert_eq!(
            parse_timestamp_ms("2024-01-02T01:00:00+01:00"),
            Some(JAN_2_2024_MS)
        );
        assert_eq!(parse_timestamp_ms("1704153600000"), Some(JAN_2_2024_MS));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp_ms(""), None);
        assert_eq!(parse_timestamp_ms("yesterday"), None);
        assert_eq!(parse_timestamp_ms("2024-13-45"), None);
    }

    #[test]
    fn rejects_out_of_range_epoch_millis() {
        assert_eq!(parse_timestamp_ms(&i64::MAX.to_string()), None);
        assert_eq!(parse_timestamp_ms(&i64::MIN.to_string()), None);
        assert_eq!(parse_timestamp_ms("-86400000"), Some(-TimeUtils::MS_IN_D));
    }

    #[test]
    fn formats_date_and_time() {
        let ms = JAN_2_2024_MS + 13 * TimeUtils::MS_IN_H + 5 * TimeUtils::MS_IN_MIN;
        assert_eq!(epoch_ms_to_utc_date(ms), "2024-01-02");
        assert_eq!(epoch_ms_to_utc_time(ms), "13:05");
        assert_eq!(epoch_ms_to_input(ms), "2024-01-02 13:05");
        assert_eq!(epoch_ms_to_csv_timestamp(ms), "2024-01-02 13:05:00");
    }
}
