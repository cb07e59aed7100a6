use chrono::{NaiveDate, NaiveTime};

pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";
pub const CANONICAL_TIME_FORMAT: &str = "%H:%M";

/// Accepted date inputs, tried in order. First match wins.
pub const DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%d", // YYYY-MM-DD
    "%d-%m-%Y", // DD-MM-YYYY
    "%m/%d/%Y", // MM/DD/YYYY
    "%Y/%m/%d", // YYYY/MM/DD
];

/// Accepted time inputs, tried in order. First match wins.
pub const TIME_FORMATS: [&str; 4] = [
    "%H:%M",       // 24-hour
    "%H:%M:%S",    // 24-hour with seconds
    "%I:%M %p",    // 12-hour
    "%I:%M:%S %p", // 12-hour with seconds
];

// `9` stands for any ASCII digit, everything else must match literally.
const DATE_SHAPE: &str = "9999-99-99";
const TIME_SHAPE: &str = "99:99";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("could not parse {field} '{input}' with any accepted format")]
    Parse { field: &'static str, input: String },
}

fn matches_shape(input: &str, shape: &str) -> bool {
    input.len() == shape.len()
        && input.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'9' => c.is_ascii_digit(),
            literal => c == literal,
        })
}

/// Strict `YYYY-MM-DD` parse: zero-padded fields and a real calendar date.
pub fn parse_canonical_date(input: &str) -> Option<NaiveDate> {
    if !matches_shape(input, DATE_SHAPE) {
        return None;
    }
    NaiveDate::parse_from_str(input, CANONICAL_DATE_FORMAT).ok()
}

/// Strict 24-hour `HH:MM` parse.
pub fn parse_canonical_time(input: &str) -> Option<NaiveTime> {
    if !matches_shape(input, TIME_SHAPE) {
        return None;
    }
    NaiveTime::parse_from_str(input, CANONICAL_TIME_FORMAT).ok()
}

/// Re-render a date in any accepted format as `YYYY-MM-DD`.
///
/// Canonical input is returned unchanged.
pub fn normalize_date(input: &str) -> Result<String, NormalizeError> {
    if parse_canonical_date(input).is_some() {
        return Ok(input.to_string());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .map(|date| date.format(CANONICAL_DATE_FORMAT).to_string())
        .ok_or_else(|| NormalizeError::Parse {
            field: "date",
            input: input.to_string(),
        })
}

/// Re-render a time in any accepted format as 24-hour `HH:MM`.
///
/// Canonical input is returned unchanged. Seconds are dropped.
pub fn normalize_time(input: &str) -> Result<String, NormalizeError> {
    if parse_canonical_time(input).is_some() {
        return Ok(input.to_string());
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(input, format).ok())
        .map(|time| time.format(CANONICAL_TIME_FORMAT).to_string())
        .ok_or_else(|| NormalizeError::Parse {
            field: "time",
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_canonical_date_unchanged() {
        assert_eq!(normalize_date("2022-01-01").unwrap(), "2022-01-01");
    }

    #[test]
    fn test_normalize_day_month_year() {
        assert_eq!(normalize_date("15-01-2022").unwrap(), "2022-01-15");
    }

    #[test]
    fn test_normalize_us_date() {
        assert_eq!(normalize_date("03/20/2022").unwrap(), "2022-03-20");
    }

    #[test]
    fn test_normalize_slashed_iso_date() {
        assert_eq!(normalize_date("2022/03/20").unwrap(), "2022-03-20");
    }

    #[test]
    fn test_normalize_unpadded_iso_date() {
        assert_eq!(normalize_date("2022-1-5").unwrap(), "2022-01-05");
    }

    #[test]
    fn test_normalize_date_priority_month_first() {
        // Ambiguous slashed input reads as MM/DD/YYYY
        assert_eq!(normalize_date("01/02/2022").unwrap(), "2022-01-02");
    }

    #[test]
    fn test_normalize_date_failure_keeps_input() {
        let err = normalize_date("13/13/2023").unwrap_err();
        assert_eq!(
            err,
            NormalizeError::Parse {
                field: "date",
                input: "13/13/2023".to_string(),
            }
        );
        assert!(err.to_string().contains("13/13/2023"));
    }

    #[test]
    fn test_canonical_time_unchanged() {
        assert_eq!(normalize_time("13:01").unwrap(), "13:01");
    }

    #[test]
    fn test_normalize_time_with_seconds() {
        assert_eq!(normalize_time("14:33:59").unwrap(), "14:33");
    }

    #[test]
    fn test_normalize_twelve_hour_time() {
        assert_eq!(normalize_time("02:30 PM").unwrap(), "14:30");
        assert_eq!(normalize_time("12:15 AM").unwrap(), "00:15");
    }

    #[test]
    fn test_normalize_twelve_hour_time_with_seconds() {
        assert_eq!(normalize_time("03:45:10 PM").unwrap(), "15:45");
    }

    #[test]
    fn test_normalize_time_failure() {
        assert!(normalize_time("24:01").is_err());
        assert!(normalize_time("noon").is_err());
    }

    #[test]
    fn test_parse_canonical_date_strict() {
        let date = parse_canonical_date("2022-01-01").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2022, 1, 1));
        assert!(parse_canonical_date("2022-1-1").is_none());
        assert!(parse_canonical_date("2022/01/01").is_none());
        assert!(parse_canonical_date("2022-02-30").is_none());
        assert!(parse_canonical_date("13/13/2023").is_none());
    }

    #[test]
    fn test_parse_canonical_time_strict() {
        let time = parse_canonical_time("13:01").unwrap();
        assert_eq!((time.hour(), time.minute()), (13, 1));
        assert!(parse_canonical_time("24:01").is_none());
        assert!(parse_canonical_time("9:30").is_none());
        assert!(parse_canonical_time("13:01:00").is_none());
        assert!(parse_canonical_time("02:30 PM").is_none());
    }
}
