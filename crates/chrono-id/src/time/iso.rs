use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

use super::Precision;
use crate::{Error, FormatError, Result};

/// Layouts RFC 3339 rejects but ISO-8601 allows: a space separator, or a
/// basic-format offset such as `+0530`.
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// Accepts RFC 3339 text with a `Z` or numeric offset (`+05:30` or `+0530`),
/// the same layout with no offset (read as UTC), a space in place of the `T`,
/// and a bare calendar date (midnight UTC).
///
/// # Errors
///
/// - [`Error::NullInput`] if `input` is `None`.
/// - [`FormatError::Iso`] if no accepted layout matches.
pub fn parse_iso<'a>(input: impl Into<Option<&'a str>>) -> Result<DateTime<Utc>> {
    let input = input.into().ok_or(Error::NullInput { what: "string" })?;
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(FormatError::Iso.into())
}

/// Renders an instant as `YYYY-MM-DDTHH:MM:SS[.fff|.ffffff]Z`.
///
/// Millisecond precision shows three fractional digits, microsecond precision
/// six, and every other level none.
#[must_use]
pub fn format_iso(dt: &DateTime<Utc>, precision: Precision) -> String {
    let base = dt.format("%Y-%m-%dT%H:%M:%S");
    let micros = dt.nanosecond().min(999_999_999) / 1_000;
    match precision.iso_fraction_digits() {
        3 => format!("{base}.{:03}Z", micros / 1_000),
        6 => format!("{base}.{micros:06}Z"),
        _ => format!("{base}Z"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parses_zulu_and_offsets() {
        let expected = at(2023, 5, 20, 10, 30, 0) + TimeDelta::microseconds(123_456);
        assert_eq!(parse_iso("2023-05-20T10:30:00.123456Z").unwrap(), expected);
        assert_eq!(
            parse_iso("2023-05-20T12:30:00.123456+02:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_iso("2023-05-20 10:30:00.123456+00:00").unwrap(),
            expected
        );
    }

    #[test]
    fn parses_basic_format_offsets() {
        let expected = at(2023, 5, 20, 5, 0, 0);
        assert_eq!(parse_iso("2023-05-20T10:30:00+0530").unwrap(), expected);
        assert_eq!(parse_iso("2023-05-20 10:30:00+0530").unwrap(), expected);
        assert_eq!(
            parse_iso("2023-05-20T01:00:00.5-0400").unwrap(),
            at(2023, 5, 20, 5, 0, 0) + TimeDelta::milliseconds(500)
        );
    }

    #[test]
    fn naive_text_is_utc() {
        assert_eq!(
            parse_iso("2023-05-20T10:30:00").unwrap(),
            at(2023, 5, 20, 10, 30, 0)
        );
        assert_eq!(
            parse_iso("2023-05-20 10:30:00").unwrap(),
            at(2023, 5, 20, 10, 30, 0)
        );
        assert_eq!(
            parse_iso("2023-05-20T10:30").unwrap(),
            at(2023, 5, 20, 10, 30, 0)
        );
        assert_eq!(parse_iso("2023-05-20").unwrap(), at(2023, 5, 20, 0, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_iso("not-a-date"),
            Err(Error::InvalidFormat(FormatError::Iso))
        ));
        assert!(matches!(parse_iso(None), Err(Error::NullInput { .. })));
    }

    #[test]
    fn null_input_message() {
        assert_eq!(
            parse_iso(None).unwrap_err().to_string(),
            "Input string is null"
        );
        assert_eq!(
            parse_iso("x").unwrap_err().to_string(),
            "Invalid ISO 8601 format"
        );
    }

    #[test]
    fn format_by_precision() {
        let dt = at(2023, 5, 20, 10, 30, 0) + TimeDelta::microseconds(123_456);
        assert_eq!(
            format_iso(&dt, Precision::Millisecond),
            "2023-05-20T10:30:00.123Z"
        );
        assert_eq!(
            format_iso(&dt, Precision::Microsecond),
            "2023-05-20T10:30:00.123456Z"
        );
        assert_eq!(
            format_iso(&dt, Precision::Centisecond),
            "2023-05-20T10:30:00Z"
        );
        assert_eq!(format_iso(&dt, Precision::Second), "2023-05-20T10:30:00Z");
    }
}
