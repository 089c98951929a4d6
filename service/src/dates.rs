use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Text that is not an ISO-8601 date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {0:?}")]
pub struct DateParseError(pub String);

/// Parses an ISO-8601 date, passing `None` through.
///
/// Accepts RFC 3339 date-times (`2020-01-01T10:00:00.000Z`, `2020-01-01T11:00:00+01:00`),
/// date-times without an offset, read as UTC, and bare dates, read as midnight UTC.
///
/// Offset-less date-times are read as UTC, not local time as a browser's `new Date(..)` would.
pub fn to_date(text: Option<&str>) -> Result<Option<DateTime<Utc>>, DateParseError> {
    let Some(text) = text else {
        return Ok(None);
    };
    let text = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(date.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(date.and_utc()));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight.and_utc()));
    }

    Err(DateParseError(text.to_string()))
}

/// Formats a date the way browsers' `Date.toISOString` does, passing `None` through.
///
/// Always UTC, always milliseconds: `2020-01-01T10:00:00.000Z`.
pub fn from_date(date: Option<&DateTime<Utc>>) -> Option<String> {
    date.map(to_iso_string)
}

pub(crate) fn to_iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn none_passes_through() {
        assert_eq!(Ok(None), to_date(None));
        assert_eq!(None, from_date(None));
    }

    #[test]
    fn parses_iso_forms() {
        let expected = Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap();

        assert_eq!(Ok(Some(expected)), to_date(Some("2020-01-01T10:00:00.000Z")));
        assert_eq!(Ok(Some(expected)), to_date(Some("2020-01-01T10:00:00Z")));
        assert_eq!(Ok(Some(expected)), to_date(Some("2020-01-01T11:00:00+01:00")));
        assert_eq!(Ok(Some(expected)), to_date(Some("2020-01-01T10:00:00")));
        assert_eq!(
            Ok(Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())),
            to_date(Some("2020-01-01"))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            Err(DateParseError("yesterday".to_string())),
            to_date(Some("yesterday"))
        );
        assert!(to_date(Some("")).is_err());
        assert!(to_date(Some("2020-13-01")).is_err());
    }

    #[test]
    fn formats_like_to_iso_string() {
        let date = Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(42);

        assert_eq!(
            Some("2020-01-01T10:00:00.042Z".to_string()),
            from_date(Some(&date))
        );
    }

    #[test]
    fn format_then_parse_is_the_same_instant() {
        let date = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        let text = from_date(Some(&date));

        assert_eq!(Ok(Some(date)), to_date(text.as_deref()));
    }
}
