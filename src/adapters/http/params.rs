//! Helpers for turning raw path and body values into domain types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use crate::domain::foundation::{DomainError, Money, Timestamp};

/// Parses a path or body identifier. A malformed id cannot name an existing
/// row, so it is reported as `NotFound(resource)`.
pub fn parse_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, DomainError> {
    raw.trim().parse().map_err(|_| DomainError::not_found(resource))
}

/// Trims a free-text filter, treating a blank value as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Deserializes a present field as `Some`, including an explicit `null`.
///
/// Combined with `#[serde(default)]` this separates "absent" (`None`) from
/// "null" (`Some(None)`).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Accepts a fee as a JSON number or a numeric string, as HTML forms send it.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Option::<Amount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Amount::Number(n)) => Ok(Some(n)),
        Some(Amount::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Amount::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{}' is not a number", s))),
    }
}

/// Converts an optional wire amount into `Money`.
pub fn money(field: &str, amount: Option<f64>) -> Result<Option<Money>, DomainError> {
    amount
        .map(|a| Money::from_major(field, a))
        .transpose()
        .map_err(DomainError::from)
}

/// Parses an event date. Accepts RFC 3339, a `datetime-local` value
/// (`2026-05-01T18:30`, read as UTC) or a bare date (midnight UTC).
pub fn parse_event_date(raw: &str) -> Result<Timestamp, DomainError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Timestamp::from_datetime(naive.and_utc()));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Timestamp::from_datetime(naive.and_utc()))
        .ok_or_else(|| DomainError::validation("eventDate", "eventDate is not a valid date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClubId, ErrorCode};

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        limit: Option<Option<u32>>,
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_id::<ClubId>("not-a-uuid", "Club").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message(), "Club not found");
    }

    #[test]
    fn well_formed_id_parses() {
        let id = ClubId::new();
        assert_eq!(parse_id::<ClubId>(&id.to_string(), "Club").unwrap(), id);
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"limit":null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"limit":5}"#).unwrap();

        assert_eq!(absent.limit, None);
        assert_eq!(null.limit, Some(None));
        assert_eq!(value.limit, Some(Some(5)));
    }

    #[derive(Deserialize)]
    struct Fee {
        #[serde(default, deserialize_with = "deserialize_amount")]
        fee: Option<f64>,
    }

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        let number: Fee = serde_json::from_str(r#"{"fee":15}"#).unwrap();
        let text: Fee = serde_json::from_str(r#"{"fee":"9.99"}"#).unwrap();
        let blank: Fee = serde_json::from_str(r#"{"fee":""}"#).unwrap();

        assert_eq!(number.fee, Some(15.0));
        assert_eq!(text.fee, Some(9.99));
        assert_eq!(blank.fee, None);
        assert!(serde_json::from_str::<Fee>(r#"{"fee":"ten"}"#).is_err());
    }

    #[test]
    fn negative_money_is_a_validation_failure() {
        let err = money("membershipFee", Some(-1.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(money("membershipFee", None).unwrap(), None);
    }

    #[test]
    fn event_date_accepts_common_shapes() {
        let rfc = parse_event_date("2026-05-01T18:30:00+02:00").unwrap();
        let local = parse_event_date("2026-05-01T16:30").unwrap();
        let date = parse_event_date("2026-05-01").unwrap();

        assert_eq!(rfc, local);
        assert_eq!(date.as_datetime().to_rfc3339(), "2026-05-01T00:00:00+00:00");
    }

    #[test]
    fn garbage_event_date_is_rejected() {
        let err = parse_event_date("next tuesday").unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"eventDate".to_string()));
    }
}
