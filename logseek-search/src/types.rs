//! Data types for the search service contract.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One matched event record as returned by the search service.
///
/// Produced only by decoding a service response (or loading an event file on
/// the service side). Field names follow the service's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Opaque event identifier
    #[serde(rename = "EventId")]
    pub event_id: EventId,
    /// Free-text event message
    #[serde(rename = "Message")]
    pub message: String,
    /// Event time in nanoseconds since the Unix epoch
    #[serde(rename = "NanoTimeStamp")]
    pub timestamp: NanoTimestamp,
}

/// Result of one completed search request.
///
/// `results` keeps service order and `count` is taken as reported; the two
/// are not reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Matches in service-provided order
    pub results: Vec<SearchResult>,
    /// Total match count reported by the service
    pub count: u64,
    /// Service-reported elapsed time in milliseconds
    pub time_ms: f64,
}

impl SearchOutcome {
    /// Creates an outcome whose count equals the number of results.
    pub fn new(results: Vec<SearchResult>, time_ms: f64) -> Self {
        Self {
            count: results.len() as u64,
            results,
            time_ms,
        }
    }

    /// Outcome with no matches.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Check whether the service returned any result records.
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Event identifier token. The service may send it as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    /// Textual identifier
    Text(String),
    /// Numeric identifier
    Number(serde_json::Number),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Text(text) => write!(f, "{text}"),
            EventId::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId::Text(value.to_string())
    }
}

impl From<u64> for EventId {
    fn from(value: u64) -> Self {
        EventId::Number(value.into())
    }
}

/// Nanosecond-scale event timestamp.
///
/// Serialized as a JSON integer. Deserialization also accepts a string holding
/// a base-10 integer, which is what event files exported as text contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NanoTimestamp(pub i64);

impl NanoTimestamp {
    /// Wall-clock time of this timestamp.
    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

impl fmt::Display for NanoTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Integer(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for NanoTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Integer(nanos) => Ok(Self(nanos)),
            RawTimestamp::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("invalid NanoTimeStamp '{text}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_service_payload() {
        let body = r#"{"results":[{"EventId":"e1","Message":"hello","NanoTimeStamp":123456789}],"count":1,"time_ms":4.2}"#;
        let outcome: SearchOutcome = serde_json::from_str(body).unwrap();

        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.time_ms, 4.2);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].event_id, EventId::from("e1"));
        assert_eq!(outcome.results[0].message, "hello");
        assert_eq!(outcome.results[0].timestamp, NanoTimestamp(123_456_789));
    }

    #[test]
    fn test_decode_string_timestamp_and_numeric_id() {
        let body = r#"{"results":[{"EventId":42,"Message":"m","NanoTimeStamp":"1700000000000000000"}],"count":7,"time_ms":0}"#;
        let outcome: SearchOutcome = serde_json::from_str(body).unwrap();

        assert_eq!(outcome.results[0].event_id, EventId::from(42));
        assert_eq!(outcome.results[0].event_id.to_string(), "42");
        assert_eq!(
            outcome.results[0].timestamp,
            NanoTimestamp(1_700_000_000_000_000_000)
        );
        // count is taken as reported, not recomputed
        assert_eq!(outcome.count, 7);
        assert_eq!(outcome.time_ms, 0.0);
    }

    #[test]
    fn test_service_order_is_preserved() {
        let body = r#"{"results":[
            {"EventId":"b","Message":"x","NanoTimeStamp":1},
            {"EventId":"a","Message":"y","NanoTimeStamp":3},
            {"EventId":"c","Message":"z","NanoTimeStamp":2}
        ],"count":3,"time_ms":1}"#;
        let outcome: SearchOutcome = serde_json::from_str(body).unwrap();
        let ids: Vec<String> = outcome
            .results
            .iter()
            .map(|r| r.event_id.to_string())
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_malformed_payloads_are_rejected() {
        assert!(serde_json::from_str::<SearchOutcome>(r#"{"count":1,"time_ms":1}"#).is_err());
        assert!(
            serde_json::from_str::<SearchOutcome>(
                r#"{"results":[{"EventId":"e","Message":"m","NanoTimeStamp":"soon"}],"count":1,"time_ms":1}"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_timestamp_serializes_as_integer() {
        let result = SearchResult {
            event_id: EventId::from("e1"),
            message: "hello".to_string(),
            timestamp: NanoTimestamp(5),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["NanoTimeStamp"], serde_json::json!(5));
        assert_eq!(json["EventId"], serde_json::json!("e1"));
    }

    #[test]
    fn test_timestamp_to_datetime() {
        let ts = NanoTimestamp(1_000_000_000);
        assert_eq!(ts.to_datetime().timestamp(), 1);
    }

    #[test]
    fn test_outcome_new_counts_results() {
        assert_eq!(SearchOutcome::empty().count, 0);
        assert!(!SearchOutcome::empty().has_results());
    }
}
