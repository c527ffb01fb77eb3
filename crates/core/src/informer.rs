//! Informer directory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A remotely configured weather widget bound to one domain.
///
/// Records are immutable once fetched. The remote directory is trusted for
/// uniqueness of `informer_id`; nothing here deduplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InformerRecord {
    #[serde(default)]
    pub informer_id: String,

    /// Full URL or bare host the informer was registered for.
    #[serde(default)]
    pub domain: String,

    #[serde(default, deserialize_with = "bool_or_int")]
    pub active: bool,

    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl InformerRecord {
    pub fn new(informer_id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self { informer_id: informer_id.into(), domain: domain.into(), ..Default::default() }
    }
}

/// Find a record by informer ID.
pub fn find_informer<'a>(informers: &'a [InformerRecord], id: &str) -> Option<&'a InformerRecord> {
    informers.iter().find(|inf| inf.informer_id == id)
}

/// The billing API has sent `active` both as a JSON boolean and as 0/1.
fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_i64().map(|n| n != 0).unwrap_or(false),
        serde_json::Value::String(s) => matches!(s.as_str(), "1" | "true"),
        _ => false,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "created_at": "2025-09-30T19:07:37.000000Z",
            "informer_id": "11111111-1111-1111-aa3a-5bb2d44d4fd1",
            "domain": "https://www.wordpress.org",
            "active": 1
        }"#;
        let record: InformerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.informer_id, "11111111-1111-1111-aa3a-5bb2d44d4fd1");
        assert_eq!(record.domain, "https://www.wordpress.org");
        assert!(record.active);
        assert_eq!(record.created_at.unwrap().to_rfc3339(), "2025-09-30T19:07:37+00:00");
    }

    #[test]
    fn test_minimal_record_defaults() {
        let record: InformerRecord = serde_json::from_str(r#"{"informer_id":"x"}"#).unwrap();
        assert_eq!(record, InformerRecord::new("x", ""));
        assert!(!record.active);
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_active_accepts_bool_and_int() {
        let a: InformerRecord = serde_json::from_str(r#"{"informer_id":"a","active":true}"#).unwrap();
        let b: InformerRecord = serde_json::from_str(r#"{"informer_id":"b","active":0}"#).unwrap();
        assert!(a.active);
        assert!(!b.active);
    }

    #[test]
    fn test_garbage_timestamp_is_none() {
        let record: InformerRecord =
            serde_json::from_str(r#"{"informer_id":"a","created_at":"yesterday"}"#).unwrap();
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_find_informer() {
        let list = vec![InformerRecord::new("a", "https://a.test"), InformerRecord::new("b", "https://b.test")];
        assert_eq!(find_informer(&list, "b").map(|i| i.domain.as_str()), Some("https://b.test"));
        assert!(find_informer(&list, "c").is_none());
    }
}
