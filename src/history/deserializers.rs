use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for timestamp that accepts both integers (ms) and RFC3339 strings
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            // Unix timestamp in milliseconds
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

/// Custom deserializer for search terms that rejects empty and whitespace-only values
pub fn deserialize_raw_term<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;

    if s.trim().is_empty() {
        return Err(Error::custom("search term cannot be empty"));
    }

    Ok(s)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use crate::models::{HistoryEntry, SearchType};

    #[test]
    fn test_history_entry_timestamp_integer() {
        let json = r#"{
            "query": "budget",
            "type": "generic-drive",
            "timestamp": 1762076480016
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.raw_term(), "budget");
        assert_eq!(entry.search_type(), SearchType::GenericDrive);

        let expected_ts = DateTime::from_timestamp_millis(1762076480016).unwrap();
        assert_eq!(entry.created_at(), expected_ts);
    }

    #[test]
    fn test_history_entry_timestamp_rfc3339_legacy_type() {
        let json = r#"{
            "query": "passwords",
            "type": "github",
            "timestamp": "2025-11-02T09:41:20.016Z"
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.raw_term(), "passwords");
        assert_eq!(entry.search_type(), SearchType::CodeHost);
    }

    #[test]
    fn test_history_entry_long_field_names() {
        let json = r#"{
            "rawTerm": "cams",
            "searchType": "device-index",
            "createdAt": "2025-11-02T09:41:20Z"
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.search_type(), SearchType::DeviceIndex);
    }

    #[test]
    fn test_history_entry_empty_term_rejected() {
        let json = r#"{"query": "  ", "type": "ftp", "timestamp": 1}"#;
        assert!(serde_json::from_str::<HistoryEntry>(json).is_err());
    }

    #[test]
    fn test_history_entry_bad_timestamp_rejected() {
        let json = r#"{"query": "x", "type": "ftp", "timestamp": true}"#;
        assert!(serde_json::from_str::<HistoryEntry>(json).is_err());
    }
}
