use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::FromRow;

use business::domain::errors::RepositoryError;

/// One row of `key_value_entries`: a JSON document scoped by user and key.
#[derive(Debug, FromRow)]
pub struct KeyValueEntity {
    pub user_id: String,
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl KeyValueEntity {
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, RepositoryError> {
        serde_json::from_value(self.value).map_err(|e| {
            tracing::warn!(
                user_id = %self.user_id,
                key = %self.key,
                error = %e,
                "Stored value does not match expected shape"
            );
            RepositoryError::CorruptedValue
        })
    }
}

pub fn encode<T: Serialize>(value: &T) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(value).map_err(|_| RepositoryError::CorruptedValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::suggestion::store::SuggestionStore;
    use serde_json::json;

    fn entity(value: serde_json::Value) -> KeyValueEntity {
        KeyValueEntity {
            user_id: "u1".to_string(),
            key: "suggestions:meal".to_string(),
            value,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn should_decode_history_array() {
        let history: Vec<String> = entity(json!(["Lentil soup", "Hummus wrap"]))
            .decode()
            .unwrap();

        assert_eq!(history, vec!["Lentil soup", "Hummus wrap"]);
    }

    #[test]
    fn should_decode_partial_store_with_defaults() {
        let store: SuggestionStore = entity(json!({"lastCategory": "lunch"})).decode().unwrap();

        assert!(store.is_empty());
        assert!(store.last_updated().is_none());
        assert!(store.last_category().is_some());
    }

    #[test]
    fn should_report_corrupted_value_when_shape_mismatches() {
        let result: Result<Vec<String>, _> = entity(json!({"not": "an array"})).decode();

        assert!(matches!(result, Err(RepositoryError::CorruptedValue)));
    }
}
