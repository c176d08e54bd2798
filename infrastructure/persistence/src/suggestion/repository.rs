use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;
use business::domain::suggestion::model::SuggestionKind;
use business::domain::suggestion::repository::SuggestionRepository;
use business::domain::suggestion::store::SuggestionStore;

use super::entity::{KeyValueEntity, encode};

const UPSERT_ENTRY: &str = r#"INSERT INTO key_value_entries (user_id, key, value, updated_at)
    VALUES ($1, $2, $3, NOW())
    ON CONFLICT (user_id, key) DO UPDATE SET
        value = EXCLUDED.value,
        updated_at = EXCLUDED.updated_at"#;

pub struct SuggestionRepositoryPostgres {
    pool: PgPool,
}

impl SuggestionRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_entry(
        &self,
        user_id: &UserId,
        key: &str,
    ) -> Result<Option<KeyValueEntity>, RepositoryError> {
        sqlx::query_as::<_, KeyValueEntity>(
            "SELECT user_id, key, value, updated_at FROM key_value_entries WHERE user_id = $1 AND key = $2",
        )
        .bind(user_id.as_str())
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)
    }
}

async fn upsert_entry<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: &UserId,
    key: &str,
    value: serde_json::Value,
) -> Result<(), RepositoryError> {
    sqlx::query(UPSERT_ENTRY)
        .bind(user_id.as_str().to_owned())
        .bind(key.to_owned())
        .bind(value)
        .execute(executor)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

    Ok(())
}

#[async_trait]
impl SuggestionRepository for SuggestionRepositoryPostgres {
    async fn load_store(
        &self,
        user_id: &UserId,
        kind: SuggestionKind,
    ) -> Result<SuggestionStore, RepositoryError> {
        match self.find_entry(user_id, &kind.store_key()).await? {
            Some(entity) => entity.decode(),
            None => Ok(SuggestionStore::default()),
        }
    }

    async fn save_store(
        &self,
        user_id: &UserId,
        kind: SuggestionKind,
        store: &SuggestionStore,
    ) -> Result<(), RepositoryError> {
        upsert_entry(&self.pool, user_id, &kind.store_key(), encode(store)?).await
    }

    async fn load_history(
        &self,
        user_id: &UserId,
        kind: SuggestionKind,
    ) -> Result<Vec<String>, RepositoryError> {
        match self.find_entry(user_id, &kind.history_key()).await? {
            Some(entity) => entity.decode(),
            None => Ok(Vec::new()),
        }
    }

    async fn commit_batch(
        &self,
        user_id: &UserId,
        kind: SuggestionKind,
        store: &SuggestionStore,
        history: &[String],
    ) -> Result<(), RepositoryError> {
        let store_value = encode(store)?;
        let history_value = encode(&history)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        upsert_entry(&mut *tx, user_id, &kind.store_key(), store_value).await?;
        upsert_entry(&mut *tx, user_id, &kind.history_key(), history_value).await?;

        tx.commit()
            .await
            .map_err(|_| RepositoryError::DatabaseError)
    }
}
