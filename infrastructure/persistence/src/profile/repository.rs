use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::profile::model::{DailyIntake, UserProfile};
use business::domain::profile::repository::UserProfileRepository;
use business::domain::shared::value_objects::UserId;

use super::entity::{DailyIntakeEntity, UserProfileEntity};

pub struct UserProfileRepositoryPostgres {
    pool: PgPool,
}

impl UserProfileRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserProfileRepository for UserProfileRepositoryPostgres {
    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, RepositoryError> {
        let entity = sqlx::query_as::<_, UserProfileEntity>(
            r#"SELECT user_id, diet_type, allergies, age, weight_kg, height_cm, goals,
                activity_level, language, utc_offset_minutes, is_subscribed,
                target_calories, target_protein, target_carbs, target_fat, preferred_budget
            FROM user_profiles WHERE user_id = $1"#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn get_daily_intake(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<DailyIntake, RepositoryError> {
        let entity = sqlx::query_as::<_, DailyIntakeEntity>(
            r#"SELECT
                COALESCE(SUM(calories), 0)::FLOAT8 AS calories,
                COALESCE(SUM(protein), 0)::FLOAT8 AS protein,
                COALESCE(SUM(carbs), 0)::FLOAT8 AS carbs,
                COALESCE(SUM(fat), 0)::FLOAT8 AS fat
            FROM logged_meals WHERE user_id = $1 AND logged_on = $2"#,
        )
        .bind(user_id.as_str())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entity.into_domain())
    }
}
