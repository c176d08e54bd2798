use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::{DailyIntake, UserProfile};

/// Read-only port over the remote document store holding user profiles
/// and logged meals.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, RepositoryError>;
    async fn get_daily_intake(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<DailyIntake, RepositoryError>;
}
