use crate::{
    domain::entities::{UpdateProfileRequest, User},
    domain::ports::user_repository::UserRepository,
    infrastructure::http::middleware::error::{ApiError, ApiResult},
    shared::utils::email_validator::normalize_email,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn list_team_users(&self, team_id: &str) -> ApiResult<Vec<User>> {
        self.user_repo.list_users_by_team(team_id).await
    }

    /// Applies the present fields of `changes` to `user` and persists them.
    pub async fn update_profile(
        &self,
        mut user: User,
        changes: UpdateProfileRequest,
    ) -> ApiResult<User> {
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(email) = changes.email {
            let email = normalize_email(&email);
            if email != user.email {
                if let Some(existing) = self.user_repo.get_user_by_email(&email).await? {
                    if existing.id != user.id {
                        return Err(ApiError::Conflict(format!(
                            "Email '{}' is already registered",
                            email
                        )));
                    }
                }
            }
            user.email = email;
        }
        if let Some(bio) = changes.bio {
            user.bio = bio;
        }
        user.updated_at = crate::domain::entities::timestamp_now();

        self.user_repo.update_user_profile(&user).await?;
        tracing::info!("Profile updated: user={}", user.id);
        Ok(user)
    }

    /// Deletes a user of `team_id`; users of other teams are reported as missing.
    pub async fn delete_team_user(&self, user_id: &str, team_id: &str) -> ApiResult<()> {
        self.user_repo
            .get_user_by_id_and_team(user_id, team_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user_id)))?;

        if !self.user_repo.delete_user(user_id).await? {
            return Err(ApiError::NotFound(format!("User {} not found", user_id)));
        }
        Ok(())
    }
}
