use crate::domain::entities::{Team, User};
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> ApiResult<()>;
    /// Creates the team and its first member atomically.
    async fn create_user_with_team(&self, team: &Team, user: &User) -> ApiResult<()>;
    async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> ApiResult<Option<User>>;
    async fn get_user_by_id_and_team(&self, id: &str, team_id: &str) -> ApiResult<Option<User>>;
    async fn list_users_by_team(&self, team_id: &str) -> ApiResult<Vec<User>>;
    async fn update_user_profile(&self, user: &User) -> ApiResult<()>;
    /// Returns false when no row was deleted.
    async fn delete_user(&self, user_id: &str) -> ApiResult<bool>;
}
