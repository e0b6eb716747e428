use crate::domain::entities::Team;
use crate::infrastructure::http::middleware::error::ApiResult;

#[async_trait::async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create_team(&self, team: &Team) -> ApiResult<()>;
    async fn get_team_by_id(&self, id: &str) -> ApiResult<Option<Team>>;
    async fn get_team_by_name(&self, name: &str) -> ApiResult<Option<Team>>;
    async fn list_teams(&self) -> ApiResult<Vec<Team>>;
}
