use crate::{
    domain::entities::Team,
    domain::ports::team_repository::TeamRepository,
    infrastructure::http::middleware::error::{ApiError, ApiResult},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TeamService {
    team_repo: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(team_repo: Arc<dyn TeamRepository>) -> Self {
        Self { team_repo }
    }

    pub async fn create_team(&self, team: Team) -> ApiResult<Team> {
        self.team_repo.create_team(&team).await?;
        Ok(team)
    }

    pub async fn get_team(&self, team_id: &str) -> ApiResult<Team> {
        self.team_repo
            .get_team_by_id(team_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Team {} not found", team_id)))
    }

    pub async fn find_team_by_name(&self, name: &str) -> ApiResult<Option<Team>> {
        self.team_repo.get_team_by_name(name).await
    }

    pub async fn list_teams(&self) -> ApiResult<Vec<Team>> {
        self.team_repo.list_teams().await
    }
}
