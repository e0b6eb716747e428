use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    domain::entities::Team,
    infrastructure::http::middleware::{ApiResult, AppState, AuthenticatedUser},
    infrastructure::http::response::Data,
};

// GET /api/teams - public, feeds the registration form
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Json<Data<Vec<Team>>>> {
    let teams = state.team_service.list_teams().await?;
    Ok(Json(Data::new(teams)))
}

// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    axum::Extension(_user): axum::Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
) -> ApiResult<Json<Data<Team>>> {
    let team = state.team_service.get_team(&team_id).await?;
    Ok(Json(Data::new(team)))
}
