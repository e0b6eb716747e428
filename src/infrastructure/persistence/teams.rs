use crate::domain::entities::Team;
use crate::domain::ports::team_repository::TeamRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use sqlx::{any::AnyRow, Row};

fn row_to_team(row: &AnyRow) -> ApiResult<Team> {
    Ok(Team {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get::<Option<String>, _>("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    pub(crate) async fn create_team_internal<'e, E>(&self, executor: E, team: &Team) -> ApiResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Any>,
    {
        sqlx::query(
            "INSERT INTO teams (id, name, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&team.id)
        .bind(&team.name)
        .bind(&team.description)
        .bind(&team.created_at)
        .bind(&team.updated_at)
        .execute(executor)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                ApiError::Conflict(format!("Team with name '{}' already exists", team.name))
            } else {
                ApiError::from(e)
            }
        })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl TeamRepository for Database {
    async fn create_team(&self, team: &Team) -> ApiResult<()> {
        self.create_team_internal(&self.pool, team).await?;
        tracing::info!("Team created: id={}, name={}", team.id, team.name);
        Ok(())
    }

    async fn get_team_by_id(&self, id: &str) -> ApiResult<Option<Team>> {
        let row = sqlx::query(
            "SELECT id, name, description, created_at, updated_at
             FROM teams WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn get_team_by_name(&self, name: &str) -> ApiResult<Option<Team>> {
        let row = sqlx::query(
            "SELECT id, name, description, created_at, updated_at
             FROM teams WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn list_teams(&self) -> ApiResult<Vec<Team>> {
        let rows = sqlx::query(
            "SELECT id, name, description, created_at, updated_at
             FROM teams ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_team).collect()
    }
}
