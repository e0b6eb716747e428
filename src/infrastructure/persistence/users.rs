use crate::domain::entities::{Role, Team, User};
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, role, team_id, bio, created_at, updated_at";

fn row_to_user(row: &AnyRow) -> ApiResult<User> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: role.parse::<Role>().map_err(ApiError::Internal)?,
        team_id: row.try_get::<Option<String>, _>("team_id")?,
        bio: row.try_get("bio")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_unique_email(e: sqlx::Error, email: &str) -> ApiError {
    if e.to_string().contains("UNIQUE") {
        ApiError::Conflict(format!("Email '{}' is already registered", email))
    } else {
        ApiError::from(e)
    }
}

// Internal helpers
impl Database {
    pub(crate) async fn create_user_internal<'e, E>(&self, executor: E, user: &User) -> ApiResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Any>,
    {
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, role, team_id, bio, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.to_string())
        .bind(&user.team_id)
        .bind(&user.bio)
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .execute(executor)
        .await
        .map_err(|e| map_unique_email(e, &user.email))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for Database {
    async fn create_user(&self, user: &User) -> ApiResult<()> {
        self.create_user_internal(&self.pool, user).await?;
        tracing::info!("User created: id={}, role={}", user.id, user.role);
        Ok(())
    }

    async fn create_user_with_team(&self, team: &Team, user: &User) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        self.create_team_internal(&mut *tx, team).await?;
        self.create_user_internal(&mut *tx, user).await?;

        tx.commit().await?;

        tracing::info!(
            "User created with new team: user={}, team={}",
            user.id,
            team.id
        );
        Ok(())
    }

    async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_user_by_id_and_team(&self, id: &str, team_id: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = ? AND team_id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn list_users_by_team(&self, team_id: &str) -> ApiResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users WHERE team_id = ? ORDER BY created_at ASC",
            USER_COLUMNS
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_user).collect()
    }

    async fn update_user_profile(&self, user: &User) -> ApiResult<()> {
        sqlx::query(
            "UPDATE users SET first_name = ?, last_name = ?, email = ?, bio = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.bio)
        .bind(&user.updated_at)
        .bind(&user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_email(e, &user.email))?;

        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> ApiResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Comments on the user's discussions, then the user's own comments
        sqlx::query(
            "DELETE FROM comments WHERE discussion_id IN
                (SELECT id FROM discussions WHERE author_id = ?)",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM comments WHERE author_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM discussions WHERE author_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!("User deleted: id={}", user_id);
        }
        Ok(deleted)
    }
}
