use crate::domain::entities::Discussion;
use crate::domain::ports::discussion_repository::DiscussionRepository;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

fn row_to_discussion(row: &AnyRow) -> ApiResult<Discussion> {
    Ok(Discussion {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        author_id: row.try_get("author_id")?,
        team_id: row.try_get("team_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl DiscussionRepository for Database {
    async fn create_discussion(&self, discussion: &Discussion) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO discussions (id, title, body, author_id, team_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&discussion.id)
        .bind(&discussion.title)
        .bind(&discussion.body)
        .bind(&discussion.author_id)
        .bind(&discussion.team_id)
        .bind(&discussion.created_at)
        .bind(&discussion.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            "Discussion created: id={}, team={}, author={}",
            discussion.id,
            discussion.team_id,
            discussion.author_id
        );
        Ok(())
    }

    async fn get_discussion_by_id(&self, id: &str) -> ApiResult<Option<Discussion>> {
        let row = sqlx::query(
            "SELECT id, title, body, author_id, team_id, created_at, updated_at
             FROM discussions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_discussion).transpose()
    }

    async fn get_discussion_by_id_and_team(
        &self,
        id: &str,
        team_id: &str,
    ) -> ApiResult<Option<Discussion>> {
        let row = sqlx::query(
            "SELECT id, title, body, author_id, team_id, created_at, updated_at
             FROM discussions WHERE id = ? AND team_id = ?",
        )
        .bind(id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_discussion).transpose()
    }

    async fn list_discussions_by_team(
        &self,
        team_id: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Discussion>> {
        let rows = sqlx::query(
            "SELECT id, title, body, author_id, team_id, created_at, updated_at
             FROM discussions
             WHERE team_id = ?
             ORDER BY created_at DESC, rowid DESC
             LIMIT ? OFFSET ?",
        )
        .bind(team_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_discussion).collect()
    }

    async fn count_discussions_by_team(&self, team_id: &str) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM discussions WHERE team_id = ?")
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    async fn update_discussion(&self, discussion: &Discussion) -> ApiResult<()> {
        sqlx::query("UPDATE discussions SET title = ?, body = ?, updated_at = ? WHERE id = ?")
            .bind(&discussion.title)
            .bind(&discussion.body)
            .bind(&discussion.updated_at)
            .bind(&discussion.id)
            .execute(&self.pool)
            .await?;

        tracing::info!("Discussion updated: id={}", discussion.id);
        Ok(())
    }

    async fn delete_discussion(&self, id: &str) -> ApiResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE discussion_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM discussions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!("Discussion deleted: id={}", id);
        }
        Ok(deleted)
    }
}
