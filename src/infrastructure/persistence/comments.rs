use crate::domain::entities::Comment;
use crate::domain::ports::comment_repository::CommentRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

fn row_to_comment(row: &AnyRow) -> ApiResult<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        body: row.try_get("body")?,
        discussion_id: row.try_get("discussion_id")?,
        author_id: row.try_get("author_id")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl CommentRepository for Database {
    async fn create_comment(&self, comment: &Comment) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO comments (id, body, discussion_id, author_id, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&comment.id)
        .bind(&comment.body)
        .bind(&comment.discussion_id)
        .bind(&comment.author_id)
        .bind(&comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("FOREIGN KEY") {
                ApiError::NotFound("Discussion or author not found".to_string())
            } else {
                ApiError::from(e)
            }
        })?;

        tracing::info!(
            "Comment created: id={}, discussion={}",
            comment.id,
            comment.discussion_id
        );
        Ok(())
    }

    async fn get_comment_by_id(&self, id: &str) -> ApiResult<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, body, discussion_id, author_id, created_at
             FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_comment).transpose()
    }

    async fn get_comment_by_id_and_team(
        &self,
        id: &str,
        team_id: &str,
    ) -> ApiResult<Option<Comment>> {
        let row = sqlx::query(
            "SELECT c.id, c.body, c.discussion_id, c.author_id, c.created_at
             FROM comments c
             INNER JOIN discussions d ON d.id = c.discussion_id
             WHERE c.id = ? AND d.team_id = ?",
        )
        .bind(id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_comment).transpose()
    }

    async fn list_comments_by_discussion(&self, discussion_id: &str) -> ApiResult<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT id, body, discussion_id, author_id, created_at
             FROM comments
             WHERE discussion_id = ?
             ORDER BY created_at ASC, rowid ASC",
        )
        .bind(discussion_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_comment).collect()
    }

    async fn delete_comment(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!("Comment deleted: id={}", id);
        }
        Ok(deleted)
    }
}
