use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use url::Url;

use super::cache::QueryCache;
use super::notifications::{NewNotification, NotificationStore};
use crate::domain::entities::{
    AuthResponse, Comment, CreateCommentRequest, CreateDiscussionRequest, Discussion,
    DiscussionPage, LoginRequest, RegisterRequest, Team, UpdateDiscussionRequest,
    UpdateProfileRequest, User,
};
use crate::infrastructure::http::middleware::error::FieldIssue;
use crate::infrastructure::http::response::{CommentEnvelope, Data, DiscussionEnvelope, Success};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{status}: {message}")]
    Api {
        status: u16,
        message: String,
        issues: Vec<FieldIssue>,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Url(_) => None,
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ClientError::Api { issues, .. } => issues,
            ClientError::Transport(_) | ClientError::Url(_) => &[],
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Builds an API path with percent-encoded segments and query pairs. The
/// result is both the request path and the cache key.
fn api_path(segments: &[&str], query: &[(&str, &str)]) -> ClientResult<String> {
    let mut target = Url::parse("http://localhost/")?;
    if let Ok(mut path) = target.path_segments_mut() {
        path.clear().push("api").extend(segments);
    }
    if !query.is_empty() {
        target.query_pairs_mut().extend_pairs(query);
    }
    Ok(target[url::Position::BeforePath..].to_string())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_message: String,
    #[serde(default)]
    data: Option<ErrorData>,
}

#[derive(Deserialize)]
struct ErrorData {
    #[serde(default)]
    issues: Vec<FieldIssue>,
}

/// Typed access to the HTTP API.
///
/// GET results are cached per path. Every mutation invalidates the affected
/// query prefixes and pushes a success or error notification.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<Mutex<Option<String>>>,
    cache: QueryCache,
    notifications: NotificationStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_parts(base_url, QueryCache::default(), NotificationStore::new())
    }

    pub fn with_parts(
        base_url: impl Into<String>,
        cache: QueryCache,
        notifications: NotificationStore,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::default(),
            cache,
            notifications,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    fn token_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn token(&self) -> Option<String> {
        self.token_slot().clone()
    }

    /// Replaces the bearer token and drops anything cached for the previous one.
    pub fn set_token(&self, token: Option<String>) {
        *self.token_slot() = token;
        self.cache.clear();
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let bytes = response.bytes().await?;
        let error = match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(body) => ClientError::Api {
                status: status.as_u16(),
                message: body.status_message,
                issues: body.data.map(|d| d.issues).unwrap_or_default(),
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
                issues: Vec::new(),
            },
        };
        Err(error)
    }

    async fn query<T>(&self, path: &str) -> ClientResult<T>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(hit) = self.cache.get::<T>(path) {
            tracing::trace!("Cache hit for {}", path);
            return Ok(hit);
        }
        let value: T = self.send(self.request(Method::GET, path)).await?;
        self.cache.insert(path, &value);
        Ok(value)
    }

    async fn mutate<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        invalidate: &[&str],
        success_title: &str,
    ) -> ClientResult<T> {
        match self.send::<T>(builder).await {
            Ok(value) => {
                for prefix in invalidate {
                    self.cache.invalidate_prefix(prefix);
                }
                self.notifications.add(NewNotification::success(success_title));
                Ok(value)
            }
            Err(e) => {
                self.notifications
                    .add(NewNotification::error("Request failed").with_message(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn healthcheck(&self) -> ClientResult<bool> {
        #[derive(Deserialize)]
        struct Health {
            ok: bool,
        }
        let health: Health = self
            .send(self.request(Method::GET, "/api/healthcheck"))
            .await?;
        Ok(health.ok)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let auth: AuthResponse = self
            .send(self.request(Method::POST, "/api/auth/register").json(request))
            .await?;
        self.set_token(Some(auth.token.clone()));
        Ok(auth)
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        let auth: AuthResponse = self
            .send(self.request(Method::POST, "/api/auth/login").json(request))
            .await?;
        self.set_token(Some(auth.token.clone()));
        Ok(auth)
    }

    /// Ends the server session. The local token is dropped even when the call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        let result: ClientResult<Success> =
            self.send(self.request(Method::POST, "/api/auth/logout")).await;
        self.set_token(None);
        result.map(|_| ())
    }

    pub async fn me(&self) -> ClientResult<User> {
        let user: Data<User> = self.query("/api/auth/me").await?;
        Ok(user.data)
    }

    pub async fn teams(&self) -> ClientResult<Vec<Team>> {
        let teams: Data<Vec<Team>> = self.query("/api/teams").await?;
        Ok(teams.data)
    }

    pub async fn team(&self, id: &str) -> ClientResult<Team> {
        let team: Data<Team> = self.query(&api_path(&["teams", id], &[])?).await?;
        Ok(team.data)
    }

    pub async fn users(&self) -> ClientResult<Vec<User>> {
        let users: Data<Vec<User>> = self.query("/api/users").await?;
        Ok(users.data)
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ClientResult<User> {
        let user: Data<User> = self
            .mutate(
                self.request(Method::PATCH, "/api/users/profile").json(request),
                &["/api/users", "/api/auth/me"],
                "Profile Updated",
            )
            .await?;
        Ok(user.data)
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<()> {
        let _: Success = self
            .mutate(
                self.request(Method::DELETE, &api_path(&["users", id], &[])?),
                &["/api/users"],
                "User Deleted",
            )
            .await?;
        Ok(())
    }

    pub async fn discussions(&self, page: i64) -> ClientResult<DiscussionPage> {
        let page = page.to_string();
        self.query(&api_path(&["discussions"], &[("page", page.as_str())])?)
            .await
    }

    pub async fn discussion(&self, id: &str) -> ClientResult<Discussion> {
        let discussion: Data<Discussion> =
            self.query(&api_path(&["discussions", id], &[])?).await?;
        Ok(discussion.data)
    }

    pub async fn create_discussion(
        &self,
        request: &CreateDiscussionRequest,
    ) -> ClientResult<Discussion> {
        let created: DiscussionEnvelope = self
            .mutate(
                self.request(Method::POST, "/api/discussions").json(request),
                &["/api/discussions"],
                "Discussion Created",
            )
            .await?;
        Ok(created.discussion)
    }

    pub async fn update_discussion(
        &self,
        id: &str,
        request: &UpdateDiscussionRequest,
    ) -> ClientResult<Discussion> {
        let updated: Data<Discussion> = self
            .mutate(
                self.request(Method::PATCH, &api_path(&["discussions", id], &[])?)
                    .json(request),
                &["/api/discussions"],
                "Discussion Updated",
            )
            .await?;
        Ok(updated.data)
    }

    pub async fn delete_discussion(&self, id: &str) -> ClientResult<()> {
        let comments_key = api_path(&["comments"], &[("discussionId", id)])?;
        let _: Success = self
            .mutate(
                self.request(Method::DELETE, &api_path(&["discussions", id], &[])?),
                &["/api/discussions", comments_key.as_str()],
                "Discussion Deleted",
            )
            .await?;
        Ok(())
    }

    pub async fn comments(&self, discussion_id: &str) -> ClientResult<Vec<Comment>> {
        let comments: Data<Vec<Comment>> = self
            .query(&api_path(&["comments"], &[("discussionId", discussion_id)])?)
            .await?;
        Ok(comments.data)
    }

    pub async fn create_comment(&self, request: &CreateCommentRequest) -> ClientResult<Comment> {
        let comments_key =
            api_path(&["comments"], &[("discussionId", request.discussion_id.as_str())])?;
        let created: CommentEnvelope = self
            .mutate(
                self.request(Method::POST, "/api/comments").json(request),
                &[comments_key.as_str()],
                "Comment Created",
            )
            .await?;
        Ok(created.comment)
    }

    pub async fn delete_comment(&self, id: &str) -> ClientResult<()> {
        let _: Success = self
            .mutate(
                self.request(Method::DELETE, &api_path(&["comments", id], &[])?),
                &["/api/comments"],
                "Comment Deleted",
            )
            .await?;
        Ok(())
    }
}
