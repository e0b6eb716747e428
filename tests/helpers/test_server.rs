use bulletproof::bootstrap::build_app_state;
use bulletproof::config::Config;
use bulletproof::infrastructure::http::router::build_router;
use bulletproof::infrastructure::persistence::Database;
use serde_json::{json, Value};

use super::test_db::setup_test_db;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Axum app served on an ephemeral local port, backed by a fresh database.
pub struct TestServer {
    pub base_url: String,
    pub db: Database,
    pub http: reqwest::Client,
}

/// A registered account as seen by the tests.
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub token: String,
    pub user_id: String,
    pub team_id: Option<String>,
    pub role: String,
}

impl TestServer {
    pub async fn start() -> Self {
        let db = setup_test_db().await;
        let state = build_app_state(db.clone(), &Config::default());
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            db,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("GET request failed")
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> reqwest::Response {
        let mut request = self.http.post(self.url(path)).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("POST request failed")
    }

    pub async fn patch(&self, path: &str, token: &str, body: Value) -> reqwest::Response {
        self.http
            .patch(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .expect("PATCH request failed")
    }

    pub async fn delete(&self, path: &str, token: &str) -> reqwest::Response {
        self.http
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("DELETE request failed")
    }

    async fn register(&self, body: Value) -> TestAccount {
        let response = self.post("/api/auth/register", None, body).await;
        assert_eq!(response.status().as_u16(), 201, "registration failed");
        let auth: Value = response.json().await.expect("Invalid register response");

        TestAccount {
            token: auth["token"].as_str().expect("token").to_string(),
            user_id: auth["user"]["id"].as_str().expect("user id").to_string(),
            team_id: auth["user"]["teamId"].as_str().map(str::to_string),
            role: auth["user"]["role"].as_str().expect("role").to_string(),
        }
    }

    /// Registers a user who creates (and administers) a new team.
    pub async fn register_team_admin(&self, email: &str, team_name: &str) -> TestAccount {
        self.register(json!({
            "firstName": "Team",
            "lastName": "Admin",
            "email": email,
            "password": TEST_PASSWORD,
            "teamName": team_name,
        }))
        .await
    }

    /// Registers a regular user into an existing team.
    pub async fn register_member(&self, email: &str, team_id: &str) -> TestAccount {
        self.register(json!({
            "firstName": "Team",
            "lastName": "Member",
            "email": email,
            "password": TEST_PASSWORD,
            "teamId": team_id,
        }))
        .await
    }

    /// Registers a user without any team.
    pub async fn register_loner(&self, email: &str) -> TestAccount {
        self.register(json!({
            "firstName": "No",
            "lastName": "Team",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await
    }

    /// Creates a discussion and returns its id.
    pub async fn create_discussion(&self, token: &str, title: &str) -> String {
        let response = self
            .post(
                "/api/discussions",
                Some(token),
                json!({ "title": title, "body": format!("Body of {}", title) }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201, "discussion creation failed");
        let body: Value = response.json().await.expect("Invalid discussion response");
        body["discussion"]["id"].as_str().expect("discussion id").to_string()
    }

    /// Creates a comment and returns its id.
    pub async fn create_comment(&self, token: &str, discussion_id: &str, text: &str) -> String {
        let response = self
            .post(
                "/api/comments",
                Some(token),
                json!({ "body": text, "discussionId": discussion_id }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201, "comment creation failed");
        let body: Value = response.json().await.expect("Invalid comment response");
        body["comment"]["id"].as_str().expect("comment id").to_string()
    }
}

/// Reads the status code and JSON body of a response.
pub async fn status_and_json(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}
