mod helpers;

use bulletproof::client::{ApiClient, NotificationKind};
use bulletproof::domain::entities::{
    CreateCommentRequest, CreateDiscussionRequest, LoginRequest, RegisterRequest,
    UpdateDiscussionRequest, UpdateProfileRequest,
};
use helpers::*;

fn registration(email: &str, team_name: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        first_name: "Client".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        team_id: None,
        team_name: team_name.map(str::to_string),
    }
}

fn new_discussion(title: &str) -> CreateDiscussionRequest {
    CreateDiscussionRequest {
        title: title.to_string(),
        body: "Body".to_string(),
    }
}

#[tokio::test]
async fn test_client_session_lifecycle() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.base_url);

    assert!(client.healthcheck().await.unwrap());
    assert!(client.token().is_none());

    let auth = client
        .register(&registration("client@example.com", Some("Client Team")))
        .await
        .unwrap();
    assert_eq!(client.token().as_deref(), Some(auth.token.as_str()));
    assert_eq!(client.me().await.unwrap().email, "client@example.com");

    client.logout().await.unwrap();
    assert!(client.token().is_none());

    let err = client.me().await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    client
        .login(&LoginRequest {
            email: "client@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(client.me().await.unwrap().id, auth.user.id);
}

#[tokio::test]
async fn test_client_surfaces_validation_issues() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.base_url);

    let mut request = registration("bad", None);
    request.password = "x".to_string();
    let err = client.register(&request).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    let fields: Vec<&str> = err.issues().iter().map(|i| i.field.as_str()).collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn test_mutations_invalidate_cached_queries() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.base_url);
    client
        .register(&registration("cache@example.com", Some("Cache Team")))
        .await
        .unwrap();

    let empty = client.discussions(1).await.unwrap();
    assert_eq!(empty.meta.total, 0);
    assert!(client.cache().contains("/api/discussions?page=1"));

    let created = client.create_discussion(&new_discussion("Fresh")).await.unwrap();
    assert!(!client.cache().contains("/api/discussions?page=1"));

    let page = client.discussions(1).await.unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].id, created.id);

    let updated = client
        .update_discussion(
            &created.id,
            &UpdateDiscussionRequest {
                title: Some("Renamed".to_string()),
                body: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(client.discussion(&created.id).await.unwrap().title, "Renamed");
}

#[tokio::test]
async fn test_cached_queries_skip_the_network() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.base_url);
    client
        .register(&registration("stale@example.com", Some("Stale Team")))
        .await
        .unwrap();

    let created = client.create_discussion(&new_discussion("Cached")).await.unwrap();
    assert_eq!(client.discussion(&created.id).await.unwrap().title, "Cached");

    // Changed behind the client's back: the cached copy is still served
    let token = client.token().unwrap();
    let response = server
        .patch(
            &format!("/api/discussions/{}", created.id),
            &token,
            serde_json::json!({ "title": "Changed elsewhere" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(client.discussion(&created.id).await.unwrap().title, "Cached");

    client.cache().invalidate_prefix("/api/discussions");
    assert_eq!(
        client.discussion(&created.id).await.unwrap().title,
        "Changed elsewhere"
    );
}

#[tokio::test]
async fn test_mutations_push_notifications() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.base_url);
    client
        .register(&registration("toast@example.com", Some("Toast Team")))
        .await
        .unwrap();

    let discussion = client.create_discussion(&new_discussion("Toasty")).await.unwrap();
    let comment = client
        .create_comment(&CreateCommentRequest {
            body: "Nice".to_string(),
            discussion_id: discussion.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(client.comments(&discussion.id).await.unwrap().len(), 1);

    client.delete_comment(&comment.id).await.unwrap();
    assert!(client.comments(&discussion.id).await.unwrap().is_empty());

    // Deleting twice fails and is reported as an error toast
    assert!(client.delete_comment(&comment.id).await.is_err());

    let titles: Vec<(NotificationKind, String)> = client
        .notifications()
        .notifications()
        .into_iter()
        .map(|n| (n.kind, n.title))
        .collect();
    assert_eq!(
        titles,
        vec![
            (NotificationKind::Success, "Discussion Created".to_string()),
            (NotificationKind::Success, "Comment Created".to_string()),
            (NotificationKind::Success, "Comment Deleted".to_string()),
            (NotificationKind::Error, "Request failed".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_profile_update_refreshes_me() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.base_url);
    client
        .register(&registration("profile@example.com", None))
        .await
        .unwrap();

    assert_eq!(client.me().await.unwrap().bio, "");

    client
        .update_profile(&UpdateProfileRequest {
            bio: Some("Hello there".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(client.me().await.unwrap().bio, "Hello there");
}

#[tokio::test]
async fn test_admin_user_management_through_client() {
    let server = TestServer::start().await;
    let admin = ApiClient::new(&server.base_url);
    let auth = admin
        .register(&registration("boss@example.com", Some("Managed")))
        .await
        .unwrap();
    let team_id = auth.user.team_id.clone().unwrap();

    let member = server.register_member("worker@example.com", &team_id).await;

    assert_eq!(admin.users().await.unwrap().len(), 2);
    admin.delete_user(&member.user_id).await.unwrap();
    assert_eq!(admin.users().await.unwrap().len(), 1);

    assert_eq!(admin.teams().await.unwrap().len(), 1);
    assert_eq!(admin.team(&team_id).await.unwrap().name, "Managed");
}
