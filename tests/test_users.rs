mod helpers;

use helpers::*;
use serde_json::json;

#[tokio::test]
async fn test_list_users_requires_admin() {
    let server = TestServer::start().await;
    let admin = server.register_team_admin("admin@example.com", "Crew").await;
    let member = server
        .register_member("member@example.com", admin.team_id.as_deref().unwrap())
        .await;

    let (status, body) = status_and_json(server.get("/api/users", Some(&member.token)).await).await;
    assert_eq!(status, 403);
    assert_eq!(body["statusMessage"], "Requires ADMIN role");

    let (status, body) = status_and_json(server.get("/api/users", Some(&admin.token)).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_users_is_scoped_to_team() {
    let server = TestServer::start().await;
    let admin = server.register_team_admin("a@example.com", "Team A").await;
    server.register_team_admin("b@example.com", "Team B").await;
    server.register_loner("loner@example.com").await;

    let (_, body) = status_and_json(server.get("/api/users", Some(&admin.token)).await).await;
    let emails: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["a@example.com"]);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let server = TestServer::start().await;
    let admin = server.register_team_admin("admin@example.com", "Crew").await;

    let response = server
        .delete(&format!("/api/users/{}", admin.user_id), &admin.token)
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = server.get("/api/auth/me", Some(&admin.token)).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_admin_deletes_team_member_and_their_sessions() {
    let server = TestServer::start().await;
    let admin = server.register_team_admin("admin@example.com", "Crew").await;
    let member = server
        .register_member("member@example.com", admin.team_id.as_deref().unwrap())
        .await;
    let discussion_id = server.create_discussion(&member.token, "Soon gone").await;

    let (status, body) = status_and_json(
        server
            .delete(&format!("/api/users/{}", member.user_id), &admin.token)
            .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true }));

    // The member's session died with the account
    let response = server.get("/api/auth/me", Some(&member.token)).await;
    assert_eq!(response.status().as_u16(), 401);

    // So did their discussions
    let response = server
        .get(&format!("/api/discussions/{}", discussion_id), Some(&admin.token))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_admin_cannot_delete_users_of_other_teams() {
    let server = TestServer::start().await;
    let admin_a = server.register_team_admin("a@example.com", "Team A").await;
    let admin_b = server.register_team_admin("b@example.com", "Team B").await;

    let response = server
        .delete(&format!("/api/users/{}", admin_b.user_id), &admin_a.token)
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = server.get("/api/auth/me", Some(&admin_b.token)).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_member_cannot_delete_users() {
    let server = TestServer::start().await;
    let admin = server.register_team_admin("admin@example.com", "Crew").await;
    let member = server
        .register_member("member@example.com", admin.team_id.as_deref().unwrap())
        .await;

    let response = server
        .delete(&format!("/api/users/{}", admin.user_id), &member.token)
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn test_update_profile() {
    let server = TestServer::start().await;
    let account = server.register_loner("me@example.com").await;

    let (status, body) = status_and_json(
        server
            .patch(
                "/api/users/profile",
                &account.token,
                json!({ "firstName": "  Grace ", "bio": "Compilers" }),
            )
            .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["firstName"], "Grace");
    assert_eq!(body["data"]["bio"], "Compilers");
    assert_eq!(body["data"]["email"], "me@example.com");

    let (_, me) = status_and_json(server.get("/api/auth/me", Some(&account.token)).await).await;
    assert_eq!(me["data"]["firstName"], "Grace");
}

#[tokio::test]
async fn test_update_profile_rejects_invalid_and_taken_email() {
    let server = TestServer::start().await;
    server.register_loner("taken@example.com").await;
    let account = server.register_loner("me@example.com").await;

    let (status, body) = status_and_json(
        server
            .patch("/api/users/profile", &account.token, json!({ "email": "nope" }))
            .await,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["data"]["issues"][0]["field"], "email");

    let response = server
        .patch(
            "/api/users/profile",
            &account.token,
            json!({ "email": "Taken@Example.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn test_update_profile_requires_session() {
    let server = TestServer::start().await;

    let response = server
        .http
        .patch(server.url("/api/users/profile"))
        .json(&json!({ "firstName": "Nobody" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}
