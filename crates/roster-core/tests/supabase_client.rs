//! Integration tests for the HTTP backend against a mock service.

use roster_core::backend::{AuthApi, SupabaseClient, UserStore};
use roster_core::records::{UserDraft, UserId};
use roster_core::session;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "test-anon-key";

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&server.uri(), ANON_KEY, "users").unwrap()
}

fn draft() -> UserDraft {
    UserDraft {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        department: "Engineering".to_string(),
        group: "Admins".to_string(),
    }
}

#[tokio::test]
async fn test_sign_in_returns_session_and_authorizes_data_requests() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON_KEY))
        .and(body_json(serde_json::json!({
            "email": "admin@example.com",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "jwt-123",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": "u1", "email": "admin@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("select", "*"))
        .and(header("authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "name": "Ada", "email": "ada@example.com", "department": "Eng", "group": "Admins" },
            { "id": 2, "name": "Alan", "email": "alan@example.com", "department": null, "group": "Users" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let session = client.sign_in("admin@example.com", "pw").await.unwrap().unwrap();
    assert_eq!(session.access_token, "jwt-123");
    assert_eq!(session.user_email.as_deref(), Some("admin@example.com"));

    let users = client.select_all().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, UserId::new("1"));
    assert_eq!(users[1].department, "");
}

#[tokio::test]
async fn test_sign_in_error_message_is_verbatim() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = session::authenticate(&client, "a@b.c", "bad")
        .await
        .unwrap_err();
    assert_eq!(err, "Invalid login credentials");
}

#[tokio::test]
async fn test_sign_in_without_access_token_is_no_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": { "email": "a@b.c" }
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.sign_in("a@b.c", "pw").await.unwrap().is_none());
    let err = session::authenticate(&client, "a@b.c", "pw")
        .await
        .unwrap_err();
    assert_eq!(err, session::NO_SESSION_MESSAGE);
}

#[tokio::test]
async fn test_sign_up_posts_credentials() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(body_json(serde_json::json!({ "email": "new@b.c", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "u2" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).sign_up("new@b.c", "pw").await.unwrap();
}

#[tokio::test]
async fn test_sign_up_failure_is_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "code": 422,
            "msg": "User already registered"
        })))
        .mount(&server)
        .await;

    let err = session::register(&client(&server), "dup@b.c", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User already registered");
}

#[tokio::test]
async fn test_insert_posts_draft_without_id() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "department": "Engineering",
            "group": "Admins"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).insert(&draft()).await.unwrap();
}

#[tokio::test]
async fn test_update_patches_by_id() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.7"))
        .and(body_json(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "department": "Engineering",
            "group": "Admins"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update(&UserId::new("7"), &draft())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_by_id_and_error_surface() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.4"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "code": "42501",
            "message": "permission denied for table users"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    client.delete_by_id(&UserId::new("3")).await.unwrap();
    let err = client.delete_by_id(&UserId::new("4")).await.unwrap_err();
    assert_eq!(err.to_string(), "permission denied for table users");
}

#[tokio::test]
async fn test_select_error_without_json_body_reports_status() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server).select_all().await.unwrap_err();
    assert!(err.to_string().contains("502"));
}
