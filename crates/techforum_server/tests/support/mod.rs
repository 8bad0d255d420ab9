//! Shared integration-test server bootstrap helpers.

use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};
use std::path::Path;
use techforum_core::constants::{USER_ID_HEADER, USER_ROLE_HEADER};
use techforum_server::{create_app, AppState, Config, Database};
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_body_size: 1_000_000,
        auto_backup: false,
        allow_public_access: false,
        bind: None,
        cors_origins: vec!["http://localhost:3000".to_string()],
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let state = AppState::new(config, db);
    TestServer::new(create_app(state, false)).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("forum-db");
    let server = test_server_for_config(test_config_for_db_path(&db_path));
    (server, temp_dir)
}

/// Attach credential-service identity headers.
pub(crate) fn signed_in(request: TestRequest, user_id: &str, role: &str) -> TestRequest {
    request
        .add_header(USER_ID_HEADER, user_id)
        .add_header(USER_ROLE_HEADER, role)
}

pub(crate) async fn create_category(server: &TestServer, name: &str) -> String {
    let response = signed_in(server.post("/api/categories"), "root", "admin")
        .json(&json!({
            "name": name,
            "description": format!("Questions about {}", name),
            "color": "#61dafb"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_str().expect("category id").to_string()
}

pub(crate) async fn create_question(
    server: &TestServer,
    user_id: &str,
    category_id: &str,
    title: &str,
    tags: &[&str],
) -> String {
    let response = signed_in(server.post("/api/questions"), user_id, "user")
        .json(&json!({
            "title": title,
            "content": "A question body that is comfortably long enough.",
            "categoryId": category_id,
            "tags": tags
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_str().expect("question id").to_string()
}

pub(crate) async fn create_answer(server: &TestServer, user_id: &str, question_id: &str) -> String {
    let response = signed_in(server.post("/api/answers"), user_id, "user")
        .json(&json!({
            "questionId": question_id,
            "content": "An answer that is long enough to pass."
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_str().expect("answer id").to_string()
}
