mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_rejects_invalid_email() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "email": "not-an-email", "password": "supersecret" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert!(body["field_errors"]["email"].is_string(), "expected email field error: {}", body);
    Ok(())
}

#[tokio::test]
async fn register_rejects_short_password() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "email": "alice@example.com", "password": "ab" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["field_errors"]["password"].is_string(), "expected password field error: {}", body);
    Ok(())
}

#[tokio::test]
async fn login_rejects_empty_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": "", "password": "" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/alunos", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_tokens_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/alunos", server.base_url))
        .bearer_auth("definitely.not.a.jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_login_whoami_round_trip() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("auth-round-trip");

    // Register
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "email": email, "password": "supersecret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    // Profile is provisioned in the same transaction as the identity
    assert_eq!(body["data"]["profile"]["email"], email);

    // Registering the same email again conflicts
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "email": email, "password": "supersecret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Login works with the right password
    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "supersecret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // ...and fails with the wrong one
    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Whoami sees the same identity and its profile
    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["user"]["email"], email);
    assert_eq!(body["data"]["profile"]["email"], email);
    Ok(())
}
