mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn writes_without_token_are_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let attempts = [
        client.post(server.url("/students")).json(&json!({})),
        client.post(server.url("/results")).json(&json!({})),
        client.delete(server.url("/notices/00000000-0000-0000-0000-000000000000")),
        client.delete(server.url("/gallery/00000000-0000-0000-0000-000000000000")),
        client.get(server.url("/admin/dashboard")),
    ];

    for request in attempts {
        let res = request.send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = res.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn invalid_token_is_forbidden() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .put(server.url("/teachers/00000000-0000-0000-0000-000000000000"))
        .bearer_auth("definitely.not.valid")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_forbidden() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/admin/dashboard"))
        .basic_auth("admin", Some("password"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}
