mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_reports_degraded_without_database() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(server.url("/health")).await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn root_lists_resources() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(server.url("/")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "School Portal API");
    assert!(body["data"]["endpoints"]["results"].is_string());
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_not_found() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(server.url("/does-not-exist")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await?;
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}
