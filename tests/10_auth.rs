mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn admin_routes_reject_missing_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in [
        "/api/admin/projects",
        "/api/admin/team",
        "/api/admin/settings",
        "/api/admin/activity",
    ] {
        let res = client.get(format!("{}{}", server.base_url, path)).send().await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 for {}, got {}",
            path,
            res.status()
        );

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["success"], serde_json::json!(false), "body: {}", body);
        assert_eq!(body["code"], serde_json::json!("UNAUTHORIZED"), "body: {}", body);
    }

    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_garbage_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/admin/projects", server.base_url))
        .header("Authorization", "Bearer not.a.jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn upload_without_credential_makes_no_upstream_call() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Rejected at the auth layer, before the body is even examined
    let res = client
        .post(format!("{}/api/admin/upload", server.base_url))
        .json(&serde_json::json!({ "file": "aGVsbG8=", "folder": "test" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn malformed_authorization_schemes_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for header in ["Token abc", "Bearer ", "bearer-without-space"] {
        let res = client
            .get(format!("{}/api/admin/team", server.base_url))
            .header("Authorization", header)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "header {:?}", header);
    }

    Ok(())
}
