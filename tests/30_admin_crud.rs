mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// End-to-end editorial flow against a live database: draft project is
// admin-only, publishing exposes it, deleting removes it everywhere.
#[tokio::test]
async fn draft_publish_delete_lifecycle() -> Result<()> {
    let server = common::ensure_server().await?;
    let Some((email, password)) = common::live_admin_credentials() else {
        eprintln!("skipping: set ATELIER_TEST_ADMIN_EMAIL/PASSWORD and DATABASE_URL for live tests");
        return Ok(());
    };

    let token = common::login(&server.base_url, &email, &password).await?;
    let client = reqwest::Client::new();

    // Create a draft
    let res = client
        .post(format!("{}/api/admin/projects", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Villa A",
            "description": "Hillside residence",
            "location": "Lagos",
            "category": "Residential",
            "published": false
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "create failed");
    let body = res.json::<serde_json::Value>().await?;
    let id = body["data"]["id"].as_str().expect("created project id").to_string();
    assert!(!body["data"]["created_at"].as_str().unwrap_or("").is_empty());

    // Present in the admin list, absent from the public list
    let admin_list = client
        .get(format!("{}/api/admin/projects", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert!(contains_id(&admin_list["data"], &id), "draft missing from admin list");

    let public_list = client
        .get(format!("{}/api/content/projects", server.base_url))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert!(!contains_id(&public_list["data"], &id), "draft leaked to public list");

    // Publish
    let res = client
        .put(format!("{}/api/admin/projects/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "published": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK, "publish failed");
    let updated = res.json::<serde_json::Value>().await?;
    // Only the named field (and updated_at) changed
    assert_eq!(updated["data"]["title"], json!("Villa A"));
    assert_eq!(updated["data"]["location"], json!("Lagos"));
    assert_eq!(updated["data"]["published"], json!(true));

    let public_list = client
        .get(format!("{}/api/content/projects", server.base_url))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert!(contains_id(&public_list["data"], &id), "published project missing from public list");

    // Delete
    let res = client
        .delete(format!("{}/api/admin/projects/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK, "delete failed");

    let admin_list = client
        .get(format!("{}/api/admin/projects", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert!(!contains_id(&admin_list["data"], &id), "deleted project still in admin list");

    let res = client
        .get(format!("{}/api/admin/projects/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND, "deleted project still retrievable");

    Ok(())
}

#[tokio::test]
async fn settings_updates_target_the_singleton() -> Result<()> {
    let server = common::ensure_server().await?;
    let Some((email, password)) = common::live_admin_credentials() else {
        eprintln!("skipping: set ATELIER_TEST_ADMIN_EMAIL/PASSWORD and DATABASE_URL for live tests");
        return Ok(());
    };

    let token = common::login(&server.base_url, &email, &password).await?;
    let client = reqwest::Client::new();

    let first = client
        .put(format!("{}/api/admin/settings", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "site_title": "Atelier One" }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let second = client
        .put(format!("{}/api/admin/settings", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "site_title": "Atelier Two" }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    // Same row both times
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["site_title"], json!("Atelier Two"));

    Ok(())
}

#[tokio::test]
async fn create_validation_blocks_before_store() -> Result<()> {
    let server = common::ensure_server().await?;
    let Some((email, password)) = common::live_admin_credentials() else {
        eprintln!("skipping: set ATELIER_TEST_ADMIN_EMAIL/PASSWORD and DATABASE_URL for live tests");
        return Ok(());
    };

    let token = common::login(&server.base_url, &email, &password).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/admin/projects", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "title": "", "description": "", "location": "", "category": "" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
    assert_eq!(body["field_errors"]["title"], json!("Title is required"));
    assert_eq!(body["field_errors"]["category"], json!("Category is required"));

    Ok(())
}

fn contains_id(list: &serde_json::Value, id: &str) -> bool {
    list.as_array()
        .map(|items| items.iter().any(|item| item["id"] == serde_json::json!(id)))
        .unwrap_or(false)
}
