//! Wire-format tests for the payload types: shapes the backend and the
//! data store actually produce.

use payloads::{BuildStatus, Client, SiteBuild, requests, responses};

#[test]
fn check_status_request_shape() {
    let request = requests::CheckStatus {
        email: "jane@acme.test".to_string(),
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({ "email": "jane@acme.test" }));
}

#[test]
fn check_status_outcome_shape() {
    let outcome: responses::CheckStatusOutcome = serde_json::from_str(
        r#"{"redirect_url": "/dashboard?client_id=5f9c2e96-1dc5-4c9a-9c3e-0f6a1a3b2c1d"}"#,
    )
    .unwrap();
    assert_eq!(
        outcome.redirect_url,
        "/dashboard?client_id=5f9c2e96-1dc5-4c9a-9c3e-0f6a1a3b2c1d"
    );
}

#[test]
fn client_row_deserializes() {
    let row = r#"{
        "id": "5f9c2e96-1dc5-4c9a-9c3e-0f6a1a3b2c1d",
        "client_name": "Acme Co",
        "full_name": "Jane Smith",
        "contact_email": "jane@acme.test",
        "client_slug": "acme",
        "onboarding_complete": true
    }"#;
    let client: Client = serde_json::from_str(row).unwrap();
    assert_eq!(client.client_slug, "acme");
    assert!(client.onboarding_complete);
}

#[test]
fn site_build_row_deserializes() {
    let row = r#"{
        "id": "3d1a9a30-9f3e-4a26-93a8-4a5f0a7f9b10",
        "status": "building",
        "github_repo_url": "https://github.com/acme/site",
        "vercel_deployment_url": null,
        "created_at": "2026-08-20T15:30:00Z",
        "updated_at": "2026-08-20T15:31:00Z",
        "error_message": null
    }"#;
    let build: SiteBuild = serde_json::from_str(row).unwrap();
    assert_eq!(build.status, BuildStatus::Building);
    assert!(!build.status.is_terminal());
    assert!(build.vercel_deployment_url.is_none());
}

#[test]
fn unknown_status_survives_round_trip() {
    let row = r#"{
        "id": "3d1a9a30-9f3e-4a26-93a8-4a5f0a7f9b10",
        "status": "deploying",
        "github_repo_url": null,
        "vercel_deployment_url": null,
        "created_at": "2026-08-20T15:30:00Z",
        "updated_at": "2026-08-20T15:31:00Z",
        "error_message": null
    }"#;
    let build: SiteBuild = serde_json::from_str(row).unwrap();
    assert_eq!(build.status, BuildStatus::Other("deploying".to_string()));

    let json = serde_json::to_value(&build).unwrap();
    assert_eq!(json["status"], "deploying");
}
