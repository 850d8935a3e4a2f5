//! Integration tests for the folder endpoints.

use axum::http::StatusCode;
use serde_json::json;

use dataroom_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_requires_bearer_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/folders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");

    let response = app
        .request("GET", "/api/folders", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_create_and_list_with_paths() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);
    let finance = app.create_folder(&user, "Finance", None).await;
    app.create_folder(&user, "2024", Some(&finance)).await;

    let response = app
        .request("GET", "/api/folders", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let roots = response.body["data"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["path"], "Finance");
    assert_eq!(roots[0]["subfolder_count"], 1);

    let response = app
        .request(
            "GET",
            &format!("/api/folders?parent_id={finance}"),
            None,
            Some(&user.token),
        )
        .await;
    let children = response.body["data"].as_array().unwrap();
    assert_eq!(children[0]["path"], "Finance/2024");
    assert_eq!(children[0]["parent_name"], "Finance");
}

#[tokio::test]
async fn test_duplicate_sibling_name() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);
    app.create_folder(&user, "Legal", None).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Legal" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "NAME_COLLISION");
}

#[tokio::test]
async fn test_empty_name_rejected() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_reparent_errors() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);
    let top = app.create_folder(&user, "top", None).await;
    let child = app.create_folder(&user, "child", Some(&top)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{top}"),
            Some(json!({ "parent_id": top })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "SELF_PARENT");

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{top}"),
            Some(json!({ "parent_id": child })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "CIRCULAR_REFERENCE");
}

#[tokio::test]
async fn test_explicit_null_parent_moves_to_root() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);
    let top = app.create_folder(&user, "top", None).await;
    let child = app.create_folder(&user, "child", Some(&top)).await;

    // Absent parent_id leaves the folder where it is.
    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{child}"),
            Some(json!({ "description": "notes" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["path"], "top/child");

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{child}"),
            Some(json!({ "parent_id": null })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["path"], "child");
    assert!(response.body["data"]["parent_id"].is_null());
}

#[tokio::test]
async fn test_other_member_cannot_modify() {
    let app = TestApp::new();
    let owner = app.user(UserRole::Member);
    let other = app.user(UserRole::Member);
    let admin = app.user(UserRole::Admin);
    let folder = app.create_folder(&owner, "Board", None).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{folder}"),
            None,
            Some(&other.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "PERMISSION_DENIED");

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{folder}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folders_deleted"], 1);
}

#[tokio::test]
async fn test_finance_force_delete() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);
    let finance = app.create_folder(&user, "Finance", None).await;
    let year = app.create_folder(&user, "2024", Some(&finance)).await;
    let document = app.create_document(&user, "budget.xlsx", Some(&year)).await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{year}/breadcrumb"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(
        response.body["data"],
        json!([
            { "id": finance, "name": "Finance" },
            { "id": year, "name": "2024" },
        ])
    );

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{finance}"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "NOT_EMPTY");
    assert_eq!(response.body["details"]["has_subfolders"], true);
    assert_eq!(response.body["details"]["has_documents"], false);

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{finance}?force=true"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folders_deleted"], 2);
    assert_eq!(response.body["data"]["documents_reassigned"], 1);

    for id in [&finance, &year] {
        let response = app
            .request("GET", &format!("/api/folders/{id}"), None, Some(&user.token))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{document}"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["folder_id"].is_null());
}

#[tokio::test]
async fn test_update_without_changes_rejected() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);
    let folder = app.create_folder(&user, "Board", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{folder}"),
            Some(json!({})),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_input_gets_error_body() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);

    let response = app
        .request("GET", "/api/folders/not-a-uuid", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": 42 })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request(
            "GET",
            "/api/folders?parent_id=nope",
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
