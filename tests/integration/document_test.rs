//! Integration tests for the document endpoints.

use axum::http::StatusCode;
use serde_json::json;

use dataroom_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_into_folder_and_list() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);
    let deals = app.create_folder(&user, "Deals", None).await;
    app.create_document(&user, "nda.pdf", Some(&deals)).await;
    app.create_document(&user, "readme.txt", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents?folder_id={deals}"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let documents = response.body["data"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["filename"], "nda.pdf");
    assert_eq!(documents[0]["uploaded_by"], user.id.to_string().as_str());

    let response = app
        .request("GET", "/api/documents", None, Some(&user.token))
        .await;
    let documents = response.body["data"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["filename"], "readme.txt");

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{deals}"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.body["data"]["document_count"], 1);
    assert_eq!(response.body["data"]["documents"][0]["filename"], "nda.pdf");
}

#[tokio::test]
async fn test_register_into_unknown_folder() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({
                "filename": "lost.pdf",
                "size_bytes": 1,
                "folder_id": "00000000-0000-0000-0000-000000000001",
            })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_move_document() {
    let app = TestApp::new();
    let uploader = app.user(UserRole::Member);
    let other = app.user(UserRole::Member);
    let target = app.create_folder(&uploader, "Target", None).await;
    let document = app.create_document(&uploader, "cap-table.xlsx", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{document}/move"),
            Some(json!({ "folder_id": target })),
            Some(&other.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{document}/move"),
            Some(json!({ "folder_id": target })),
            Some(&uploader.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folder_id"], target.as_str());

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{document}/move"),
            Some(json!({})),
            Some(&uploader.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["folder_id"].is_null());
}

#[tokio::test]
async fn test_update_document_record() {
    let app = TestApp::new();
    let uploader = app.user(UserRole::Member);
    let other = app.user(UserRole::Member);
    let target = app.create_folder(&uploader, "Target", None).await;
    let document = app.create_document(&uploader, "board-minutes.pdf", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{document}"),
            Some(json!({ "description": "Q3" })),
            Some(&other.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{document}"),
            Some(json!({ "description": "Q3", "folder_id": target })),
            Some(&uploader.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["description"], "Q3");
    assert_eq!(response.body["data"]["folder_id"], target.as_str());

    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{document}"),
            Some(json!({})),
            Some(&uploader.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_deleting_last_document_allows_folder_delete() {
    let app = TestApp::new();
    let user = app.user(UserRole::Member);
    let deals = app.create_folder(&user, "Deals", None).await;
    let document = app.create_document(&user, "loi.pdf", Some(&deals)).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{deals}"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "NOT_EMPTY");

    let response = app
        .request(
            "DELETE",
            &format!("/api/documents/{document}"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{document}"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{deals}"),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folders_deleted"], 1);
}
