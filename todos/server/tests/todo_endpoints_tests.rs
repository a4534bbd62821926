use axum::http::{Method, StatusCode};
use insta::assert_json_snapshot;
use serde_json::{Value, json};
use todos_server::todo::api::ErrorResponse;

mod common;

use common::{send, setup_app};

/// Creates a todo through the API and returns the response body.
async fn create_todo(app: &axum::Router, text: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/todos",
        Some(json!({ "text": text, "isMarked": false, "color": "#ff0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn error_response(body: Value) -> ErrorResponse {
    serde_json::from_value(body).expect("error body should be { message }")
}

#[tokio::test]
async fn list_on_empty_storage_returns_empty_array() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(&app, Method::GET, "/api/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_returns_todos_in_insertion_order() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    create_todo(&app, "Do chores").await;
    create_todo(&app, "Visit the park").await;
    create_todo(&app, "Go to the bar").await;

    let (status, body) = send(&app, Method::GET, "/api/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    let texts: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["Do chores", "Visit the park", "Go to the bar"]);
}

#[tokio::test]
async fn can_create_todo() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "text": "Buy milk", "isMarked": false, "color": "#ff0000" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["text"], "Buy milk");
    assert_eq!(body["isMarked"], false);
    assert_eq!(body["color"], "#ff0000");
    assert!(body["id"].as_u64().is_some());
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn create_applies_defaults_for_missing_fields() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "text": "Do chores" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isMarked"], false);
    assert_eq!(body["color"], "#51a2ff");
}

#[tokio::test]
async fn created_ids_are_unique() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let first = create_todo(&app, "First").await;
    let second = create_todo(&app, "Second").await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn create_rejects_missing_text() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "isMarked": false, "color": "#0000ff" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_snapshot!(error_response(body), @r#"
    {
      "message": "Todo text is required and must be a non-empty string"
    }
    "#);
}

#[tokio::test]
async fn create_rejects_empty_and_blank_text() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    for text in ["", "   "] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/todos",
            Some(json!({ "text": text, "isMarked": false })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_response(body).message.contains("Todo text is required"));
    }
}

#[tokio::test]
async fn create_rejects_non_string_color() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "text": "Valid todo", "isMarked": false, "color": 123 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_response(body).message.contains("color must be a string"));
}

#[tokio::test]
async fn create_rejects_non_boolean_is_marked() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "text": "Valid todo", "isMarked": "false", "color": "#0000ff" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_response(body).message.contains("isMarked must be a boolean"));
}

#[tokio::test]
async fn create_joins_all_validation_messages() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "color": 1, "isMarked": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_snapshot!(error_response(body), @r#"
    {
      "message": "Todo text is required and must be a non-empty string, Todo color must be a string, isMarked must be a boolean"
    }
    "#);
}

#[tokio::test]
async fn create_rejects_malformed_json_with_message_body() {
    let (app, state) = setup_app().await.expect("Failed to setup test context");

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/todos")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(!body.message.is_empty());

    let service = todos_server::todo::TodoService::new(&state.db);
    assert!(service.get_all_todos().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_returns_full_refreshed_collection() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let original = create_todo(&app, "Original todo").await;
    create_todo(&app, "Untouched todo").await;
    let id = original["id"].as_u64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/todos/{id}"),
        Some(json!({ "text": "Updated todo", "isMarked": true, "color": "#00ff00" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let todos = body.as_array().unwrap();
    assert_eq!(todos.len(), 2);
    let updated = todos
        .iter()
        .find(|todo| todo["id"].as_u64() == Some(id))
        .unwrap();
    assert_eq!(updated["text"], "Updated todo");
    assert_eq!(updated["isMarked"], true);
    assert_eq!(updated["color"], "#00ff00");
    assert_eq!(todos[1]["text"], "Untouched todo");
}

#[tokio::test]
async fn update_without_color_keeps_existing_color() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let original = create_todo(&app, "Original todo").await;
    let id = original["id"].as_u64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/todos/{id}"),
        Some(json!({ "text": "Renamed" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["text"], "Renamed");
    assert_eq!(body[0]["color"], "#ff0000");
    assert_eq!(body[0]["isMarked"], false);
}

#[tokio::test]
async fn update_rejects_invalid_body() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let original = create_todo(&app, "Original todo").await;
    let id = original["id"].as_u64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/todos/{id}"),
        Some(json!({ "text": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_response(body).message.contains("Todo text is required"));

    let (_, todos) = send(&app, Method::GET, "/api/todos", None).await;
    assert_eq!(todos[0]["text"], "Original todo");
}

#[tokio::test]
async fn update_unknown_id_returns_not_found() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    create_todo(&app, "Existing todo").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/todos/9999",
        Some(json!({ "text": "Updated todo", "isMarked": true, "color": "#00ff00" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_json_snapshot!(error_response(body), @r#"
    {
      "message": "Todo not found"
    }
    "#);

    let (_, todos) = send(&app, Method::GET, "/api/todos", None).await;
    assert_eq!(todos.as_array().unwrap().len(), 1);
    assert_eq!(todos[0]["text"], "Existing todo");
}

#[tokio::test]
async fn update_validates_body_before_looking_up_id() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/todos/9999",
        Some(json!({ "text": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_snapshot!(error_response(body), @r#"
    {
      "message": "Todo text is required and must be a non-empty string"
    }
    "#);
}

#[tokio::test]
async fn delete_removes_exactly_one_todo() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let doomed = create_todo(&app, "Delete me").await;
    create_todo(&app, "Keep me").await;
    let id = doomed["id"].as_u64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/todos/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    let todos = body.as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert!(todos.iter().all(|todo| todo["id"].as_u64() != Some(id)));
    assert_eq!(todos[0]["text"], "Keep me");
}

#[tokio::test]
async fn delete_unknown_id_returns_not_found() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    create_todo(&app, "Existing todo").await;

    let (status, body) = send(&app, Method::DELETE, "/api/todos/9999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_response(body).message, "Todo not found");

    let (_, todos) = send(&app, Method::GET, "/api/todos", None).await;
    assert_eq!(todos.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_with_non_numeric_id_returns_not_found() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(&app, Method::DELETE, "/api/todos/not-an-id", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_response(body).message, "Todo not found");
}

#[tokio::test]
async fn toggle_with_signed_id_returns_not_found() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    create_todo(&app, "Leave me alone").await;

    let (status, body) = send(&app, Method::PATCH, "/api/todos/+1/mark", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_response(body).message, "Todo not found");

    let (_, todos) = send(&app, Method::GET, "/api/todos", None).await;
    assert_eq!(todos[0]["isMarked"], false);
}

#[tokio::test]
async fn toggle_returns_single_updated_todo() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let todo = create_todo(&app, "Toggle me").await;
    let id = todo["id"].as_u64().unwrap();

    let (status, body) = send(&app, Method::PATCH, &format!("/api/todos/{id}/mark"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
    assert_eq!(body["id"].as_u64(), Some(id));
    assert_eq!(body["isMarked"], true);
    assert_eq!(body["text"], "Toggle me");
}

#[tokio::test]
async fn toggling_twice_restores_original_state() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let todo = create_todo(&app, "Toggle me").await;
    let id = todo["id"].as_u64().unwrap();
    let uri = format!("/api/todos/{id}/mark");

    let (_, first) = send(&app, Method::PATCH, &uri, None).await;
    let (status, second) = send(&app, Method::PATCH, &uri, None).await;

    assert_eq!(first["isMarked"], true);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["isMarked"], todo["isMarked"]);
}

#[tokio::test]
async fn toggle_unknown_id_returns_not_found() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(&app, Method::PATCH, "/api/todos/42/mark", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_response(body).message, "Todo not found");
}
