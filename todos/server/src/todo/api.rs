use crate::todo::{TodoService, TodoServiceError};
use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use todos_core::{Todo, TodoId, TodoInput, validate_todo_input};
use utoipa::ToSchema;

/// Shared state for the todo routes.
#[derive(Clone, Debug)]
pub struct TodoState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self {
                message: "An unknown error occurred".to_string(),
            }
        } else {
            Self { message }
        }
    }
}

/// Error type for todo handler operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoApiError {
    /// The body broke one or more validation rules.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    /// The body could not be read as JSON.
    #[error("{0}")]
    MalformedBody(String),
    /// The id path segment cannot refer to any todo.
    #[error("Todo not found")]
    InvalidId,
    #[error(transparent)]
    Service(#[from] TodoServiceError),
}

impl From<JsonRejection> for TodoApiError {
    fn from(rejection: JsonRejection) -> Self {
        TodoApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for TodoApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            TodoApiError::Validation(_) | TodoApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            TodoApiError::InvalidId | TodoApiError::Service(TodoServiceError::TodoNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            TodoApiError::Service(TodoServiceError::Database(err)) => {
                tracing::error!("Todo storage failure: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status_code, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Validates a raw body and converts it into a typed input.
fn parse_input(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<TodoInput, TodoApiError> {
    let Json(body) = body?;
    let errors = validate_todo_input(&body);
    if !errors.is_empty() {
        tracing::warn!("Rejected todo body: {}", errors.join(", "));
        return Err(TodoApiError::Validation(errors));
    }
    serde_json::from_value(body).map_err(|err| TodoApiError::MalformedBody(err.to_string()))
}

fn parse_id(raw: &str) -> Result<TodoId, TodoApiError> {
    raw.parse().map_err(|_| TodoApiError::InvalidId)
}

/// Handler for GET /api/todos - Returns every todo.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/todos",
    responses(
        (status = 200, description = "All todos in insertion order", body = Vec<Todo>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn get_todos_handler(
    State(state): State<Arc<TodoState>>,
) -> Result<Json<Vec<Todo>>, TodoApiError> {
    let service = TodoService::new(&state.db);
    Ok(Json(service.get_all_todos().await?))
}

/// Handler for POST /api/todos - Creates a todo and returns it.
#[tracing::instrument(skip(state, body))]
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = TodoInput,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn create_todo_handler(
    State(state): State<Arc<TodoState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), TodoApiError> {
    let input = parse_input(body)?;
    let service = TodoService::new(&state.db);
    let todo = service.create_todo(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Handler for PUT /api/todos/{id} - Updates a todo and returns the whole collection.
#[tracing::instrument(skip(state, body))]
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = u32, Path, description = "Todo identifier")),
    request_body = TodoInput,
    responses(
        (status = 200, description = "Todo updated, full collection returned", body = Vec<Todo>),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn update_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Vec<Todo>>, TodoApiError> {
    let input = parse_input(body)?;
    let id = parse_id(&id)?;
    let service = TodoService::new(&state.db);
    service.update_todo_by_id(id, input).await?;
    Ok(Json(service.get_all_todos().await?))
}

/// Handler for DELETE /api/todos/{id} - Deletes a todo and returns the whole collection.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = u32, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo deleted, full collection returned", body = Vec<Todo>),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn delete_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Todo>>, TodoApiError> {
    let id = parse_id(&id)?;
    let service = TodoService::new(&state.db);
    service.delete_todo_by_id(id).await?;
    Ok(Json(service.get_all_todos().await?))
}

/// Handler for PATCH /api/todos/{id}/mark - Flips the completion flag and returns the todo.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    patch,
    path = "/api/todos/{id}/mark",
    params(("id" = u32, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo toggled", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn toggle_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, TodoApiError> {
    let id = parse_id(&id)?;
    let service = TodoService::new(&state.db);
    Ok(Json(service.toggle_todo_by_id(id).await?))
}

/// Creates and returns the todos API router.
pub fn create_api_router(state: Arc<TodoState>) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(get_todos_handler).post(create_todo_handler),
        )
        .route(
            "/api/todos/{id}",
            put(update_todo_handler).delete(delete_todo_handler),
        )
        .route("/api/todos/{id}/mark", patch(toggle_todo_handler))
        .with_state(state)
}
