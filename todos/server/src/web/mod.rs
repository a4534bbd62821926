use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::response::Json;
use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;
use todos_core::{Todo, TodoId, TodoInput};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::Config;
use crate::todo::api::{self, ErrorResponse, TodoState, create_api_router};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::get_todos_handler,
        api::create_todo_handler,
        api::update_todo_handler,
        api::delete_todo_handler,
        api::toggle_todo_handler
    ),
    components(schemas(Todo, TodoId, TodoInput, ErrorResponse)),
    tags((name = "Todos", description = "Create, read, update, delete and toggle todos"))
)]
pub struct ApiDoc;

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = Database::connect(&config.db_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let todo_state = Arc::new(TodoState { db: Arc::new(db) });
    let app = create_app(todo_state, &config.allowed_origins());

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the full application router: the todos API, health check and
/// OpenAPI document, wrapped in request tracing and CORS.
pub fn create_app(todo_state: Arc<TodoState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(create_api_router(todo_state))
        .route("/health", axum::routing::get(health_check_handler))
        .route("/api/openapi.json", axum::routing::get(openapi_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origins)),
        )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins.iter().filter_map(|origin| {
        HeaderValue::from_str(origin)
            .inspect_err(|_| tracing::warn!("Ignoring invalid CORS origin {}", origin))
            .ok()
    });
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
