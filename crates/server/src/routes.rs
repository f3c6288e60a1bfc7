pub mod todos;

use std::path::Path;

use axum::{http::StatusCode, routing::get, Json, Router};
use common::types::Health;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub const INDEX_TEXT: &str = "Send requests for todos to the /todos endpoint please!";

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn index() -> &'static str {
    INDEX_TEXT
}

async fn metrics() -> (StatusCode, String) {
    service::observability::encode_metrics()
}

/// Build the full application router: todo CRUD, health, metrics, API docs,
/// and static files for anything else when `static_dir` is set.
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: Option<&Path>) -> Router {
    let todo_routes = Router::new()
        .route("/todos", get(todos::list).post(todos::create))
        .route(
            "/todos/:id",
            get(todos::get).put(todos::update).delete(todos::delete),
        );

    let public = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let mut app = public
        .merge(todo_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    // one INFO span per request with method and path
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    // status and latency on response
                    .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                    .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
            )
            .layer(cors),
    )
}
