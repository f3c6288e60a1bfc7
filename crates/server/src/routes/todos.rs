use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use models::todo::{DeletedTodo, Todo};
use tracing::info;

use crate::errors::ApiError;
use crate::state::ServerState;

/// List every todo in stored order
#[utoipa::path(get, path = "/todos", tag = "todos", responses((status = 200, description = "Full collection", body = [crate::openapi::TodoDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.list().await?;
    Ok(Json(todos))
}

/// Fetch one todo by id
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo id, compared by string form")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::TodoDoc),
        (status = 404, description = "No todo with that id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    match state.store.get(&id).await? {
        Some(todo) => Ok(Json(todo)),
        None => Err(ApiError::not_found(format!("todo {id} not found"))),
    }
}

/// Append a todo with a client-supplied id
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = crate::openapi::TodoDoc,
    responses(
        (status = 200, description = "The record, echoed", body = crate::openapi::TodoDoc),
        (status = 400, description = "Malformed or invalid record", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(todo), _): WithRejection<Json<Todo>, ApiError>,
) -> Result<Json<Todo>, ApiError> {
    let created = state.store.create(todo).await?;
    info!(id = %created.id, "created todo");
    Ok(Json(created))
}

/// Replace every todo with this id by the given record
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo id, compared by string form")),
    request_body = crate::openapi::TodoDoc,
    responses(
        (status = 200, description = "The record, echoed whether or not anything matched", body = crate::openapi::TodoDoc),
        (status = 400, description = "Malformed or invalid record", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    WithRejection(Json(todo), _): WithRejection<Json<Todo>, ApiError>,
) -> Result<Json<Todo>, ApiError> {
    let updated = state.store.update(&id, todo).await?;
    info!(%id, "updated todo");
    Ok(Json(updated))
}

/// Remove every todo with this id
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo id, compared by string form")),
    responses((status = 200, description = "The requested id, whether or not anything was removed", body = crate::openapi::DeletedTodoDoc))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedTodo>, ApiError> {
    let deleted = state.store.delete(&id).await?;
    info!(%id, "deleted todo");
    Ok(Json(deleted))
}
