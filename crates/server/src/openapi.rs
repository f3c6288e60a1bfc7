use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

/// A todo record. `id` is whatever the client supplied: an integer or a string.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoDoc {
    #[schema(value_type = Object)]
    pub id: serde_json::Value,
    pub title: String,
    pub is_completed: bool,
}

#[derive(Serialize, ToSchema)]
pub struct DeletedTodoDoc { pub id: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::todos::list,
        crate::routes::todos::get,
        crate::routes::todos::create,
        crate::routes::todos::update,
        crate::routes::todos::delete,
    ),
    components(
        schemas(
            HealthResponse,
            TodoDoc,
            DeletedTodoDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "todos")
    )
)]
pub struct ApiDoc;
