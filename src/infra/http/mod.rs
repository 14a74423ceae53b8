mod demo;
pub mod error;
pub mod handlers;
pub mod models;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::application::todos::TodoService;
use crate::infra::db::PostgresRepositories;

#[derive(Clone)]
pub struct HttpState {
    pub todos: TodoService,
    pub db: PostgresRepositories,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(demo::root))
        .route("/io_task", get(demo::io_task))
        .route("/cpu_task", get(demo::cpu_task))
        .route("/random_status", get(demo::random_status))
        .route("/random_sleep", get(demo::random_sleep))
        .route("/error", get(demo::error))
        .route("/healthz", get(db_health))
        .route(
            "/todos/",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::read_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        // Demo service: any origin may call it.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn db_health(State(state): State<HttpState>) -> Response {
    match state.db.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!(error = %err, "database health check failed");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}
