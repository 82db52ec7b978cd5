pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create/module", post(handlers::create_module))
        .route("/getAll/module", get(handlers::get_all_modules))
        .route("/getById/module/:id", get(handlers::get_module_by_id))
        .route("/update/module/:id", put(handlers::update_module))
        .route("/delete/module/:id", delete(handlers::delete_module))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}
