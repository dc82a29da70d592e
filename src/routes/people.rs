//! Person resource routes under `/people`.

use crate::handlers::people::{create, delete as delete_handler, get as get_handler, list, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn people_routes(state: AppState) -> Router {
    Router::new()
        .route("/people", get(list).post(create))
        .route(
            "/people/:id",
            get(get_handler).put(update).delete(delete_handler),
        )
        .with_state(state)
}
