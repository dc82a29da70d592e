//! API documentation route.

use crate::docs::OPENAPI_PATH;
use crate::handlers::docs::openapi_json;
use axum::{routing::get, Router};

pub fn docs_routes() -> Router {
    Router::new().route(OPENAPI_PATH, get(openapi_json))
}
