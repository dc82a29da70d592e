//! Routers per concern, merged into the application by `app`.

mod common;
mod docs;
mod people;

pub use common::common_routes;
pub use docs::docs_routes;
pub use people::people_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: person resource, common routes and docs, with request
/// tracing and the configured body size limit.
pub fn app(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .merge(people_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes)),
        )
}
