//! People API: CRUD REST service for a single Person resource over PostgreSQL,
//! with an OpenAPI document generated from explicit metadata.

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{Settings, StoreBackend};
pub use docs::openapi;
pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, ensure_database_exists};
pub use model::{Person, PersonBody};
pub use routes::{app, common_routes, docs_routes, people_routes};
pub use service::PersonService;
pub use state::AppState;
pub use store::{MemoryPersonStore, PersonStore, PgPersonStore};
pub use telemetry::init_tracing;
