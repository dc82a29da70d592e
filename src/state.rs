//! Shared application state for all routes. The store is injected once at construction.

use crate::service::PersonService;
use crate::store::PersonStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub people: PersonService,
}

impl AppState {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        AppState {
            people: PersonService::new(store),
        }
    }
}
