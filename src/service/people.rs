//! Person operations over any `PersonStore`. Absence is returned as a value
//! (`None` / `false`), never as an error; the HTTP layer decides the status.

use crate::error::AppError;
use crate::model::{Person, PersonBody};
use crate::store::PersonStore;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct PersonService {
    store: Arc<dyn PersonStore>,
}

impl PersonService {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        PersonService { store }
    }

    pub fn store(&self) -> &Arc<dyn PersonStore> {
        &self.store
    }

    pub async fn list(&self) -> Result<Vec<Person>, AppError> {
        self.store.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Person>, AppError> {
        self.store.find_by_id(id).await
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        self.store.exists_by_id(id).await
    }

    /// Persist a new person under a freshly minted id. Any id in the body is ignored.
    pub async fn create(&self, body: PersonBody) -> Result<Person, AppError> {
        let person = body.into_person(Uuid::new_v4());
        let saved = self.store.save(person).await?;
        tracing::info!(id = %saved.id, "person created");
        Ok(saved)
    }

    /// Replace both names of an existing person. `None` when the id is unknown;
    /// the store is not touched in that case.
    pub async fn update(&self, id: Uuid, body: PersonBody) -> Result<Option<Person>, AppError> {
        if !self.store.exists_by_id(id).await? {
            return Ok(None);
        }
        let saved = self.store.save(body.into_person(id)).await?;
        tracing::info!(%id, "person updated");
        Ok(Some(saved))
    }

    /// `false` when the id is unknown.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        if !self.store.exists_by_id(id).await? {
            return Ok(false);
        }
        self.store.delete_by_id(id).await?;
        tracing::info!(%id, "person deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPersonStore;

    fn body(first: &str, last: &str) -> PersonBody {
        PersonBody {
            id: None,
            first_name: first.into(),
            last_name: last.into(),
        }
    }

    fn service() -> PersonService {
        PersonService::new(Arc::new(MemoryPersonStore::new()))
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let service = service();
        let client_id = Uuid::new_v4();
        let created = service
            .create(PersonBody {
                id: Some(client_id),
                ..body("Ada", "Lovelace")
            })
            .await
            .unwrap();
        assert_ne!(created.id, client_id);
        assert!(service.get(client_id).await.unwrap().is_none());
        assert_eq!(service.get(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn create_mints_distinct_ids() {
        let service = service();
        let a = service.create(body("A", "A")).await.unwrap();
        let b = service.create(body("A", "A")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_unknown_leaves_store_unchanged() {
        let service = service();
        let existing = service.create(body("Alan", "Turing")).await.unwrap();
        let unknown = Uuid::new_v4();

        assert!(service.update(unknown, body("X", "Y")).await.unwrap().is_none());
        assert_eq!(service.list().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn update_is_idempotent() {
        let service = service();
        let created = service.create(body("Ada", "Byron")).await.unwrap();

        let first = service.update(created.id, body("Ada", "Lovelace")).await.unwrap();
        let state_after_first = service.list().await.unwrap();
        let second = service.update(created.id, body("Ada", "Lovelace")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.list().await.unwrap(), state_after_first);
        assert_eq!(second.unwrap(), Person::new(created.id, "Ada", "Lovelace"));
    }

    #[tokio::test]
    async fn delete_reports_absence() {
        let service = service();
        let created = service.create(body("Grace", "Hopper")).await.unwrap();

        assert!(!service.delete(Uuid::new_v4()).await.unwrap());
        assert!(service.delete(created.id).await.unwrap());
        assert!(!service.delete(created.id).await.unwrap());
        assert!(service.get(created.id).await.unwrap().is_none());
        assert!(!service.exists(created.id).await.unwrap());
    }
}
