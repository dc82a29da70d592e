//! In-process store: an ordered map behind a lock.

use super::PersonStore;
use crate::error::AppError;
use crate::model::Person;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryPersonStore {
    people: RwLock<BTreeMap<Uuid, Person>>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `people`; later entries win on duplicate ids.
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        MemoryPersonStore {
            people: RwLock::new(people.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<Uuid, Person>>, AppError> {
        self.people
            .read()
            .map_err(|_| AppError::Internal("people store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<Uuid, Person>>, AppError> {
        self.people
            .write()
            .map_err(|_| AppError::Internal("people store lock poisoned".into()))
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn find_all(&self) -> Result<Vec<Person>, AppError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, AppError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.read()?.contains_key(&id))
    }

    async fn save(&self, person: Person) -> Result<Person, AppError> {
        self.write()?.insert(person.id, person.clone());
        Ok(person)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        self.write()?.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_inserts_then_replaces() {
        let store = MemoryPersonStore::new();
        let id = Uuid::new_v4();
        store.save(Person::new(id, "Ada", "Byron")).await.unwrap();
        store.save(Person::new(id, "Ada", "Lovelace")).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![Person::new(id, "Ada", "Lovelace")]);
    }

    #[tokio::test]
    async fn find_and_exists() {
        let id = Uuid::new_v4();
        let store = MemoryPersonStore::with_people([Person::new(id, "Alan", "Turing")]);
        assert!(store.exists_by_id(id).await.unwrap());
        assert_eq!(store.find_by_id(id).await.unwrap().unwrap().last_name, "Turing");

        let other = Uuid::new_v4();
        assert!(!store.exists_by_id(other).await.unwrap());
        assert!(store.find_by_id(other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_and_ignores_absent() {
        let id = Uuid::new_v4();
        let store = MemoryPersonStore::with_people([Person::new(id, "Alan", "Turing")]);
        store.delete_by_id(Uuid::new_v4()).await.unwrap();
        assert_eq!(store.find_all().await.unwrap().len(), 1);

        store.delete_by_id(id).await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());
        assert!(!store.exists_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let mut ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let store = MemoryPersonStore::with_people(ids.iter().map(|id| Person::new(*id, "x", "y")));
        ids.sort();
        let listed: Vec<Uuid> = store.find_all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(listed, ids);
    }
}
