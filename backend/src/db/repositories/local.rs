//! In-memory person repository.
//!
//! Records live in a `BTreeMap` keyed by id; since ids only grow, iteration
//! order is insertion order. A single `RwLock` guards the map and the id
//! counter, and every check-then-write sequence runs under the write lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::db::repository::{ErrorContext, PersonRepository, RepositoryError, RepositoryResult};
use crate::models::{Person, PersonId, PersonPayload};

const ENTITY: &str = "person";

#[derive(Debug)]
struct Store {
    next_id: i64,
    persons: BTreeMap<PersonId, Person>,
}

impl Store {
    /// Whether a record other than `except` holds `document_number`.
    fn holds_document(&self, document_number: &str, except: Option<PersonId>) -> bool {
        self.persons
            .values()
            .any(|p| Some(p.id) != except && p.has_document(document_number))
    }
}

/// In-memory repository used by the server and in tests.
#[derive(Debug)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    /// Create an empty repository. The first record receives id 1.
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                persons: BTreeMap::new(),
            }),
        }
    }

    fn not_found(operation: &str, id: PersonId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("person {} does not exist", id),
            ErrorContext::new(operation)
                .with_entity(ENTITY)
                .with_entity_id(id),
        )
    }

    fn duplicate(operation: &str, document_number: &str) -> RepositoryError {
        RepositoryError::duplicate_document(
            document_number,
            ErrorContext::new(operation).with_entity(ENTITY),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonRepository for LocalRepository {
    async fn list_persons(&self) -> RepositoryResult<Vec<Person>> {
        Ok(self.store.read().persons.values().cloned().collect())
    }

    async fn get_person(&self, id: PersonId) -> RepositoryResult<Person> {
        self.store
            .read()
            .persons
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found("get_person", id))
    }

    async fn insert_person(&self, payload: PersonPayload) -> RepositoryResult<Person> {
        let mut store = self.store.write();

        if store.holds_document(payload.document_number(), None) {
            return Err(Self::duplicate("insert_person", payload.document_number()));
        }

        let id = PersonId::new(store.next_id);
        store.next_id += 1;

        let person = Person::from_payload(id, payload);
        store.persons.insert(id, person.clone());
        debug!(person_id = %id, "inserted person");

        Ok(person)
    }

    async fn update_person(
        &self,
        id: PersonId,
        payload: PersonPayload,
    ) -> RepositoryResult<Person> {
        let mut store = self.store.write();

        if !store.persons.contains_key(&id) {
            return Err(Self::not_found("update_person", id));
        }
        if store.holds_document(payload.document_number(), Some(id)) {
            return Err(Self::duplicate("update_person", payload.document_number()));
        }

        let person = store
            .persons
            .get_mut(&id)
            .ok_or_else(|| Self::not_found("update_person", id))?;
        person.apply(payload);
        debug!(person_id = %id, "updated person");

        Ok(person.clone())
    }

    async fn delete_person(&self, id: PersonId) -> RepositoryResult<Person> {
        let removed = self
            .store
            .write()
            .persons
            .remove(&id)
            .ok_or_else(|| Self::not_found("delete_person", id))?;
        debug!(person_id = %id, "deleted person");

        Ok(removed)
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.store.read().persons.len())
    }
}
