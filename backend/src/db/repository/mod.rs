//! Repository trait for person storage.
//!
//! Handlers depend on [`PersonRepository`] through `Arc<dyn PersonRepository>`
//! so the backing store can be swapped without touching the HTTP layer.

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::models::{Person, PersonId, PersonPayload};

/// Storage operations over person records.
///
/// Implementations must enforce document-number uniqueness (case-insensitive)
/// atomically with the write it guards.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// All live records, ordered by insertion.
    async fn list_persons(&self) -> RepositoryResult<Vec<Person>>;

    /// The record with `id`, or [`RepositoryError::NotFound`].
    async fn get_person(&self, id: PersonId) -> RepositoryResult<Person>;

    /// Store a new record under the next identifier.
    ///
    /// Fails with [`RepositoryError::DuplicateDocument`] when another record
    /// already holds the document number; nothing is stored in that case.
    async fn insert_person(&self, payload: PersonPayload) -> RepositoryResult<Person>;

    /// Overwrite the mutable fields of an existing record.
    ///
    /// The uniqueness check excludes the record being edited.
    async fn update_person(&self, id: PersonId, payload: PersonPayload)
        -> RepositoryResult<Person>;

    /// Remove a record and return it.
    async fn delete_person(&self, id: PersonId) -> RepositoryResult<Person>;

    /// Number of live records.
    async fn count(&self) -> RepositoryResult<usize>;
}
