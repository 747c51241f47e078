//! Person storage.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers                                          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  PersonRepository trait (repository/) - contract        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  LocalRepository (repositories/local.rs) - in-memory    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is persisted; the store starts empty on every process start.

pub mod repositories;
pub mod repository;

pub use repositories::LocalRepository;
pub use repository::{ErrorContext, PersonRepository, RepositoryError, RepositoryResult};
