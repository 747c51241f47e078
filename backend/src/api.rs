//! Public API surface.
//!
//! Consolidates the types clients of the crate need: the person record, the
//! create/edit payload and the validation result.

pub use crate::models::{Person, PersonId, PersonPayload};
pub use crate::validation::ValidationErrors;
