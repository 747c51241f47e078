//! Repository implementations.
//!
//! - `local`: in-memory implementation, the only store the service ships with
pub mod local;

pub use local::LocalRepository;
