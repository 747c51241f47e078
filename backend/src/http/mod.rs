//! HTTP server module.
//!
//! An axum router exposing the person endpoints as a JSON API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing, JSON (de)serialization                │
//! │  - CORS, compression, tracing, error mapping              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Validation (validation.rs)                               │
//! │  - Field rules on create/edit payloads                    │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - PersonRepository / LocalRepository                     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod docs;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::{build_router, create_router};
pub use state::AppState;
