//! # Personas API
//!
//! A small HTTP CRUD service for person records.
//!
//! Records carry a full name, a document number, an email, a phone and a
//! birth date. Create and edit requests are validated (email syntax, birth
//! date in the past, non-empty document number) and document numbers are
//! unique across the live set, compared case-insensitively.
//!
//! ## Architecture
//!
//! - [`api`]: public types re-exported for clients
//! - [`models`]: the person record and request payload
//! - [`validation`]: field rules for payloads
//! - [`db`]: repository trait and the in-memory store
//! - [`config`]: server settings from TOML and environment
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Storage is in-memory only; the store is empty after every restart.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod validation;

#[cfg(feature = "http-server")]
pub mod http;
