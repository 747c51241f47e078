#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use personas_api::models::PersonPayload;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Variables read by `ServerConfig::load`.
pub const CONFIG_VARS: [&str; 5] = ["PERSONAS_CONFIG", "HOST", "PORT", "APP_ENV", "DUPLICATE_CONFLICT"];

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind, and serializes access to the
/// process-wide environment so parallel tests do not observe each other.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Like [`with_scoped_env`], but first clears every config variable so the
/// test only sees what it sets.
pub fn with_clean_config_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut all: Vec<(&str, Option<&str>)> = CONFIG_VARS.iter().map(|k| (*k, None)).collect();
    all.extend_from_slice(changes);
    with_scoped_env(&all, f)
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// A payload that passes every validation rule.
pub fn valid_payload(document_number: &str) -> PersonPayload {
    PersonPayload {
        full_name: Some("Carla Benítez".to_string()),
        document_number: Some(document_number.to_string()),
        email: Some("carla.benitez@example.com".to_string()),
        phone: Some("+34 600 000 000".to_string()),
        birth_date: Some("1992-07-21".to_string()),
    }
}
