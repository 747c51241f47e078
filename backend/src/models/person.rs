//! Person record and the payload accepted by the mutating endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

crate::define_id_type!(i64, PersonId);

/// A stored person record.
///
/// Serialized with camelCase keys, which is the wire format of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Store-assigned identifier, immutable once assigned
    pub id: PersonId,
    #[schema(example = "Ana Gómez")]
    pub full_name: Option<String>,
    /// External identity string, unique among live records (case-insensitive)
    #[schema(example = "30111222")]
    pub document_number: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "+54 11 5555-0000")]
    pub phone: Option<String>,
    /// Birth date exactly as submitted
    #[schema(example = "1990-01-31")]
    pub birth_date: String,
}

impl Person {
    /// Build a record from a payload under an identifier chosen by the store.
    pub fn from_payload(id: PersonId, payload: PersonPayload) -> Self {
        let mut person = Self {
            id,
            full_name: None,
            document_number: String::new(),
            email: String::new(),
            phone: None,
            birth_date: String::new(),
        };
        person.apply(payload);
        person
    }

    /// Overwrite every mutable field with the payload's values. The id is kept.
    pub fn apply(&mut self, payload: PersonPayload) {
        self.full_name = payload.full_name;
        self.document_number = payload.document_number.unwrap_or_default();
        self.email = payload.email.unwrap_or_default();
        self.phone = payload.phone;
        self.birth_date = payload.birth_date.unwrap_or_default();
    }

    /// Whether this record's document number equals `other`, ignoring case.
    pub fn has_document(&self, other: &str) -> bool {
        documents_match(&self.document_number, other)
    }
}

/// Request body for creating or editing a person.
///
/// Every field is optional on the wire so that a missing `email` or
/// `birthDate` is reported by validation instead of failing deserialization.
/// An `id` present in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonPayload {
    pub full_name: Option<String>,
    pub document_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
}

impl PersonPayload {
    pub fn document_number(&self) -> &str {
        self.document_number.as_deref().unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn birth_date(&self) -> &str {
        self.birth_date.as_deref().unwrap_or_default()
    }
}

/// Case-insensitive document number comparison used for uniqueness checks.
fn documents_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
