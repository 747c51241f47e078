//! Field validation for person payloads.
//!
//! Every rule runs on every call; failures are collected per field rather
//! than stopping at the first one, so a client sees all problems at once.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::models::PersonPayload;

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_BIRTH_DATE: &str = "birthDate";
pub const FIELD_DOCUMENT_NUMBER: &str = "documentNumber";

pub const MSG_EMAIL_REQUIRED: &str = "must complete the email field";
pub const MSG_EMAIL_FORMAT: &str = "invalid email format";
pub const MSG_BIRTH_DATE_REQUIRED: &str = "must complete the birth date field";
pub const MSG_BIRTH_DATE_FORMAT: &str = "invalid birth date format";
pub const MSG_BIRTH_DATE_NOT_PAST: &str = "birth date must be earlier than the current date";
pub const MSG_DOCUMENT_REQUIRED: &str = "must complete the document number field";

/// Field-level validation failures, keyed by the JSON field name.
///
/// Empty means the payload is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[cfg(test)]
    fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// Validate a payload against the current local time.
pub fn validate(payload: &PersonPayload) -> ValidationErrors {
    validate_at(payload, Local::now().naive_local())
}

/// Validate a payload against a fixed clock.
pub fn validate_at(payload: &PersonPayload, now: NaiveDateTime) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let email = payload.email();
    if is_blank(email) {
        errors.add(FIELD_EMAIL, MSG_EMAIL_REQUIRED);
    }
    // Empty strings fail the syntax check too, so both messages are reported.
    if !email.validate_email() {
        errors.add(FIELD_EMAIL, MSG_EMAIL_FORMAT);
    }

    let birth_date = payload.birth_date();
    if is_blank(birth_date) {
        errors.add(FIELD_BIRTH_DATE, MSG_BIRTH_DATE_REQUIRED);
    } else {
        match parse_birth_date(birth_date) {
            Some(date) if date < now => {}
            Some(_) => errors.add(FIELD_BIRTH_DATE, MSG_BIRTH_DATE_NOT_PAST),
            None => errors.add(FIELD_BIRTH_DATE, MSG_BIRTH_DATE_FORMAT),
        }
    }

    if is_blank(payload.document_number()) {
        errors.add(FIELD_DOCUMENT_NUMBER, MSG_DOCUMENT_REQUIRED);
    }

    errors
}

/// Parse a birth date into a local date-time.
///
/// Accepts `YYYY-MM-DD` (taken at midnight), `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// and RFC 3339 timestamps, which are converted to local time.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.with_timezone(&Local).naive_local())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
