//! Error types for repository operations.
//!
//! Each error carries an [`ErrorContext`] describing where it happened so
//! that log lines and HTTP mappings do not have to parse message text.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "insert_person")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "person")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Another live record already holds the document number.
    #[error("Duplicate document number: {document_number} {context}")]
    DuplicateDocument {
        document_number: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create a not found error with context.
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Create a duplicate document number error with context.
    pub fn duplicate_document(document_number: impl Into<String>, context: ErrorContext) -> Self {
        Self::DuplicateDocument {
            document_number: document_number.into(),
            context,
        }
    }

    /// Whether this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::NotFound { context, .. } => context,
            Self::DuplicateDocument { context, .. } => context,
        }
    }
}
