//! Error types for the DocVault core library.

use thiserror::Error;

/// All errors that can occur within the DocVault core library.
#[derive(Debug, Error)]
pub enum DocvaultError {
    /// A SQLite operation on the record store failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record could not be serialized to or deserialized from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input failed a validation check before any mutation was attempted.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The supplied password is shorter than the minimum length.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted password length.
        min: usize,
    },

    /// The supplied password does not match the stored digest.
    #[error("Wrong password")]
    WrongPassword,

    /// A document operation was attempted before the gate was unlocked.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A document ID was requested that does not exist in the stash.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// A delete was confirmed without a prior delete request.
    #[error("No deletion is pending")]
    NoPendingDelete,

    /// An attachment exceeds the decoded size ceiling.
    #[error("Attachment is {size} bytes, larger than the 1MB limit")]
    AttachmentTooLarge {
        /// Decoded size of the rejected file in bytes.
        size: usize,
    },

    /// A stored attachment URL is not a well-formed base64 data URI.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
}

/// Convenience alias that pins the error type to [`DocvaultError`].
pub type Result<T> = std::result::Result<T, DocvaultError>;

impl DocvaultError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Json(_) | Self::Io(_) => "Failed to save".to_string(),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::PasswordTooShort { min } => {
                format!("Password must be at least {min} characters")
            }
            // Deliberately indistinguishable from "no such account".
            Self::WrongPassword => "Incorrect password".to_string(),
            Self::NotAuthenticated => "Unlock the vault first".to_string(),
            Self::DocumentNotFound(_) => "Document no longer exists".to_string(),
            Self::NoPendingDelete => "Nothing is queued for deletion".to_string(),
            Self::AttachmentTooLarge { .. } => "File is larger than 1MB".to_string(),
            Self::InvalidDataUri(_) => "Stored file data is unreadable".to_string(),
        }
    }
}
