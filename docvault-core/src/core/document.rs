//! Document record and validated draft input.

use crate::{Attachment, DocvaultError, Result};
use serde::{Deserialize, Serialize};

/// A single stashed document: either plain text or one attached file.
///
/// Exactly one of `content` and `file_url` is populated at save time. That
/// invariant is enforced by [`DocumentDraft`] (the form layer), not by the
/// store — persisted data is trusted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique ID derived from the creation timestamp.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Plain text body; empty when a file is attached.
    pub content: String,
    /// Ordered tags; duplicates are permitted.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Data URI of the attached file, if any.
    pub file_url: Option<String>,
    /// Original name of the attached file, if any.
    pub file_name: Option<String>,
    /// Content type of the attached file, if any.
    pub file_mime_type: Option<String>,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
    /// Last edit time, epoch milliseconds; absent until the first edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Document {
    /// Returns the attached file, if this document carries one.
    #[must_use]
    pub fn attachment(&self) -> Option<Attachment> {
        match (&self.file_url, &self.file_name, &self.file_mime_type) {
            (Some(url), Some(name), Some(mime)) => Some(Attachment {
                file_url: url.clone(),
                file_name: name.clone(),
                file_mime_type: mime.clone(),
            }),
            _ => None,
        }
    }
}

/// Validated input for creating or editing a document.
///
/// Attaching a file clears any text content, so a draft can never carry
/// both. Build with [`DocumentDraft::text`] or [`DocumentDraft::with_file`].
#[derive(Debug, Clone, Default)]
pub struct DocumentDraft {
    /// Display title; must be non-empty after trimming.
    pub title: String,
    /// Plain text body; ignored when `attachment` is set.
    pub content: String,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Optional attached file; mutually exclusive with `content`.
    pub attachment: Option<Attachment>,
}

impl DocumentDraft {
    /// Creates a text-only draft.
    #[must_use]
    pub fn text(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            attachment: None,
        }
    }

    /// Creates a draft carrying an attached file; any content stays empty.
    #[must_use]
    pub fn with_file(title: impl Into<String>, attachment: Attachment) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            attachment: Some(attachment),
        }
    }

    /// Sets the tags, preserving order. Duplicates are not removed.
    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Checks the draft before any mutation is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::ValidationFailed`] when the title is blank
    /// or the draft holds neither text content nor a file.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DocvaultError::ValidationFailed(
                "Title cannot be empty".to_string(),
            ));
        }
        if self.attachment.is_none() && self.content.trim().is_empty() {
            return Err(DocvaultError::ValidationFailed(
                "Add some content or attach a file".to_string(),
            ));
        }
        Ok(())
    }
}
