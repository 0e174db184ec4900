//! In-memory document collection with ordering and deletion flow.
//!
//! The stash owns the live `Vec<Document>` and keeps it sorted by
//! `created_at` descending after every load, insert, and update. Deletion is
//! two-step: a delete is first requested, then confirmed or cancelled,
//! mirroring the confirmation dialog in front of the destructive action.

use crate::{Document, DocumentDraft, DocvaultError, Result};

/// The document collection plus any pending delete request.
#[derive(Debug, Default)]
pub struct Stash {
    documents: Vec<Document>,
    pending_delete: Option<String>,
}

impl Stash {
    /// Creates an empty stash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a stash from loaded documents, restoring the sort order.
    #[must_use]
    pub fn from_documents(mut documents: Vec<Document>) -> Self {
        sort_newest_first(&mut documents);
        Self {
            documents,
            pending_delete: None,
        }
    }

    /// The collection, newest first.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Looks up a document by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// ID of the document currently awaiting delete confirmation, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Creates a document from a validated draft and returns it.
    ///
    /// `created_at` comes from the wall clock, clamped so it never runs
    /// behind an existing document; the ID is derived from that timestamp,
    /// with a numeric suffix when two documents land in the same
    /// millisecond.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::ValidationFailed`] if the draft is invalid.
    pub fn create(&mut self, draft: DocumentDraft) -> Result<&Document> {
        draft.validate()?;

        let newest = self.documents.iter().map(|d| d.created_at).max();
        let created_at = chrono::Utc::now()
            .timestamp_millis()
            .max(newest.unwrap_or(i64::MIN));
        let id = self.unique_id(created_at);

        // A file attachment displaces any text content, same as on update.
        let (content, file_url, file_name, file_mime_type) = match draft.attachment {
            Some(att) => (
                String::new(),
                Some(att.file_url),
                Some(att.file_name),
                Some(att.file_mime_type),
            ),
            None => (draft.content, None, None, None),
        };

        let document = Document {
            id: id.clone(),
            title: draft.title,
            content,
            tags: draft.tags,
            file_url,
            file_name,
            file_mime_type,
            created_at,
            updated_at: None,
        };

        self.documents.push(document);
        sort_newest_first(&mut self.documents);

        // Freshly inserted, so the lookup cannot fail.
        self.documents
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| DocvaultError::DocumentNotFound(id))
    }

    /// Merges a validated draft into the document with `id`.
    ///
    /// `id` and `created_at` are preserved; `updated_at` is set to now. The
    /// re-sort afterwards is an order no-op since `created_at` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::ValidationFailed`] for an invalid draft or
    /// [`DocvaultError::DocumentNotFound`] for an unknown ID.
    pub fn update(&mut self, id: &str, draft: DocumentDraft) -> Result<&Document> {
        draft.validate()?;

        let document = self
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DocvaultError::DocumentNotFound(id.to_string()))?;

        document.title = draft.title;
        document.content = draft.content;
        document.tags = draft.tags;
        match draft.attachment {
            Some(att) => {
                document.file_url = Some(att.file_url);
                document.file_name = Some(att.file_name);
                document.file_mime_type = Some(att.file_mime_type);
                document.content.clear();
            }
            None => {
                document.file_url = None;
                document.file_name = None;
                document.file_mime_type = None;
            }
        }
        document.updated_at = Some(chrono::Utc::now().timestamp_millis());

        sort_newest_first(&mut self.documents);
        self.documents
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| DocvaultError::DocumentNotFound(id.to_string()))
    }

    /// First step of deletion: marks `id` for removal pending confirmation.
    ///
    /// A new request replaces any earlier unconfirmed one.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::DocumentNotFound`] for an unknown ID.
    pub fn request_delete(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(DocvaultError::DocumentNotFound(id.to_string()));
        }
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    /// Abandons the pending delete request, leaving the document in place.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step of deletion: removes the requested document and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::NoPendingDelete`] when nothing was requested.
    pub fn confirm_delete(&mut self) -> Result<Document> {
        let id = self
            .pending_delete
            .take()
            .ok_or(DocvaultError::NoPendingDelete)?;
        let index = self
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or(DocvaultError::DocumentNotFound(id))?;
        Ok(self.documents.remove(index))
    }

    fn unique_id(&self, created_at: i64) -> String {
        let base = created_at.to_string();
        if self.get(&base).is_none() {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

fn sort_newest_first(documents: &mut [Document]) {
    documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
