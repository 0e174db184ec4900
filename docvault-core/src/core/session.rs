//! Single-owner application state over an injected record store.
//!
//! `Session` wires the authentication gate, the document stash, and the
//! theme preference to one [`RecordStore`], and is the only writer to it.
//! Interested parties register a subscriber callback and are notified after
//! every state change; there is no shared mutable state above the session.

use crate::core::store::{keys, read_record, write_record, RecordStore};
use crate::{
    client_id, AuthGate, Document, DocumentDraft, DocvaultError, GateOutcome, GateState, Result,
    Stash, Theme,
};
use serde::{Deserialize, Serialize};

/// Persisted application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Hex digest used to verify the gate password. Empty until first setup,
    /// immutable thereafter — there is no change-password path.
    #[serde(default)]
    pub password_hash: String,
}

/// Notification sent to session subscribers after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The gate moved to a new phase.
    GateChanged(GateState),
    /// The document collection changed (created, updated, deleted, reloaded).
    DocumentsChanged,
    /// The theme preference changed.
    ThemeChanged(Theme),
    /// A store write failed; the in-memory state stands.
    SaveFailed(String),
}

type Subscriber = Box<dyn Fn(&SessionEvent)>;

/// The running application state: store, gate, stash, and theme.
///
/// Generic over the backing [`RecordStore`], so the durable SQLite store
/// and the in-memory store are interchangeable. Document operations are
/// available only once the gate reaches [`GateState::Authenticated`].
pub struct Session<S: RecordStore> {
    store: S,
    gate: AuthGate,
    stash: Stash,
    theme: Theme,
    client_id: String,
    subscribers: Vec<Subscriber>,
}

impl<S: RecordStore> Session<S> {
    /// Opens a session over `store`: reads settings once to position the
    /// gate, restores the theme preference, and establishes the client
    /// identity. Documents are loaded later, at the moment of unlock.
    ///
    /// # Errors
    ///
    /// Returns an error only if a first-run client identity cannot be
    /// persisted; unreadable records degrade to defaults.
    pub fn open(mut store: S) -> Result<Self> {
        let client_id = client_id(&mut store)?;

        let theme_raw = match store.read_raw(keys::THEME) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("theme preference unreadable, using default: {e}");
                None
            }
        };
        let theme = Theme::from_stored(theme_raw.as_deref());

        let settings: Settings = read_record(&store, keys::SETTINGS, Settings::default());
        let mut gate = AuthGate::new();
        gate.load(Some(settings.password_hash));

        Ok(Self {
            store,
            gate,
            stash: Stash::new(),
            theme,
            client_id,
            subscribers: Vec::new(),
        })
    }

    /// Registers a subscriber called after every state change.
    pub fn subscribe(&mut self, subscriber: impl Fn(&SessionEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Current gate phase.
    #[must_use]
    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Current theme preference.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Stable identity of this client's store.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Submits a password to the gate.
    ///
    /// In `Uninitialized` a valid password becomes the vault password and
    /// its digest is persisted immediately; in `Required` it is compared to
    /// the stored digest. Reaching `Authenticated` re-reads the document
    /// collection from the store so the unlocked view is the freshest state.
    ///
    /// # Errors
    ///
    /// Propagates gate errors ([`DocvaultError::PasswordTooShort`],
    /// [`DocvaultError::WrongPassword`], [`DocvaultError::ValidationFailed`]).
    pub fn submit_password(&mut self, password: &str) -> Result<()> {
        let outcome = self.gate.submit(password)?;

        if let GateOutcome::Initialized { password_hash } = outcome {
            let settings = Settings { password_hash };
            if let Err(e) = write_record(&mut self.store, keys::SETTINGS, &settings) {
                log::warn!("failed to persist settings: {e}");
                self.notify(&SessionEvent::SaveFailed(e.user_message()));
            }
        }

        self.stash = Stash::from_documents(read_record(&self.store, keys::DOCUMENTS, Vec::new()));
        self.notify(&SessionEvent::GateChanged(GateState::Authenticated));
        self.notify(&SessionEvent::DocumentsChanged);
        Ok(())
    }

    /// The unlocked document collection, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::NotAuthenticated`] before unlock.
    pub fn documents(&self) -> Result<&[Document]> {
        self.require_authenticated()?;
        Ok(self.stash.documents())
    }

    /// Creates a document from `draft` and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::NotAuthenticated`] before unlock or
    /// [`DocvaultError::ValidationFailed`] for an invalid draft. A failed
    /// store write does not fail the operation; see [`SessionEvent::SaveFailed`].
    pub fn create_document(&mut self, draft: DocumentDraft) -> Result<String> {
        self.require_authenticated()?;
        let id = self.stash.create(draft)?.id.clone();
        self.persist_documents();
        self.notify(&SessionEvent::DocumentsChanged);
        Ok(id)
    }

    /// Merges `draft` into the document with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::NotAuthenticated`] before unlock,
    /// [`DocvaultError::ValidationFailed`] for an invalid draft, or
    /// [`DocvaultError::DocumentNotFound`] for an unknown ID.
    pub fn update_document(&mut self, id: &str, draft: DocumentDraft) -> Result<()> {
        self.require_authenticated()?;
        self.stash.update(id, draft)?;
        self.persist_documents();
        self.notify(&SessionEvent::DocumentsChanged);
        Ok(())
    }

    /// First step of deletion: marks `id` for removal pending confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::NotAuthenticated`] before unlock or
    /// [`DocvaultError::DocumentNotFound`] for an unknown ID.
    pub fn request_delete(&mut self, id: &str) -> Result<()> {
        self.require_authenticated()?;
        self.stash.request_delete(id)
    }

    /// Abandons the pending delete request.
    pub fn cancel_delete(&mut self) {
        self.stash.cancel_delete();
    }

    /// Confirms the pending delete and returns the removed document.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::NotAuthenticated`] before unlock or
    /// [`DocvaultError::NoPendingDelete`] without a prior request.
    pub fn confirm_delete(&mut self) -> Result<Document> {
        self.require_authenticated()?;
        let removed = self.stash.confirm_delete()?;
        self.persist_documents();
        self.notify(&SessionEvent::DocumentsChanged);
        Ok(removed)
    }

    /// ID of the document awaiting delete confirmation, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&str> {
        self.stash.pending_delete()
    }

    /// Switches the theme and persists the preference.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.store.write_raw(keys::THEME, theme.as_str()) {
            log::warn!("failed to persist theme: {e}");
            self.notify(&SessionEvent::SaveFailed(e.user_message()));
        }
        self.notify(&SessionEvent::ThemeChanged(theme));
    }

    fn require_authenticated(&self) -> Result<()> {
        if self.gate.state() == GateState::Authenticated {
            Ok(())
        } else {
            Err(DocvaultError::NotAuthenticated)
        }
    }

    // Fire-and-forget re-persist of the whole collection after a mutation.
    // The in-memory state stands either way; a failure is surfaced to
    // subscribers as a save error, never rolled back.
    fn persist_documents(&mut self) {
        let result = write_record(&mut self.store, keys::DOCUMENTS, self.stash.documents());
        if let Err(e) = result {
            log::warn!("failed to persist document collection: {e}");
            self.notify(&SessionEvent::SaveFailed(e.user_message()));
        }
    }

    fn notify(&self, event: &SessionEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::{hash_password, Attachment, SqliteStore};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::NamedTempFile;

    fn unlocked_session() -> Session<MemoryStore> {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        session.submit_password("abcdef").unwrap();
        session
    }

    #[test]
    fn test_empty_store_starts_uninitialized() {
        let session = Session::open(MemoryStore::new()).unwrap();
        assert_eq!(session.gate_state(), GateState::Uninitialized);
    }

    #[test]
    fn test_first_password_persists_settings_and_unlocks() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        session.submit_password("abcdef").unwrap();
        assert_eq!(session.gate_state(), GateState::Authenticated);

        let settings: Settings = read_record(&session.store, keys::SETTINGS, Settings::default());
        assert_eq!(settings.password_hash, hash_password("abcdef"));
    }

    #[test]
    fn test_existing_hash_requires_matching_password() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            password_hash: hash_password("abcdef"),
        };
        write_record(&mut store, keys::SETTINGS, &settings).unwrap();

        let mut session = Session::open(store).unwrap();
        assert_eq!(session.gate_state(), GateState::Required);

        let err = session.submit_password("wrong!!").unwrap_err();
        assert!(matches!(err, DocvaultError::WrongPassword));
        assert_eq!(session.gate_state(), GateState::Required);

        session.submit_password("abcdef").unwrap();
        assert_eq!(session.gate_state(), GateState::Authenticated);
    }

    #[test]
    fn test_documents_require_authentication() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        assert!(matches!(
            session.documents().unwrap_err(),
            DocvaultError::NotAuthenticated
        ));
        assert!(matches!(
            session.create_document(DocumentDraft::text("T", "c")).unwrap_err(),
            DocvaultError::NotAuthenticated
        ));
    }

    #[test]
    fn test_unlock_reloads_documents_from_store() {
        // First session stashes a document.
        let temp = NamedTempFile::new().unwrap();
        {
            let store = SqliteStore::open(temp.path()).unwrap();
            let mut session = Session::open(store).unwrap();
            session.submit_password("abcdef").unwrap();
            session
                .create_document(DocumentDraft::text("Persisted", "body"))
                .unwrap();
        }

        // Second session sees it only after unlocking.
        let store = SqliteStore::open(temp.path()).unwrap();
        let mut session = Session::open(store).unwrap();
        assert_eq!(session.gate_state(), GateState::Required);

        session.submit_password("abcdef").unwrap();
        let docs = session.documents().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Persisted");
    }

    #[test]
    fn test_mutations_re_persist_the_collection() {
        let mut session = unlocked_session();
        let id = session
            .create_document(DocumentDraft::text("One", "body"))
            .unwrap();
        session
            .update_document(&id, DocumentDraft::text("One edited", "body2"))
            .unwrap();

        let stored: Vec<Document> = read_record(&session.store, keys::DOCUMENTS, Vec::new());
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "One edited");

        session.request_delete(&id).unwrap();
        session.confirm_delete().unwrap();
        let stored: Vec<Document> = read_record(&session.store, keys::DOCUMENTS, Vec::new());
        assert!(stored.is_empty());
    }

    #[test]
    fn test_cancel_delete_keeps_document_in_store() {
        let mut session = unlocked_session();
        let id = session
            .create_document(DocumentDraft::text("Keep", "body"))
            .unwrap();

        session.request_delete(&id).unwrap();
        assert_eq!(session.pending_delete(), Some(id.as_str()));
        session.cancel_delete();
        assert_eq!(session.pending_delete(), None);

        assert_eq!(session.documents().unwrap().len(), 1);
        let stored: Vec<Document> = read_record(&session.store, keys::DOCUMENTS, Vec::new());
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_oversize_file_creates_nothing() {
        let mut session = unlocked_session();
        let result = Attachment::from_bytes("big.bin", &vec![0u8; 2 * 1024 * 1024])
            .map(|att| DocumentDraft::with_file("Big", att))
            .and_then(|draft| session.create_document(draft));

        assert!(matches!(
            result.unwrap_err(),
            DocvaultError::AttachmentTooLarge { .. }
        ));
        assert!(session.documents().unwrap().is_empty());
    }

    #[test]
    fn test_theme_round_trips_through_store() {
        let temp = NamedTempFile::new().unwrap();
        {
            let store = SqliteStore::open(temp.path()).unwrap();
            let mut session = Session::open(store).unwrap();
            session.set_theme(Theme::Dark);
        }

        let store = SqliteStore::open(temp.path()).unwrap();
        let session = Session::open(store).unwrap();
        assert_eq!(session.theme(), Theme::Dark);
    }

    #[test]
    fn test_client_id_is_created_once() {
        let temp = NamedTempFile::new().unwrap();
        let first = {
            let store = SqliteStore::open(temp.path()).unwrap();
            Session::open(store).unwrap().client_id().to_string()
        };
        let second = {
            let store = SqliteStore::open(temp.path()).unwrap();
            Session::open(store).unwrap().client_id().to_string()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_subscribers_observe_state_changes() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut session = Session::open(MemoryStore::new()).unwrap();
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        session.submit_password("abcdef").unwrap();
        session
            .create_document(DocumentDraft::text("Watched", "body"))
            .unwrap();
        session.set_theme(Theme::Dark);

        let seen = events.borrow();
        assert!(seen.contains(&SessionEvent::GateChanged(GateState::Authenticated)));
        assert!(seen.contains(&SessionEvent::DocumentsChanged));
        assert!(seen.contains(&SessionEvent::ThemeChanged(Theme::Dark)));
    }

    /// Store whose writes to the document record always fail, for the
    /// fire-and-forget save path.
    struct BrokenDocumentStore {
        inner: MemoryStore,
    }

    impl RecordStore for BrokenDocumentStore {
        fn read_raw(&self, key: &str) -> crate::Result<Option<String>> {
            self.inner.read_raw(key)
        }

        fn write_raw(&mut self, key: &str, value: &str) -> crate::Result<()> {
            if key == keys::DOCUMENTS {
                return Err(DocvaultError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "quota exceeded",
                )));
            }
            self.inner.write_raw(key, value)
        }
    }

    #[test]
    fn test_failed_save_is_surfaced_but_not_rolled_back() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let store = BrokenDocumentStore {
            inner: MemoryStore::new(),
        };
        let mut session = Session::open(store).unwrap();
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        session.submit_password("abcdef").unwrap();

        let id = session
            .create_document(DocumentDraft::text("Unsaved", "body"))
            .unwrap();

        // Mutation stands in memory, failure reported to observers.
        assert_eq!(session.documents().unwrap()[0].id, id);
        assert!(events
            .borrow()
            .iter()
            .any(|e| matches!(e, SessionEvent::SaveFailed(_))));
    }
}
