//! Core library for DocVault — a password-gated, local-first personal
//! document stash.
//!
//! The primary entry point is [`Session`], which owns all application state
//! over an injected [`RecordStore`]. A session starts behind an
//! authentication gate; once the gate reaches
//! [`GateState::Authenticated`](GateState), documents can be listed,
//! created, edited, and deleted, with every mutation re-persisted to the
//! store.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    attachment::{Attachment, MAX_ATTACHMENT_BYTES},
    auth::{AuthGate, GateOutcome, GateState},
    client::client_id,
    document::{Document, DocumentDraft},
    error::{DocvaultError, Result},
    password::{hash_password, MIN_PASSWORD_LEN},
    session::{Session, SessionEvent, Settings},
    stash::Stash,
    store::{read_record, write_record, MemoryStore, RecordStore, SqliteStore},
    theme::Theme,
};
