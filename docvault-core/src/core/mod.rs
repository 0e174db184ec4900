//! Internal domain modules for the DocVault core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod attachment;
pub mod auth;
pub mod client;
pub mod document;
pub mod error;
pub mod password;
pub mod session;
pub mod stash;
pub mod store;
pub mod theme;

#[doc(inline)]
pub use attachment::{Attachment, MAX_ATTACHMENT_BYTES};
#[doc(inline)]
pub use auth::{AuthGate, GateOutcome, GateState};
#[doc(inline)]
pub use client::client_id;
#[doc(inline)]
pub use document::{Document, DocumentDraft};
#[doc(inline)]
pub use error::{DocvaultError, Result};
#[doc(inline)]
pub use password::{hash_password, MIN_PASSWORD_LEN};
#[doc(inline)]
pub use session::{Session, SessionEvent, Settings};
#[doc(inline)]
pub use stash::Stash;
#[doc(inline)]
pub use store::{read_record, write_record, MemoryStore, RecordStore, SqliteStore};
#[doc(inline)]
pub use theme::Theme;
