//! Authentication gate state machine.
//!
//! The gate is pure state: it never touches the record store. Submissions
//! that require persistence (storing a freshly set password digest) are
//! reported back to the caller as a [`GateOutcome`], and the session layer
//! performs the write. That keeps the whole flow testable without a backend.

use crate::{hash_password, DocvaultError, Result, MIN_PASSWORD_LEN};

/// Phase of the authentication gate.
///
/// `Loading → {Uninitialized, Required} → Authenticated`. `Authenticated`
/// is terminal for the session; there is no logout transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The settings record has not been read yet.
    Loading,
    /// No password digest is stored; the next submission sets one.
    Uninitialized,
    /// A digest is stored; a matching password is required to unlock.
    Required,
    /// The gate is unlocked for the rest of the session.
    Authenticated,
}

/// What a successful submission asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// A new password was set: persist `password_hash` as the settings record.
    Initialized {
        /// Hex digest of the freshly chosen password.
        password_hash: String,
    },
    /// The stored digest matched; nothing to persist.
    Unlocked,
}

/// The password gate guarding document access.
#[derive(Debug, Clone)]
pub struct AuthGate {
    state: GateState,
    stored_hash: Option<String>,
}

impl AuthGate {
    /// Creates a gate in the `Loading` state, before settings have been read.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: GateState::Loading,
            stored_hash: None,
        }
    }

    /// Current gate phase.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Feeds the stored digest (read once from settings) into the gate.
    ///
    /// `None` or an empty digest means no password has ever been set.
    /// Calling this outside `Loading` is a no-op: the settings record is
    /// read exactly once per session.
    pub fn load(&mut self, stored_hash: Option<String>) {
        if self.state != GateState::Loading {
            return;
        }
        match stored_hash.filter(|h| !h.is_empty()) {
            Some(hash) => {
                self.stored_hash = Some(hash);
                self.state = GateState::Required;
            }
            None => {
                self.state = GateState::Uninitialized;
            }
        }
    }

    /// Submits a password against the current phase.
    ///
    /// Passwords shorter than [`MIN_PASSWORD_LEN`] are rejected before any
    /// hashing runs and leave the state untouched.
    ///
    /// # Errors
    ///
    /// - [`DocvaultError::PasswordTooShort`] for a short password.
    /// - [`DocvaultError::WrongPassword`] for a mismatch in `Required`;
    ///   the gate stays in `Required` with no attempt counting or lockout.
    /// - [`DocvaultError::ValidationFailed`] when submitting while `Loading`
    ///   or already `Authenticated`.
    pub fn submit(&mut self, password: &str) -> Result<GateOutcome> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DocvaultError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        match self.state {
            GateState::Loading => Err(DocvaultError::ValidationFailed(
                "Settings are still loading".to_string(),
            )),
            GateState::Authenticated => Err(DocvaultError::ValidationFailed(
                "Already unlocked".to_string(),
            )),
            GateState::Uninitialized => {
                let password_hash = hash_password(password);
                self.stored_hash = Some(password_hash.clone());
                self.state = GateState::Authenticated;
                Ok(GateOutcome::Initialized { password_hash })
            }
            GateState::Required => {
                let digest = hash_password(password);
                let stored = self.stored_hash.as_deref().unwrap_or_default();
                if digest == stored {
                    self.state = GateState::Authenticated;
                    Ok(GateOutcome::Unlocked)
                } else {
                    Err(DocvaultError::WrongPassword)
                }
            }
        }
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}
