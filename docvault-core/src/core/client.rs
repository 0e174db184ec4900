//! Stable generated client identity for a DocVault store.

use crate::core::store::{keys, RecordStore};
use crate::Result;
use uuid::Uuid;

/// Returns the client identity for `store`, generating it on first use.
///
/// The identifier has the form `client-<uuid-v4>`. It is written once and
/// every later call against the same store returns the stored value.
///
/// # Errors
///
/// Returns an error if a freshly generated identity cannot be persisted.
pub fn client_id<S: RecordStore + ?Sized>(store: &mut S) -> Result<String> {
    if let Ok(Some(existing)) = store.read_raw(keys::CLIENT_ID) {
        if !existing.is_empty() {
            return Ok(existing);
        }
    }
    let id = format!("client-{}", Uuid::new_v4());
    store.write_raw(keys::CLIENT_ID, &id)?;
    Ok(id)
}
