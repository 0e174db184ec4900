//! Inline file attachments encoded as base64 data URIs.
//!
//! A document may carry at most one attached file, stored inline in the
//! collection record as `data:<mime>;base64,<payload>`. The decoded size is
//! capped at 1MB, checked before any encoding happens; an oversize file is
//! rejected outright with nothing partial kept.

use crate::{DocvaultError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Hard ceiling on the decoded attachment size, in bytes.
pub const MAX_ATTACHMENT_BYTES: usize = 1024 * 1024;

/// A single file inlined into a document as a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// `data:<mime>;base64,<payload>` holding the file content.
    pub file_url: String,
    /// Original file name, used when the file is saved back out.
    pub file_name: String,
    /// Content type guessed from the file name.
    pub file_mime_type: String,
}

impl Attachment {
    /// Builds an attachment from in-memory file content.
    ///
    /// The content type is guessed from `file_name`, falling back to
    /// `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::AttachmentTooLarge`] if `bytes` exceeds
    /// [`MAX_ATTACHMENT_BYTES`]; the check runs before encoding.
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(DocvaultError::AttachmentTooLarge { size: bytes.len() });
        }
        let mime = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();
        let file_url = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
        Ok(Self {
            file_url,
            file_name: file_name.to_string(),
            file_mime_type: mime,
        })
    }

    /// Reads a file from disk and builds an attachment from it.
    ///
    /// The size ceiling is checked against the file's metadata before the
    /// content is read, so an oversize file is never pulled into memory.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::AttachmentTooLarge`] for an oversize file,
    /// or [`DocvaultError::Io`] if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let len = fs::metadata(path)?.len();
        if len > MAX_ATTACHMENT_BYTES as u64 {
            return Err(DocvaultError::AttachmentTooLarge { size: len as usize });
        }
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment");
        Self::from_bytes(file_name, &bytes)
    }

    /// Decodes the data URI payload back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::InvalidDataUri`] if the URL is not a
    /// well-formed base64 data URI.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let payload = self
            .file_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, payload)| payload)
            .ok_or_else(|| {
                DocvaultError::InvalidDataUri("missing data:...;base64, prefix".to_string())
            })?;
        STANDARD
            .decode(payload)
            .map_err(|e| DocvaultError::InvalidDataUri(e.to_string()))
    }

    /// Writes the decoded file into `dir` under its original file name and
    /// returns the path written. This is the library analog of the UI's
    /// "download attachment" action.
    ///
    /// # Errors
    ///
    /// Returns [`DocvaultError::InvalidDataUri`] for a malformed URL or
    /// [`DocvaultError::Io`] if the file cannot be written.
    pub fn save_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let bytes = self.decode()?;
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}
