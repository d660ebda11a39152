//! Extension and size gatekeeping for uploaded documents.

use crate::core::intake::IntakeError;
use crate::security::SanitizedFilename;

/// Document types accepted by default
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Request body ceiling (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Accept/reject policy applied to an upload before anything touches disk.
#[derive(Debug, Clone)]
pub struct UploadGate {
    allowed_extensions: Vec<String>,
    max_bytes: usize,
}

impl Default for UploadGate {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl UploadGate {
    /// Create a gate; extensions are compared lowercased and without the dot
    pub fn new<I, S>(allowed_extensions: I, max_bytes: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_bytes,
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// True when `filename` has a `.`-delimited extension in the allowed set.
    /// Only the text after the last dot counts, so `archive.pdf.exe` is refused.
    pub fn allows_extension(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_ascii_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }

    /// Reject a request whose declared body length already exceeds the ceiling
    pub fn check_declared_length(&self, declared: Option<u64>) -> Result<(), IntakeError> {
        match declared {
            Some(len) if len > self.max_bytes as u64 => Err(IntakeError::TooLarge {
                limit: self.max_bytes,
            }),
            _ => Ok(()),
        }
    }

    /// Check the raw client filename and content length
    pub fn check_candidate(&self, filename: &str, content_len: usize) -> Result<(), IntakeError> {
        if content_len > self.max_bytes {
            return Err(IntakeError::TooLarge {
                limit: self.max_bytes,
            });
        }

        if filename.is_empty() {
            return Err(IntakeError::EmptySelection);
        }

        if !self.allows_extension(filename) {
            return Err(self.unsupported_type());
        }

        Ok(())
    }

    /// Re-apply the extension rule after sanitization. A name that sanitized
    /// to nothing, or lost its extension on the way, is not storable.
    pub fn check_sanitized(&self, filename: &SanitizedFilename) -> Result<(), IntakeError> {
        if filename.is_empty() || !self.allows_extension(filename.as_str()) {
            return Err(self.unsupported_type());
        }
        Ok(())
    }

    fn unsupported_type(&self) -> IntakeError {
        IntakeError::UnsupportedType {
            allowed: self.allowed_extensions.clone(),
        }
    }
}
