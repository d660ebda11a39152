//! Client filename sanitization
//!
//! Uploaded filenames are untrusted. [`sanitize_filename`] reduces them to a
//! flat name that can be joined onto the storage root without escaping it.

use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Longest filename, in bytes, accepted by common filesystems
pub const MAX_FILENAME_BYTES: usize = 255;

/// Device names that Windows refuses to use as regular files
const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// A filename that is safe to use as a storage key.
///
/// Only [`sanitize_filename`] produces one. The value holds ASCII letters,
/// digits, `_`, `.` and `-`, never starts or ends with `.` or `_` (except for
/// the `_` guarding a Windows device name), and fits in
/// [`MAX_FILENAME_BYTES`]. It is empty when nothing usable survived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SanitizedFilename(String);

impl SanitizedFilename {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedFilename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SanitizedFilename> for String {
    fn from(name: SanitizedFilename) -> String {
        name.0
    }
}

/// Sanitize a client-supplied filename.
///
/// The name is NFKD-normalized so accented and full-width letters reduce to
/// their ASCII base, then remaining non-ASCII characters are dropped. Path
/// separators become word breaks, whitespace runs collapse to `_`, anything
/// outside `[A-Za-z0-9_.-]` is removed and leading/trailing `.`/`_` are
/// stripped. Entirely unsafe input
/// yields an empty name, which the upload gate rejects.
///
/// The function is idempotent: sanitizing a sanitized name returns it unchanged.
pub fn sanitize_filename(raw: &str) -> SanitizedFilename {
    let spaced: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        return SanitizedFilename(String::new());
    }

    let mut name = if is_windows_device_name(trimmed) {
        format!("_{}", trimmed)
    } else {
        trimmed.to_string()
    };

    if name.len() > MAX_FILENAME_BYTES {
        name = truncate_preserving_extension(&name);
    }

    SanitizedFilename(name)
}

fn is_windows_device_name(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name);
    WINDOWS_DEVICE_NAMES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(stem))
}

// Input is ASCII at this point, so byte offsets are char boundaries.
fn truncate_preserving_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() + 1 < MAX_FILENAME_BYTES => {
            let keep = (MAX_FILENAME_BYTES - ext.len() - 1).min(stem.len());
            format!("{}.{}", &stem[..keep], ext)
        }
        _ => name[..MAX_FILENAME_BYTES]
            .trim_end_matches(['.', '_'])
            .to_string(),
    }
}
