//! Path security utilities to prevent directory traversal attacks

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathSecurityError {
    #[error("Path traversal attempt detected: {0}")]
    TraversalAttempt(String),

    #[error("Invalid path component: {0}")]
    InvalidComponent(String),

    #[error("Path escapes root directory: {0}")]
    EscapesRoot(String),
}

/// Validate a single user-derived path component.
/// Rejects empty components, `.`/`..`, separators and absolute forms.
pub fn validate_path_component(component: &str) -> Result<&str, PathSecurityError> {
    if component.is_empty() || component == "." {
        return Err(PathSecurityError::InvalidComponent(format!(
            "'{}' does not name a file",
            component
        )));
    }

    if component == ".." || component.contains('/') || component.contains('\\') {
        return Err(PathSecurityError::TraversalAttempt(format!(
            "Path component '{}' contains directory traversal characters",
            component
        )));
    }

    if cfg!(windows) && component.contains(':') {
        return Err(PathSecurityError::InvalidComponent(format!(
            "Path component '{}' appears to be an absolute path",
            component
        )));
    }

    Ok(component)
}

/// Join a single component onto `root`, guaranteeing the result is a direct
/// child of `root`.
pub fn join_within_root(root: &Path, component: &str) -> Result<PathBuf, PathSecurityError> {
    let component = validate_path_component(component)?;
    let joined = root.join(component);

    if joined.parent() != Some(root) || !joined.starts_with(root) {
        return Err(PathSecurityError::EscapesRoot(format!(
            "Path '{}' is not directly under '{}'",
            joined.display(),
            root.display()
        )));
    }

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_path_component() {
        assert!(validate_path_component("contract.pdf").is_ok());
        assert!(validate_path_component("evil_.._x.docx").is_ok());
        assert!(validate_path_component("").is_err());
        assert!(validate_path_component(".").is_err());
        assert!(validate_path_component("..").is_err());
        assert!(validate_path_component("../etc").is_err());
        assert!(validate_path_component("/etc/passwd").is_err());
        assert!(validate_path_component("dir\\file.txt").is_err());
    }

    #[test]
    fn test_join_within_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let joined = join_within_root(root, "contract.pdf").unwrap();
        assert_eq!(joined, root.join("contract.pdf"));
        assert_eq!(joined.parent(), Some(root));

        assert!(matches!(
            join_within_root(root, "../outside.pdf"),
            Err(PathSecurityError::TraversalAttempt(_))
        ));
        assert!(matches!(
            join_within_root(root, "."),
            Err(PathSecurityError::InvalidComponent(_))
        ));
    }
}
