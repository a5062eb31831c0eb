//! The [`ContentStore`] seam between routing and wherever documents live.
//!
//! Collections are named by storage location (`"surrealql"`, `"sdk/rust"`).
//! Inside one, a document is named by its content key: `"index"` for the
//! landing page, `"functions"` or `"functions/string"` for everything else.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Content key of a collection's landing page.
pub const INDEX_KEY: &str = "index";

type BoxedCause = Box<dyn Error + Send + Sync>;

/// What went wrong, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// The document or collection location does not exist.
    NotFound,
    /// The backend refused access.
    PermissionDenied,
    /// Collection location or content key is not a plain relative path.
    InvalidPath,
    /// Any other backend failure.
    Other,
}

impl StorageErrorKind {
    fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "no such document",
            Self::PermissionDenied => "access denied",
            Self::InvalidPath => "invalid collection or key",
            Self::Other => "storage failure",
        }
    }
}

impl From<std::io::ErrorKind> for StorageErrorKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other,
        }
    }
}

/// Failure reported by a [`ContentStore`] backend.
#[derive(Debug)]
pub struct StorageError {
    /// Category of the failure.
    pub kind: StorageErrorKind,
    /// Backend that raised the error, e.g. `"Fs"`.
    pub backend: &'static str,
    /// Location the backend was looking at.
    pub path: Option<PathBuf>,
    cause: Option<BoxedCause>,
}

impl StorageError {
    /// Error of `kind` raised by `backend`, without location or cause.
    #[must_use]
    pub fn new(backend: &'static str, kind: StorageErrorKind) -> Self {
        Self {
            kind,
            backend,
            path: None,
            cause: None,
        }
    }

    /// The document at `path` does not exist.
    #[must_use]
    pub fn not_found(backend: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::new(backend, StorageErrorKind::NotFound).at(path)
    }

    /// `path` is not a usable collection location or content key.
    #[must_use]
    pub fn invalid_path(backend: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::new(backend, StorageErrorKind::InvalidPath).at(path)
    }

    /// Classify an I/O failure on `path`.
    #[must_use]
    pub fn from_io(backend: &'static str, err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::new(backend, err.kind().into()).at(path).caused_by(err)
    }

    /// Attach the location the backend was looking at.
    #[must_use]
    pub fn at(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error, reported through [`Error::source`].
    #[must_use]
    pub fn caused_by(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Whether the document simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} store: {}", self.backend, self.kind.describe())?;
        if let Some(path) = &self.path {
            write!(f, " at {}", path.display())?;
        }
        match &self.cause {
            Some(cause) => write!(f, " ({cause})"),
            None => Ok(()),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Read access to collections of markdown documents.
///
/// Collections are listed from several threads at once during enumeration.
pub trait ContentStore: Send + Sync {
    /// Content keys of every document in `collection`.
    ///
    /// A collection that has no backing location lists as empty.
    fn members(&self, collection: &str) -> Result<Vec<String>, StorageError>;

    /// Markdown source of one document.
    fn read(&self, collection: &str, key: &str) -> Result<String, StorageError>;

    /// Whether `read` would find the document. Errors count as absent.
    fn exists(&self, collection: &str, key: &str) -> bool;
}

/// A non-empty relative path with no empty, `.` or `..` segments and no
/// backslashes.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .split('/')
            .all(|seg| !matches!(seg, "" | "." | "..") && !seg.contains('\\'))
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_io_kind_is_classified() {
        let denied = StorageError::from_io(
            "Fs",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
            "/content/cloud",
        );
        let missing = StorageError::from_io("Fs", io::ErrorKind::NotFound.into(), "/x");
        let other = StorageError::from_io("Fs", io::ErrorKind::TimedOut.into(), "/x");

        assert_eq!(denied.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(denied.path.as_deref(), Some(Path::new("/content/cloud")));
        assert!(!denied.is_not_found());
        assert!(missing.is_not_found());
        assert_eq!(other.kind, StorageErrorKind::Other);
    }

    #[test]
    fn test_display_without_cause() {
        let err = StorageError::not_found("Mock", "surrealql/functions");

        assert_eq!(err.to_string(), "Mock store: no such document at surrealql/functions");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_display_with_cause() {
        let err = StorageError::from_io(
            "Fs",
            io::Error::new(io::ErrorKind::PermissionDenied, "os error 13"),
            "/content/surrealql",
        );

        assert_eq!(
            err.to_string(),
            "Fs store: access denied at /content/surrealql (os error 13)"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_send_sync() {
        static_assertions::assert_impl_all!(StorageError: Send, Sync, Error);
    }

    #[test]
    fn test_is_valid_key() {
        for key in ["index", "functions/string", "sdk/rust"] {
            assert!(is_valid_key(key), "{key}");
        }
        for key in ["", "../secrets", "a//b", "a/./b", "a\\b", "a/"] {
            assert!(!is_valid_key(key), "{key}");
        }
    }
}
