use std::{io, path::PathBuf, sync::Arc};

use thiserror::Error;

/// All resolution errors.
///
/// `thiserror` is used to display meaningful error messages.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// The resolver exhausted every candidate for `specifier` from `importer`.
    #[error("Cannot find module '{specifier}' from '{importer}'")]
    NotFound { specifier: String, importer: PathBuf },

    /// A package manifest failed to parse as JSON, or its `exports` field
    /// mixed subpath keys (`.`-prefixed) with condition keys at the same
    /// level.
    #[error("Malformed package manifest at {path}: {message}")]
    MalformedManifest { path: PathBuf, message: String },

    /// `read_file` failed for a manifest that `is_file` reported as present.
    #[error("{0}")]
    Io(IOError),

    /// An alias or `exports` redirection referenced itself, directly or
    /// through a cycle, deeply enough to trip the recursion guard.
    #[error("Recursion while resolving '{0}'")]
    Recursion(String),
}

impl ResolveError {
    #[must_use]
    pub fn from_io(path: &std::path::Path, error: io::Error) -> Self {
        Self::Io(IOError { path: path.to_path_buf(), error: Arc::new(error) })
    }
}

/// `io::Error` wrapper that is `Clone + PartialEq`, comparing by [`io::ErrorKind`]
/// so [`ResolveError`] can derive `PartialEq` for test assertions. Carries the
/// manifest path that failed to read, same as `NotFound`/`MalformedManifest`.
#[derive(Debug, Clone, Error)]
#[error("Failed to read {path}: {error}")]
pub struct IOError {
    path: PathBuf,
    error: Arc<io::Error>,
}

impl PartialEq for IOError {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.error.kind() == other.error.kind()
    }
}

impl From<IOError> for io::Error {
    fn from(error: IOError) -> Self {
        let inner = error.error.as_ref();
        Self::new(inner.kind(), inner.to_string())
    }
}
