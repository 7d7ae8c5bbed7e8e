use std::path::{Path, PathBuf};

/// The literal path meaning "resolved to nothing importable" — produced only
/// via an explicit `Empty`/`Null` alias or export (spec.md §3 invariant 2).
/// The leading `//` is not a typo: it is what joining with an empty base
/// string naturally produces, and is preserved verbatim for compatibility.
pub const EMPTY_SENTINEL: &str = "//empty.js";

/// A successfully resolved module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    full_path: PathBuf,
}

impl Resolution {
    pub(crate) fn new(full_path: String) -> Self {
        Self { full_path: PathBuf::from(full_path) }
    }

    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.full_path
    }

    /// Whether this resolution is the empty sentinel rather than a real file.
    #[must_use]
    pub fn is_empty_module(&self) -> bool {
        self.full_path == Path::new(EMPTY_SENTINEL)
    }
}
