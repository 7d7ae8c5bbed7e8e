//! The host filesystem, reached only through the two predicates the core
//! algorithm actually needs. See the crate-level docs for why the resolver
//! never touches `std::fs` directly.

use std::{fs, io, path::Path};

/// Injected filesystem capability. The resolver never reads a directory
/// listing, follows a symlink, or mutates anything; `is_file`/`read_to_string`
/// are the entirety of its contract with the outside world.
pub trait FileSystem: Send + Sync {
    /// Whether `path` names a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// See [`std::fs::read_to_string`].
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be read, mirroring
    /// [`std::fs::read_to_string`]'s error conditions.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real operating-system filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemOs;

impl FileSystem for FileSystemOs {
    fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|m| m.is_file())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

#[cfg(any(test, feature = "test-fs"))]
pub use in_memory::InMemoryFileSystem;

#[cfg(any(test, feature = "test-fs"))]
mod in_memory {
    use std::{
        io,
        path::{Path, PathBuf},
    };

    use rustc_hash::FxHashMap;

    use super::FileSystem;

    /// An in-memory overlay used by tests and by host integrations that
    /// resolve against a virtualized project (no real files on disk).
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryFileSystem {
        files: FxHashMap<PathBuf, String>,
    }

    impl InMemoryFileSystem {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a file and its contents. Chainable for fixture building.
        #[must_use]
        pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
            self.files.insert(path.into(), contents.into());
            self
        }

        pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
            self.files.insert(path.into(), contents.into());
        }
    }

    impl FileSystem for InMemoryFileSystem {
        fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{path:?}")))
        }
    }
}
