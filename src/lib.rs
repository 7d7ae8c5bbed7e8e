//! # browser-resolve
//!
//! A module specifier resolver for bundlers targeting browsers: given a
//! request string (`./foo`, `react`, `@scope/pkg/sub`) and the absolute path
//! of the importing file, returns the absolute path of the file the request
//! denotes.
//!
//! It implements the layered resolution algorithm bundlers use: relative and
//! absolute path resolution with extension probing and directory-index
//! fallback, `node_modules` lookup walking parent directories, and
//! package-manifest-driven redirection through the `main`/`module`/`browser`
//! entry fields, the `browser` map, a generalized `alias` map (with globs),
//! and conditional `exports` subpath maps (with pattern matching and nested
//! condition objects).
//!
//! The resolver never touches the filesystem directly: every probe goes
//! through an injected [`FileSystem`] so it can run against a real OS, an
//! in-memory overlay, or any other virtualized backend a host provides.
//!
//! ## Example
//!
//! ```rust
//! use browser_resolve::{InMemoryFileSystem, ResolveOptions, ResolverGeneric};
//!
//! let fs = InMemoryFileSystem::new()
//!     .with_file("/src/index.js", "")
//!     .with_file("/src/util.js", "");
//! let resolver = ResolverGeneric::new_with_file_system(fs, ResolveOptions::default());
//! let resolution = resolver.resolve("/src/index.js", "./util").unwrap();
//! assert_eq!(resolution.full_path(), std::path::Path::new("/src/util.js"));
//! ```

mod alias;
mod context;
mod error;
mod exports;
mod file_system;
mod manifest;
mod options;
mod path;
mod resolution;
mod resolver;
mod specifier;
mod util;

#[cfg(test)]
mod tests;

pub use crate::{
    error::{IOError, ResolveError},
    file_system::{FileSystem, FileSystemOs},
    options::ResolveOptions,
    path::parent_directories,
    resolution::{Resolution, EMPTY_SENTINEL},
    resolver::{Resolver, ResolverGeneric},
    specifier::normalize_module_specifier,
};

#[cfg(any(test, feature = "test-fs"))]
pub use crate::file_system::InMemoryFileSystem;

// Re-exported only for host integrations and tests that want to build a
// `ProcessedManifest` directly (spec.md §6 "Auxiliary exported helpers").
pub use crate::manifest::process_package_json;
