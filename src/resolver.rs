//! Top-level driver (spec.md §4.7): classifies the specifier, walks
//! manifests from the importer outward, rewrites through aliases/exports,
//! and hands candidates to the file probe.

use std::path::Path;

use crate::{
    alias::{self, AliasOutcome},
    context::ResolveContext,
    error::ResolveError,
    exports::{self, ExportsMatch},
    file_system::FileSystem,
    manifest::{self, ProcessedManifest},
    options::ResolveOptions,
    path,
    resolution::{Resolution, EMPTY_SENTINEL},
    specifier::{self, Specifier},
};

/// The resolver, generic over its [`FileSystem`] implementation so tests can
/// run it against an in-memory overlay instead of the real OS.
#[derive(Debug, Clone)]
pub struct ResolverGeneric<Fs> {
    options: ResolveOptions,
    fs: Fs,
}

/// The resolver over the real operating-system filesystem.
pub type Resolver = ResolverGeneric<crate::file_system::FileSystemOs>;

impl<Fs: FileSystem + Default> ResolverGeneric<Fs> {
    #[must_use]
    pub fn new(options: ResolveOptions) -> Self {
        Self { options, fs: Fs::default() }
    }
}

impl<Fs: FileSystem> ResolverGeneric<Fs> {
    #[must_use]
    pub fn new_with_file_system(fs: Fs, options: ResolveOptions) -> Self {
        Self { options, fs }
    }

    #[must_use]
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolves `specifier` as imported from `importer`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] when no candidate resolves,
    /// [`ResolveError::MalformedManifest`] when a `package.json` is invalid
    /// JSON or has a malformed `exports` field, and [`ResolveError::Io`] when
    /// a manifest that `is_file` reported as present could not be read.
    pub fn resolve(&self, importer: impl AsRef<Path>, specifier: &str) -> Result<Resolution, ResolveError> {
        let importer = importer.as_ref().to_string_lossy().to_string();
        let span = tracing::debug_span!("resolve", specifier, importer = %importer);
        let _entered = span.enter();
        tracing::trace!(options = %self.options, "resolve_options");

        let mut ctx = ResolveContext::default();
        match self.resolve_request(&importer, specifier, &mut ctx) {
            Ok(Some(resolved)) => {
                tracing::debug!(%resolved, "resolved");
                Ok(Resolution::new(resolved))
            }
            Ok(None) => {
                tracing::debug!("not found");
                Err(ResolveError::NotFound { specifier: specifier.to_string(), importer: importer.into() })
            }
            Err(err) => Err(err),
        }
    }

    fn resolve_request(
        &self,
        importer: &str,
        specifier: &str,
        ctx: &mut ResolveContext,
    ) -> Result<Option<String>, ResolveError> {
        ctx.enter(specifier)?;

        let specifier = specifier::normalize_module_specifier(specifier);
        let importer_dir = path::dirname(importer);
        let importer_pkg = self.find_enclosing_manifest(&importer_dir, ctx)?;

        let classified = specifier::classify(&specifier);

        if !matches!(classified, Specifier::Absolute(_)) {
            if let Some(pkg) = &importer_pkg {
                if let Some(outcome) = alias::match_alias(&pkg.aliases, &specifier) {
                    return match outcome {
                        AliasOutcome::Empty => Ok(Some(EMPTY_SENTINEL.to_string())),
                        AliasOutcome::Redirect(new_specifier) => {
                            self.resolve_request(importer, &new_specifier, ctx)
                        }
                    };
                }
            }
        }

        match classified {
            Specifier::Relative(rel) => {
                let candidate = path::join(&importer_dir, &rel);
                self.probe(&candidate, ctx)
            }
            Specifier::Absolute(abs) => self.probe(&abs, ctx),
            Specifier::Bare { package, subpath } => {
                self.resolve_bare(&importer_dir, &package, &subpath, ctx)
            }
        }
    }

    /// Walks parent directories looking for `node_modules/<package>`
    /// (spec.md §4.7 step 4 Bare case).
    fn resolve_bare(
        &self,
        importer_dir: &str,
        package: &str,
        subpath: &str,
        ctx: &mut ResolveContext,
    ) -> Result<Option<String>, ResolveError> {
        for dir in path::parent_directories(importer_dir, None) {
            let node_modules = path::join(&dir, "node_modules");
            let root = path::join(&node_modules, package);

            if let Some(manifest) = self.load_manifest_at(&root, ctx)? {
                // The package was found (it has a manifest): whatever happens
                // next is definitive, success or failure — never fall
                // through to an outer node_modules (spec.md §4.7 tie-break).
                return self.resolve_within_package(&root, subpath, &manifest, ctx);
            }

            // No manifest here. We have no directory-listing primitive, only
            // `is_file`, so a manifest-less package's existence can only be
            // confirmed by successfully probing it; failing that we keep
            // walking outward, same as if it were never here at all.
            let candidate = if subpath.is_empty() { root } else { path::join(&root, subpath) };
            if let Some(found) = self.probe(&candidate, ctx)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// `exports` is authoritative when present: no `main`/`browser` fallback
    /// for subpath resolution inside that package (spec.md §4.7, §8 property 5).
    fn resolve_within_package(
        &self,
        root: &str,
        subpath: &str,
        manifest: &ProcessedManifest,
        ctx: &mut ResolveContext,
    ) -> Result<Option<String>, ResolveError> {
        if let Some(exports) = &manifest.exports {
            let request = if subpath.is_empty() { ".".to_string() } else { format!("./{subpath}") };
            let conditions: Vec<&str> = self.options.condition_names.iter().map(String::as_str).collect();
            return Ok(match exports::match_exports(exports, &request, &conditions) {
                ExportsMatch::Resolved(rel) => {
                    let candidate = path::join(root, &rel);
                    self.probe(&candidate, ctx)?
                }
                ExportsMatch::Empty => Some(EMPTY_SENTINEL.to_string()),
                ExportsMatch::NoMatch => None,
            });
        }

        if subpath.is_empty() {
            return self.probe(root, ctx);
        }

        let mut effective_subpath = subpath.to_string();
        let key = format!("./{subpath}");
        if let Some(outcome) = alias::match_alias(&manifest.aliases, &key) {
            match outcome {
                AliasOutcome::Empty => return Ok(Some(EMPTY_SENTINEL.to_string())),
                AliasOutcome::Redirect(redirect) => {
                    effective_subpath = redirect.strip_prefix("./").unwrap_or(&redirect).to_string();
                }
            }
        }
        let candidate = path::join(root, &effective_subpath);
        self.probe(&candidate, ctx)
    }

    /// `FileProbe` (spec.md §4.6): the path itself, the path plus each
    /// extension, then directory resolution (manifest entry, then
    /// `index.<ext>`).
    fn probe(&self, candidate: &str, ctx: &mut ResolveContext) -> Result<Option<String>, ResolveError> {
        ctx.enter(candidate)?;

        tracing::trace!(candidate, "probe: as file");
        if self.fs.is_file(Path::new(candidate)) {
            return Ok(Some(candidate.to_string()));
        }

        for extension in &self.options.extensions {
            let with_extension = format!("{candidate}{extension}");
            tracing::trace!(candidate = %with_extension, "probe: with extension");
            if self.fs.is_file(Path::new(&with_extension)) {
                return Ok(Some(with_extension));
            }
        }

        if let Some(manifest) = self.load_manifest_at(candidate, ctx)? {
            if let Some(entry) = &manifest.entry {
                // `main` is conventionally a bare relative path ("index.js")
                // while `browser`-object keys are given relative-path style
                // ("./index.js"); normalize before matching so either spelling
                // of the same file is recognized (spec.md §4.3 item 3).
                let entry_key =
                    if entry.starts_with("./") || entry.starts_with("../") {
                        entry.clone()
                    } else {
                        format!("./{entry}")
                    };
                let aliased_entry = match alias::match_alias(&manifest.aliases, &entry_key) {
                    Some(AliasOutcome::Empty) => return Ok(Some(EMPTY_SENTINEL.to_string())),
                    Some(AliasOutcome::Redirect(redirect)) => redirect,
                    None => entry.clone(),
                };
                let entry_candidate = path::join(candidate, &aliased_entry);
                if let Some(found) = self.probe(&entry_candidate, ctx)? {
                    return Ok(Some(found));
                }
            }
        }

        for extension in &self.options.extensions {
            let index_candidate = path::join(candidate, &format!("index{extension}"));
            tracing::trace!(candidate = %index_candidate, "probe: directory index");
            if self.fs.is_file(Path::new(&index_candidate)) {
                return Ok(Some(index_candidate));
            }
        }

        Ok(None)
    }

    /// Walks `parent_directories(dir)` looking for the nearest `package.json`
    /// (spec.md §4.7 step 2).
    fn find_enclosing_manifest(
        &self,
        dir: &str,
        ctx: &mut ResolveContext,
    ) -> Result<Option<ProcessedManifest>, ResolveError> {
        for parent in path::parent_directories(dir, None) {
            if let Some(manifest) = self.load_manifest_at(&parent, ctx)? {
                return Ok(Some(manifest));
            }
        }
        Ok(None)
    }

    /// Reads and compiles the manifest directly inside `dir`, if any
    /// (spec.md §4.3).
    fn load_manifest_at(
        &self,
        dir: &str,
        _ctx: &mut ResolveContext,
    ) -> Result<Option<ProcessedManifest>, ResolveError> {
        for description_file in &self.options.description_files {
            let manifest_path = path::join(dir, description_file);
            let manifest_path_ref = Path::new(&manifest_path);
            if !self.fs.is_file(manifest_path_ref) {
                continue;
            }
            tracing::trace!(path = %manifest_path, "reading manifest");
            let mut content = self
                .fs
                .read_to_string(manifest_path_ref)
                .map_err(|err| ResolveError::from_io(manifest_path_ref, err))?;
            crate::util::replace_bom_with_whitespace(&mut content);
            let value: serde_json::Value = serde_json::from_str(&content).map_err(|err| {
                ResolveError::MalformedManifest {
                    path: manifest_path_ref.to_path_buf(),
                    message: err.to_string(),
                }
            })?;
            return manifest::process_package_json(&value, dir, &self.options).map(Some);
        }
        Ok(None)
    }
}

impl<Fs: FileSystem + Clone + Send + Sync + 'static> ResolverGeneric<Fs> {
    /// Effectful sibling of [`Self::resolve`]: same contract, driven through
    /// `tokio::task::spawn_blocking` so callers with an async event loop can
    /// cooperatively yield around it (spec.md §5's "uniform effect type with
    /// two evaluators" — the algorithm itself is not duplicated).
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    ///
    /// # Panics
    ///
    /// Panics if the underlying blocking task panics.
    pub async fn resolve_async(
        &self,
        importer: impl AsRef<Path>,
        specifier: &str,
    ) -> Result<Resolution, ResolveError> {
        let resolver = self.clone();
        let importer = importer.as_ref().to_path_buf();
        let specifier = specifier.to_string();
        tokio::task::spawn_blocking(move || resolver.resolve(&importer, &specifier))
            .await
            .expect("resolve_async: blocking task panicked")
    }
}
