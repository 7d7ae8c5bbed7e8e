use std::fmt;

/// Resolution knobs supplied per [`crate::ResolverGeneric`]. These are the
/// Rust-typed form of spec.md §6's request context (`extensions`) plus the
/// manifest field names and condition set §4.3/§4.5 treat as fixed, exposed
/// here as configuration the way the teacher's `ResolveOptions` does for its
/// much larger surface.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Probed, in order, after a candidate's literal path misses.
    /// Default `[".js", ".json"]`.
    pub extensions: Vec<String>,

    /// Manifest fields consulted for the package entry file, in precedence
    /// order. Default `["browser", "module", "main"]` (§4.3).
    pub main_fields: Vec<String>,

    /// Manifest fields merged into the alias table, in the order they are
    /// folded (earlier fields take priority on conflicting keys, §4.3).
    /// Default `["browser", "alias"]`.
    pub alias_fields: Vec<String>,

    /// Active `exports` conditions (§4.5, §6). Default
    /// `["browser", "import", "default"]`.
    pub condition_names: Vec<String>,

    /// Manifest file names probed per directory, in order. Default
    /// `["package.json"]`.
    pub description_files: Vec<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extensions: vec![".js".into(), ".json".into()],
            main_fields: vec!["browser".into(), "module".into(), "main".into()],
            alias_fields: vec!["browser".into(), "alias".into()],
            condition_names: vec!["browser".into(), "import".into(), "default".into()],
            description_files: vec!["package.json".into()],
        }
    }
}

impl ResolveOptions {
    #[must_use]
    pub fn with_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extensions.push(extension.into());
        self
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    #[must_use]
    pub fn with_main_fields(mut self, main_fields: Vec<String>) -> Self {
        self.main_fields = main_fields;
        self
    }

    #[must_use]
    pub fn with_alias_fields(mut self, alias_fields: Vec<String>) -> Self {
        self.alias_fields = alias_fields;
        self
    }

    #[must_use]
    pub fn with_condition_names(mut self, condition_names: Vec<String>) -> Self {
        self.condition_names = condition_names;
        self
    }
}

// For tracing.
impl fmt::Display for ResolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "extensions:{:?},main_fields:{:?},alias_fields:{:?},condition_names:{:?}",
            self.extensions, self.main_fields, self.alias_fields, self.condition_names
        )
    }
}
