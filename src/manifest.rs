//! `ManifestProcessor`: parses a package manifest once into a
//! [`ProcessedManifest`] — a chosen entry file, a merged alias table, and a
//! compiled `exports` tree — per spec.md §4.3. Everything downstream matches
//! against this normalized record; the raw `serde_json::Value` is discarded.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{error::ResolveError, exports::ExportsTree, options::ResolveOptions, path};

/// Output of processing one manifest. A pure function of the manifest
/// content and `pkg_dir` (spec.md §3 invariant 4).
#[derive(Debug, Clone)]
pub struct ProcessedManifest {
    pub pkg_dir: String,
    pub entry: Option<String>,
    pub aliases: Vec<AliasEntry>,
    pub exports: Option<ExportsTree>,
}

#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub key: AliasKey,
    pub value: AliasValue,
}

#[derive(Debug, Clone)]
pub enum AliasKey {
    Exact(String),
    /// A pattern containing exactly one `*`.
    Glob { prefix: String, suffix: String },
}

#[derive(Debug, Clone)]
pub enum AliasValue {
    Redirect(String),
    /// Resolves to the shared empty-module sentinel.
    Empty,
}

/// Parses `manifest` (the already-deserialized JSON object) rooted at
/// `pkg_dir` into a [`ProcessedManifest`], per spec.md §4.3.
pub fn process_package_json(
    manifest: &Value,
    pkg_dir: &str,
    options: &ResolveOptions,
) -> Result<ProcessedManifest, ResolveError> {
    let obj = manifest.as_object();

    let entry = options.main_fields.iter().find_map(|field| {
        obj.and_then(|o| o.get(field)).and_then(Value::as_str).map(str::to_string)
    });

    let mut aliases = Vec::new();
    for field in &options.alias_fields {
        let Some(field_value) = obj.and_then(|o| o.get(field)) else {
            continue;
        };
        let Some(map) = field_value.as_object() else {
            // A string value (e.g. `browser` used as the entry field) carries
            // no alias entries of its own.
            continue;
        };
        // Only `alias` supports glob keys (spec.md §4.3 item 2); `browser`
        // object keys are always literal.
        let allow_glob = field == "alias";
        for (key, value) in map {
            aliases.push(compile_alias_entry(key, value, allow_glob, pkg_dir)?);
        }
    }

    let exports = obj
        .and_then(|o| o.get("exports"))
        .map(|value| crate::exports::compile_exports(value, pkg_dir))
        .transpose()?;

    Ok(ProcessedManifest { pkg_dir: pkg_dir.to_string(), entry, aliases, exports })
}

fn compile_alias_entry(
    key: &str,
    value: &Value,
    allow_glob: bool,
    pkg_dir: &str,
) -> Result<AliasEntry, ResolveError> {
    let alias_value = match value {
        Value::Bool(false) => AliasValue::Empty,
        Value::String(s) => AliasValue::Redirect(s.clone()),
        _ => {
            return Err(ResolveError::MalformedManifest {
                path: manifest_path(pkg_dir),
                message: format!("alias value for '{key}' must be a string or `false`"),
            });
        }
    };
    let alias_key = if allow_glob {
        key.split_once('*').map_or_else(
            || AliasKey::Exact(normalize_alias_key(key)),
            |(prefix, suffix)| AliasKey::Glob { prefix: prefix.to_string(), suffix: suffix.to_string() },
        )
    } else {
        AliasKey::Exact(normalize_alias_key(key))
    };
    Ok(AliasEntry { key: alias_key, value: alias_value })
}

fn normalize_alias_key(key: &str) -> String {
    if key.starts_with("./") { path::normalize(key) } else { key.to_string() }
}

fn manifest_path(pkg_dir: &str) -> PathBuf {
    Path::new(pkg_dir).join("package.json")
}
