//! `ExportsMatcher`: compiles a manifest's `exports` field into an
//! [`ExportsTree`] and matches a requested subpath against it, selecting by
//! pattern specificity and condition priority (spec.md §4.3, §4.5).

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ResolveError;

/// Compiled form of a manifest's `exports` field.
#[derive(Debug, Clone)]
pub enum ExportsTree {
    /// A bare string value, matching only the `.` subpath.
    Single(String),
    /// An ordered subpath map (`.`-prefixed keys, insertion order preserved).
    Map(Vec<(String, ExportsTarget)>),
}

#[derive(Debug, Clone)]
pub enum ExportsTarget {
    Str(String),
    /// An ordered condition map; declaration order is semantically significant.
    Conditions(Vec<(String, ExportsTarget)>),
    /// `null` — resolves to the empty sentinel.
    Null,
}

/// Result of matching a subpath against an [`ExportsTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportsMatch {
    /// A relative path, to be joined with the package directory.
    Resolved(String),
    /// A `null`/no-condition-matched target down this branch.
    Empty,
    /// No subpath key, and no pattern, matched the request.
    NoMatch,
}

/// Compiles a manifest's raw `exports` value. Detects the "mixed subpath and
/// condition keys" case spec.md §9 calls out and raises
/// [`ResolveError::MalformedManifest`] for it.
pub fn compile_exports(value: &Value, pkg_dir: &str) -> Result<ExportsTree, ResolveError> {
    match value {
        Value::String(s) => Ok(ExportsTree::Single(s.clone())),
        Value::Object(map) => {
            if map.is_empty() {
                return Ok(ExportsTree::Map(Vec::new()));
            }
            let all_dot = map.keys().all(|k| k.starts_with('.'));
            let any_dot = map.keys().any(|k| k.starts_with('.'));
            if any_dot && !all_dot {
                return Err(ResolveError::MalformedManifest {
                    path: manifest_path(pkg_dir),
                    message: "\"exports\" cannot mix subpath keys (starting with '.') with \
                              condition keys at the same level"
                        .to_string(),
                });
            }
            if all_dot {
                let mut entries = Vec::with_capacity(map.len());
                for (key, target) in map {
                    entries.push((key.clone(), compile_target(target, pkg_dir)?));
                }
                Ok(ExportsTree::Map(entries))
            } else {
                // A conditions map at the root is equivalent to `{".": <that object>}`.
                Ok(ExportsTree::Map(vec![(".".to_string(), compile_target(value, pkg_dir)?)]))
            }
        }
        Value::Null => Ok(ExportsTree::Map(vec![(".".to_string(), ExportsTarget::Null)])),
        _ => Err(ResolveError::MalformedManifest {
            path: manifest_path(pkg_dir),
            message: "\"exports\" must be a string, object, or null".to_string(),
        }),
    }
}

fn compile_target(value: &Value, pkg_dir: &str) -> Result<ExportsTarget, ResolveError> {
    match value {
        Value::String(s) => Ok(ExportsTarget::Str(s.clone())),
        Value::Null => Ok(ExportsTarget::Null),
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, target) in map {
                entries.push((key.clone(), compile_target(target, pkg_dir)?));
            }
            Ok(ExportsTarget::Conditions(entries))
        }
        _ => Err(ResolveError::MalformedManifest {
            path: manifest_path(pkg_dir),
            message: format!("invalid \"exports\" target {value}"),
        }),
    }
}

fn manifest_path(pkg_dir: &str) -> PathBuf {
    Path::new(pkg_dir).join("package.json")
}

/// Matches `subpath` (`.` itself, or `./rest`) against `tree` under the given
/// active `conditions`, per spec.md §4.5.
#[must_use]
pub fn match_exports(tree: &ExportsTree, subpath: &str, conditions: &[&str]) -> ExportsMatch {
    let request = if subpath.is_empty() { "." } else { subpath };
    match tree {
        ExportsTree::Single(s) => {
            if request == "." { resolve_target(&ExportsTarget::Str(s.clone()), None, conditions) } else { ExportsMatch::NoMatch }
        }
        ExportsTree::Map(entries) => match find_best_match(entries, request) {
            Some((target, captured)) => resolve_target(target, captured.as_deref(), conditions),
            None => ExportsMatch::NoMatch,
        },
    }
}

/// Exact literal keys outrank pattern keys; among patterns, longest literal
/// prefix wins, ties broken by longest suffix (spec.md §4.5 step 2).
fn find_best_match<'a>(
    entries: &'a [(String, ExportsTarget)],
    request: &str,
) -> Option<(&'a ExportsTarget, Option<String>)> {
    for (key, target) in entries {
        if key == request {
            return Some((target, None));
        }
    }

    let mut best: Option<(&ExportsTarget, String, usize, usize)> = None;
    for (key, target) in entries {
        let Some(star) = key.find('*') else { continue };
        let prefix = &key[..star];
        let suffix = &key[star + 1..];
        if request.len() < prefix.len() + suffix.len() {
            continue;
        }
        if !request.starts_with(prefix) || !request.ends_with(suffix) {
            continue;
        }
        let captured = request[prefix.len()..request.len() - suffix.len()].to_string();
        let is_better = match &best {
            None => true,
            Some((_, _, best_prefix_len, best_suffix_len)) => {
                prefix.len() > *best_prefix_len
                    || (prefix.len() == *best_prefix_len && suffix.len() > *best_suffix_len)
            }
        };
        if is_better {
            best = Some((target, captured, prefix.len(), suffix.len()));
        }
    }
    best.map(|(target, captured, ..)| (target, Some(captured)))
}

fn resolve_target(target: &ExportsTarget, captured: Option<&str>, conditions: &[&str]) -> ExportsMatch {
    match target {
        ExportsTarget::Null => ExportsMatch::Empty,
        ExportsTarget::Str(s) => {
            let resolved = match captured {
                Some(c) if s.contains('*') => s.replacen('*', c, 1),
                _ => s.clone(),
            };
            ExportsMatch::Resolved(resolved)
        }
        ExportsTarget::Conditions(entries) => {
            for (condition, sub_target) in entries {
                if condition == "default" || conditions.contains(&condition.as_str()) {
                    return resolve_target(sub_target, captured, conditions);
                }
            }
            ExportsMatch::NoMatch
        }
    }
}
