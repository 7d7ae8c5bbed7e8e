//! Classifies a request string as relative, absolute, or bare, and splits
//! bare specifiers into package name and subpath (spec.md §4.2).

use crate::path;

/// A classified specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// Starts with `./` or `../`.
    Relative(String),
    /// Starts with `/`.
    Absolute(String),
    /// Everything else: a package name plus the remainder of the request.
    Bare { package: String, subpath: String },
}

/// Collapses internal `//` runs to `/` and strips a trailing `/`, without
/// touching a leading `./`. Idempotent (spec.md §8 property 1); this is
/// exactly [`path::normalize`]'s contract, reused here under the name the
/// spec gives it.
#[must_use]
pub fn normalize_module_specifier(s: &str) -> String {
    path::normalize(s)
}

/// Classifies an already-normalized specifier.
#[must_use]
pub fn classify(s: &str) -> Specifier {
    if s.starts_with("./") || s.starts_with("../") {
        Specifier::Relative(s.to_string())
    } else if let Some(rest) = s.strip_prefix('/') {
        Specifier::Absolute(format!("/{rest}"))
    } else {
        let (package, subpath) = split_bare(s);
        Specifier::Bare { package, subpath }
    }
}

/// `pkg` is `s` up to the first `/`, or all of `s`; for scoped packages
/// (`@scope/name`) it extends through the second `/`. `subpath` is whatever
/// remains, with no leading `/`.
fn split_bare(s: &str) -> (String, String) {
    if s.starts_with('@') {
        let mut slashes = s.match_indices('/');
        let Some((first, _)) = slashes.next() else {
            return (s.to_string(), String::new());
        };
        return match slashes.next() {
            Some((second, _)) => (s[..second].to_string(), s[second + 1..].to_string()),
            None => {
                let _ = first;
                (s.to_string(), String::new())
            }
        };
    }
    match s.find('/') {
        Some(idx) => (s[..idx].to_string(), s[idx + 1..].to_string()),
        None => (s.to_string(), String::new()),
    }
}
