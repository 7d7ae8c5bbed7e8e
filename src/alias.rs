//! `AliasMatcher`: applies a compiled alias table to a key (spec.md §4.4).
//! First match wins; this module does no filesystem work and no manifest
//! parsing, only the pure lookup.

use crate::manifest::{AliasEntry, AliasKey, AliasValue};

/// Outcome of a matched alias entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasOutcome {
    Redirect(String),
    Empty,
}

/// Finds the first entry in `aliases` whose key matches `key`, applying the
/// matched value (substituting the captured glob segment when the redirect
/// contains `*`). Returns `None` when nothing matches — never an error;
/// "no match" is a controlled fall-through (spec.md §7).
#[must_use]
pub fn match_alias(aliases: &[AliasEntry], key: &str) -> Option<AliasOutcome> {
    for entry in aliases {
        let captured = match &entry.key {
            AliasKey::Exact(exact) => {
                if exact != key {
                    continue;
                }
                None
            }
            AliasKey::Glob { prefix, suffix } => {
                if key.len() < prefix.len() + suffix.len()
                    || !key.starts_with(prefix.as_str())
                    || !key.ends_with(suffix.as_str())
                {
                    continue;
                }
                Some(&key[prefix.len()..key.len() - suffix.len()])
            }
        };
        return Some(resolve_value(&entry.value, captured));
    }
    None
}

fn resolve_value(value: &AliasValue, captured: Option<&str>) -> AliasOutcome {
    match value {
        AliasValue::Empty => AliasOutcome::Empty,
        AliasValue::Redirect(target) => match captured {
            Some(middle) if target.contains('*') => {
                AliasOutcome::Redirect(target.replacen('*', middle, 1))
            }
            _ => AliasOutcome::Redirect(target.clone()),
        },
    }
}
