//! Path Utilities
//!
//! Pure, allocation-only path manipulation. Everything here operates on
//! posix-style strings; callers are responsible for normalizing platform
//! paths before they reach the resolver.
//!
//! Code adapted from the same family of ideas as [path-absolutize] and
//! [normalize_path], simplified to the posix-only subset this crate needs.
//!
//! [path-absolutize]: https://docs.rs/path-absolutize
//! [normalize_path]: https://docs.rs/normalize-path

/// Collapse runs of `/` to a single `/` and strip a trailing `/`, except
/// when the whole path is `/`. Leading `./` and `../` are preserved.
#[must_use]
pub fn normalize(p: &str) -> String {
    if p.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(p.len());
    let mut prev_slash = false;
    for c in p.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }

    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }

    out
}

/// Join `base` with `rel` posix-style, then collapse `.`/`..` segments.
///
/// If `rel` is absolute (starts with `/`), it replaces `base` entirely.
#[must_use]
pub fn join(base: &str, rel: &str) -> String {
    if rel.starts_with('/') {
        return normalize(rel);
    }

    let mut stack: Vec<&str> = Vec::new();
    for segment in base.split('/').filter(|s| !s.is_empty()) {
        push_segment(&mut stack, segment);
    }
    for segment in rel.split('/').filter(|s| !s.is_empty()) {
        push_segment(&mut stack, segment);
    }

    format!("/{}", stack.join("/"))
}

fn push_segment<'a>(stack: &mut Vec<&'a str>, segment: &'a str) {
    match segment {
        "." => {}
        ".." => {
            stack.pop();
        }
        seg => stack.push(seg),
    }
}

/// Posix `dirname`. `dirname("/a/b") == "/a"`, `dirname("/a") == "/"`,
/// `dirname("/") == "/"`.
#[must_use]
pub fn dirname(p: &str) -> String {
    let trimmed = p.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
        None => "/".to_string(),
    }
}

/// Posix `basename`. `basename("/a/b.js") == "b.js"`.
#[must_use]
pub fn basename(p: &str) -> &str {
    let trimmed = p.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// `[p, dirname(p), dirname(dirname(p)), ...]`, terminating at `/` or at
/// `root_dir` (inclusive) when given. Never produces duplicates; the
/// sequence is always finite since `dirname` contracts towards `/`.
#[must_use]
pub fn parent_directories(p: &str, root_dir: Option<&str>) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = normalize(p);
    loop {
        let reached_root = root_dir.is_some_and(|root| current == root);
        out.push(current.clone());
        if reached_root || current == "/" {
            break;
        }
        current = dirname(&current);
    }
    out
}
