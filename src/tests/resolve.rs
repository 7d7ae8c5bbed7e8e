//! End-to-end scenarios, one per row of spec.md §8's scenario table.

use std::path::Path;

use crate::{InMemoryFileSystem, ResolveOptions, ResolverGeneric, EMPTY_SENTINEL};

fn resolver(fs: InMemoryFileSystem, options: ResolveOptions) -> ResolverGeneric<InMemoryFileSystem> {
    ResolverGeneric::new_with_file_system(fs, options)
}

#[test]
fn relative_parent_reference() {
    let fs = InMemoryFileSystem::new().with_file("/packages/source/dist.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/packages/source-alias/other.js", "../source/dist.js").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/packages/source/dist.js"));
}

#[test]
fn relative_extension_probing() {
    let fs = InMemoryFileSystem::new().with_file("/bar.js", "");
    let r = resolver(fs, ResolveOptions::default().with_extensions(vec![".js".into()]));
    let resolution = r.resolve("/foo.js", "./bar").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/bar.js"));
}

#[test]
fn absolute_directory_index_fallback() {
    let fs = InMemoryFileSystem::new().with_file("/nested/index.js", "");
    let options = ResolveOptions::default()
        .with_extensions(vec![".ts".into(), ".tsx".into(), ".js".into(), ".jsx".into()]);
    let r = resolver(fs, options);
    let resolution = r.resolve("/nested/test.js", "/nested").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/nested/index.js"));
}

#[test]
fn bare_specifier_without_manifest_falls_back_to_index() {
    let fs = InMemoryFileSystem::new().with_file("/node_modules/foo/index.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "foo").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/node_modules/foo/index.js"));
}

#[test]
fn main_field_selects_entry() {
    let fs = InMemoryFileSystem::new()
        .with_file("/node_modules/package-main/package.json", r#"{"main":"main.js"}"#)
        .with_file("/node_modules/package-main/main.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "package-main").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/node_modules/package-main/main.js"));
}

#[test]
fn browser_string_field_outranks_main() {
    let fs = InMemoryFileSystem::new()
        .with_file(
            "/node_modules/package-browser/package.json",
            r#"{"main":"main.js","browser":"browser.js"}"#,
        )
        .with_file("/node_modules/package-browser/browser.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "package-browser").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/node_modules/package-browser/browser.js"));
}

#[test]
fn browser_object_redirects_subpath() {
    let fs = InMemoryFileSystem::new()
        .with_file(
            "/node_modules/package-browser-alias/package.json",
            r#"{"browser":{"./foo":"./bar"}}"#,
        )
        .with_file("/node_modules/package-browser-alias/bar.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "package-browser-alias/foo").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/node_modules/package-browser-alias/bar.js"));
}

#[test]
fn alias_field_redirects_subpath() {
    let fs = InMemoryFileSystem::new()
        .with_file("/node_modules/package-alias/package.json", r#"{"alias":{"./foo":"./bar"}}"#)
        .with_file("/node_modules/package-alias/bar.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "package-alias/foo").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/node_modules/package-alias/bar.js"));
}

#[test]
fn alias_glob_substitutes_captured_segment_for_relative_specifier() {
    let fs = InMemoryFileSystem::new()
        .with_file(
            "/node_modules/package-alias-glob/package.json",
            r#"{"alias":{"./lib/*":"./src/*"}}"#,
        )
        .with_file("/node_modules/package-alias-glob/src/test.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution =
        r.resolve("/node_modules/package-alias-glob/index.js", "./lib/test").unwrap();
    assert_eq!(
        resolution.full_path(),
        Path::new("/node_modules/package-alias-glob/src/test.js")
    );
}

#[test]
fn root_package_alias_redirects_bare_specifier() {
    let fs = InMemoryFileSystem::new()
        .with_file("/package.json", r#"{"alias":{"aliased-file":"./bar"}}"#)
        .with_file("/bar.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "aliased-file").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/bar.js"));
}

#[test]
fn browser_false_excludes_main_entry_to_empty_sentinel() {
    let fs = InMemoryFileSystem::new()
        .with_file(
            "/node_modules/package-browser-exclude/package.json",
            r#"{"main":"index.js","browser":{"./index.js":false}}"#,
        )
        .with_file("/node_modules/package-browser-exclude/index.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "package-browser-exclude").unwrap();
    assert_eq!(resolution.full_path(), Path::new(EMPTY_SENTINEL));
}

#[test]
fn exports_string_is_the_package_entry() {
    let fs = InMemoryFileSystem::new()
        .with_file("/node_modules/package-exports/package.json", r#"{"exports":"./module.js"}"#)
        .with_file("/node_modules/package-exports/module.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "package-exports").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/node_modules/package-exports/module.js"));
}

#[test]
fn exports_object_glob_matches_subpath() {
    let fs = InMemoryFileSystem::new()
        .with_file(
            "/node_modules/package-exports/package.json",
            r#"{"exports":{"./components/*":"./src/components/*.js"}}"#,
        )
        .with_file("/node_modules/package-exports/src/components/a.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "package-exports/components/a").unwrap();
    assert_eq!(
        resolution.full_path(),
        Path::new("/node_modules/package-exports/src/components/a.js")
    );
}

#[test]
fn exports_condition_map_selects_browser_condition() {
    let fs = InMemoryFileSystem::new()
        .with_file(
            "/node_modules/package-exports/package.json",
            r#"{"exports":{"./utils/*":{"node":"./dist/node/*.js","browser":"./src/utils/*.js","default":"./fallback/*.js"}}}"#,
        )
        .with_file("/node_modules/package-exports/src/utils/path.js", "");
    let r = resolver(fs, ResolveOptions::default());
    // Trailing slash on the request is stripped by normalization before matching.
    let resolution = r.resolve("/foo.js", "package-exports/utils/path/").unwrap();
    assert_eq!(
        resolution.full_path(),
        Path::new("/node_modules/package-exports/src/utils/path.js")
    );
}

#[test]
fn exports_null_target_yields_empty_sentinel() {
    let fs = InMemoryFileSystem::new().with_file(
        "/node_modules/package-exports/package.json",
        r#"{"exports":{"./internal":null}}"#,
    );
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "package-exports/internal").unwrap();
    assert_eq!(resolution.full_path(), Path::new(EMPTY_SENTINEL));
}

#[test]
fn exports_no_match_does_not_fall_back_to_main() {
    let fs = InMemoryFileSystem::new()
        .with_file(
            "/node_modules/package-exports/package.json",
            r#"{"main":"index.js","exports":{"./other":"./other.js"}}"#,
        )
        .with_file("/node_modules/package-exports/index.js", "")
        .with_file("/node_modules/package-exports/other.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let err = r.resolve("/foo.js", "package-exports").unwrap_err();
    assert!(matches!(err, crate::ResolveError::NotFound { .. }));
}

#[test]
fn unknown_bare_module_is_not_found() {
    let fs = InMemoryFileSystem::new();
    let r = resolver(fs, ResolveOptions::default());
    let err = r.resolve("/nested/test.js", "unknown-module/test.js").unwrap_err();
    assert_eq!(
        err,
        crate::ResolveError::NotFound {
            specifier: "unknown-module/test.js".to_string(),
            importer: "/nested/test.js".into(),
        }
    );
}

#[test]
fn scoped_package_with_subpath() {
    let fs = InMemoryFileSystem::new().with_file("/node_modules/@scope/pkg/foo/bar.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let resolution = r.resolve("/foo.js", "@scope/pkg/foo/bar").unwrap();
    assert_eq!(resolution.full_path(), Path::new("/node_modules/@scope/pkg/foo/bar.js"));
}

#[test]
fn determinism_across_repeated_calls() {
    let fs = InMemoryFileSystem::new().with_file("/node_modules/foo/index.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let first = r.resolve("/foo.js", "foo").unwrap();
    let second = r.resolve("/foo.js", "foo").unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn resolve_async_matches_resolve_sync() {
    let fs = InMemoryFileSystem::new().with_file("/bar.js", "");
    let r = resolver(fs, ResolveOptions::default());
    let sync = r.resolve("/foo.js", "./bar").unwrap();
    let asynced = r.resolve_async("/foo.js", "./bar").await.unwrap();
    assert_eq!(sync, asynced);
}

#[test]
fn malformed_exports_mixing_subpaths_and_conditions_is_rejected() {
    let fs = InMemoryFileSystem::new().with_file(
        "/node_modules/bad-exports/package.json",
        r#"{"exports":{"./a":"./a.js","node":"./node.js"}}"#,
    );
    let r = resolver(fs, ResolveOptions::default());
    let err = r.resolve("/foo.js", "bad-exports").unwrap_err();
    assert!(matches!(err, crate::ResolveError::MalformedManifest { .. }));
}
