//! End-to-end bundling tests
//!
//! Each test lays out a small module tree in a temporary directory, runs
//! the bundler over it, and inspects the emitted artifact.

use bindle_pack::{bundle, PackError};
use std::fs;
use std::path::Path;

/// Write a fixture file, creating parent directories as needed
fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_two_module_bundle() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.js",
        "var b = require(\"./b\");\nmodule.exports = b + 1;\n",
    );
    write(dir.path(), "b.js", "module.exports = 41;\n");

    let output = bundle(&dir.path().join("a.js")).unwrap();

    // Entry discovered first, dependency second
    assert!(output.contains("\"1\": [function (require, module, exports) {"));
    assert!(output.contains("\"2\": [function (require, module, exports) {"));
    assert!(output.contains("\"./b\":\"2\""));

    // The dependency is a leaf with an empty table
    assert!(output.contains("module.exports = 41;\n}, {}]"));

    // Entry list carries the bare numeric entry ID
    assert!(output.trim_end().ends_with("}, {}, [1]);"));

    // Both sources pass through byte for byte
    assert!(output.contains("\nvar b = require(\"./b\");\nmodule.exports = b + 1;\n"));
    assert!(output.contains("\nmodule.exports = 41;\n"));
}

#[test]
fn test_ids_follow_depth_first_discovery() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.js",
        "var b = require('./b');\nvar c = require('./c');\n",
    );
    write(dir.path(), "b.js", "var d = require('./d');\n");
    write(dir.path(), "c.js", "module.exports = 'c';\n");
    write(dir.path(), "d.js", "module.exports = 'd';\n");

    let output = bundle(&dir.path().join("a.js")).unwrap();

    // b is discovered before c, and b's own dependency d before c
    assert!(output.contains("\"./b\":\"2\""));
    assert!(output.contains("\"./d\":\"3\""));
    assert!(output.contains("\"./c\":\"4\""));
}

#[test]
fn test_shared_dependency_bundles_once() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "main.js",
        "var a = require('./app/a');\nvar u = require('./lib/util');\n",
    );
    write(dir.path(), "app/a.js", "module.exports = require('../lib/util');\n");
    write(dir.path(), "lib/util.js", "module.exports = 'util';\n");

    let output = bundle(&dir.path().join("main.js")).unwrap();

    // main=1, a=2, util=3 (via a's require); both routes map to ID 3
    assert!(output.contains("\"./lib/util\":\"3\""));
    assert!(output.contains("\"../lib/util\":\"3\""));

    // util's source appears exactly once
    assert_eq!(output.matches("module.exports = 'util';").count(), 1);
}

#[test]
fn test_repeated_specifier_collapses_in_table() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.js",
        "var one = require('./b');\nvar two = require('./b');\n",
    );
    write(dir.path(), "b.js", "module.exports = 0;\n");

    let output = bundle(&dir.path().join("a.js")).unwrap();
    assert_eq!(output.matches("\"./b\":").count(), 1);
}

#[test]
fn test_require_cycle_bundles_both_directions() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.js",
        "var b = require('./b');\nexports.name = 'a';\n",
    );
    write(
        dir.path(),
        "b.js",
        "var a = require('./a');\nexports.name = 'b';\n",
    );

    let output = bundle(&dir.path().join("a.js")).unwrap();

    assert!(output.contains("\"./b\":\"2\""));
    assert!(output.contains("\"./a\":\"1\""));
    // Exactly two modules in the table
    assert_eq!(
        output.matches(": [function (require, module, exports) {").count(),
        2
    );
}

#[test]
fn test_self_require_bundles_single_module() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.js",
        "var me = require('./a');\nmodule.exports = 1;\n",
    );

    let output = bundle(&dir.path().join("a.js")).unwrap();
    assert!(output.contains("\"./a\":\"1\""));
    assert_eq!(
        output.matches(": [function (require, module, exports) {").count(),
        1
    );
}

#[test]
fn test_dynamic_requires_are_invisible() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.js",
        "var name = './nope';\nrequire(name);\nrequire('./no' + 'pe');\nobj.require('./nope');\n",
    );

    let output = bundle(&dir.path().join("a.js")).unwrap();

    assert_eq!(
        output.matches(": [function (require, module, exports) {").count(),
        1
    );
    // Empty specifier table for the entry
    assert!(output.contains("}, {}]"));
}

#[test]
fn test_specifier_without_extension_finds_js_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.js", "module.exports = require('./b');\n");
    write(dir.path(), "b.js", "module.exports = 41;\n");

    let output = bundle(&dir.path().join("a.js")).unwrap();
    assert!(output.contains("\"./b\":\"2\""));
}

#[test]
fn test_directory_specifier_finds_index_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.js", "module.exports = require('./lib');\n");
    write(dir.path(), "lib/index.js", "module.exports = 'lib';\n");

    let output = bundle(&dir.path().join("a.js")).unwrap();
    assert!(output.contains("\"./lib\":\"2\""));
    assert!(output.contains("module.exports = 'lib';"));
}

#[test]
fn test_source_with_tricky_content_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let source = "// leading comment\n\
                  var re = /[}\"]+/g;\n\
                  var s = `tpl ${1 + 2} end`;\n\
                  module.exports = function () {\n\
                    return s.replace(re, '');\n\
                  };\n";
    write(dir.path(), "a.js", source);

    let output = bundle(&dir.path().join("a.js")).unwrap();
    assert!(output.contains(source));
}

#[test]
fn test_missing_dependency_fails_with_io_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.js", "require('./missing');\n");

    let err = bundle(&dir.path().join("a.js")).unwrap_err();
    match &err {
        PackError::Io { path, .. } => assert!(path.ends_with("missing")),
        other => panic!("expected io error, got {:?}", other),
    }
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_unparseable_module_fails_with_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.js", "require('./broken');\n");
    write(dir.path(), "broken.js", "function ( {\n");

    let err = bundle(&dir.path().join("a.js")).unwrap_err();
    assert!(matches!(err, PackError::Parse { .. }));
    assert!(err.to_string().contains("broken.js"));
}

#[test]
fn test_bundle_carries_runtime_escape_hatch() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.js", "module.exports = 1;\n");

    let output = bundle(&dir.path().join("a.js")).unwrap();
    // Unknown names fall through to an environment-provided require
    assert!(output.contains("typeof require === \"function\""));
}

#[test]
fn test_bundling_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.js",
        "var b = require('./b');\nvar c = require('./c');\n",
    );
    write(dir.path(), "b.js", "module.exports = 'b';\n");
    write(dir.path(), "c.js", "module.exports = 'c';\n");

    let first = bundle(&dir.path().join("a.js")).unwrap();
    let second = bundle(&dir.path().join("a.js")).unwrap();
    assert_eq!(first, second);
}
