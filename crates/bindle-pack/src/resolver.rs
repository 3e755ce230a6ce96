// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Specifier and entry path resolution

use crate::error::{PackError, Result};
use std::env;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Resolves entry paths and require specifiers to canonical file paths.
///
/// Resolution is purely lexical plus file-existence probing: a specifier is
/// joined onto the requiring module's directory, `.` and `..` segments are
/// collapsed without touching the file system, and the result is probed
/// first as written, then with each known extension appended, then as a
/// directory containing an index file. When nothing probes to a file the
/// joined path is returned unchanged so the subsequent read reports the
/// miss as an I/O failure.
pub struct PathResolver {
    /// File extensions to try, in order
    extensions: Vec<String>,
}

impl PathResolver {
    /// Creates a resolver probing for `.js` files.
    pub fn new() -> Self {
        Self {
            extensions: vec![".js".to_string()],
        }
    }

    /// Resolves the entry path of a bundling run.
    ///
    /// Relative paths are taken relative to the current working directory.
    pub fn resolve_entry(&self, path: &Path) -> Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            let cwd = env::current_dir().map_err(|e| PackError::Path {
                path: path.to_path_buf(),
                reason: format!("current directory unavailable: {}", e),
            })?;
            cwd.join(path)
        };
        Ok(self.probe(normalize(&absolute)))
    }

    /// Resolves a require specifier relative to the module that wrote it.
    pub fn resolve_specifier(&self, containing: &Path, specifier: &str) -> PathBuf {
        let dir = containing.parent().unwrap_or_else(|| Path::new("."));
        self.probe(normalize(&dir.join(specifier)))
    }

    /// Probes a normalized path against the file system.
    fn probe(&self, path: PathBuf) -> PathBuf {
        if path.is_file() {
            return path;
        }

        for ext in &self.extensions {
            let mut with_ext = path.clone().into_os_string();
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            if with_ext.is_file() {
                trace!(path = %with_ext.display(), "resolved with extension");
                return with_ext;
            }

            let index = path.join(format!("index{}", ext));
            if index.is_file() {
                trace!(path = %index.display(), "resolved to directory index");
                return index;
            }
        }

        // Nothing probed to a file; the read step will report the miss
        path
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapses `.` and `..` segments lexically.
///
/// `..` at the root stays at the root, matching how the runtime module
/// systems this bundler feeds treat over-long parent chains.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_segments() {
        assert_eq!(
            normalize(Path::new("/srv/app/./lib/../util.js")),
            PathBuf::from("/srv/app/util.js")
        );
    }

    #[test]
    fn test_normalize_clamps_at_root() {
        assert_eq!(
            normalize(Path::new("/srv/../../../x.js")),
            PathBuf::from("/x.js")
        );
    }

    #[test]
    fn test_resolve_specifier_joins_relative_to_containing_dir() {
        let resolver = PathResolver::new();
        let resolved = resolver.resolve_specifier(
            Path::new("/srv/app/a.js"),
            "../lib/./util.js",
        );
        // No such file exists, so the joined path comes back unchanged
        assert_eq!(resolved, PathBuf::from("/srv/lib/util.js"));
    }

    #[test]
    fn test_probe_prefers_exact_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b"), "module.exports = 1;\n").unwrap();
        std::fs::write(dir.path().join("b.js"), "module.exports = 2;\n").unwrap();

        let resolver = PathResolver::new();
        let containing = dir.path().join("a.js");
        assert_eq!(
            resolver.resolve_specifier(&containing, "./b"),
            dir.path().join("b")
        );
    }

    #[test]
    fn test_probe_appends_js_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.js"), "module.exports = 41;\n").unwrap();

        let resolver = PathResolver::new();
        let containing = dir.path().join("a.js");
        assert_eq!(
            resolver.resolve_specifier(&containing, "./b"),
            dir.path().join("b.js")
        );
    }

    #[test]
    fn test_probe_appends_extension_after_existing_suffix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.min.js"), "module.exports = 1;\n").unwrap();

        let resolver = PathResolver::new();
        let containing = dir.path().join("a.js");
        assert_eq!(
            resolver.resolve_specifier(&containing, "./b.min"),
            dir.path().join("b.min.js")
        );
    }

    #[test]
    fn test_probe_falls_back_to_directory_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("lib")).unwrap();
        std::fs::write(dir.path().join("lib/index.js"), "module.exports = {};\n").unwrap();

        let resolver = PathResolver::new();
        let containing = dir.path().join("a.js");
        assert_eq!(
            resolver.resolve_specifier(&containing, "./lib"),
            dir.path().join("lib/index.js")
        );
    }

    #[test]
    fn test_resolve_entry_accepts_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let entry = dir.path().join("main.js");
        std::fs::write(&entry, "module.exports = 1;\n").unwrap();

        let resolver = PathResolver::new();
        assert_eq!(resolver.resolve_entry(&entry).unwrap(), entry);
    }

    #[test]
    fn test_resolve_entry_probes_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.js"), "module.exports = 1;\n").unwrap();

        let resolver = PathResolver::new();
        let resolved = resolver.resolve_entry(&dir.path().join("main")).unwrap();
        assert_eq!(resolved, dir.path().join("main.js"));
    }
}
