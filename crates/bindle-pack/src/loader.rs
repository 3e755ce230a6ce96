// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module loader - builds the dependency graph

use crate::error::{PackError, Result};
use crate::extract;
use crate::module::ModuleId;
use crate::registry::ModuleRegistry;
use crate::resolver::PathResolver;
use std::path::Path;
use tracing::{debug, trace};

/// Builds a module graph by walking require edges depth-first.
///
/// Loading is synchronous and single-threaded: each file is read, parsed
/// for static requires, registered, and then its dependencies are loaded
/// in source order. The registry entry is created *before* dependencies
/// are followed, which is what lets circular requires terminate: the
/// second encounter of an in-flight path is a plain registry hit.
pub struct ModuleLoader {
    /// Path resolver
    resolver: PathResolver,
    /// Registry owning every module discovered so far
    registry: ModuleRegistry,
}

impl ModuleLoader {
    /// Creates a loader with an empty registry.
    pub fn new() -> Self {
        Self {
            resolver: PathResolver::new(),
            registry: ModuleRegistry::new(),
        }
    }

    /// Loads the module graph rooted at `entry`.
    ///
    /// Returns the entry module's ID. Any failure anywhere in the graph -
    /// unreadable file, unparseable source - aborts the whole load.
    pub fn load(&mut self, entry: &Path) -> Result<ModuleId> {
        let path = self.resolver.resolve_entry(entry)?;
        self.load_path(&path)
    }

    fn load_path(&mut self, path: &Path) -> Result<ModuleId> {
        if let Some(id) = self.registry.lookup(path) {
            trace!(path = %path.display(), id, "already registered");
            return Ok(id);
        }

        let source = std::fs::read_to_string(path).map_err(|e| PackError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let specifiers = extract::extract_dependencies(&source, path)?;

        // Register before resolving dependencies so a require cycle back
        // into this path finds the module instead of recursing forever
        let bytes = source.len();
        let id = self.registry.insert(path.to_path_buf(), source);
        debug!(path = %path.display(), id, bytes, requires = specifiers.len(), "registered module");

        let mut targets = Vec::with_capacity(specifiers.len());
        for specifier in specifiers {
            let target = self.resolver.resolve_specifier(path, &specifier);
            trace!(specifier, target = %target.display(), "resolved specifier");
            targets.push((specifier, target));
        }

        if let Some(module) = self.registry.get_mut(id) {
            for (specifier, target) in &targets {
                module.record_dependency(specifier, target.clone());
            }
        }

        for (_, target) in &targets {
            self.load_path(target)?;
            if let Some(module) = self.registry.get_mut_by_path(target) {
                module.referenced_by.insert(path.to_path_buf());
            }
        }

        Ok(id)
    }

    /// The registry built so far.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Consumes the loader, returning the registry.
    pub fn into_registry(self) -> ModuleRegistry {
        self.registry
    }
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_loads_leaf_module() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "leaf.js", "module.exports = 41;\n");

        let mut loader = ModuleLoader::new();
        let id = loader.load(&dir.path().join("leaf.js")).unwrap();

        assert_eq!(id, 1);
        let module = loader.registry().get(id).unwrap();
        assert_eq!(module.source, "module.exports = 41;\n");
        assert!(module.dependency_specifiers.is_empty());
        assert!(module.uses.is_empty());
    }

    #[test]
    fn test_ids_follow_first_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.js",
            "var b = require('./b');\nvar c = require('./c');\n",
        );
        write(dir.path(), "b.js", "module.exports = 'b';\n");
        write(dir.path(), "c.js", "module.exports = 'c';\n");

        let mut loader = ModuleLoader::new();
        let entry = loader.load(&dir.path().join("a.js")).unwrap();

        assert_eq!(entry, 1);
        let registry = loader.registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup(&dir.path().join("b.js")), Some(2));
        assert_eq!(registry.lookup(&dir.path().join("c.js")), Some(3));
    }

    #[test]
    fn test_same_file_under_two_specifiers_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.js",
            "var x = require('./util');\nvar y = require('./util.js');\n",
        );
        write(dir.path(), "util.js", "module.exports = {};\n");

        let mut loader = ModuleLoader::new();
        loader.load(&dir.path().join("a.js")).unwrap();

        let registry = loader.registry();
        assert_eq!(registry.len(), 2);
        let entry = registry.get(1).unwrap();
        // Both specifiers recorded, both pointing at the one module
        assert_eq!(entry.dependency_specifiers, vec!["./util", "./util.js"]);
        assert_eq!(
            entry.specifier_paths["./util"],
            entry.specifier_paths["./util.js"]
        );
        assert_eq!(entry.uses.len(), 1);
    }

    #[test]
    fn test_require_cycle_terminates() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.js", "var b = require('./b');\nmodule.exports = 'a';\n");
        write(dir.path(), "b.js", "var a = require('./a');\nmodule.exports = 'b';\n");

        let mut loader = ModuleLoader::new();
        let entry = loader.load(&dir.path().join("a.js")).unwrap();

        let registry = loader.registry();
        assert_eq!(entry, 1);
        assert_eq!(registry.len(), 2);

        let a = registry.get(1).unwrap();
        let b = registry.get(2).unwrap();
        assert!(a.uses.contains(&b.path));
        assert!(b.uses.contains(&a.path));
        assert!(a.referenced_by.contains(&b.path));
        assert!(b.referenced_by.contains(&a.path));
    }

    #[test]
    fn test_self_require_is_a_plain_cycle() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.js", "var me = require('./a');\nmodule.exports = 1;\n");

        let mut loader = ModuleLoader::new();
        let entry = loader.load(&dir.path().join("a.js")).unwrap();

        let registry = loader.registry();
        assert_eq!(registry.len(), 1);
        let module = registry.get(entry).unwrap();
        assert!(module.uses.contains(&module.path));
        assert!(module.referenced_by.contains(&module.path));
    }

    #[test]
    fn test_missing_dependency_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.js", "require('./missing');\n");

        let mut loader = ModuleLoader::new();
        let err = loader.load(&dir.path().join("a.js")).unwrap_err();
        match err {
            PackError::Io { path, .. } => {
                assert_eq!(path, dir.path().join("missing"));
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_dependency_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.js", "require('./broken');\n");
        write(dir.path(), "broken.js", "var = ;\n");

        let mut loader = ModuleLoader::new();
        let err = loader.load(&dir.path().join("a.js")).unwrap_err();
        match err {
            PackError::Parse { path, .. } => {
                assert_eq!(path, dir.path().join("broken.js"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_dynamic_requires_create_no_edges() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.js",
            "var name = './missing';\nrequire(name);\nrequire('./b' + '');\n",
        );

        let mut loader = ModuleLoader::new();
        let entry = loader.load(&dir.path().join("a.js")).unwrap();

        let registry = loader.registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(entry).unwrap().dependency_specifiers.is_empty());
    }
}
