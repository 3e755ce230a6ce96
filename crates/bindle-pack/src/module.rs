// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! A resolved module and its dependency edges

use rustc_hash::{FxHashMap, FxHashSet};
use sha1::{Digest, Sha1};
use std::path::PathBuf;

/// Identity of a module within one registry, assigned at first discovery.
///
/// IDs start at 1 and increase by one per newly discovered module; they are
/// never reassigned.
pub type ModuleId = u64;

/// One resolved source file plus its discovered dependency edges.
///
/// A module is created when its file is first read and registered; the
/// resolver then fills in the dependency edges. After resolution finishes
/// the module is read-only.
#[derive(Debug, Clone)]
pub struct Module {
    /// Identity within the registry
    pub id: ModuleId,
    /// Canonical absolute path, the dedup key
    pub path: PathBuf,
    /// SHA-1 digest of the source bytes
    pub content_hash: [u8; 20],
    /// Source text exactly as read from disk
    pub source: String,
    /// Specifier strings in source order, first occurrence only
    pub dependency_specifiers: Vec<String>,
    /// Canonical path each specifier resolved to
    pub specifier_paths: FxHashMap<String, PathBuf>,
    /// Canonical paths of every module this module requires
    pub uses: FxHashSet<PathBuf>,
    /// Canonical paths of every module that requires this module
    pub referenced_by: FxHashSet<PathBuf>,
}

impl Module {
    /// Creates a module for the given source, computing its content hash.
    pub fn new(id: ModuleId, path: PathBuf, source: String) -> Self {
        let content_hash = Sha1::digest(source.as_bytes()).into();
        Self {
            id,
            path,
            content_hash,
            source,
            dependency_specifiers: Vec::new(),
            specifier_paths: FxHashMap::default(),
            uses: FxHashSet::default(),
            referenced_by: FxHashSet::default(),
        }
    }

    /// The source text as it will appear in the bundle.
    ///
    /// Currently identical to [`source`](Self::source): module content is
    /// passed through unchanged. Kept separate so a transform stage can
    /// rewrite the emitted form without losing the original.
    pub fn emitted_source(&self) -> &str {
        &self.source
    }

    /// Hex form of the content hash.
    pub fn content_hash_hex(&self) -> String {
        hex::encode(self.content_hash)
    }

    /// Records that this module requires `path` via `specifier`.
    ///
    /// Returns `false` when the specifier was already recorded; the first
    /// occurrence wins and source order is preserved.
    pub fn record_dependency(&mut self, specifier: &str, path: PathBuf) -> bool {
        if self.specifier_paths.contains_key(specifier) {
            return false;
        }
        self.dependency_specifiers.push(specifier.to_string());
        self.uses.insert(path.clone());
        self.specifier_paths.insert(specifier.to_string(), path);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_stable() {
        let a = Module::new(1, PathBuf::from("/srv/a.js"), "var x = 1;".to_string());
        let b = Module::new(2, PathBuf::from("/srv/b.js"), "var x = 1;".to_string());
        assert_eq!(a.content_hash, b.content_hash);
        assert_eq!(a.content_hash_hex().len(), 40);
    }

    #[test]
    fn test_content_hash_differs_for_different_source() {
        let a = Module::new(1, PathBuf::from("/srv/a.js"), "var x = 1;".to_string());
        let b = Module::new(2, PathBuf::from("/srv/b.js"), "var x = 2;".to_string());
        assert_ne!(a.content_hash, b.content_hash);
    }

    #[test]
    fn test_emitted_source_passes_through() {
        let source = "module.exports = 41;\n";
        let module = Module::new(1, PathBuf::from("/srv/b.js"), source.to_string());
        assert_eq!(module.emitted_source(), source);
    }

    #[test]
    fn test_record_dependency_keeps_first_occurrence_order() {
        let mut module = Module::new(1, PathBuf::from("/srv/a.js"), String::new());
        assert!(module.record_dependency("./b", PathBuf::from("/srv/b.js")));
        assert!(module.record_dependency("./c", PathBuf::from("/srv/c.js")));
        assert!(!module.record_dependency("./b", PathBuf::from("/srv/b.js")));
        assert_eq!(module.dependency_specifiers, vec!["./b", "./c"]);
        assert_eq!(module.uses.len(), 2);
    }
}
