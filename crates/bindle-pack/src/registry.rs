// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The module registry

use crate::module::{Module, ModuleId};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Owns every module discovered during one bundling run.
///
/// The registry is the single source of truth for "has this file been
/// loaded": exactly one module exists per canonical path, and IDs are
/// handed out sequentially from 1 in first-discovery order. A registry is
/// scoped to one run and discarded afterwards; IDs are never reused or
/// compacted.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    /// Modules in discovery order; the module with ID n sits at index n-1
    modules: Vec<Module>,
    /// Canonical path → module ID
    by_path: FxHashMap<PathBuf, ModuleId>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ID the next inserted module will receive.
    pub fn next_id(&self) -> ModuleId {
        self.modules.len() as ModuleId + 1
    }

    /// Looks up the module registered for a canonical path.
    pub fn lookup(&self, path: &Path) -> Option<ModuleId> {
        self.by_path.get(path).copied()
    }

    /// Registers a module for `path`, assigning it the next ID.
    ///
    /// If the path is already registered the existing ID is returned and
    /// the source is discarded; one module per canonical path.
    pub fn insert(&mut self, path: PathBuf, source: String) -> ModuleId {
        if let Some(id) = self.lookup(&path) {
            return id;
        }
        let id = self.next_id();
        self.by_path.insert(path.clone(), id);
        self.modules.push(Module::new(id, path, source));
        id
    }

    /// Borrows a module by ID.
    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.modules.get(index)
    }

    /// Mutably borrows a module by ID.
    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.modules.get_mut(index)
    }

    /// Borrows a module by canonical path.
    pub fn get_by_path(&self, path: &Path) -> Option<&Module> {
        self.lookup(path).and_then(|id| self.get(id))
    }

    /// Mutably borrows a module by canonical path.
    pub fn get_mut_by_path(&mut self, path: &Path) -> Option<&mut Module> {
        let id = self.lookup(path)?;
        self.get_mut(id)
    }

    /// Every registered module in ascending ID order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry holds no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
