// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # bindle-pack
//!
//! A static bundler for CommonJS-style JavaScript modules.
//!
//! Given an entry file, bindle-pack discovers the transitive set of files
//! it requires, assigns each a stable numeric identity, and renders one
//! self-contained artifact that reproduces lazy, cached, cycle-tolerant
//! module loading at runtime:
//!
//! - Static `require("specifier")` calls become graph edges; computed
//!   requires are invisible by design and fall through to the runtime
//!   environment
//! - Each file is loaded once, keyed by canonical absolute path
//! - Require cycles terminate and behave like the usual CommonJS
//!   partially-populated-exports dance
//! - Module source is passed through into the bundle unchanged
//!
//! ## Quick Start
//!
//! ```rust
//! use bindle_pack::bundle;
//!
//! let dir = tempfile::tempdir()?;
//! std::fs::write(dir.path().join("entry.js"), "module.exports = 41;\n")?;
//!
//! let output = bundle(&dir.path().join("entry.js"))?;
//! assert!(output.contains("\"1\": [function (require, module, exports) {"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod emit;
pub mod error;
pub mod extract;
pub mod loader;
pub mod module;
pub mod registry;
pub mod resolver;

// Re-exports
pub use emit::emit;
pub use error::{PackError, Result};
pub use extract::extract_dependencies;
pub use loader::ModuleLoader;
pub use module::{Module, ModuleId};
pub use registry::ModuleRegistry;
pub use resolver::PathResolver;

use std::path::Path;
use tracing::info;

/// Version of the bundler
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bundles the module graph rooted at `entry` into a string.
///
/// Convenience wrapper over [`ModuleLoader`] and [`emit()`]: resolves the
/// full graph, then renders it into memory so a failure anywhere leaves
/// the caller's output untouched.
pub fn bundle(entry: &Path) -> Result<String> {
    let mut loader = ModuleLoader::new();
    let entry_id = loader.load(entry)?;
    let registry = loader.into_registry();
    info!(modules = registry.len(), entry_id, "module graph resolved");

    let mut out = Vec::new();
    emit::emit(&registry, entry_id, &mut out)?;
    String::from_utf8(out).map_err(|e| PackError::Render(std::io::Error::other(e)))
}
