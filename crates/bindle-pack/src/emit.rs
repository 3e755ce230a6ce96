// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Bundle rendering

use crate::error::{PackError, Result};
use crate::module::{Module, ModuleId};
use crate::registry::ModuleRegistry;
use std::io::Write;
use tracing::debug;

/// JavaScript loader that heads every bundle.
///
/// Takes the module table, an initially-empty cache, and the entry ID
/// list. `load` constructs each module's exports at most once; the cache
/// entry is created *before* the factory runs, so circular requires see
/// the partially built exports object instead of recursing forever. A
/// name missing from a module's specifier table falls through to the
/// surrounding environment's `require` when one exists - that is the
/// escape hatch for requires the bundler could not see statically.
const PRELUDE: &str = r#"(function (modules, cache, entries) {
  function load(id) {
    if (cache[id]) {
      return cache[id].exports;
    }
    if (!modules[id]) {
      var external = typeof require === "function" && require;
      if (external) {
        return external(id);
      }
      throw new Error("Cannot find module '" + id + "'");
    }
    var module = (cache[id] = { exports: {} });
    modules[id][0].call(module.exports, function (name) {
      var table = modules[id][1];
      return load(table[name] !== undefined ? table[name] : name);
    }, module, module.exports);
    return module.exports;
  }
  for (var i = 0; i < entries.length; i++) {
    load(entries[i]);
  }
  return load;
})("#;

/// Renders the bundle for every module in the registry.
///
/// Modules are emitted in ascending ID order, each as
/// `"<id>": [factory, specifierTable]` with the module source passed
/// through unchanged as the factory body. The registry is rendered in
/// full, not just the subgraph reachable from `entry`. Sink failures
/// surface as render errors; the sink may then hold partial output, so
/// callers wanting all-or-nothing behavior should render into a buffer.
pub fn emit<W: Write>(registry: &ModuleRegistry, entry: ModuleId, sink: &mut W) -> Result<()> {
    if registry.get(entry).is_none() {
        return Err(PackError::Render(std::io::Error::other(format!(
            "entry module id {} is not registered",
            entry
        ))));
    }

    debug!(modules = registry.len(), entry, "rendering bundle");

    sink.write_all(PRELUDE.as_bytes())?;
    sink.write_all(b"{\n")?;

    let mut first = true;
    for module in registry.modules() {
        if !first {
            sink.write_all(b",\n")?;
        }
        first = false;
        write_module(registry, module, sink)?;
    }

    write!(sink, "\n}}, {{}}, [{}]);\n", entry)?;
    Ok(())
}

fn write_module<W: Write>(
    registry: &ModuleRegistry,
    module: &Module,
    sink: &mut W,
) -> Result<()> {
    write!(
        sink,
        "{}: [function (require, module, exports) {{\n",
        json_string(&module.id.to_string())?
    )?;

    sink.write_all(module.emitted_source().as_bytes())?;
    if !module.emitted_source().ends_with('\n') {
        // Keep the closing brace off the module's last line in case it
        // ends mid-comment
        sink.write_all(b"\n")?;
    }

    sink.write_all(b"}, ")?;
    write_specifier_table(registry, module, sink)?;
    sink.write_all(b"]")?;
    Ok(())
}

fn write_specifier_table<W: Write>(
    registry: &ModuleRegistry,
    module: &Module,
    sink: &mut W,
) -> Result<()> {
    sink.write_all(b"{")?;

    let mut first = true;
    for specifier in &module.dependency_specifiers {
        // Resolution recorded both sides of this mapping
        let id = match module
            .specifier_paths
            .get(specifier)
            .and_then(|target| registry.lookup(target))
        {
            Some(id) => id,
            None => continue,
        };

        if !first {
            sink.write_all(b",")?;
        }
        first = false;
        write!(
            sink,
            "{}:{}",
            json_string(specifier)?,
            json_string(&id.to_string())?
        )?;
    }

    sink.write_all(b"}")?;
    Ok(())
}

fn json_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| PackError::Render(std::io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn registry_with_pair() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        let a = registry.insert(
            PathBuf::from("/srv/a.js"),
            "var b = require(\"./b\");\nmodule.exports = b + 1;\n".to_string(),
        );
        registry.insert(PathBuf::from("/srv/b.js"), "module.exports = 41;\n".to_string());
        registry
            .get_mut(a)
            .unwrap()
            .record_dependency("./b", PathBuf::from("/srv/b.js"));
        registry
    }

    fn render(registry: &ModuleRegistry, entry: ModuleId) -> String {
        let mut out = Vec::new();
        emit(registry, entry, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_renders_modules_keyed_by_decimal_string_id() {
        let bundle = render(&registry_with_pair(), 1);
        assert!(bundle.contains("\"1\": [function (require, module, exports) {"));
        assert!(bundle.contains("\"2\": [function (require, module, exports) {"));
    }

    #[test]
    fn test_specifier_table_maps_to_decimal_string_ids() {
        let bundle = render(&registry_with_pair(), 1);
        assert!(bundle.contains("{\"./b\":\"2\"}"));
    }

    #[test]
    fn test_entry_list_holds_bare_numeric_id() {
        let bundle = render(&registry_with_pair(), 1);
        assert!(bundle.trim_end().ends_with("}, {}, [1]);"));
    }

    #[test]
    fn test_leaf_module_gets_empty_table() {
        let bundle = render(&registry_with_pair(), 1);
        assert!(bundle.contains("module.exports = 41;\n}, {}]"));
    }

    #[test]
    fn test_factory_body_is_verbatim_source() {
        let bundle = render(&registry_with_pair(), 1);
        assert!(bundle.contains("\nvar b = require(\"./b\");\nmodule.exports = b + 1;\n"));
    }

    #[test]
    fn test_missing_trailing_newline_still_closes_factory() {
        let mut registry = ModuleRegistry::new();
        registry.insert(
            PathBuf::from("/srv/a.js"),
            "module.exports = 1; // done".to_string(),
        );
        let bundle = render(&registry, 1);
        assert!(bundle.contains("// done\n}, {}]"));
    }

    #[test]
    fn test_specifier_strings_are_escaped() {
        let mut registry = ModuleRegistry::new();
        let a = registry.insert(PathBuf::from("/srv/a.js"), String::new());
        registry.insert(PathBuf::from("/srv/b.js"), String::new());
        registry
            .get_mut(a)
            .unwrap()
            .record_dependency("./we\"ird\\name", PathBuf::from("/srv/b.js"));

        let bundle = render(&registry, 1);
        assert!(bundle.contains("\"./we\\\"ird\\\\name\":\"2\""));
    }

    #[test]
    fn test_unknown_entry_is_a_render_error() {
        let registry = registry_with_pair();
        let mut out = Vec::new();
        let err = emit(&registry, 7, &mut out).unwrap_err();
        assert!(matches!(err, PackError::Render(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let registry = registry_with_pair();
        assert_eq!(render(&registry, 1), render(&registry, 1));
    }
}
