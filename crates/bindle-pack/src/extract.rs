// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Static require() extraction

use crate::error::{PackError, Result};
use bindle_syntax::ast::{Expression, Literal};
use bindle_syntax::visit::{self, Visitor};
use std::path::Path;

/// Collects the specifiers of every static require call in a program.
///
/// A call counts only when the callee is exactly the unqualified
/// identifier `require`, invoked with exactly one argument, and that
/// argument is a string literal. Anything else (`obj.require(..)`,
/// `require(variable)`, `require("a" + "b")`, extra arguments) is not a
/// static dependency and is skipped without error.
struct RequireCollector {
    specifiers: Vec<String>,
}

impl Visitor for RequireCollector {
    fn visit_expression(&mut self, expression: &Expression) {
        if let Expression::Call(call) = expression {
            if let Expression::Identifier(callee) = call.callee.as_ref() {
                if callee.name == "require" && call.arguments.len() == 1 {
                    if let Expression::Literal(Literal::String(specifier)) = &call.arguments[0] {
                        self.specifiers.push(specifier.clone());
                    }
                }
            }
        }
    }
}

/// Extracts require specifiers from module source, in source order.
///
/// Duplicate occurrences are kept; callers dedup while recording. A source
/// that fails to parse is fatal and surfaces as a parse error carrying
/// `path`.
pub fn extract_dependencies(source: &str, path: &Path) -> Result<Vec<String>> {
    let program = bindle_syntax::parse_program(source).map_err(|e| PackError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut collector = RequireCollector {
        specifiers: Vec::new(),
    };
    visit::walk_program(&mut collector, &program);

    Ok(collector.specifiers)
}
