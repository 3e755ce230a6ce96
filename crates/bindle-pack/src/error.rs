// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for bundling

use std::path::PathBuf;
use thiserror::Error;

/// Result type for bundling operations
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while building or emitting a bundle.
///
/// Every variant is fatal to the run that produced it: resolution stops at
/// the first failure and no bundle output is written.
#[derive(Debug, Error)]
pub enum PackError {
    /// A path could not be normalized or joined
    #[error("cannot resolve path '{}': {reason}", .path.display())]
    Path {
        /// The path that failed to normalize
        path: PathBuf,
        /// Reason for failure
        reason: String,
    },

    /// A module file could not be read
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        /// The file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A module file is not syntactically valid JavaScript
    #[error("parse error in '{}': {source}", .path.display())]
    Parse {
        /// The file that failed to parse
        path: PathBuf,
        /// Underlying syntax error
        source: bindle_syntax::Error,
    },

    /// The bundle could not be written to the output sink
    #[error("cannot render bundle: {0}")]
    Render(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = PackError::Io {
            path: PathBuf::from("/srv/app/missing.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let message = err.to_string();
        assert!(message.contains("/srv/app/missing.js"));
        assert!(message.contains("no such file"));
    }

    #[test]
    fn test_parse_error_display_includes_path() {
        let err = PackError::Parse {
            path: PathBuf::from("/srv/app/broken.js"),
            source: bindle_syntax::Error::SyntaxError("Unexpected token: Eof".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("/srv/app/broken.js"));
        assert!(message.contains("SyntaxError"));
    }

    #[test]
    fn test_render_error_from_io() {
        fn render() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))?;
            Ok(())
        }
        assert!(matches!(render(), Err(PackError::Render(_))));
    }
}
