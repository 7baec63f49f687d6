// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for oracle operations
//!
//! Lookups never fail; only loading a symbol snapshot does.

use shader_lsp_types::TypeError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur while building an oracle
#[derive(Debug, Error)]
pub enum OracleError {
    /// The snapshot file could not be read
    #[error("Failed to read symbol snapshot '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON or does not match the snapshot schema
    #[error("Failed to parse symbol snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// A symbol or type refers to a type that is not in the arena
    #[error("Invalid symbol snapshot: {0}")]
    InvalidSnapshot(#[from] TypeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use shader_lsp_types::TypeId;

    #[test]
    fn test_error_display() {
        let err = OracleError::from(TypeError::UnknownType(TypeId(7)));
        assert_eq!(
            err.to_string(),
            "Invalid symbol snapshot: Unknown type id TypeId(7)"
        );

        let err = OracleError::Io {
            path: PathBuf::from("/tmp/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/tmp/missing.json"));
    }
}
