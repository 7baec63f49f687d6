// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion error types
//!
//! This module defines error types for the completion system.

use shader_lsp_oracle::OracleError;
use shader_lsp_types::TypeError;
use tower_lsp::lsp_types::{Position, Url};

/// Reasons a single fragment fails to resolve
///
/// A failed fragment contributes no candidates; other fragments of the same
/// request are unaffected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The token sequence matches no transition, e.g. `foo..` or `[0]`
    #[error("Malformed fragment: unexpected '{found}' while expecting {expected}")]
    MalformedFragment {
        expected: &'static str,
        found: String,
    },

    /// An identifier has no entry in any scope
    #[error("Unresolved symbol: {0}")]
    UnresolvedSymbol(String),

    /// A reduction needs a struct, vector or array but got something else
    #[error("Type mismatch: '{subject}' is {found}, expected {expected}")]
    TypeMismatch {
        subject: String,
        expected: &'static str,
        found: String,
    },

    /// More subscripts than the array declares
    #[error("Dimension overflow: {ty} has {dims} dimension(s)")]
    DimensionOverflow { ty: String, dims: usize },

    /// A type handle does not resolve in the oracle's arena
    #[error("Invalid type: {0}")]
    InvalidType(#[from] TypeError),
}

/// Errors that can occur during completion
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Document is not open
    #[error("Document not found: {0}")]
    DocumentNotFound(Url),

    /// Invalid position for completion
    #[error("Invalid position: {0:?}")]
    InvalidPosition(Position),

    /// Symbol snapshot could not be loaded
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
}

impl CompletionError {
    /// Check if this error should result in an empty completion list
    /// (vs. propagating the error to the client)
    pub fn should_return_empty(&self) -> bool {
        matches!(
            self,
            CompletionError::DocumentNotFound(_) | CompletionError::InvalidPosition(_)
        )
    }
}
