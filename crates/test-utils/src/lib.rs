// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for shader-lsp
//!
//! This crate provides common testing components including:
//! - A mock oracle with a fluent builder taking GLSL type spellings
//! - Completion-specific assertions over LSP completion items
//! - Test fixtures and cursor-marker helpers

pub mod assertions;
pub mod fixtures;
pub mod mock_oracle;

// Re-exports for convenience
pub use assertions::CompletionAssertions;
pub use fixtures::{ShaderFixtures, get_cursor_position, remove_cursor_marker};
pub use mock_oracle::{MockOracle, MockOracleBuilder};
