// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion module
//!
//! This module provides member-chain completion for GLSL.
//!
//! ## Architecture
//!
//! The completion system is organized into several modules:
//! - `token`: Lazy tokenizer over a line fragment
//! - `resolver`: Shift-reduce resolution of `a.b[i].c` chains against the oracle
//! - `generator`: Candidate emission for prefixes, members and components
//! - `fragment`: Fragment extraction around the cursor and result merging
//! - `candidates`: Protocol-independent candidates and their ordering
//! - `render`: Converts candidates to LSP completion items
//! - `error`: Error types for completion operations
//!
//! ## Flow
//!
//! ```text
//! 1. LSP Backend receives completion request
//!    ↓
//! 2. FrontEnd.analyze() yields the document's TypeOracle
//!    ↓
//! 3. CompletionEngine.complete() cuts fragments out of the cursor line
//!    ↓
//! 4. ChainResolver.resolve() per fragment (and per anonymous block)
//!    ↓
//! 5. CandidateSet merge, dedup, category order, cap
//!    ↓
//! 6. CompletionRenderer.render() -> CompletionResponse to client
//! ```
//!
//! Steps 3 to 6 are synchronous and only read the oracle.

pub mod candidates;
pub mod error;
pub mod fragment;
pub mod generator;
pub mod render;
pub mod resolver;
pub mod token;

use shader_lsp_oracle::TypeOracle;
use shader_lsp_types::SourceLoc;
use tower_lsp::lsp_types::{CompletionItem, Position};
use tracing::debug;

use crate::completion::error::CompletionError;
use crate::completion::fragment::complete_line;
use crate::completion::render::CompletionRenderer;
use crate::config::CompletionConfig;
use crate::document::{Document, char_column};

pub use crate::completion::candidates::{Candidate, CandidateKind, CandidateSet, InsertFormat};
pub use crate::completion::fragment::{complete_fragment, extract_fragments};

/// Completion engine
///
/// Orchestrates the completion flow from fragment extraction to rendering.
#[derive(Debug, Clone, Default)]
pub struct CompletionEngine {
    config: CompletionConfig,
}

impl CompletionEngine {
    /// Create a new completion engine
    pub fn new(config: CompletionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Perform completion at the given position
    ///
    /// `position.character` counts UTF-16 code units, as LSP clients send it.
    ///
    /// # Returns
    ///
    /// - `Ok(items)` - Completion items, possibly empty
    /// - `Err(CompletionError::InvalidPosition)` - The line does not exist
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let engine = CompletionEngine::new(CompletionConfig::default());
    /// let items = engine.complete(oracle.as_ref(), &document, Position::new(25, 14))?;
    /// ```
    pub fn complete(
        &self,
        oracle: &dyn TypeOracle,
        document: &Document,
        position: Position,
    ) -> Result<Vec<CompletionItem>, CompletionError> {
        let line = document
            .get_line(position.line as usize)
            .ok_or(CompletionError::InvalidPosition(position))?;

        // Fragments index chars; the client counts UTF-16 units
        let column = char_column(line.chars(), position.character) as u32;
        let cursor = SourceLoc::new(position.line, column);
        let candidates = complete_line(oracle, &line, cursor, &self.config);
        debug!(
            uri = %document.uri(),
            line = position.line,
            column,
            count = candidates.len(),
            "Resolved completion candidates"
        );

        Ok(CompletionRenderer::render(&candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shader_lsp_test_utils::{CompletionAssertions, MockOracleBuilder};
    use tower_lsp::lsp_types::{CompletionItemKind, Url};

    fn document(lines: &[&str]) -> Document {
        let uri = Url::parse("file:///test/shade.frag").unwrap();
        Document::new(uri, lines.join("\n"), 1)
    }

    /// A document whose line 25 is `text`, inside `main`
    fn main_body(text: &str) -> Document {
        let mut lines = vec![""; 25];
        lines.push(text);
        lines.push("}");
        document(&lines)
    }

    #[test]
    fn test_struct_member_completion() {
        let oracle = MockOracleBuilder::new().with_standard_shader().build();
        let engine = CompletionEngine::default();
        let doc = main_body("    vec3 c = s.");

        let items = engine.complete(&oracle, &doc, Position::new(25, 15)).unwrap();
        CompletionAssertions::assert_labels(
            &items,
            &["position", "color", "intensity", "material", "attenuation"],
        );
        CompletionAssertions::assert_contains(&items, "material", CompletionItemKind::FIELD);
    }

    #[test]
    fn test_line_out_of_range_is_invalid_position() {
        let oracle = MockOracleBuilder::new().build();
        let engine = CompletionEngine::default();
        let doc = document(&["void main() {}"]);

        let err = engine
            .complete(&oracle, &doc, Position::new(4, 0))
            .unwrap_err();
        assert!(matches!(err, CompletionError::InvalidPosition(_)));
        assert!(err.should_return_empty());
    }

    #[test]
    fn test_utf16_column() {
        let oracle = MockOracleBuilder::new().with_standard_shader().build();
        let engine = CompletionEngine::default();
        // The emoji is two UTF-16 units but one char
        let doc = main_body("    /*😀*/ s.po");

        let items = engine.complete(&oracle, &doc, Position::new(25, 15)).unwrap();
        CompletionAssertions::assert_labels(&items, &["position"]);
    }

    #[test]
    fn test_cap_from_config() {
        let oracle = MockOracleBuilder::new().with_standard_shader().build();
        let engine = CompletionEngine::new(CompletionConfig::default().with_max_items(3));
        let doc = main_body("    ");

        // Cursor after the indentation: every fragment is whitespace only
        let items = engine.complete(&oracle, &doc, Position::new(25, 4)).unwrap();
        assert!(items.is_empty());

        let doc = main_body("    i");
        let items = engine.complete(&oracle, &doc, Position::new(25, 5)).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].label, "index");
    }
}
