// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion rendering
//!
//! This module provides functionality to render LSP completion items
//! from completion candidates.

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation, InsertTextFormat};

use crate::completion::candidates::{Candidate, CandidateKind, InsertFormat};

/// Completion renderer
///
/// Converts candidates to LSP CompletionItem representations.
pub struct CompletionRenderer;

impl CompletionRenderer {
    /// Render candidates, preserving their order
    ///
    /// Clients re-sort by label unless told otherwise, so every item carries
    /// a `sort_text` derived from its position.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let items = CompletionRenderer::render(&candidates);
    /// assert_eq!(items[0].sort_text.as_deref(), Some("0000"));
    /// ```
    pub fn render(candidates: &[Candidate]) -> Vec<CompletionItem> {
        candidates
            .iter()
            .enumerate()
            .map(|(idx, candidate)| Self::item(candidate, idx))
            .collect()
    }

    /// Render a single completion item
    fn item(candidate: &Candidate, idx: usize) -> CompletionItem {
        CompletionItem {
            label: candidate.label.clone(),
            kind: Some(Self::kind(candidate.kind)),
            detail: non_empty(&candidate.detail),
            documentation: non_empty(&candidate.documentation).map(Documentation::String),
            sort_text: Some(format!("{:04}", idx)),
            filter_text: Some(candidate.label.clone()),
            insert_text: Some(candidate.insert_text.clone()),
            insert_text_format: Some(match candidate.insert_format {
                InsertFormat::Plain => InsertTextFormat::PLAIN_TEXT,
                InsertFormat::Snippet => InsertTextFormat::SNIPPET,
            }),
            ..Default::default()
        }
    }

    fn kind(kind: CandidateKind) -> CompletionItemKind {
        match kind {
            CandidateKind::Variable => CompletionItemKind::VARIABLE,
            CandidateKind::Function => CompletionItemKind::FUNCTION,
            CandidateKind::Field => CompletionItemKind::FIELD,
            CandidateKind::Struct => CompletionItemKind::STRUCT,
            CandidateKind::Keyword => CompletionItemKind::KEYWORD,
            CandidateKind::Text => CompletionItemKind::TEXT,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
