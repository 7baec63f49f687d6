// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Management
//!
//! Open documents are kept as ropes keyed by URI and updated from
//! incremental `didChange` edits. Completion only ever reads the cursor line
//! and the full text handed to the front end.
//!
//! Positions arrive in UTF-16 code units, as LSP clients count them, and are
//! converted to char indices here.

use ropey::Rope;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{
    Position, TextDocumentContentChangeEvent, Url, VersionedTextDocumentIdentifier,
};

/// Char index of the UTF-16 `column` within `chars`
///
/// A column inside a surrogate pair maps past that char. Columns beyond the
/// end keep counting one char per unit, so they stay out of range.
pub fn char_column(chars: impl IntoIterator<Item = char>, column: u32) -> usize {
    let column = column as usize;
    let mut units = 0;
    let mut index = 0;
    for c in chars {
        if units >= column {
            return index;
        }
        units += c.len_utf16();
        index += 1;
    }
    index + column.saturating_sub(units)
}

/// An open shader source
#[derive(Debug, Clone)]
pub struct Document {
    uri: Url,
    version: i32,
    content: Rope,
}

impl Document {
    pub fn new(uri: Url, content: String, version: i32) -> Self {
        Self {
            uri,
            version,
            content: Rope::from_str(&content),
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    /// Get the full document content as a string
    pub fn get_content(&self) -> String {
        self.content.to_string()
    }

    /// Line `line` (0-indexed) without its line ending
    pub fn get_line(&self, line: usize) -> Option<String> {
        if line >= self.content.len_lines() {
            return None;
        }

        let line_with_ending = self.content.line(line).to_string();
        Some(line_with_ending.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Char offset of an LSP position, if it lies within its line
    fn char_offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        if line >= self.content.len_lines() {
            return None;
        }

        let text = self.content.line(line);
        let column = char_column(text.chars(), position.character);
        (column <= text.len_chars()).then(|| self.content.line_to_char(line) + column)
    }

    /// Apply content changes in order and move to `new_version`
    ///
    /// The version is left untouched when a range is invalid.
    pub fn apply_changes(
        &mut self,
        changes: &[TextDocumentContentChangeEvent],
        new_version: i32,
    ) -> Result<(), DocumentError> {
        for change in changes {
            match &change.range {
                Some(range) => {
                    let invalid = || DocumentError::InvalidRange {
                        start: (range.start.line, range.start.character),
                        end: (range.end.line, range.end.character),
                    };

                    let start = self.char_offset(range.start).ok_or_else(invalid)?;
                    let end = self.char_offset(range.end).ok_or_else(invalid)?;
                    if start > end {
                        return Err(invalid());
                    }

                    self.content.remove(start..end);
                    self.content.insert(start, &change.text);
                }
                None => {
                    self.content = Rope::from_str(&change.text);
                }
            }
        }

        self.version = new_version;
        Ok(())
    }
}

/// Document store for managing multiple documents
///
/// Thread-safe store for all open documents across all client connections.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Arc<RwLock<HashMap<Url, Document>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document, replacing any previous content under `uri`
    pub async fn open_document(&self, uri: Url, content: String, version: i32) {
        let document = Document::new(uri.clone(), content, version);
        self.documents.write().await.insert(uri, document);
    }

    /// Close a document
    ///
    /// Returns false if it was not open.
    pub async fn close_document(&self, uri: &Url) -> bool {
        self.documents.write().await.remove(uri).is_some()
    }

    pub async fn update_document(
        &self,
        identifier: &VersionedTextDocumentIdentifier,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<(), DocumentError> {
        let mut docs = self.documents.write().await;

        let document = docs
            .get_mut(&identifier.uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(identifier.uri.clone()))?;

        document.apply_changes(changes, identifier.version)
    }

    pub async fn get_document(&self, uri: &Url) -> Option<Document> {
        self.documents.read().await.get(uri).cloned()
    }
}

/// Document-related errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(Url),

    /// Range outside the document or reversed
    #[error("Invalid range: start={start:?}, end={end:?}")]
    InvalidRange { start: (u32, u32), end: (u32, u32) },
}
