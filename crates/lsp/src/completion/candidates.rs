// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion candidates
//!
//! Protocol-independent completion entries grouped by category. A request
//! merges the sets produced for each fragment, deduplicates within each
//! category and flattens them in a fixed category order.

use std::collections::HashSet;

/// Kind tag of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Variable,
    Function,
    Field,
    Struct,
    Keyword,
    Text,
}

/// How the insert text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertFormat {
    #[default]
    Plain,
    /// Insert text carries `${n:...}` placeholders
    Snippet,
}

/// One completion entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub kind: CandidateKind,
    pub detail: String,
    pub documentation: String,
    pub insert_text: String,
    pub insert_format: InsertFormat,
}

impl Candidate {
    /// Plain candidate whose insert text is its label
    pub fn plain(label: impl Into<String>, kind: CandidateKind, detail: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: detail.into(),
            documentation: String::new(),
            insert_format: InsertFormat::Plain,
        }
    }

    /// Snippet candidate with a distinct insert text
    pub fn snippet(
        label: impl Into<String>,
        kind: CandidateKind,
        detail: impl Into<String>,
        insert_text: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: detail.into(),
            documentation: String::new(),
            insert_text: insert_text.into(),
            insert_format: InsertFormat::Snippet,
        }
    }
}

/// Candidates grouped by category, each in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    pub types: Vec<Candidate>,
    pub functions: Vec<Candidate>,
    pub variables: Vec<Candidate>,
    pub keywords: Vec<Candidate>,
    /// Builtin symbols and extension names
    pub builtins: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.categories().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append every category of `other` to the same category of `self`
    pub fn merge(&mut self, other: CandidateSet) {
        self.types.extend(other.types);
        self.functions.extend(other.functions);
        self.variables.extend(other.variables);
        self.keywords.extend(other.keywords);
        self.builtins.extend(other.builtins);
    }

    /// Drop later candidates whose insert text already occurs in the same
    /// category
    pub fn dedup(&mut self) {
        for category in self.categories_mut() {
            let mut seen = HashSet::new();
            category.retain(|c| seen.insert(c.insert_text.clone()));
        }
    }

    /// Deduplicate, flatten as variables, functions, types, keywords,
    /// builtins, and keep the first `cap` entries
    pub fn into_ordered(mut self, cap: usize) -> Vec<Candidate> {
        self.dedup();
        self.variables
            .into_iter()
            .chain(self.functions)
            .chain(self.types)
            .chain(self.keywords)
            .chain(self.builtins)
            .take(cap)
            .collect()
    }

    fn categories(&self) -> impl Iterator<Item = &Vec<Candidate>> {
        [
            &self.variables,
            &self.functions,
            &self.types,
            &self.keywords,
            &self.builtins,
        ]
        .into_iter()
    }

    fn categories_mut(&mut self) -> impl Iterator<Item = &mut Vec<Candidate>> {
        [
            &mut self.variables,
            &mut self.functions,
            &mut self.types,
            &mut self.keywords,
            &mut self.builtins,
        ]
        .into_iter()
    }
}
