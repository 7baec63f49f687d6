// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Completion-specific test helpers and custom assertions

use lsp_types::{CompletionItem, CompletionItemKind, InsertTextFormat};

/// Custom assertion helpers for completion testing
pub struct CompletionAssertions;

impl CompletionAssertions {
    /// Labels in response order
    pub fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    /// Assert that the labels are exactly `expected`, in order
    pub fn assert_labels(items: &[CompletionItem], expected: &[&str]) {
        assert_eq!(
            Self::labels(items),
            expected,
            "Completion labels mismatch"
        );
    }

    /// Assert that an item with `label` and `kind` is present
    pub fn assert_contains(items: &[CompletionItem], label: &str, kind: CompletionItemKind) {
        assert!(
            items
                .iter()
                .any(|i| i.label == label && i.kind == Some(kind)),
            "Expected '{}' [{:?}] in {:?}",
            label,
            kind,
            Self::labels(items)
        );
    }

    /// Assert that no item carries `label`
    pub fn assert_absent(items: &[CompletionItem], label: &str) {
        assert!(
            !items.iter().any(|i| i.label == label),
            "Unexpected '{}' in {:?}",
            label,
            Self::labels(items)
        );
    }

    /// Assert that `label` is offered as a snippet with the given insert text
    pub fn assert_snippet(items: &[CompletionItem], label: &str, insert_text: &str) {
        let item = items
            .iter()
            .find(|i| i.label == label)
            .unwrap_or_else(|| panic!("Missing '{}' in {:?}", label, Self::labels(items)));
        assert_eq!(item.insert_text.as_deref(), Some(insert_text));
        assert_eq!(item.insert_text_format, Some(InsertTextFormat::SNIPPET));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_completion_item(label: &str, kind: CompletionItemKind) -> CompletionItem {
        CompletionItem {
            label: label.to_string(),
            kind: Some(kind),
            ..Default::default()
        }
    }

    #[test]
    fn test_label_assertions() {
        let items = vec![
            make_completion_item("x", CompletionItemKind::FIELD),
            make_completion_item("y", CompletionItemKind::FIELD),
        ];

        CompletionAssertions::assert_labels(&items, &["x", "y"]);
        CompletionAssertions::assert_contains(&items, "y", CompletionItemKind::FIELD);
        CompletionAssertions::assert_absent(&items, "z");
    }

    #[test]
    #[should_panic(expected = "Unexpected 'x'")]
    fn test_absent_panics_when_present() {
        let items = vec![make_completion_item("x", CompletionItemKind::FIELD)];
        CompletionAssertions::assert_absent(&items, "x");
    }
}
