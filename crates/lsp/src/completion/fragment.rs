// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Fragment extraction and merging
//!
//! The cursor line is not parsed. Instead the text left of the cursor is cut
//! at the nearest occurrence of each delimiter, and every distinct cut is
//! resolved on its own:
//!
//! ```text
//! line:       "    x = lights[index].ma|"
//! ' '   ->    "lights[index].ma"
//! '['   ->    "index].ma"               (aborts, contributes nothing)
//! ';'   ->    "    x = lights[index].ma" (aborts at '=')
//! ```
//!
//! Fragments that start like an identifier are resolved once more per
//! anonymous interface block, as if written `<block>.<fragment>`.

use std::collections::BTreeSet;

use shader_lsp_oracle::TypeOracle;
use shader_lsp_types::SourceLoc;
use tracing::debug;

use crate::completion::candidates::{Candidate, CandidateSet};
use crate::completion::error::ResolveError;
use crate::completion::resolver::ChainResolver;
use crate::completion::token::{Token, Tokenizer};
use crate::config::CompletionConfig;

/// Distinct fragments ending at `column` (a char index), in sorted order
///
/// A delimiter that does not occur yields the whole prefix of the line. A
/// column past the end of the line yields a single empty fragment.
pub fn extract_fragments(line: &str, column: usize, delimiters: &[char]) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if column > chars.len() {
        return vec![String::new()];
    }

    let before = &chars[..column];
    let fragments: BTreeSet<String> = delimiters
        .iter()
        .map(|delim| {
            let start = before
                .iter()
                .rposition(|c| c == delim)
                .map_or(0, |idx| idx + 1);
            before[start..].iter().collect()
        })
        .collect();

    fragments.into_iter().collect()
}

/// Resolve one fragment ending at `cursor`
///
/// With `anonymous_block`, the fragment is resolved as a member access on
/// that block.
pub fn complete_fragment(
    oracle: &dyn TypeOracle,
    cursor: SourceLoc,
    fragment: &str,
    anonymous_block: Option<&str>,
) -> Result<CandidateSet, ResolveError> {
    let width = fragment.chars().count() as u32;
    let tokens =
        Tokenizer::new(fragment, cursor.line).starting_at(cursor.column.saturating_sub(width));

    let prefix = anonymous_block
        .into_iter()
        .flat_map(|name| [Token::synthetic_identifier(name), Token::synthetic_dot()]);

    ChainResolver::new(oracle, cursor.line).resolve(prefix.chain(tokens))
}

/// Complete the cursor position on `line`
///
/// Every fragment failure is logged and contributes no candidates.
pub fn complete_line(
    oracle: &dyn TypeOracle,
    line: &str,
    cursor: SourceLoc,
    config: &CompletionConfig,
) -> Vec<Candidate> {
    let fragments = extract_fragments(line, cursor.column as usize, &config.fragment_delimiters);
    let blocks: Vec<&str> = oracle
        .anonymous_blocks(&config.anonymous_prefix)
        .into_iter()
        .map(|sym| sym.name.as_str())
        .collect();

    let mut merged = CandidateSet::new();
    for fragment in &fragments {
        merge_fragment(&mut merged, oracle, cursor, fragment, None);

        if starts_like_identifier(fragment) {
            for &block in &blocks {
                merge_fragment(&mut merged, oracle, cursor, fragment, Some(block));
            }
        }
    }

    merged.into_ordered(config.max_items)
}

fn merge_fragment(
    merged: &mut CandidateSet,
    oracle: &dyn TypeOracle,
    cursor: SourceLoc,
    fragment: &str,
    anonymous_block: Option<&str>,
) {
    match complete_fragment(oracle, cursor, fragment, anonymous_block) {
        Ok(set) => merged.merge(set),
        Err(err) => debug!(fragment, block = ?anonymous_block, %err, "Fragment aborted"),
    }
}

fn starts_like_identifier(fragment: &str) -> bool {
    fragment
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}
