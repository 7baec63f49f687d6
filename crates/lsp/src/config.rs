// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion Configuration
//!
//! This module provides configuration management for the completion engine.
//!
//! ## Configuration Structure
//!
//! The completion configuration includes:
//! - The maximum number of items returned per request
//! - The name prefix the front end gives unnamed interface blocks
//! - The delimiters used to cut candidate fragments out of the cursor line
//! - The symbol snapshot file produced by the shader front end
//!
//! ## Example
//!
//! ```rust,ignore
//! use shader_lsp_server::CompletionConfig;
//!
//! let config = CompletionConfig::default()
//!     .with_max_items(50)
//!     .with_symbol_snapshot("/tmp/shade.frag.symbols.json");
//! config.validate()?;
//! ```

use serde_json::Value;
use std::path::PathBuf;

/// Environment variable consulted when the client sends no snapshot path
pub const SYMBOLS_ENV_VAR: &str = "SHADER_LSP_SYMBOLS";

/// Delimiters scanned backward from the cursor, one fragment each
pub const DEFAULT_FRAGMENT_DELIMITERS: [char; 7] = [';', '\n', '(', '[', '{', ' ', '#'];

/// Main completion configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    /// Maximum number of items in one response
    pub max_items: usize,

    /// Name prefix of unnamed interface block instances, e.g. `anon@`
    pub anonymous_prefix: String,

    /// Fragment delimiters
    pub fragment_delimiters: Vec<char>,

    /// JSON symbol snapshot; `None` means builtins, keywords and extensions
    /// only
    pub symbol_snapshot: Option<PathBuf>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_items: 200,
            anonymous_prefix: "anon@".to_string(),
            fragment_delimiters: DEFAULT_FRAGMENT_DELIMITERS.to_vec(),
            symbol_snapshot: None,
        }
    }
}

impl CompletionConfig {
    /// Builder method: set the response size cap
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Builder method: set the anonymous block prefix
    pub fn with_anonymous_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.anonymous_prefix = prefix.into();
        self
    }

    /// Builder method: set the fragment delimiters
    pub fn with_fragment_delimiters(mut self, delimiters: impl Into<Vec<char>>) -> Self {
        self.fragment_delimiters = delimiters.into();
        self
    }

    /// Builder method: set the symbol snapshot path
    pub fn with_symbol_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.symbol_snapshot = Some(path.into());
        self
    }

    /// Validate the configuration
    ///
    /// Checks that:
    /// - At least one item may be returned
    /// - At least one fragment delimiter is set
    /// - The anonymous block prefix is not empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_items == 0 {
            return Err(ConfigError::InvalidMaxItems(self.max_items));
        }

        if self.fragment_delimiters.is_empty() {
            return Err(ConfigError::MissingDelimiters);
        }

        // An empty prefix would treat every struct global as an anonymous block
        if self.anonymous_prefix.is_empty() {
            return Err(ConfigError::EmptyAnonymousPrefix);
        }

        Ok(())
    }

    /// Parse completion config from LSP client settings payload.
    ///
    /// Expected shape:
    /// {
    ///   "shaderLsp": {
    ///     "maxItems": 200,
    ///     "anonymousPrefix": "anon@",
    ///     "symbolSnapshot": "/path/to/shade.frag.symbols.json"
    ///   }
    /// }
    ///
    /// Missing keys keep their defaults. Returns `None` when the section is
    /// absent.
    pub fn from_lsp_settings(settings: &Value) -> Option<Self> {
        let lsp_settings = settings.get("shaderLsp")?;
        let mut config = Self::default();

        if let Some(max_items) = lsp_settings.get("maxItems").and_then(Value::as_u64) {
            config.max_items = usize::try_from(max_items).unwrap_or(usize::MAX);
        }

        if let Some(prefix) = lsp_settings.get("anonymousPrefix").and_then(Value::as_str) {
            config.anonymous_prefix = prefix.to_string();
        }

        config.symbol_snapshot = lsp_settings
            .get("symbolSnapshot")
            .and_then(Value::as_str)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Some(config)
    }

    /// Default config used when client settings have not arrived yet.
    pub fn default_runtime_fallback() -> Self {
        let symbol_snapshot = std::env::var_os(SYMBOLS_ENV_VAR)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self {
            symbol_snapshot,
            ..Self::default()
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Response cap of zero
    #[error("maxItems must be > 0, got {0}")]
    InvalidMaxItems(usize),

    /// No fragment delimiters
    #[error("At least one fragment delimiter is required")]
    MissingDelimiters,

    /// Empty anonymous block prefix
    #[error("Anonymous block prefix must not be empty")]
    EmptyAnonymousPrefix,
}
