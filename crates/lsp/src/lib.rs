// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Shader LSP - Language Server Protocol
//!
//! This crate provides the LSP server implementation for Shader LSP.
//!
//! ## Overview
//!
//! The LSP server provides:
//! - Member-chain completion for GLSL (`lights[i].material.al`)
//! - Completion of locals, globals, user functions and types, keywords,
//!   builtins and extension names
//! - Multi-document management with incremental synchronization
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Client (VS Code, etc.)          │
//! └──────────────┬──────────────────────────┘
//!                │ LSP Protocol
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │         LSP Backend (tower-lsp)         │
//! ├─────────────────────────────────────────┤
//! │  • did_open / did_change / did_close    │
//! │  • completion                           │
//! └──────────────┬──────────────────────────┘
//!                │
//!         ┌──────┴──────┬────────────────┐
//!         ↓             ↓                ↓
//! ┌────────────┐ ┌──────────┐  ┌──────────────┐
//! │ Front End  │ │ Document │  │  Completion  │
//! │ (snapshot) │ │   Store  │  │    Engine    │
//! └────────────┘ └──────────┘  └──────────────┘
//! ```
//!
//! The server does not compile shaders itself. An external front end dumps
//! the symbol tables of a document as JSON; see
//! [`shader_lsp_oracle::StaticOracle`] for the format.
//!
//! ## Usage
//!
//! ### Starting the Server
//!
//! ```rust,no_run
//! use shader_lsp_server::LspBackend;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (service, socket) = LspService::new(LspBackend::new);
//!     Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
//!         .serve(service)
//!         .await;
//! }
//! ```
//!
//! ### Configuration
//!
//! Through `initializationOptions` or `workspace/didChangeConfiguration`:
//!
//! ```json
//! {
//!   "shaderLsp": {
//!     "maxItems": 200,
//!     "anonymousPrefix": "anon@",
//!     "symbolSnapshot": "/path/to/shade.frag.symbols.json"
//!   }
//! }
//! ```
//!
//! Without a configured snapshot the server looks for `<file>.symbols.json`
//! next to each shader, then falls back to builtins, keywords and
//! extensions only. `SHADER_LSP_SYMBOLS` sets the snapshot before the client
//! sends settings.
//!
//! ## Modules
//!
//! - [`backend`]: Main LSP server implementation
//! - [`completion`]: Fragment extraction, chain resolution and rendering
//! - [`config`]: Completion configuration and validation
//! - [`document`]: Document management and storage
//! - [`front_end`]: Symbol snapshot loading
//!
//! ## Error Handling
//!
//! The LSP server uses graceful degradation:
//! - A fragment that does not resolve contributes no candidates
//! - A missing document or line yields an empty completion list
//! - A broken snapshot is reported to the client log

pub mod backend;
pub mod completion;
pub mod config;
pub mod document;
pub mod front_end;

// Re-exports for convenience
pub use backend::{LspBackend, LspError};
pub use completion::CompletionEngine;
pub use completion::error::{CompletionError, ResolveError};
pub use config::{CompletionConfig, ConfigError};
pub use document::{Document, DocumentError, DocumentStore};
pub use front_end::{FrontEnd, SnapshotFrontEnd};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const SERVER_NAME: &str = "shader-lsp";
