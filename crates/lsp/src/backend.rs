// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP Backend Implementation
//!
//! This module provides the main LSP server backend using tower-lsp.
//!
//! ## Overview
//!
//! The backend handles:
//! - LSP protocol communication via tower-lsp
//! - Document lifecycle (open, change, close)
//! - Completion configuration from `initializationOptions` and
//!   `workspace/didChangeConfiguration`
//! - Member-chain completion
//!
//! ## Architecture
//!
//! ```text
//! Client → LSP Backend → Document Store
//!                ↓
//!           Front End (symbol snapshot → TypeOracle)
//!                ↓
//!           Completion Engine
//! ```
//!
//! ## Supported LSP Features
//!
//! - textDocument/didOpen
//! - textDocument/didChange
//! - textDocument/didClose
//! - textDocument/completion
//! - workspace/didChangeConfiguration
//!
//! ## Example
//!
//! ```rust,ignore
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

use crate::completion::CompletionEngine;
use crate::completion::error::CompletionError;
use crate::config::CompletionConfig;
use crate::document::{DocumentError, DocumentStore};
use crate::front_end::{FrontEnd, SnapshotFrontEnd};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{error, info, warn};

/// LSP backend implementation
///
/// Main entry point for all LSP protocol operations.
/// Uses tower-lsp framework for protocol handling.
pub struct LspBackend {
    /// LSP client for sending notifications and requests
    client: Client,

    /// Document store for managing open documents
    documents: Arc<DocumentStore>,

    /// Completion configuration
    config: Arc<RwLock<CompletionConfig>>,

    /// Source of symbol environments, replaced when the snapshot path changes
    front_end: Arc<RwLock<Arc<dyn FrontEnd>>>,
}

impl LspBackend {
    /// Create a new LSP backend
    ///
    /// The snapshot path defaults to `SHADER_LSP_SYMBOLS` until the client
    /// sends settings.
    pub fn new(client: Client) -> Self {
        let config = CompletionConfig::default_runtime_fallback();
        let front_end: Arc<dyn FrontEnd> =
            Arc::new(SnapshotFrontEnd::new(config.symbol_snapshot.clone()));
        Self::with_front_end(client, config, front_end)
    }

    /// Create a backend with an explicit front end
    pub fn with_front_end(
        client: Client,
        config: CompletionConfig,
        front_end: Arc<dyn FrontEnd>,
    ) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentStore::new()),
            config: Arc::new(RwLock::new(config)),
            front_end: Arc::new(RwLock::new(front_end)),
        }
    }

    /// Get the document store
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Get the completion configuration
    pub async fn get_config(&self) -> CompletionConfig {
        self.config.read().await.clone()
    }

    /// Set the completion configuration
    ///
    /// A changed snapshot path replaces the front end, dropping every cached
    /// snapshot.
    pub async fn set_config(&self, config: CompletionConfig) -> std::result::Result<(), LspError> {
        config.validate()?;

        let mut current = self.config.write().await;
        if current.symbol_snapshot != config.symbol_snapshot {
            *self.front_end.write().await =
                Arc::new(SnapshotFrontEnd::new(config.symbol_snapshot.clone()));
        }

        info!(
            max_items = config.max_items,
            snapshot = ?config.symbol_snapshot,
            "Completion configuration updated"
        );
        *current = config;
        Ok(())
    }

    /// Apply client settings; payloads without a `shaderLsp` section are
    /// ignored
    pub async fn apply_settings(&self, settings: &Value) -> std::result::Result<bool, LspError> {
        match CompletionConfig::from_lsp_settings(settings) {
            Some(config) => {
                self.set_config(config).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Complete at `position` in the open document `uri`
    pub async fn complete_at(
        &self,
        uri: &Url,
        position: Position,
    ) -> std::result::Result<Vec<CompletionItem>, CompletionError> {
        let document = self
            .documents
            .get_document(uri)
            .await
            .ok_or_else(|| CompletionError::DocumentNotFound(uri.clone()))?;

        let front_end = self.front_end.read().await.clone();
        let oracle = front_end.analyze(uri, &document.get_content()).await?;

        let engine = CompletionEngine::new(self.get_config().await);
        engine.complete(oracle.as_ref(), &document, position)
    }

    /// Log a message to the client
    async fn log_message(&self, message: &str, message_type: MessageType) {
        self.client.log_message(message_type, message).await;
    }

    /// Show a message to the user
    async fn show_message(&self, message: &str, message_type: MessageType) {
        self.client.show_message(message_type, message).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspBackend {
    /// Initialize the LSP server
    ///
    /// Called when the client starts the server.
    /// Returns server capabilities and configuration.
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Initializing LSP server");
        info!("Client info: {:?}", params.client_info);

        if let Some(options) = &params.initialization_options {
            if let Err(e) = self.apply_settings(options).await {
                warn!("Ignoring invalid initialization options: {}", e);
            }
        }

        self.log_message("Shader LSP server initialized", MessageType::INFO)
            .await;

        // Return server capabilities
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // Text synchronization
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),

                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![".".to_string()]),
                    work_done_progress_options: WorkDoneProgressOptions {
                        work_done_progress: Some(false),
                    },
                    all_commit_characters: None,
                    completion_item: None,
                }),

                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: crate::SERVER_NAME.to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    /// Initialized notification
    ///
    /// Called after `initialize` completes successfully.
    async fn initialized(&self, _params: InitializedParams) {
        info!("LSP server initialized successfully");

        if self.get_config().await.symbol_snapshot.is_none() {
            self.log_message(
                "No symbol snapshot configured; completing builtins and keywords only",
                MessageType::INFO,
            )
            .await;
        }
    }

    /// Shutdown the LSP server
    ///
    /// Called when the client is shutting down the server.
    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down LSP server");
        Ok(())
    }

    /// Document opened notification
    ///
    /// Called when the client opens a document.
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.clone();

        info!(
            "Document opened: uri={}, language={}, version={}",
            uri, doc.language_id, doc.version
        );

        self.documents.open_document(uri, doc.text, doc.version).await;
    }

    /// Document changed notification
    ///
    /// Called when the client modifies a document.
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let identifier = params.text_document;
        let changes = params.content_changes;

        info!(
            "Document changed: uri={}, version={}, changes={}",
            identifier.uri,
            identifier.version,
            changes.len()
        );

        match self.documents.update_document(&identifier, &changes).await {
            Ok(()) => {}
            Err(DocumentError::DocumentNotFound(uri)) => {
                warn!("Document not found for change: {}", uri);
            }
            Err(e) => {
                error!("Failed to update document: {}", e);
                self.show_message(
                    &format!("Failed to update document: {}", e),
                    MessageType::ERROR,
                )
                .await;
            }
        }
    }

    /// Document closed notification
    ///
    /// Called when the client closes a document.
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        info!("Document closed: uri={}", uri);

        if !self.documents.close_document(&uri).await {
            warn!("Document not found for close: {}", uri);
        }
    }

    /// Completion request
    ///
    /// Called when the user requests completion (e.g., Ctrl+Space) or types
    /// a `.`.
    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        info!(
            "Completion requested: uri={}, line={}, col={}",
            uri, position.line, position.character
        );

        match self.complete_at(&uri, position).await {
            Ok(items) => {
                info!("Completion returned {} items", items.len());
                Ok(Some(CompletionResponse::Array(items)))
            }
            Err(e) if e.should_return_empty() => {
                warn!("Completion skipped: {}", e);
                Ok(Some(CompletionResponse::Array(Vec::new())))
            }
            Err(e) => {
                error!("Completion error: {}", e);
                self.log_message(&format!("Completion error: {}", e), MessageType::ERROR)
                    .await;
                Ok(None)
            }
        }
    }

    /// Configuration change notification
    ///
    /// Called when the client's configuration changes.
    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        info!("Configuration changed: {:?}", params.settings);

        match self.apply_settings(&params.settings).await {
            Ok(true) => {}
            Ok(false) => warn!("Configuration without a shaderLsp section ignored"),
            Err(e) => {
                error!("Invalid configuration: {}", e);
                self.show_message(&format!("Invalid configuration: {}", e), MessageType::ERROR)
                    .await;
            }
        }
    }
}

/// LSP backend errors
///
/// Errors that can occur during LSP operations.
#[derive(Debug, thiserror::Error)]
pub enum LspError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Document error
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Completion error
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),
}
