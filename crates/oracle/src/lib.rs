// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Shader LSP - Type Oracle
//!
//! This crate provides the symbol and type environment abstraction the
//! completion engine resolves against. It defines the [`TypeOracle`] trait
//! and one implementation backed by a serialized symbol snapshot.
//!
//! ## Architecture
//!
//! The oracle is responsible for:
//! - Exact-name lookup in the function-local and global scopes
//! - Prefix lookup over globals, parameters and locals
//! - Exact and prefix lookup in the builtin symbol table
//! - Exposing the type arena for type introspection
//!
//! An oracle is immutable once built and is shared behind an `Arc` for the
//! duration of a completion request.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shader_lsp_oracle::{StaticOracle, TypeOracle, LookupScope};
//!
//! let oracle = StaticOracle::from_path(Path::new("shade.frag.symbols.json"))?;
//! let color = oracle.lookup_symbol(LookupScope::Global, "color");
//! ```

pub mod error;
pub mod snapshot;
pub mod r#trait;

// Re-exports
pub use error::{OracleError, OracleResult};
pub use snapshot::{StaticOracle, SymbolSnapshot};
pub use r#trait::{BuiltinMatch, LookupScope, TypeOracle};
