// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # GLSL Builtin Registry
//!
//! This crate provides the read-only tables the completion engine offers on
//! top of what a document declares:
//!
//! - Builtin variables and functions, per shader stage
//! - The static keyword list
//! - The known extension names
//!
//! All tables are process-wide constants. Builtins are declared with GLSL type
//! spellings and only turned into [`TypeDesc`]s when they are installed into a
//! document's [`TypeArena`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shader_lsp_builtins::{BuiltinRegistry, ShaderStage};
//! use shader_lsp_types::TypeArena;
//!
//! let registry = BuiltinRegistry::new();
//! let mut arena = TypeArena::new();
//! let builtins = registry.install(ShaderStage::Vertex, &mut arena);
//! ```

pub mod builtin;
pub mod extensions;
pub mod keywords;
pub mod registry;
pub mod spec;

// Re-exports from types for convenience
pub use shader_lsp_types::{BuiltinSymbol, ShaderStage, TypeArena, TypeDesc};

pub use extensions::KNOWN_EXTENSIONS;
pub use keywords::KEYWORDS;
pub use registry::BuiltinRegistry;
pub use spec::{BuiltinSpec, parse_type_name};
