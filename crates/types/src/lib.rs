// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Shader LSP - Type and Symbol Descriptors
//!
//! This crate provides the read-only descriptors a shader front end exposes
//! to the completion engine:
//! - Type descriptors stored in an arena and addressed by [`TypeId`]
//! - Symbols (globals, locals, parameters, user-defined types)
//! - User function definitions with their body line range
//! - Builtin symbols (variables and functions)
//!
//! The descriptors never point at each other directly. A struct member or a
//! symbol refers to its type through a [`TypeId`], so a whole environment can
//! be serialized, shared behind an `Arc`, and borrowed for the duration of one
//! completion request.

pub mod stage;
pub mod symbol;
pub mod types;

// Re-export commonly used types
pub use stage::ShaderStage;
pub use symbol::{BuiltinFunction, BuiltinSymbol, FunctionDef, Parameter, SourceLoc, Symbol};
pub use types::{BasicType, MatrixShape, Member, TypeArena, TypeDesc, TypeError, TypeId};
