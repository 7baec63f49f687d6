// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Symbol descriptors
//!
//! Symbols, user function definitions and builtin symbols as reported by the
//! shader front end.

use serde::{Deserialize, Serialize};

use crate::types::TypeId;

/// 0-based source location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLoc {
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A named, typed declaration (variable, parameter or user type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Declared name
    pub name: String,
    /// Declared type
    pub ty: TypeId,
    /// Declaration location
    #[serde(default)]
    pub loc: SourceLoc,
}

impl Symbol {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            loc: SourceLoc::default(),
        }
    }

    /// Builder method: set declaration location
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.loc = SourceLoc::new(line, column);
        self
    }
}

/// A user function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name; front ends may report the mangled form, e.g. `shade(vf3;`
    pub name: String,
    /// Return type
    pub return_type: TypeId,
    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<Symbol>,
    /// Local variable definitions in the body
    #[serde(default)]
    pub locals: Vec<Symbol>,
    /// First line of the definition (0-based)
    pub start_line: u32,
    /// Last line of the definition (0-based, inclusive)
    pub end_line: u32,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, return_type: TypeId) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: Vec::new(),
            locals: Vec::new(),
            start_line: 0,
            end_line: 0,
        }
    }

    /// Builder method: set parameters
    pub fn with_params(mut self, params: Vec<Symbol>) -> Self {
        self.params = params;
        self
    }

    /// Builder method: set local definitions
    pub fn with_locals(mut self, locals: Vec<Symbol>) -> Self {
        self.locals = locals;
        self
    }

    /// Builder method: set the body line range
    pub fn with_lines(mut self, start_line: u32, end_line: u32) -> Self {
        self.start_line = start_line;
        self.end_line = end_line;
        self
    }

    /// Name without the mangled parameter suffix
    pub fn display_name(&self) -> &str {
        match self.name.find('(') {
            Some(pos) => &self.name[..pos],
            None => &self.name,
        }
    }

    /// Whether `line` falls inside the definition
    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// Parameter of a builtin function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, empty when the front end does not name it
    #[serde(default)]
    pub name: String,
    pub ty: TypeId,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A builtin function overload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinFunction {
    pub name: String,
    pub return_type: TypeId,
    #[serde(default)]
    pub params: Vec<Parameter>,
}

/// An entry of the builtin symbol table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuiltinSymbol {
    /// Builtin variable such as `gl_Position`
    Variable { name: String, ty: TypeId },
    /// Builtin function overload such as `normalize(vec3)`
    Function(BuiltinFunction),
}

impl BuiltinSymbol {
    pub fn name(&self) -> &str {
        match self {
            BuiltinSymbol::Variable { name, .. } => name,
            BuiltinSymbol::Function(func) => &func.name,
        }
    }

    /// Declared type of a builtin variable
    pub fn variable_type(&self) -> Option<TypeId> {
        match self {
            BuiltinSymbol::Variable { ty, .. } => Some(*ty),
            BuiltinSymbol::Function(_) => None,
        }
    }
}
