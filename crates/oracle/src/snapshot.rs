// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static Oracle
//!
//! This module provides an oracle backed by a serialized symbol snapshot. An
//! external front end compiles the document and dumps its symbol tables as
//! JSON; the snapshot is loaded once and then only read.
//!
//! ## Snapshot format
//!
//! ```json
//! {
//!   "stage": "fragment",
//!   "types": [ { "basic": "float", "vector_size": 3 } ],
//!   "globals": [ { "name": "color", "ty": 0 } ],
//!   "user_types": [],
//!   "functions": [
//!     { "name": "main(", "return_type": 0, "start_line": 3, "end_line": 9 }
//!   ]
//! }
//! ```
//!
//! When `builtins` is missing or empty, the default builtin table for the
//! stage is installed. When `extensions` is missing or empty, the known
//! extension list is used.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use shader_lsp_builtins::{BuiltinRegistry, KNOWN_EXTENSIONS};
use shader_lsp_types::{BuiltinSymbol, FunctionDef, ShaderStage, Symbol, TypeArena, TypeId};

use crate::error::{OracleError, OracleResult};
use crate::r#trait::TypeOracle;

/// Serialized symbol tables of one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolSnapshot {
    pub stage: ShaderStage,
    pub types: TypeArena,
    pub globals: Vec<Symbol>,
    pub user_types: Vec<Symbol>,
    pub functions: Vec<FunctionDef>,
    pub builtins: Vec<BuiltinSymbol>,
    pub extensions: Vec<String>,
}

/// Oracle over an immutable [`SymbolSnapshot`]
#[derive(Debug, Clone)]
pub struct StaticOracle {
    snapshot: SymbolSnapshot,
}

impl StaticOracle {
    /// Build an oracle from a snapshot, filling in default builtins and
    /// extensions and checking every type handle
    pub fn from_snapshot(mut snapshot: SymbolSnapshot) -> OracleResult<Self> {
        // Handles must point into the front end's own types
        validate(&snapshot)?;

        if snapshot.builtins.is_empty() {
            snapshot.builtins = BuiltinRegistry::new().install(snapshot.stage, &mut snapshot.types);
        }
        if snapshot.extensions.is_empty() {
            snapshot.extensions = KNOWN_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        }
        Ok(Self { snapshot })
    }

    /// Oracle with no document symbols: builtins, keywords and extensions only
    pub fn builtin_only(stage: ShaderStage) -> Self {
        let mut types = TypeArena::new();
        let builtins = BuiltinRegistry::new().install(stage, &mut types);
        Self {
            snapshot: SymbolSnapshot {
                stage,
                types,
                builtins,
                extensions: KNOWN_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    /// Parse a JSON snapshot
    pub fn from_json(json: &str) -> OracleResult<Self> {
        let snapshot: SymbolSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Read and parse a JSON snapshot file
    pub fn from_path(path: &Path) -> OracleResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| OracleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let oracle = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            globals = oracle.snapshot.globals.len(),
            functions = oracle.snapshot.functions.len(),
            types = oracle.snapshot.types.len(),
            "Loaded symbol snapshot"
        );
        Ok(oracle)
    }

    pub fn stage(&self) -> ShaderStage {
        self.snapshot.stage
    }

    pub fn snapshot(&self) -> &SymbolSnapshot {
        &self.snapshot
    }
}

fn validate(snapshot: &SymbolSnapshot) -> OracleResult<()> {
    let types = &snapshot.types;
    types.validate()?;

    let check = |id: TypeId| types.resolve(id).map(|_| ());

    let symbols = snapshot
        .globals
        .iter()
        .chain(&snapshot.user_types)
        .chain(snapshot.functions.iter().flat_map(|f| f.params.iter().chain(&f.locals)));
    for sym in symbols {
        check(sym.ty)?;
    }
    for func in &snapshot.functions {
        check(func.return_type)?;
    }
    for builtin in &snapshot.builtins {
        match builtin {
            BuiltinSymbol::Variable { ty, .. } => check(*ty)?,
            BuiltinSymbol::Function(func) => {
                check(func.return_type)?;
                for param in &func.params {
                    check(param.ty)?;
                }
            }
        }
    }
    Ok(())
}

impl TypeOracle for StaticOracle {
    fn types(&self) -> &TypeArena {
        &self.snapshot.types
    }

    fn globals(&self) -> &[Symbol] {
        &self.snapshot.globals
    }

    fn functions(&self) -> &[FunctionDef] {
        &self.snapshot.functions
    }

    fn user_types(&self) -> &[Symbol] {
        &self.snapshot.user_types
    }

    fn builtins(&self) -> &[BuiltinSymbol] {
        &self.snapshot.builtins
    }

    fn extensions(&self) -> &[String] {
        &self.snapshot.extensions
    }
}
