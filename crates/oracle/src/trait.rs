// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # TypeOracle trait for symbol and type environments
//!
//! This module defines the read-only view of a document's symbols that the
//! completion engine resolves member chains against.

use shader_lsp_builtins::KEYWORDS;
use shader_lsp_types::{BuiltinSymbol, FunctionDef, Symbol, TypeArena};

/// Scope probed by [`TypeOracle::lookup_symbol`]
#[derive(Debug, Clone, Copy)]
pub enum LookupScope<'a> {
    /// Local definitions, then parameters, of one function
    Local(&'a FunctionDef),
    /// Global declarations
    Global,
}

/// Name matching mode for builtin lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinMatch {
    /// The whole name must be equal
    Exact,
    /// The name must start with the query
    Prefix,
}

impl BuiltinMatch {
    /// Whether `name` matches `query`; an empty query matches everything
    pub fn matches(self, name: &str, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        match self {
            BuiltinMatch::Exact => name == query,
            BuiltinMatch::Prefix => name.starts_with(query),
        }
    }
}

/// Read-only symbol and type environment of one document
///
/// Implementations only have to expose the raw tables; every lookup used by
/// the completion engine is provided on top of them. All prefix matches are
/// literal and case-sensitive.
///
/// # Examples
///
/// ```rust,ignore
/// use shader_lsp_oracle::{LookupScope, TypeOracle};
///
/// fn declared_type_name(oracle: &dyn TypeOracle, line: u32, name: &str) -> Option<String> {
///     let func = oracle.enclosing_function(line)?;
///     let sym = oracle.lookup_symbol(LookupScope::Local(func), name)?;
///     oracle.types().get(sym.ty).map(|t| t.to_string())
/// }
/// ```
pub trait TypeOracle: Send + Sync {
    /// Arena every [`shader_lsp_types::TypeId`] of this environment points into
    fn types(&self) -> &TypeArena;

    /// Global declarations, in declaration order
    fn globals(&self) -> &[Symbol];

    /// User function definitions
    fn functions(&self) -> &[FunctionDef];

    /// User-defined struct types
    fn user_types(&self) -> &[Symbol];

    /// The builtin symbol table
    fn builtins(&self) -> &[BuiltinSymbol];

    /// Extension names available to `#extension`
    fn extensions(&self) -> &[String];

    /// Static keyword list
    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    /// The function whose body spans `line`
    fn enclosing_function(&self, line: u32) -> Option<&FunctionDef> {
        self.functions().iter().find(|f| f.contains_line(line))
    }

    /// Find a symbol by exact name in one scope
    fn lookup_symbol<'a>(&'a self, scope: LookupScope<'a>, name: &str) -> Option<&'a Symbol> {
        match scope {
            LookupScope::Local(func) => func
                .locals
                .iter()
                .chain(func.params.iter())
                .find(|sym| sym.name == name),
            LookupScope::Global => self.globals().iter().find(|sym| sym.name == name),
        }
    }

    /// Symbols whose name starts with `prefix`: globals, then the parameters
    /// and locals of `func`
    fn lookup_symbols_by_prefix<'a>(
        &'a self,
        func: Option<&'a FunctionDef>,
        prefix: &str,
    ) -> Vec<&'a Symbol> {
        let scoped = func
            .into_iter()
            .flat_map(|f| f.params.iter().chain(f.locals.iter()));
        self.globals()
            .iter()
            .chain(scoped)
            .filter(|sym| sym.name.starts_with(prefix))
            .collect()
    }

    /// Builtin symbols matching `name`
    fn lookup_builtins(&self, name: &str, mode: BuiltinMatch) -> Vec<&BuiltinSymbol> {
        self.builtins()
            .iter()
            .filter(|sym| mode.matches(sym.name(), name))
            .collect()
    }

    /// Globals named with the anonymous-block `prefix` whose type is
    /// struct-like
    ///
    /// Members of an unnamed interface block are accessed without a
    /// qualifier, so these names are implicitly prepended to bare
    /// identifiers during completion.
    fn anonymous_blocks(&self, prefix: &str) -> Vec<&Symbol> {
        let types = self.types();
        self.globals()
            .iter()
            .filter(|sym| sym.name.starts_with(prefix))
            .filter(|sym| {
                types
                    .dereference(sym.ty)
                    .ok()
                    .and_then(|id| types.get(id))
                    .is_some_and(|desc| desc.is_struct())
            })
            .collect()
    }
}
