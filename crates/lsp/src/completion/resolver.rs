// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Member-chain resolver
//!
//! A small shift-reduce machine over the tokens of one fragment such as
//! `lights[i].material.al`. Identifiers, dots and left brackets are shifted as
//! pending frames; each `.field` or `[index]` step is reduced against the
//! oracle until the input ends, at which point the shape of the stack decides
//! which candidates are emitted.
//!
//! ```text
//! START ──ident──▶ EXPECT_OP ──'.'──▶ EXPECT_FIELD_NAME
//!                  ▲  │  ▲                  │
//!                  │ '['  └──────ident───────┘
//!                  │  ▼
//!                  └─']'── EXPECT_RBRACKET   (other tokens ignored)
//! ```
//!
//! Any failed reduction or unexpected token aborts the fragment with a
//! [`ResolveError`]; the caller treats that as "no candidates".

use shader_lsp_oracle::{BuiltinMatch, LookupScope, TypeOracle};
use shader_lsp_types::{FunctionDef, TypeDesc, TypeId};
use tracing::debug;

use crate::completion::candidates::CandidateSet;
use crate::completion::error::ResolveError;
use crate::completion::generator::CandidateGenerator;
use crate::completion::token::{Token, TokenKind};

/// Resolver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Start,
    /// Expecting `.` or `[`
    ExpectOp,
    ExpectFieldName,
    ExpectRightBracket,
    Done,
    Aborted,
}

/// Stack element
#[derive(Debug, Clone)]
pub enum Frame<'a> {
    /// Identifier, dot or left bracket awaiting a reduction
    Pending(Token),
    /// Struct-like or vector-like value
    Struct(&'a TypeDesc),
    /// Array value with `dims_consumed` of `dims_total` subscripts applied
    Array {
        ty: &'a TypeDesc,
        dims_total: usize,
        dims_consumed: usize,
    },
    /// Anything that cannot be accessed further
    Scalar(&'a TypeDesc),
}

impl Frame<'_> {
    fn is_pending(&self, kind: TokenKind) -> bool {
        matches!(self, Frame::Pending(tok) if tok.is(kind))
    }

    fn describe(&self) -> String {
        match self {
            Frame::Pending(tok) => format!("token '{}'", tok.lexeme),
            Frame::Struct(ty) => format!("struct {}", ty),
            Frame::Array {
                ty,
                dims_total,
                dims_consumed,
            } => format!("array {} ({}/{} subscripts)", ty, dims_consumed, dims_total),
            Frame::Scalar(ty) => format!("scalar {}", ty),
        }
    }
}

/// Resolver for one fragment
///
/// Constructed per fragment, run once with [`ChainResolver::resolve`] and
/// discarded. It only borrows from the oracle.
pub struct ChainResolver<'a> {
    oracle: &'a dyn TypeOracle,
    function: Option<&'a FunctionDef>,
    stack: Vec<Frame<'a>>,
    state: ResolverState,
}

impl<'a> ChainResolver<'a> {
    /// Create a resolver for a cursor on `line`
    ///
    /// Local names are looked up in the function whose body spans `line`.
    pub fn new(oracle: &'a dyn TypeOracle, line: u32) -> Self {
        Self {
            oracle,
            function: oracle.enclosing_function(line),
            stack: Vec::new(),
            state: ResolverState::Start,
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// Run the state machine over `tokens` and return the candidates emitted
    /// at the end of input
    ///
    /// A sequence without an [`TokenKind::End`] token is treated as if it
    /// had one.
    pub fn resolve<I>(&mut self, tokens: I) -> Result<CandidateSet, ResolveError>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut out = CandidateSet::new();
        let mut tokens = tokens.into_iter().peekable();

        while let Some(tok) = tokens.next() {
            let last = tokens.peek().is_none_or(|next| next.is(TokenKind::End));
            if let Err(err) = self.step(tok, last, &mut out) {
                self.state = ResolverState::Aborted;
                return Err(err);
            }
            if self.state == ResolverState::Done {
                return Ok(out);
            }
        }

        if self.state != ResolverState::Start {
            self.complete_at_end(&mut out);
        }
        self.state = ResolverState::Done;
        Ok(out)
    }

    fn step(&mut self, tok: Token, last: bool, out: &mut CandidateSet) -> Result<(), ResolveError> {
        use ResolverState::*;
        use TokenKind::*;

        match (self.state, tok.kind) {
            (Start, Identifier) => {
                self.stack.push(Frame::Pending(tok));
                self.state = ExpectOp;
            }
            (Start, End) => self.state = Done,
            (ExpectOp, Dot) => {
                self.reduce_to_struct()?;
                self.stack.push(Frame::Pending(tok));
                self.state = ExpectFieldName;
            }
            (ExpectOp, LeftBracket) => {
                self.reduce_to_array()?;
                self.stack.push(Frame::Pending(tok));
                self.state = ExpectRightBracket;
            }
            (ExpectFieldName, Identifier) if last => {
                self.stack.push(Frame::Pending(tok));
                self.complete_at_end(out);
                self.state = Done;
            }
            (ExpectFieldName, Identifier) => {
                self.stack.push(Frame::Pending(tok));
                self.reduce_field()?;
                self.state = ExpectOp;
            }
            (ExpectRightBracket, RightBracket) => {
                self.reduce_subscript()?;
                self.state = ExpectOp;
            }
            (ExpectOp | ExpectFieldName | ExpectRightBracket, End) => {
                self.complete_at_end(out);
                self.state = Done;
            }
            // Index expressions are not modeled
            (ExpectRightBracket, _) => {}
            (state, _) => {
                return Err(ResolveError::MalformedFragment {
                    expected: expectation(state),
                    found: tok.lexeme,
                });
            }
        }
        Ok(())
    }

    /// Declared type of `name`: locals, parameters, globals, then builtin
    /// variables, with references followed to their referent
    fn declared_type(&self, name: &str) -> Result<&'a TypeDesc, ResolveError> {
        let oracle = self.oracle;
        let scoped = self
            .function
            .and_then(|func| oracle.lookup_symbol(LookupScope::Local(func), name))
            .or_else(|| oracle.lookup_symbol(LookupScope::Global, name))
            .map(|sym| sym.ty);

        let ty = scoped
            .or_else(|| {
                oracle
                    .lookup_builtins(name, BuiltinMatch::Exact)
                    .into_iter()
                    .find_map(|sym| sym.variable_type())
            })
            .ok_or_else(|| ResolveError::UnresolvedSymbol(name.to_string()))?;

        self.dereferenced(ty)
    }

    fn dereferenced(&self, ty: TypeId) -> Result<&'a TypeDesc, ResolveError> {
        let types = self.oracle.types();
        let target = types.dereference(ty)?;
        Ok(types.resolve(target)?)
    }

    /// Turn the top frame into a `Struct` frame
    fn reduce_to_struct(&mut self) -> Result<(), ResolveError> {
        let frame = self.pop("an identifier before '.'")?;
        let reduced = match frame {
            Frame::Struct(ty) => Frame::Struct(ty),
            Frame::Pending(tok) if tok.is(TokenKind::Identifier) => {
                let ty = self.declared_type(&tok.lexeme)?;
                if !ty.is_struct() && !ty.is_vector() {
                    return Err(mismatch(&tok.lexeme, "a struct or vector", ty));
                }
                Frame::Struct(ty)
            }
            other => {
                return Err(ResolveError::TypeMismatch {
                    subject: ".".to_string(),
                    expected: "a struct or vector",
                    found: other.describe(),
                });
            }
        };
        self.stack.push(reduced);
        Ok(())
    }

    /// Turn the top frame into an `Array` frame
    fn reduce_to_array(&mut self) -> Result<(), ResolveError> {
        let frame = self.pop("an identifier before '['")?;
        let reduced = match frame {
            array @ Frame::Array { .. } => array,
            // A fully subscripted array keeps its dimensions on the element type
            Frame::Struct(ty) | Frame::Scalar(ty) if ty.is_array() => {
                return Err(ResolveError::DimensionOverflow {
                    ty: ty.to_string(),
                    dims: ty.array_dimension_count(),
                });
            }
            Frame::Pending(tok) if tok.is(TokenKind::Identifier) => {
                let ty = self.declared_type(&tok.lexeme)?;
                if !ty.is_array() {
                    return Err(mismatch(&tok.lexeme, "an array", ty));
                }
                Frame::Array {
                    ty,
                    dims_total: ty.array_dimension_count(),
                    dims_consumed: 0,
                }
            }
            other => {
                return Err(ResolveError::TypeMismatch {
                    subject: "[".to_string(),
                    expected: "an array",
                    found: other.describe(),
                });
            }
        };
        self.stack.push(reduced);
        Ok(())
    }

    /// Replace `<struct> . <ident>` with the member's frame
    fn reduce_field(&mut self) -> Result<(), ResolveError> {
        let field = match self.pop("a field name")? {
            Frame::Pending(tok) if tok.is(TokenKind::Identifier) => tok,
            other => return Err(malformed("a field name", other)),
        };
        match self.pop("'.'")? {
            dot if dot.is_pending(TokenKind::Dot) => {}
            other => return Err(malformed("'.'", other)),
        }
        let base = match self.pop("a struct")? {
            Frame::Struct(ty) if ty.is_struct() => ty,
            other => {
                return Err(ResolveError::TypeMismatch {
                    subject: field.lexeme,
                    expected: "a member of a struct",
                    found: other.describe(),
                });
            }
        };

        let member = base
            .member(&field.lexeme)
            .ok_or_else(|| ResolveError::UnresolvedSymbol(format!("{}.{}", base, field.lexeme)))?;
        let ty = self.dereferenced(member.ty)?;

        let frame = if ty.is_array() {
            Frame::Array {
                ty,
                dims_total: ty.array_dimension_count(),
                dims_consumed: 0,
            }
        } else if ty.is_struct() || ty.is_vector() {
            Frame::Struct(ty)
        } else {
            Frame::Scalar(ty)
        };
        self.stack.push(frame);
        Ok(())
    }

    /// Apply one `[...]` to the array frame under the matching `[`
    fn reduce_subscript(&mut self) -> Result<(), ResolveError> {
        loop {
            match self.stack.pop() {
                Some(frame) if frame.is_pending(TokenKind::LeftBracket) => break,
                Some(_) => continue,
                None => {
                    return Err(ResolveError::MalformedFragment {
                        expected: "a matching '['",
                        found: "]".to_string(),
                    });
                }
            }
        }

        let (ty, dims_total, dims_consumed) = match self.pop("an array")? {
            Frame::Array {
                ty,
                dims_total,
                dims_consumed,
            } => (ty, dims_total, dims_consumed + 1),
            other => {
                return Err(ResolveError::TypeMismatch {
                    subject: "[]".to_string(),
                    expected: "an array",
                    found: other.describe(),
                });
            }
        };

        if dims_consumed > dims_total {
            return Err(ResolveError::DimensionOverflow {
                ty: ty.to_string(),
                dims: dims_total,
            });
        }

        let frame = if dims_consumed < dims_total {
            Frame::Array {
                ty,
                dims_total,
                dims_consumed,
            }
        } else if ty.is_struct() {
            Frame::Struct(ty)
        } else {
            Frame::Scalar(ty)
        };
        self.stack.push(frame);
        Ok(())
    }

    /// Emit candidates for the final stack shape
    fn complete_at_end(&mut self, out: &mut CandidateSet) {
        let Some(top) = self.stack.pop() else {
            return;
        };
        let generator = CandidateGenerator::new(self.oracle, self.function);

        match top {
            Frame::Pending(tok) if tok.is(TokenKind::Identifier) => match self.stack.last() {
                None => generator.bare_prefix(&tok.lexeme, out),
                Some(frame) if frame.is_pending(TokenKind::Dot) => {
                    if let Some(Frame::Struct(ty)) = self.below_top() {
                        if ty.is_struct() {
                            generator.struct_members(ty, &tok.lexeme, out);
                        }
                    }
                }
                Some(Frame::Pending(_)) => {}
                Some(_) => generator.scoped_variables(&tok.lexeme, out),
            },
            Frame::Pending(tok) if tok.is(TokenKind::Dot) => {
                if let Some(Frame::Struct(ty)) = self.stack.last() {
                    if ty.is_vector() {
                        generator.vector_components(ty, out);
                    } else {
                        generator.struct_members(ty, "", out);
                    }
                }
            }
            other => debug!(frame = %other.describe(), "Nothing to complete"),
        }
    }

    fn below_top(&self) -> Option<&Frame<'a>> {
        self.stack.iter().rev().nth(1)
    }

    fn pop(&mut self, expected: &'static str) -> Result<Frame<'a>, ResolveError> {
        self.stack
            .pop()
            .ok_or_else(|| ResolveError::MalformedFragment {
                expected,
                found: String::new(),
            })
    }
}

fn expectation(state: ResolverState) -> &'static str {
    match state {
        ResolverState::Start => "an identifier",
        ResolverState::ExpectOp => "'.' or '['",
        ResolverState::ExpectFieldName => "a field name",
        ResolverState::ExpectRightBracket => "']'",
        ResolverState::Done | ResolverState::Aborted => "end of input",
    }
}

fn mismatch(subject: &str, expected: &'static str, ty: &TypeDesc) -> ResolveError {
    ResolveError::TypeMismatch {
        subject: subject.to_string(),
        expected,
        found: ty.to_string(),
    }
}

fn malformed(expected: &'static str, found: Frame<'_>) -> ResolveError {
    ResolveError::MalformedFragment {
        expected,
        found: found.describe(),
    }
}
