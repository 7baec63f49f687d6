// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Type descriptors
//!
//! This module defines the type descriptors of the shader language and the
//! arena that owns them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::symbol::SourceLoc;

/// Handle to a [`TypeDesc`] stored in a [`TypeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

/// Basic (element) type of a shader type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicType {
    Void,
    Bool,
    Int,
    Uint,
    Int64,
    Uint64,
    Float,
    Double,
    Float16,
    /// Samplers, textures and combined image samplers
    Sampler,
    /// Storage images
    Image,
    AtomicUint,
    /// Plain `struct` declarations
    Struct,
    /// Interface blocks (`uniform`, `buffer`, `in`/`out` blocks)
    Block,
    /// `buffer_reference` pointers; the pointee is the descriptor's referent
    Reference,
}

impl BasicType {
    /// GLSL spelling of the basic type
    pub fn as_str(&self) -> &'static str {
        match self {
            BasicType::Void => "void",
            BasicType::Bool => "bool",
            BasicType::Int => "int",
            BasicType::Uint => "uint",
            BasicType::Int64 => "int64_t",
            BasicType::Uint64 => "uint64_t",
            BasicType::Float => "float",
            BasicType::Double => "double",
            BasicType::Float16 => "float16_t",
            BasicType::Sampler => "sampler",
            BasicType::Image => "image",
            BasicType::AtomicUint => "atomic_uint",
            BasicType::Struct => "structure",
            BasicType::Block => "block",
            BasicType::Reference => "reference",
        }
    }

    fn vector_prefix(&self) -> &'static str {
        match self {
            BasicType::Bool => "b",
            BasicType::Int => "i",
            BasicType::Uint => "u",
            BasicType::Int64 => "i64",
            BasicType::Uint64 => "u64",
            BasicType::Double => "d",
            BasicType::Float16 => "f16",
            _ => "",
        }
    }
}

/// Shape of a matrix type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatrixShape {
    pub cols: u8,
    pub rows: u8,
}

/// A named member of a struct or block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Field name
    pub name: String,
    /// Field type
    pub ty: TypeId,
    /// Declaration location
    #[serde(default)]
    pub loc: SourceLoc,
}

impl Member {
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

/// Descriptor of a shader type
///
/// Arrays are not separate descriptors: an array of `T` is the descriptor of
/// `T` with a non-empty `array_sizes`, outermost dimension first. This is what
/// lets a fully subscripted array keep its element's struct members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDesc {
    /// Basic type
    pub basic: BasicType,
    /// Type name for struct, block and opaque types
    #[serde(default)]
    pub name: String,
    /// Component count, 1 for scalars
    #[serde(default = "default_vector_size")]
    pub vector_size: u8,
    /// Matrix shape, if any
    #[serde(default)]
    pub matrix: Option<MatrixShape>,
    /// Array dimension sizes; `None` marks an unsized dimension
    #[serde(default)]
    pub array_sizes: Vec<Option<u32>>,
    /// Struct or block members in declaration order
    #[serde(default)]
    pub members: Vec<Member>,
    /// Pointee of a reference type
    #[serde(default)]
    pub referent: Option<TypeId>,
}

fn default_vector_size() -> u8 {
    1
}

impl TypeDesc {
    /// Create a scalar type
    pub fn scalar(basic: BasicType) -> Self {
        Self {
            basic,
            name: String::new(),
            vector_size: 1,
            matrix: None,
            array_sizes: Vec::new(),
            members: Vec::new(),
            referent: None,
        }
    }

    /// Create a vector type with `size` components
    pub fn vector(basic: BasicType, size: u8) -> Self {
        Self {
            vector_size: size,
            ..Self::scalar(basic)
        }
    }

    /// Create a matrix type
    pub fn matrix(basic: BasicType, cols: u8, rows: u8) -> Self {
        Self {
            matrix: Some(MatrixShape { cols, rows }),
            ..Self::scalar(basic)
        }
    }

    /// Create a struct type
    pub fn structure(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            members,
            ..Self::scalar(BasicType::Struct)
        }
    }

    /// Create an interface block type
    pub fn block(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            members,
            ..Self::scalar(BasicType::Block)
        }
    }

    /// Create an opaque type such as `sampler2D` or `image2D`
    pub fn opaque(basic: BasicType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::scalar(basic)
        }
    }

    /// Create a `buffer_reference` type pointing at `referent`
    pub fn reference(name: impl Into<String>, referent: TypeId) -> Self {
        Self {
            name: name.into(),
            referent: Some(referent),
            ..Self::scalar(BasicType::Reference)
        }
    }

    /// Builder method: make this an array with the given dimension sizes
    pub fn with_array(mut self, sizes: Vec<Option<u32>>) -> Self {
        self.array_sizes = sizes;
        self
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.basic, BasicType::Struct | BasicType::Block)
    }

    pub fn is_vector(&self) -> bool {
        self.vector_size > 1 && self.matrix.is_none()
    }

    pub fn is_matrix(&self) -> bool {
        self.matrix.is_some()
    }

    pub fn is_array(&self) -> bool {
        !self.array_sizes.is_empty()
    }

    /// A scalar is anything that is not a vector, matrix, struct or array
    pub fn is_scalar(&self) -> bool {
        !self.is_vector() && !self.is_matrix() && !self.is_struct() && !self.is_array()
    }

    pub fn is_reference(&self) -> bool {
        self.basic == BasicType::Reference && self.referent.is_some()
    }

    pub fn array_dimension_count(&self) -> usize {
        self.array_sizes.len()
    }

    pub fn vector_component_count(&self) -> usize {
        if self.is_vector() {
            self.vector_size as usize
        } else {
            0
        }
    }

    /// Find a member by exact name
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Basic type spelling, e.g. `float` for a `vec3`
    pub fn basic_type_string(&self) -> &str {
        match self.basic {
            BasicType::Sampler | BasicType::Image if !self.name.is_empty() => &self.name,
            basic => basic.as_str(),
        }
    }

    /// Type name without array dimensions, e.g. `vec3`, `mat2x3`, `Light`
    pub fn type_name(&self) -> String {
        if self.is_struct() || self.basic == BasicType::Reference {
            return self.name.clone();
        }

        if let Some(MatrixShape { cols, rows }) = self.matrix {
            let prefix = self.basic.vector_prefix();
            return if cols == rows {
                format!("{}mat{}", prefix, cols)
            } else {
                format!("{}mat{}x{}", prefix, cols, rows)
            };
        }

        if self.is_vector() {
            return format!("{}vec{}", self.basic.vector_prefix(), self.vector_size);
        }

        self.basic_type_string().to_string()
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())?;
        for size in &self.array_sizes {
            match size {
                Some(n) => write!(f, "[{}]", n)?,
                None => write!(f, "[]")?,
            }
        }
        Ok(())
    }
}

/// Errors raised by arena lookups
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    /// A handle does not point into the arena
    #[error("Unknown type id {0:?}")]
    UnknownType(TypeId),

    /// A reference type chain loops back on itself
    #[error("Reference cycle through type id {0:?}")]
    ReferenceCycle(TypeId),
}

/// Owner of every [`TypeDesc`] in one symbol environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeArena {
    types: Vec<TypeDesc>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor and return its handle
    pub fn alloc(&mut self, desc: TypeDesc) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(desc);
        id
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDesc> {
        self.types.get(id.0 as usize)
    }

    /// Like [`TypeArena::get`] but reports a dangling handle as an error
    pub fn resolve(&self, id: TypeId) -> Result<&TypeDesc, TypeError> {
        self.get(id).ok_or(TypeError::UnknownType(id))
    }

    /// Follow a reference type to its referent
    ///
    /// Non-reference types are returned unchanged.
    pub fn dereference(&self, id: TypeId) -> Result<TypeId, TypeError> {
        let mut current = id;
        for _ in 0..=self.types.len() {
            let desc = self.resolve(current)?;
            match desc.referent {
                Some(next) if desc.is_reference() => current = next,
                _ => return Ok(current),
            }
        }
        Err(TypeError::ReferenceCycle(id))
    }

    /// Check that every handle stored inside the arena is valid
    pub fn validate(&self) -> Result<(), TypeError> {
        for desc in &self.types {
            for member in &desc.members {
                self.resolve(member.ty)?;
            }
            if let Some(referent) = desc.referent {
                self.resolve(referent)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDesc)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, desc)| (TypeId(i as u32), desc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(TypeDesc::scalar(BasicType::Float).type_name(), "float");
        assert_eq!(TypeDesc::vector(BasicType::Float, 3).type_name(), "vec3");
        assert_eq!(TypeDesc::vector(BasicType::Uint, 2).type_name(), "uvec2");
        assert_eq!(TypeDesc::matrix(BasicType::Float, 4, 4).type_name(), "mat4");
        assert_eq!(TypeDesc::matrix(BasicType::Double, 2, 3).type_name(), "dmat2x3");
        assert_eq!(
            TypeDesc::opaque(BasicType::Sampler, "sampler2D").type_name(),
            "sampler2D"
        );
    }

    #[test]
    fn test_display_with_arrays() {
        let ty = TypeDesc::vector(BasicType::Float, 4).with_array(vec![Some(4), None]);
        assert_eq!(ty.to_string(), "vec4[4][]");
    }

    #[test]
    fn test_classification() {
        let scalar = TypeDesc::scalar(BasicType::Int);
        assert!(scalar.is_scalar());
        assert!(!scalar.is_vector());

        let vec = TypeDesc::vector(BasicType::Float, 2);
        assert!(vec.is_vector());
        assert!(!vec.is_scalar());
        assert_eq!(vec.vector_component_count(), 2);

        let mat = TypeDesc::matrix(BasicType::Float, 3, 3);
        assert!(!mat.is_vector());
        assert!(!mat.is_scalar());

        let block = TypeDesc::block("Globals", vec![]);
        assert!(block.is_struct());

        let arr = TypeDesc::scalar(BasicType::Float).with_array(vec![Some(2), Some(3)]);
        assert!(arr.is_array());
        assert!(!arr.is_scalar());
        assert_eq!(arr.array_dimension_count(), 2);
    }

    #[test]
    fn test_dereference() {
        let mut arena = TypeArena::new();
        let target = arena.alloc(TypeDesc::structure("Node", vec![]));
        let ptr = arena.alloc(TypeDesc::reference("NodeRef", target));

        assert_eq!(arena.dereference(ptr), Ok(target));
        assert_eq!(arena.dereference(target), Ok(target));
        assert_eq!(
            arena.dereference(TypeId(99)),
            Err(TypeError::UnknownType(TypeId(99)))
        );
    }

    #[test]
    fn test_validate_dangling_member() {
        let mut arena = TypeArena::new();
        arena.alloc(TypeDesc::structure(
            "Broken",
            vec![Member::new("x", TypeId(7))],
        ));
        assert_eq!(arena.validate(), Err(TypeError::UnknownType(TypeId(7))));
    }
}
