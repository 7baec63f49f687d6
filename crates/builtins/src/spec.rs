// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Declarative builtin entries and the GLSL type-name parser used to turn
//! them into type descriptors.

use shader_lsp_types::{BasicType, ShaderStage, TypeDesc};

/// A builtin declared with GLSL type spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinSpec {
    Variable {
        name: &'static str,
        ty: &'static str,
        /// Stages the variable is visible in; empty means every stage
        stages: &'static [ShaderStage],
    },
    Function {
        name: &'static str,
        ret: &'static str,
        params: &'static [(&'static str, &'static str)],
    },
}

impl BuiltinSpec {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinSpec::Variable { name, .. } | BuiltinSpec::Function { name, .. } => name,
        }
    }

    /// Whether this builtin is visible in `stage`
    pub fn visible_in(&self, stage: ShaderStage) -> bool {
        match self {
            BuiltinSpec::Variable { stages, .. } => stages.is_empty() || stages.contains(&stage),
            BuiltinSpec::Function { .. } => true,
        }
    }
}

/// Builtin variable visible in every stage
pub const fn var(name: &'static str, ty: &'static str) -> BuiltinSpec {
    BuiltinSpec::Variable {
        name,
        ty,
        stages: &[],
    }
}

/// Builtin variable restricted to some stages
pub const fn stage_var(
    name: &'static str,
    ty: &'static str,
    stages: &'static [ShaderStage],
) -> BuiltinSpec {
    BuiltinSpec::Variable { name, ty, stages }
}

/// Builtin function overload
pub const fn func(
    name: &'static str,
    ret: &'static str,
    params: &'static [(&'static str, &'static str)],
) -> BuiltinSpec {
    BuiltinSpec::Function { name, ret, params }
}

/// Parse a GLSL type spelling such as `vec3`, `dmat2x3`, `usampler2D` or
/// `float[]` into a descriptor
///
/// Struct types are not builtins and are never produced here.
pub fn parse_type_name(name: &str) -> Option<TypeDesc> {
    let name = name.trim();

    if let Some(open) = name.find('[') {
        let base = parse_type_name(&name[..open])?;
        let sizes = parse_array_suffix(&name[open..])?;
        return Some(base.with_array(sizes));
    }

    if let Some(basic) = scalar_type(name) {
        return Some(TypeDesc::scalar(basic));
    }

    if let Some(pos) = name.find("vec") {
        let basic = prefix_type(&name[..pos])?;
        let size = component_count(&name[pos + 3..])?;
        return Some(TypeDesc::vector(basic, size));
    }

    if let Some(pos) = name.find("mat") {
        let basic = match &name[..pos] {
            "" => BasicType::Float,
            "d" => BasicType::Double,
            "f16" => BasicType::Float16,
            _ => return None,
        };
        let shape = &name[pos + 3..];
        let (cols, rows) = match shape.split_once('x') {
            Some((c, r)) => (component_count(c)?, component_count(r)?),
            None => {
                let n = component_count(shape)?;
                (n, n)
            }
        };
        return Some(TypeDesc::matrix(basic, cols, rows));
    }

    opaque_type(name)
        .or_else(|| {
            OPAQUE_PREFIXES
                .iter()
                .find_map(|prefix| name.strip_prefix(prefix).and_then(opaque_type))
        })
        .map(|basic| TypeDesc::opaque(basic, name))
}

/// Component prefixes of sampler, texture and image spellings
const OPAQUE_PREFIXES: [&str; 5] = ["i64", "u64", "f16", "i", "u"];

fn opaque_type(name: &str) -> Option<BasicType> {
    if name.starts_with("sampler") || name.starts_with("texture") {
        Some(BasicType::Sampler)
    } else if name.starts_with("image") {
        Some(BasicType::Image)
    } else {
        None
    }
}

fn scalar_type(name: &str) -> Option<BasicType> {
    Some(match name {
        "void" => BasicType::Void,
        "bool" => BasicType::Bool,
        "int" => BasicType::Int,
        "uint" => BasicType::Uint,
        "int64_t" => BasicType::Int64,
        "uint64_t" => BasicType::Uint64,
        "float" => BasicType::Float,
        "double" => BasicType::Double,
        "float16_t" => BasicType::Float16,
        "atomic_uint" => BasicType::AtomicUint,
        _ => return None,
    })
}

fn prefix_type(prefix: &str) -> Option<BasicType> {
    Some(match prefix {
        "" => BasicType::Float,
        "b" => BasicType::Bool,
        "i" => BasicType::Int,
        "u" => BasicType::Uint,
        "d" => BasicType::Double,
        "i64" => BasicType::Int64,
        "u64" => BasicType::Uint64,
        "f16" => BasicType::Float16,
        _ => return None,
    })
}

fn component_count(digits: &str) -> Option<u8> {
    match digits.parse::<u8>() {
        Ok(n @ 2..=4) => Some(n),
        _ => None,
    }
}

fn parse_array_suffix(mut suffix: &str) -> Option<Vec<Option<u32>>> {
    let mut sizes = Vec::new();
    while !suffix.is_empty() {
        let rest = suffix.strip_prefix('[')?;
        let close = rest.find(']')?;
        let size = &rest[..close];
        sizes.push(if size.is_empty() {
            None
        } else {
            Some(size.parse().ok()?)
        });
        suffix = &rest[close + 1..];
    }
    Some(sizes)
}
