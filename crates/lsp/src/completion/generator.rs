// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Candidate generation
//!
//! Emits the candidates for the point where chain resolution stops: bare
//! identifier prefixes, struct members and vector components.
//!
//! ## Formatting
//!
//! | Source            | Kind     | Detail                          | Insert text               |
//! |-------------------|----------|---------------------------------|---------------------------|
//! | variable          | Variable | declared type, e.g. `Light[4]`  | name                      |
//! | user function     | Function | `vec3 shade(Light light)`       | `shade(${1:Light light})` |
//! | user type         | Struct   | type name                       | type name                 |
//! | keyword           | Keyword  | empty                           | keyword                   |
//! | builtin variable  | Variable | declared type                   | name                      |
//! | builtin function  | Function | `float dot(vec3 x, vec3 y)`     | `dot(${1:vec3 x}, ...)`   |
//! | extension         | Text     | empty                           | extension name            |
//! | struct member     | Field    | member type                     | member name               |
//! | vector component  | Field    | `float x`                       | component name            |
//!
//! In function signatures a struct type is written by name and any other type
//! by its basic type (`float` for `vec3`), except builtin parameters of vector
//! type which keep the full vector type.

use shader_lsp_builtins::keywords::keywords_with_prefix;
use shader_lsp_oracle::{BuiltinMatch, TypeOracle};
use shader_lsp_types::{BuiltinFunction, BuiltinSymbol, FunctionDef, Symbol, TypeDesc, TypeId};

use crate::completion::candidates::{Candidate, CandidateKind, CandidateSet};

const COMPONENT_NAMES: [&str; 4] = ["x", "y", "z", "w"];

/// Candidate generator bound to one oracle and cursor scope
pub struct CandidateGenerator<'a> {
    oracle: &'a dyn TypeOracle,
    function: Option<&'a FunctionDef>,
}

impl<'a> CandidateGenerator<'a> {
    /// Create a generator for the function enclosing the cursor, if any
    pub fn new(oracle: &'a dyn TypeOracle, function: Option<&'a FunctionDef>) -> Self {
        Self { oracle, function }
    }

    /// Everything a bare identifier prefix can complete to
    pub fn bare_prefix(&self, prefix: &str, out: &mut CandidateSet) {
        self.scoped_variables(prefix, out);
        self.user_functions(prefix, out);
        self.user_types(prefix, out);
        self.keywords(prefix, out);
        self.builtins(prefix, out);
        self.extensions(prefix, out);
    }

    /// Globals, parameters and locals starting with `prefix`
    pub fn scoped_variables(&self, prefix: &str, out: &mut CandidateSet) {
        for sym in self.oracle.lookup_symbols_by_prefix(self.function, prefix) {
            out.variables.push(self.variable(sym));
        }
    }

    /// Members of `ty` starting with `prefix`
    pub fn struct_members(&self, ty: &TypeDesc, prefix: &str, out: &mut CandidateSet) {
        for member in ty.members.iter().filter(|m| m.name.starts_with(prefix)) {
            out.variables.push(Candidate::plain(
                &member.name,
                CandidateKind::Field,
                self.type_display(member.ty),
            ));
        }
    }

    /// Component names of vector `ty`, up to its component count
    pub fn vector_components(&self, ty: &TypeDesc, out: &mut CandidateSet) {
        let basic = ty.basic_type_string();
        for name in COMPONENT_NAMES.iter().take(ty.vector_component_count()) {
            out.variables.push(Candidate::plain(
                *name,
                CandidateKind::Field,
                format!("{} {}", basic, name),
            ));
        }
    }

    fn user_functions(&self, prefix: &str, out: &mut CandidateSet) {
        for func in self.oracle.functions() {
            if !func.display_name().starts_with(prefix) {
                continue;
            }
            let params: Vec<(String, &str)> = func
                .params
                .iter()
                .map(|p| (self.signature_type(p.ty, false), p.name.as_str()))
                .collect();
            out.functions.push(function_candidate(
                func.display_name(),
                &self.signature_type(func.return_type, false),
                &params,
            ));
        }
    }

    fn user_types(&self, prefix: &str, out: &mut CandidateSet) {
        for sym in self.oracle.user_types() {
            if sym.name.starts_with(prefix) {
                out.types.push(Candidate::plain(
                    &sym.name,
                    CandidateKind::Struct,
                    self.type_display(sym.ty),
                ));
            }
        }
    }

    fn keywords(&self, prefix: &str, out: &mut CandidateSet) {
        for keyword in keywords_with_prefix(self.oracle.keywords(), prefix) {
            out.keywords
                .push(Candidate::plain(keyword, CandidateKind::Keyword, ""));
        }
    }

    fn builtins(&self, prefix: &str, out: &mut CandidateSet) {
        for builtin in self.oracle.lookup_builtins(prefix, BuiltinMatch::Prefix) {
            let candidate = match builtin {
                BuiltinSymbol::Variable { name, ty } => {
                    Candidate::plain(name, CandidateKind::Variable, self.type_display(*ty))
                }
                BuiltinSymbol::Function(func) => self.builtin_function(func),
            };
            out.builtins.push(candidate);
        }
    }

    fn extensions(&self, prefix: &str, out: &mut CandidateSet) {
        for ext in self.oracle.extensions() {
            if ext.starts_with(prefix) {
                out.builtins
                    .push(Candidate::plain(ext, CandidateKind::Text, ""));
            }
        }
    }

    fn variable(&self, sym: &Symbol) -> Candidate {
        Candidate::plain(&sym.name, CandidateKind::Variable, self.type_display(sym.ty))
    }

    fn builtin_function(&self, func: &BuiltinFunction) -> Candidate {
        let params: Vec<(String, &str)> = func
            .params
            .iter()
            .map(|p| (self.signature_type(p.ty, true), p.name.as_str()))
            .collect();
        function_candidate(
            &func.name,
            &self.signature_type(func.return_type, false),
            &params,
        )
    }

    /// Full type spelling including array dimensions
    fn type_display(&self, id: TypeId) -> String {
        self.oracle
            .types()
            .get(id)
            .map(|desc| desc.to_string())
            .unwrap_or_default()
    }

    /// Type spelling used inside function signatures
    fn signature_type(&self, id: TypeId, keep_vectors: bool) -> String {
        match self.oracle.types().get(id) {
            Some(desc) if desc.is_struct() => desc.name.clone(),
            Some(desc) if keep_vectors && desc.is_vector() => desc.to_string(),
            Some(desc) => desc.basic_type_string().to_string(),
            None => String::new(),
        }
    }
}

/// Call snippet with one placeholder per `(type, name)` parameter
fn function_candidate(name: &str, return_type: &str, params: &[(String, &str)]) -> Candidate {
    let args: Vec<String> = params
        .iter()
        .map(|(ty, param)| format!("{} {}", ty, param))
        .collect();
    let placeholders: Vec<String> = args
        .iter()
        .enumerate()
        .map(|(i, arg)| format!("${{{}:{}}}", i + 1, arg))
        .collect();

    Candidate::snippet(
        name,
        CandidateKind::Function,
        format!("{} {}({})", return_type, name, args.join(", ")),
        format!("{}({})", name, placeholders.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::candidates::InsertFormat;
    use shader_lsp_test_utils::MockOracleBuilder;

    fn labels(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_function_candidate_format() {
        let candidate = function_candidate(
            "shade",
            "float",
            &[("Light".to_string(), "light"), ("float".to_string(), "shadow")],
        );
        assert_eq!(candidate.detail, "float shade(Light light, float shadow)");
        assert_eq!(
            candidate.insert_text,
            "shade(${1:Light light}, ${2:float shadow})"
        );
        assert_eq!(candidate.insert_format, InsertFormat::Snippet);

        let candidate = function_candidate("main", "void", &[]);
        assert_eq!(candidate.detail, "void main()");
        assert_eq!(candidate.insert_text, "main()");
    }

    #[test]
    fn test_user_function_strips_mangling() {
        let oracle = MockOracleBuilder::new().with_standard_shader().build();
        let generator = CandidateGenerator::new(&oracle, None);
        let mut out = CandidateSet::new();
        generator.bare_prefix("sha", &mut out);

        assert_eq!(labels(&out.functions), vec!["shade"]);
        // vec3 return type is written as its basic type
        assert_eq!(out.functions[0].detail, "float shade(Light light, float shadow)");
    }

    #[test]
    fn test_builtin_vector_params_keep_full_type() {
        let oracle = MockOracleBuilder::new()
            .with_builtin_function("dot", "float", &[("vec3", "x"), ("vec3", "y")])
            .with_builtin_variable("gl_FragCoord", "vec4")
            .build();
        let generator = CandidateGenerator::new(&oracle, None);
        let mut out = CandidateSet::new();
        generator.bare_prefix("", &mut out);

        let dot = out.builtins.iter().find(|c| c.label == "dot").unwrap();
        assert_eq!(dot.detail, "float dot(vec3 x, vec3 y)");
        assert_eq!(dot.insert_text, "dot(${1:vec3 x}, ${2:vec3 y})");

        let coord = out.builtins.iter().find(|c| c.label == "gl_FragCoord").unwrap();
        assert_eq!(coord.kind, CandidateKind::Variable);
        assert_eq!(coord.detail, "vec4");
        assert_eq!(coord.insert_format, InsertFormat::Plain);
    }

    #[test]
    fn test_vector_components() {
        let oracle = MockOracleBuilder::new().build();
        let generator = CandidateGenerator::new(&oracle, None);
        let mut out = CandidateSet::new();
        generator.vector_components(&TypeDesc::vector(shader_lsp_types::BasicType::Int, 2), &mut out);

        assert_eq!(labels(&out.variables), vec!["x", "y"]);
        assert_eq!(out.variables[1].detail, "int y");
        assert_eq!(out.variables[1].kind, CandidateKind::Field);
    }

    #[test]
    fn test_struct_members_filtered() {
        let oracle = MockOracleBuilder::new().with_standard_shader().build();
        let light = &oracle.user_types()[1];
        let desc = oracle.types().get(light.ty).unwrap();
        let generator = CandidateGenerator::new(&oracle, None);

        let mut out = CandidateSet::new();
        generator.struct_members(desc, "", &mut out);
        assert_eq!(
            labels(&out.variables),
            vec!["position", "color", "intensity", "material", "attenuation"]
        );
        assert_eq!(out.variables[4].detail, "float[4]");

        let mut out = CandidateSet::new();
        generator.struct_members(desc, "Pos", &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_user_types_and_extensions() {
        let oracle = MockOracleBuilder::new()
            .with_standard_shader()
            .with_extension("GL_EXT_ray_query")
            .with_extension("GL_KHR_shader_subgroup_basic")
            .build();
        let generator = CandidateGenerator::new(&oracle, None);

        let mut out = CandidateSet::new();
        generator.bare_prefix("L", &mut out);
        assert_eq!(labels(&out.types), vec!["Light"]);
        assert_eq!(out.types[0].kind, CandidateKind::Struct);

        let mut out = CandidateSet::new();
        generator.bare_prefix("GL_EXT", &mut out);
        assert_eq!(labels(&out.builtins), vec!["GL_EXT_ray_query"]);
        assert_eq!(out.builtins[0].kind, CandidateKind::Text);
    }
}
