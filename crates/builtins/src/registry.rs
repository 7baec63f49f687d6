// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use crate::builtin;
use crate::spec::{BuiltinSpec, parse_type_name};
use shader_lsp_types::{BuiltinFunction, BuiltinSymbol, Parameter, ShaderStage, TypeArena, TypeId};
use std::collections::HashMap;

/// Registry of builtin GLSL variables and functions
///
/// The registry only holds GLSL type spellings. [`install`](Self::install)
/// allocates the matching descriptors in a document's arena so builtin
/// symbols can be resolved through the same [`TypeId`]s as user symbols.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    specs: Vec<BuiltinSpec>,
}

impl BuiltinRegistry {
    /// Create a registry with all builtin variables and functions loaded
    pub fn new() -> Self {
        let mut specs = builtin::variables::all_variables();
        specs.extend(builtin::functions::all_functions());
        Self { specs }
    }

    /// Create a registry from an explicit list of entries
    pub fn from_specs(specs: Vec<BuiltinSpec>) -> Self {
        Self { specs }
    }

    /// All entries, in declaration order
    pub fn specs(&self) -> &[BuiltinSpec] {
        &self.specs
    }

    /// Entries visible in `stage`
    pub fn visible(&self, stage: ShaderStage) -> impl Iterator<Item = &BuiltinSpec> {
        self.specs.iter().filter(move |spec| spec.visible_in(stage))
    }

    /// Check whether any entry is named `name`
    pub fn contains(&self, name: &str) -> bool {
        self.specs.iter().any(|spec| spec.name() == name)
    }

    /// Allocate descriptors for every builtin visible in `stage` and return
    /// the resulting symbols
    ///
    /// Each distinct type spelling is allocated once. Entries whose type
    /// spelling does not parse are skipped.
    pub fn install(&self, stage: ShaderStage, arena: &mut TypeArena) -> Vec<BuiltinSymbol> {
        let mut interned: HashMap<&'static str, TypeId> = HashMap::new();
        let mut intern = |spelling: &'static str, arena: &mut TypeArena| -> Option<TypeId> {
            if let Some(id) = interned.get(spelling) {
                return Some(*id);
            }
            let id = arena.alloc(parse_type_name(spelling)?);
            interned.insert(spelling, id);
            Some(id)
        };

        let mut symbols = Vec::new();
        for spec in self.visible(stage) {
            match *spec {
                BuiltinSpec::Variable { name, ty, .. } => {
                    if let Some(ty) = intern(ty, arena) {
                        symbols.push(BuiltinSymbol::Variable {
                            name: name.to_string(),
                            ty,
                        });
                    }
                }
                BuiltinSpec::Function { name, ret, params } => {
                    let Some(return_type) = intern(ret, arena) else {
                        continue;
                    };
                    let params: Option<Vec<Parameter>> = params
                        .iter()
                        .map(|&(ty, param)| intern(ty, arena).map(|ty| Parameter::new(param, ty)))
                        .collect();
                    if let Some(params) = params {
                        symbols.push(BuiltinSymbol::Function(BuiltinFunction {
                            name: name.to_string(),
                            return_type,
                            params,
                        }));
                    }
                }
            }
        }
        symbols
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{func, stage_var};

    #[test]
    fn test_new_registry() {
        let registry = BuiltinRegistry::new();
        assert!(registry.contains("gl_Position"));
        assert!(registry.contains("normalize"));
        assert!(!registry.contains("gl_Nonexistent"));
    }

    #[test]
    fn test_install_filters_by_stage() {
        let registry = BuiltinRegistry::new();

        let mut arena = TypeArena::new();
        let vertex = registry.install(ShaderStage::Vertex, &mut arena);
        assert!(vertex.iter().any(|s| s.name() == "gl_Position"));
        assert!(!vertex.iter().any(|s| s.name() == "gl_FragCoord"));

        let mut arena = TypeArena::new();
        let compute = registry.install(ShaderStage::Compute, &mut arena);
        let id = compute
            .iter()
            .find(|s| s.name() == "gl_GlobalInvocationID")
            .and_then(|s| s.variable_type())
            .unwrap();
        assert_eq!(arena.get(id).unwrap().type_name(), "uvec3");
    }

    #[test]
    fn test_install_keeps_image_functions() {
        let registry = BuiltinRegistry::new();
        let mut arena = TypeArena::new();
        let compute = registry.install(ShaderStage::Compute, &mut arena);

        for name in ["imageLoad", "imageStore", "imageSize"] {
            assert!(compute.iter().any(|s| s.name() == name), "missing {}", name);
        }
    }

    #[test]
    fn test_install_interns_type_spellings() {
        let registry = BuiltinRegistry::from_specs(vec![
            stage_var("gl_FragCoord", "vec4", &[ShaderStage::Fragment]),
            func("texture", "vec4", &[("sampler2D", "sampler"), ("vec2", "P")]),
        ]);

        let mut arena = TypeArena::new();
        let symbols = registry.install(ShaderStage::Fragment, &mut arena);

        assert_eq!(symbols.len(), 2);
        // vec4, sampler2D, vec2
        assert_eq!(arena.len(), 3);
        match &symbols[1] {
            BuiltinSymbol::Function(f) => {
                assert_eq!(Some(f.return_type), symbols[0].variable_type());
                assert_eq!(f.params[1].name, "P");
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_install_skips_unknown_spellings() {
        let registry = BuiltinRegistry::from_specs(vec![
            stage_var("gl_Mystery", "quaternion", &[]),
            func("broken", "vec4", &[("quaternion", "q")]),
        ]);

        let mut arena = TypeArena::new();
        assert!(registry.install(ShaderStage::Vertex, &mut arena).is_empty());
    }
}
