// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock oracle implementation for testing
//!
//! Provides an in-memory symbol environment with a builder that accepts GLSL
//! type spellings (`vec3`, `Light[4]`, `float[2][3]`) instead of raw type
//! handles.

use std::collections::HashMap;

use shader_lsp_builtins::{BuiltinRegistry, parse_type_name};
use shader_lsp_oracle::{SymbolSnapshot, TypeOracle};
use shader_lsp_types::{
    BuiltinFunction, BuiltinSymbol, FunctionDef, Member, Parameter, ShaderStage, Symbol,
    TypeArena, TypeDesc, TypeId,
};

/// In-memory mock oracle for testing
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    snapshot: SymbolSnapshot,
}

impl MockOracle {
    /// Create a new empty mock oracle
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &SymbolSnapshot {
        &self.snapshot
    }

    /// Serialize the environment in the snapshot format read by `StaticOracle`
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot).expect("snapshot serializes")
    }
}

impl TypeOracle for MockOracle {
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

/// Builder for creating mock oracles with a fluent API
///
/// Type spellings are resolved against the structs declared so far, then
/// against GLSL builtin type names. Unknown spellings panic.
pub struct MockOracleBuilder {
    snapshot: SymbolSnapshot,
    named: HashMap<String, TypeId>,
}

impl Default for MockOracleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOracleBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            snapshot: SymbolSnapshot::default(),
            named: HashMap::new(),
        }
    }

    /// Add the standard test shader: a `Material` and `Light` struct, light
    /// arrays, a uniform block and a `main` function spanning lines 20..=40
    pub fn with_standard_shader(self) -> Self {
        self.with_struct("Material", &[("vec3", "albedo"), ("float", "roughness")])
            .with_struct(
                "Light",
                &[
                    ("vec3", "position"),
                    ("vec3", "color"),
                    ("float", "intensity"),
                    ("Material", "material"),
                    ("float[4]", "attenuation"),
                ],
            )
            .with_global("sun", "Light")
            .with_global("lights", "Light[4]")
            .with_global("cascades", "Light[2][2]")
            .with_global("weights", "float[2][3]")
            .with_global("viewProj", "mat4")
            .with_global("tint", "vec4")
            .with_anonymous_block(
                "anon@0",
                "Globals",
                &[("float", "exposure"), ("vec3", "eyePosition")],
            )
            .with_function(
                "main(",
                "void",
                &[],
                &[("vec3", "v"), ("Light", "s"), ("int", "index")],
                (20, 40),
            )
            .with_function(
                "shade(struct-Light1;f1;",
                "vec3",
                &[("Light", "light"), ("float", "shadow")],
                &[("vec3", "lit")],
                (5, 15),
            )
    }

    /// Install the default builtin table for `stage`
    pub fn with_standard_builtins(mut self, stage: ShaderStage) -> Self {
        self.snapshot.stage = stage;
        let installed = BuiltinRegistry::new().install(stage, &mut self.snapshot.types);
        self.snapshot.builtins.extend(installed);
        self
    }

    /// Declare a struct type and register it as a user type
    ///
    /// Members are `(type, name)` pairs in declaration order.
    pub fn with_struct(mut self, name: &str, members: &[(&str, &str)]) -> Self {
        let members = self.members(members);
        let id = self.alloc_named(name, TypeDesc::structure(name, members));
        self.snapshot.user_types.push(Symbol::new(name, id));
        self
    }

    /// Declare a `buffer_reference` type named `name` pointing at `referent`
    pub fn with_reference(mut self, name: &str, referent: &str) -> Self {
        let target = self.resolve(referent);
        self.alloc_named(name, TypeDesc::reference(name, target));
        self
    }

    /// Declare an unnamed interface block; `global_name` is the name the front
    /// end reports for its instance, e.g. `anon@0`
    pub fn with_anonymous_block(
        mut self,
        global_name: &str,
        block_name: &str,
        members: &[(&str, &str)],
    ) -> Self {
        let members = self.members(members);
        let id = self.alloc_named(block_name, TypeDesc::block(block_name, members));
        self.snapshot.globals.push(Symbol::new(global_name, id));
        self
    }

    /// Add a global variable
    pub fn with_global(mut self, name: &str, ty: &str) -> Self {
        let id = self.resolve(ty);
        self.snapshot.globals.push(Symbol::new(name, id));
        self
    }

    /// Add a user function with `(type, name)` parameters and locals and an
    /// inclusive body line range
    pub fn with_function(
        mut self,
        name: &str,
        return_type: &str,
        params: &[(&str, &str)],
        locals: &[(&str, &str)],
        lines: (u32, u32),
    ) -> Self {
        let return_type = self.resolve(return_type);
        let params = self.symbols(params);
        let locals = self.symbols(locals);
        self.snapshot.functions.push(
            FunctionDef::new(name, return_type)
                .with_params(params)
                .with_locals(locals)
                .with_lines(lines.0, lines.1),
        );
        self
    }

    /// Add a builtin variable
    pub fn with_builtin_variable(mut self, name: &str, ty: &str) -> Self {
        let ty = self.resolve(ty);
        self.snapshot.builtins.push(BuiltinSymbol::Variable {
            name: name.to_string(),
            ty,
        });
        self
    }

    /// Add a builtin function overload with `(type, name)` parameters
    pub fn with_builtin_function(
        mut self,
        name: &str,
        return_type: &str,
        params: &[(&str, &str)],
    ) -> Self {
        let return_type = self.resolve(return_type);
        let params = params
            .iter()
            .map(|(ty, param)| Parameter::new(*param, self.resolve(ty)))
            .collect();
        self.snapshot
            .builtins
            .push(BuiltinSymbol::Function(BuiltinFunction {
                name: name.to_string(),
                return_type,
                params,
            }));
        self
    }

    /// Add an extension name
    pub fn with_extension(mut self, name: &str) -> Self {
        self.snapshot.extensions.push(name.to_string());
        self
    }

    /// Build the mock oracle
    pub fn build(self) -> MockOracle {
        MockOracle {
            snapshot: self.snapshot,
        }
    }

    fn alloc_named(&mut self, name: &str, desc: TypeDesc) -> TypeId {
        let id = self.snapshot.types.alloc(desc);
        self.named.insert(name.to_string(), id);
        id
    }

    fn members(&mut self, members: &[(&str, &str)]) -> Vec<Member> {
        members
            .iter()
            .map(|(ty, name)| Member::new(*name, self.resolve(ty)))
            .collect()
    }

    fn symbols(&mut self, symbols: &[(&str, &str)]) -> Vec<Symbol> {
        symbols
            .iter()
            .map(|(ty, name)| Symbol::new(*name, self.resolve(ty)))
            .collect()
    }

    /// Allocate (or reuse) the descriptor for a type spelling
    fn resolve(&mut self, spelling: &str) -> TypeId {
        if let Some(id) = self.named.get(spelling) {
            return *id;
        }

        let (base, dims) = match spelling.find('[') {
            Some(open) => (&spelling[..open], &spelling[open..]),
            None => (spelling, ""),
        };

        let desc = match self.named.get(base) {
            Some(id) => {
                let element = self.snapshot.types.get(*id).cloned().expect("named type");
                let sizes = parse_type_name(&format!("float{}", dims))
                    .map(|t| t.array_sizes)
                    .unwrap_or_else(|| panic!("bad array suffix in '{}'", spelling));
                element.with_array(sizes)
            }
            None => parse_type_name(spelling)
                .unwrap_or_else(|| panic!("unknown type spelling '{}'", spelling)),
        };

        self.alloc_named(spelling, desc)
    }
}
