// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for snapshot-backed oracles

use std::io::Write;

use shader_lsp_oracle::{BuiltinMatch, LookupScope, OracleError, StaticOracle, TypeOracle};
use shader_lsp_types::ShaderStage;

const LIGHTING_SNAPSHOT: &str = r#"{
    "stage": "fragment",
    "types": [
        { "basic": "float" },
        { "basic": "float", "vector_size": 3 },
        { "basic": "struct", "name": "Light", "members": [
            { "name": "position", "ty": 1 },
            { "name": "intensity", "ty": 0 }
        ] },
        { "basic": "block", "name": "Globals", "members": [
            { "name": "exposure", "ty": 0 }
        ] },
        { "basic": "struct", "name": "Light", "members": [
            { "name": "position", "ty": 1 },
            { "name": "intensity", "ty": 0 }
        ], "array_sizes": [4] },
        { "basic": "void" }
    ],
    "globals": [
        { "name": "lights", "ty": 4 },
        { "name": "lightCount", "ty": 0 },
        { "name": "anon@0", "ty": 3 },
        { "name": "anon@1", "ty": 0 }
    ],
    "user_types": [ { "name": "Light", "ty": 2 } ],
    "functions": [
        {
            "name": "shade(struct-Light-vf3-f11;",
            "return_type": 1,
            "params": [ { "name": "light", "ty": 2 } ],
            "locals": [ { "name": "lit", "ty": 1 }, { "name": "light", "ty": 0 } ],
            "start_line": 10,
            "end_line": 20
        },
        { "name": "main(", "return_type": 5, "start_line": 22, "end_line": 30 }
    ]
}"#;

fn lighting_oracle() -> StaticOracle {
    StaticOracle::from_json(LIGHTING_SNAPSHOT).expect("valid snapshot")
}

#[test]
fn test_enclosing_function_by_line() {
    let oracle = lighting_oracle();

    let shade = oracle.enclosing_function(15).unwrap();
    assert_eq!(shade.display_name(), "shade");
    assert_eq!(oracle.enclosing_function(22).unwrap().display_name(), "main");
    assert!(oracle.enclosing_function(21).is_none());
}

#[test]
fn test_local_scope_prefers_locals_over_params() {
    let oracle = lighting_oracle();
    let shade = oracle.enclosing_function(12).unwrap();

    let light = oracle
        .lookup_symbol(LookupScope::Local(shade), "light")
        .unwrap();
    // The float local shadows the struct parameter
    assert!(oracle.types().get(light.ty).unwrap().is_scalar());

    assert!(oracle.lookup_symbol(LookupScope::Local(shade), "lights").is_none());
    assert!(oracle.lookup_symbol(LookupScope::Global, "lights").is_some());
}

#[test]
fn test_prefix_lookup_order_and_case() {
    let oracle = lighting_oracle();
    let shade = oracle.enclosing_function(12);

    let names: Vec<&str> = oracle
        .lookup_symbols_by_prefix(shade, "li")
        .into_iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["lights", "lightCount", "light", "lit", "light"]);

    assert!(oracle.lookup_symbols_by_prefix(shade, "Li").is_empty());
    assert_eq!(oracle.lookup_symbols_by_prefix(None, "").len(), 4);
}

#[test]
fn test_builtin_lookup_modes() {
    let oracle = lighting_oracle();

    assert_eq!(
        oracle.lookup_builtins("gl_FragCoord", BuiltinMatch::Exact).len(),
        1
    );
    assert!(oracle.lookup_builtins("gl_Frag", BuiltinMatch::Exact).is_empty());

    let prefixed = oracle.lookup_builtins("gl_Frag", BuiltinMatch::Prefix);
    assert!(prefixed.iter().any(|s| s.name() == "gl_FragDepth"));
    assert!(prefixed.iter().all(|s| s.name().starts_with("gl_Frag")));

    // Vertex-only builtins are not installed for a fragment snapshot
    assert!(oracle.lookup_builtins("gl_VertexID", BuiltinMatch::Exact).is_empty());

    assert_eq!(
        oracle.lookup_builtins("", BuiltinMatch::Exact).len(),
        oracle.builtins().len()
    );
}

#[test]
fn test_anonymous_blocks_require_struct_type() {
    let oracle = lighting_oracle();
    let names: Vec<&str> = oracle
        .anonymous_blocks("anon@")
        .into_iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["anon@0"]);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LIGHTING_SNAPSHOT.as_bytes()).unwrap();

    let oracle = StaticOracle::from_path(file.path()).unwrap();
    assert_eq!(oracle.stage(), ShaderStage::Fragment);
    assert_eq!(oracle.user_types().len(), 1);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    match StaticOracle::from_path(&missing) {
        Err(OracleError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected io error, got {:?}", other.map(|_| ())),
    }
}
