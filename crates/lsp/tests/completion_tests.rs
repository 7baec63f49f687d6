// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Completion integration tests
//!
//! These tests verify end-to-end completion over whole documents, from the
//! cursor line through fragment resolution to rendered completion items.

use shader_lsp_server::completion::CompletionEngine;
use shader_lsp_server::config::CompletionConfig;
use shader_lsp_server::document::Document;
use shader_lsp_test_utils::{
    CompletionAssertions, MockOracle, MockOracleBuilder, ShaderFixtures, get_cursor_position,
    remove_cursor_marker,
};
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Position, Url};

/// Line inside the body of `main` in the standard mock shader
const MAIN_LINE: u32 = 25;

/// Helper function to create a document whose line 25 is `line`
fn create_test_document(line: &str) -> Document {
    let uri = Url::parse("file:///test/shade.frag").unwrap();
    let mut lines = vec!["void main() {"];
    lines.extend(std::iter::repeat_n("", MAIN_LINE as usize - 1));
    lines.push(line);
    lines.push("}");
    Document::new(uri, lines.join("\n"), 1)
}

fn standard_oracle() -> MockOracle {
    MockOracleBuilder::new().with_standard_shader().build()
}

/// Complete a fixture line carrying a `|` cursor marker
fn complete_with(oracle: &MockOracle, config: CompletionConfig, input: &str) -> Vec<CompletionItem> {
    let column = get_cursor_position(input).unwrap() as u32;
    let document = create_test_document(&remove_cursor_marker(input));
    CompletionEngine::new(config)
        .complete(oracle, &document, Position::new(MAIN_LINE, column))
        .unwrap()
}

fn complete(oracle: &MockOracle, input: &str) -> Vec<CompletionItem> {
    complete_with(oracle, CompletionConfig::default(), input)
}

fn position_of(items: &[CompletionItem], label: &str) -> usize {
    items
        .iter()
        .position(|i| i.label == label)
        .unwrap_or_else(|| panic!("Missing '{}'", label))
}

// =============================================================================
// Member access
// =============================================================================

#[test]
fn test_struct_trailing_dot() {
    let items = complete(&standard_oracle(), ShaderFixtures::struct_dot());

    CompletionAssertions::assert_labels(
        &items,
        &["position", "color", "intensity", "material", "attenuation"],
    );
    CompletionAssertions::assert_contains(&items, "position", CompletionItemKind::FIELD);
    assert_eq!(items[4].detail.as_deref(), Some("float[4]"));
}

#[test]
fn test_struct_field_prefix() {
    let items = complete(&standard_oracle(), ShaderFixtures::struct_field_prefix());
    CompletionAssertions::assert_labels(&items, &["position"]);
}

#[test]
fn test_field_prefix_is_case_sensitive() {
    let items = complete(&standard_oracle(), "    vec3 c = s.Pos|");
    assert!(items.is_empty());
}

#[test]
fn test_vector_trailing_dot() {
    let items = complete(&standard_oracle(), ShaderFixtures::vector_dot());

    CompletionAssertions::assert_labels(&items, &["x", "y", "z"]);
    assert_eq!(items[0].detail.as_deref(), Some("float x"));
}

#[test]
fn test_vector_component_is_not_filtered() {
    let items = complete(&standard_oracle(), "    float f = v.x|");
    assert!(items.is_empty());
}

#[test]
fn test_nested_struct() {
    let items = complete(&standard_oracle(), ShaderFixtures::nested_struct_dot());
    CompletionAssertions::assert_labels(&items, &["albedo", "roughness"]);
}

// =============================================================================
// Subscripts
// =============================================================================

#[test]
fn test_array_element_members() {
    let items = complete(&standard_oracle(), ShaderFixtures::array_element_dot());
    assert_eq!(items.len(), 5);
    CompletionAssertions::assert_contains(&items, "material", CompletionItemKind::FIELD);
}

#[test]
fn test_all_dimensions_subscripted() {
    let items = complete(&standard_oracle(), ShaderFixtures::grid_element_dot());
    assert_eq!(items.len(), 5);
    CompletionAssertions::assert_contains(&items, "intensity", CompletionItemKind::FIELD);
}

#[test]
fn test_partially_subscripted_array_has_no_members() {
    let items = complete(&standard_oracle(), "    vec3 p = cascades[0].|");
    assert!(items.is_empty());
}

#[test]
fn test_scalar_array_element_has_no_members() {
    let items = complete(&standard_oracle(), "    float w = weights[0][1].|");
    assert!(items.is_empty());
}

#[test]
fn test_dimension_overflow() {
    let items = complete(&standard_oracle(), ShaderFixtures::overflowing_subscript());
    assert!(items.is_empty());
}

#[test]
fn test_unterminated_subscript_keeps_sibling_fragments() {
    let items = complete(&standard_oracle(), ShaderFixtures::unterminated_subscript());

    // `a[b` itself contributes nothing; the `b` fragment still completes
    CompletionAssertions::assert_contains(&items, "bool", CompletionItemKind::KEYWORD);
    CompletionAssertions::assert_contains(&items, "break", CompletionItemKind::KEYWORD);
    assert!(items.iter().all(|i| i.label.starts_with('b')));
}

// =============================================================================
// Bare identifiers
// =============================================================================

#[test]
fn test_bare_prefix() {
    let items = complete(&standard_oracle(), ShaderFixtures::bare_prefix());

    CompletionAssertions::assert_contains(&items, "lights", CompletionItemKind::VARIABLE);
    let lights = &items[position_of(&items, "lights")];
    assert_eq!(lights.detail.as_deref(), Some("Light[4]"));
    // Type names are matched case-sensitively
    CompletionAssertions::assert_absent(&items, "Light");
}

#[test]
fn test_user_type_prefix() {
    let items = complete(&standard_oracle(), "    Li|");
    CompletionAssertions::assert_contains(&items, "Light", CompletionItemKind::STRUCT);
    CompletionAssertions::assert_absent(&items, "lights");
}

#[test]
fn test_locals_only_inside_their_function() {
    let oracle = standard_oracle();
    let items = complete(&oracle, "    li|");
    CompletionAssertions::assert_absent(&items, "lit");

    // Line 10 lies inside `shade`
    let uri = Url::parse("file:///test/shade.frag").unwrap();
    let mut lines = vec![""; 10];
    lines.push("    li");
    let document = Document::new(uri, lines.join("\n"), 1);
    let items = CompletionEngine::default()
        .complete(&oracle, &document, Position::new(10, 6))
        .unwrap();

    CompletionAssertions::assert_contains(&items, "lights", CompletionItemKind::VARIABLE);
    CompletionAssertions::assert_contains(&items, "light", CompletionItemKind::VARIABLE);
    CompletionAssertions::assert_contains(&items, "lit", CompletionItemKind::VARIABLE);
    // Globals first, then parameters, then locals
    assert!(position_of(&items, "lights") < position_of(&items, "light"));
    assert!(position_of(&items, "light") < position_of(&items, "lit"));
}

#[test]
fn test_user_function_snippet() {
    let items = complete(&standard_oracle(), "    vec3 c = sha|");

    CompletionAssertions::assert_contains(&items, "shade", CompletionItemKind::FUNCTION);
    CompletionAssertions::assert_snippet(
        &items,
        "shade",
        "shade(${1:Light light}, ${2:float shadow})",
    );
}

#[test]
fn test_builtin_function_snippet() {
    let oracle = MockOracleBuilder::new()
        .with_standard_shader()
        .with_builtin_function("normalize", "vec3", &[("vec3", "v")])
        .build();
    let items = complete(&oracle, "    vec3 n = normalize|");

    CompletionAssertions::assert_snippet(&items, "normalize", "normalize(${1:vec3 v})");
    let normalize = &items[position_of(&items, "normalize")];
    assert_eq!(normalize.detail.as_deref(), Some("float normalize(vec3 v)"));
}

#[test]
fn test_anonymous_block_member() {
    let items = complete(&standard_oracle(), ShaderFixtures::anonymous_member());
    CompletionAssertions::assert_labels(&items, &["exposure"]);
}

#[test]
fn test_anonymous_block_member_chain() {
    let items = complete(&standard_oracle(), "    vec3 e = eyePosition.|");
    CompletionAssertions::assert_labels(&items, &["x", "y", "z"]);
}

#[test]
fn test_extension_directive() {
    let oracle = MockOracleBuilder::new()
        .with_standard_shader()
        .with_extension("GL_EXT_ray_query")
        .with_extension("GL_EXT_ray_tracing")
        .with_extension("GL_KHR_shader_subgroup_basic")
        .build();
    let items = complete(&oracle, ShaderFixtures::extension_directive());

    CompletionAssertions::assert_labels(&items, &["GL_EXT_ray_query", "GL_EXT_ray_tracing"]);
    CompletionAssertions::assert_contains(&items, "GL_EXT_ray_query", CompletionItemKind::TEXT);
}

// =============================================================================
// Ordering and limits
// =============================================================================

#[test]
fn test_category_order() {
    let oracle = MockOracleBuilder::new()
        .with_standard_shader()
        .with_builtin_function("sin", "float", &[("float", "angle")])
        .build();
    let items = complete(&oracle, "    s|");

    let sun = position_of(&items, "sun");
    let local = position_of(&items, "s");
    let shade = position_of(&items, "shade");
    let keyword = position_of(&items, "struct");
    let builtin = position_of(&items, "sin");

    assert!(sun < shade && local < shade);
    assert!(shade < keyword);
    assert!(keyword < builtin);

    let sort_texts: Vec<&str> = items
        .iter()
        .filter_map(|i| i.sort_text.as_deref())
        .collect();
    let mut sorted = sort_texts.clone();
    sorted.sort();
    assert_eq!(sort_texts, sorted);
}

#[test]
fn test_result_cap() {
    let mut builder = MockOracleBuilder::new();
    for i in 0..250 {
        builder = builder.with_global(&format!("g{}", i), "float");
    }
    let oracle = builder.build();

    let items = complete(&oracle, "    g|");
    assert_eq!(items.len(), 200);
    assert_eq!(items[0].label, "g0");
    assert_eq!(items[199].label, "g199");

    let items = complete_with(&oracle, CompletionConfig::default().with_max_items(10), "    g|");
    assert_eq!(items.len(), 10);
}

#[test]
fn test_duplicates_across_fragments_are_merged() {
    // "    s." and "s." resolve identically
    let items = complete(&standard_oracle(), "    s.|");
    assert_eq!(items.len(), 5);
}

#[test]
fn test_idempotence() {
    let oracle = standard_oracle();
    let first = complete(&oracle, "    x = s|");
    let second = complete(&oracle, "    x = s|");
    assert_eq!(first, second);
}

#[test]
fn test_cursor_past_line_end() {
    let oracle = standard_oracle();
    let document = create_test_document("s.");
    let items = CompletionEngine::default()
        .complete(&oracle, &document, Position::new(MAIN_LINE, 40))
        .unwrap();
    assert!(items.is_empty());
}
