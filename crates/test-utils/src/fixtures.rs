// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample shader lines
//!
//! Lines carry a `|` cursor marker; use [`get_cursor_position`] and
//! [`remove_cursor_marker`] to split them.

/// Sample cursor lines written against the standard mock shader
pub struct ShaderFixtures;

impl ShaderFixtures {
    // ===== Member access =====

    /// Trailing dot on a struct local
    pub const fn struct_dot() -> &'static str {
        "    vec3 c = s.|"
    }

    /// Struct field prefix
    pub const fn struct_field_prefix() -> &'static str {
        "    vec3 c = s.pos|"
    }

    /// Trailing dot on a vector local
    pub const fn vector_dot() -> &'static str {
        "    float f = v.|"
    }

    /// Nested struct member
    pub const fn nested_struct_dot() -> &'static str {
        "    vec3 a = sun.material.|"
    }

    // ===== Subscripts =====

    /// Fully subscripted struct array
    pub const fn array_element_dot() -> &'static str {
        "    float i = lights[index].|"
    }

    /// Two-dimensional struct array
    pub const fn grid_element_dot() -> &'static str {
        "    vec3 p = cascades[0][1].|"
    }

    /// One subscript too many
    pub const fn overflowing_subscript() -> &'static str {
        "    float w = weights[0][1][2].|"
    }

    /// Unterminated subscript
    pub const fn unterminated_subscript() -> &'static str {
        "    a[b|"
    }

    // ===== Bare identifiers =====

    /// Bare prefix inside `main`
    pub const fn bare_prefix() -> &'static str {
        "    li|"
    }

    /// Anonymous block member
    pub const fn anonymous_member() -> &'static str {
        "    float e = exp|"
    }

    /// Extension directive
    pub const fn extension_directive() -> &'static str {
        "#extension GL_EXT_ray|"
    }
}

/// Cursor column marked by `|`
pub fn get_cursor_position(input: &str) -> Option<usize> {
    input.find('|')
}

/// Remove the cursor marker
pub fn remove_cursor_marker(input: &str) -> String {
    input.replace('|', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_marker() {
        let line = ShaderFixtures::struct_dot();
        assert_eq!(get_cursor_position(line), Some(15));
        assert_eq!(remove_cursor_marker(line), "    vec3 c = s.");
    }
}
