// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Extension names offered after `#extension`

/// Extension names the front end recognizes
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "GL_ARB_compute_shader",
    "GL_ARB_derivative_control",
    "GL_ARB_enhanced_layouts",
    "GL_ARB_explicit_attrib_location",
    "GL_ARB_explicit_uniform_location",
    "GL_ARB_gpu_shader5",
    "GL_ARB_gpu_shader_fp64",
    "GL_ARB_gpu_shader_int64",
    "GL_ARB_shader_atomic_counters",
    "GL_ARB_shader_ballot",
    "GL_ARB_shader_draw_parameters",
    "GL_ARB_shader_group_vote",
    "GL_ARB_shader_image_load_store",
    "GL_ARB_shader_storage_buffer_object",
    "GL_ARB_shader_texture_lod",
    "GL_ARB_shading_language_420pack",
    "GL_ARB_sparse_texture2",
    "GL_ARB_texture_gather",
    "GL_ARB_uniform_buffer_object",
    "GL_EXT_buffer_reference",
    "GL_EXT_buffer_reference2",
    "GL_EXT_control_flow_attributes",
    "GL_EXT_debug_printf",
    "GL_EXT_demote_to_helper_invocation",
    "GL_EXT_fragment_shader_barycentric",
    "GL_EXT_mesh_shader",
    "GL_EXT_multiview",
    "GL_EXT_nonuniform_qualifier",
    "GL_EXT_ray_query",
    "GL_EXT_ray_tracing",
    "GL_EXT_samplerless_texture_functions",
    "GL_EXT_scalar_block_layout",
    "GL_EXT_shader_16bit_storage",
    "GL_EXT_shader_8bit_storage",
    "GL_EXT_shader_atomic_float",
    "GL_EXT_shader_explicit_arithmetic_types",
    "GL_EXT_shader_image_load_formatted",
    "GL_EXT_spirv_intrinsics",
    "GL_EXT_texture_shadow_lod",
    "GL_GOOGLE_cpp_style_line_directive",
    "GL_GOOGLE_include_directive",
    "GL_KHR_memory_scope_semantics",
    "GL_KHR_shader_subgroup_arithmetic",
    "GL_KHR_shader_subgroup_ballot",
    "GL_KHR_shader_subgroup_basic",
    "GL_KHR_shader_subgroup_clustered",
    "GL_KHR_shader_subgroup_quad",
    "GL_KHR_shader_subgroup_shuffle",
    "GL_KHR_shader_subgroup_vote",
    "GL_OES_EGL_image_external",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_names_are_sorted_and_prefixed() {
        assert!(KNOWN_EXTENSIONS.windows(2).all(|w| w[0] < w[1]));
        assert!(KNOWN_EXTENSIONS.iter().all(|e| e.starts_with("GL_")));
    }
}
