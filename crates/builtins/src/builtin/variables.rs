// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin `gl_*` variables

use crate::spec::{BuiltinSpec, stage_var, var};
use shader_lsp_types::ShaderStage::{
    Compute, Fragment, Geometry, TessControl, TessEvaluation, Vertex,
};

/// Get all builtin variables
pub fn all_variables() -> Vec<BuiltinSpec> {
    vec![
        // Vertex processing outputs
        stage_var(
            "gl_Position",
            "vec4",
            &[Vertex, TessControl, TessEvaluation, Geometry],
        ),
        stage_var(
            "gl_PointSize",
            "float",
            &[Vertex, TessControl, TessEvaluation, Geometry],
        ),
        stage_var(
            "gl_ClipDistance",
            "float[]",
            &[Vertex, TessControl, TessEvaluation, Geometry, Fragment],
        ),
        // Vertex inputs
        stage_var("gl_VertexID", "int", &[Vertex]),
        stage_var("gl_InstanceID", "int", &[Vertex]),
        stage_var("gl_VertexIndex", "int", &[Vertex]),
        stage_var("gl_InstanceIndex", "int", &[Vertex]),
        stage_var("gl_BaseVertex", "int", &[Vertex]),
        stage_var("gl_BaseInstance", "int", &[Vertex]),
        stage_var("gl_DrawID", "int", &[Vertex]),
        // Tessellation and geometry
        stage_var("gl_PatchVerticesIn", "int", &[TessControl, TessEvaluation]),
        stage_var("gl_InvocationID", "int", &[TessControl, Geometry]),
        stage_var("gl_TessLevelOuter", "float[4]", &[TessControl, TessEvaluation]),
        stage_var("gl_TessLevelInner", "float[2]", &[TessControl, TessEvaluation]),
        stage_var("gl_TessCoord", "vec3", &[TessEvaluation]),
        stage_var("gl_PrimitiveIDIn", "int", &[Geometry]),
        stage_var("gl_PrimitiveID", "int", &[TessControl, TessEvaluation, Geometry, Fragment]),
        stage_var("gl_Layer", "int", &[Geometry, Fragment]),
        stage_var("gl_ViewportIndex", "int", &[Geometry, Fragment]),
        // Fragment
        stage_var("gl_FragCoord", "vec4", &[Fragment]),
        stage_var("gl_FrontFacing", "bool", &[Fragment]),
        stage_var("gl_PointCoord", "vec2", &[Fragment]),
        stage_var("gl_FragDepth", "float", &[Fragment]),
        stage_var("gl_SampleID", "int", &[Fragment]),
        stage_var("gl_SamplePosition", "vec2", &[Fragment]),
        stage_var("gl_SampleMask", "int[]", &[Fragment]),
        stage_var("gl_SampleMaskIn", "int[]", &[Fragment]),
        stage_var("gl_HelperInvocation", "bool", &[Fragment]),
        // Compute
        stage_var("gl_GlobalInvocationID", "uvec3", &[Compute]),
        stage_var("gl_LocalInvocationID", "uvec3", &[Compute]),
        stage_var("gl_WorkGroupID", "uvec3", &[Compute]),
        stage_var("gl_NumWorkGroups", "uvec3", &[Compute]),
        stage_var("gl_WorkGroupSize", "uvec3", &[Compute]),
        stage_var("gl_LocalInvocationIndex", "uint", &[Compute]),
        // Every stage
        var("gl_ViewIndex", "int"),
        var("gl_MaxDrawBuffers", "int"),
        var("gl_MaxTextureImageUnits", "int"),
        var("gl_MaxVertexAttribs", "int"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_type_name;

    #[test]
    fn test_every_variable_type_parses() {
        for spec in all_variables() {
            if let BuiltinSpec::Variable { name, ty, .. } = spec {
                assert!(parse_type_name(ty).is_some(), "{name}: {ty}");
            }
        }
    }

    #[test]
    fn test_compute_ids_only_in_compute() {
        let global = all_variables()
            .into_iter()
            .find(|s| s.name() == "gl_GlobalInvocationID")
            .unwrap();
        assert!(global.visible_in(Compute));
        assert!(!global.visible_in(Fragment));
    }
}
