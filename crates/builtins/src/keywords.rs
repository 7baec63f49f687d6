// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! GLSL reserved words offered as keyword completions

/// Reserved words, type keywords and qualifiers, in the order they are offered
pub const KEYWORDS: &[&str] = &[
    "const", "uniform", "tileImageEXT", "buffer", "in", "out", "smooth", "flat", "centroid",
    "invariant", "packed", "resource", "inout", "struct", "break", "continue", "do", "for", "while",
    "switch", "case", "default", "if", "else", "discard", "terminateInvocation", "terminateRayEXT",
    "ignoreIntersectionEXT", "return", "void", "bool", "float", "int", "bvec2", "bvec3", "bvec4",
    "vec2", "vec3", "vec4", "ivec2", "ivec3", "ivec4", "mat2", "mat3", "mat4", "true", "false",
    "layout", "shared", "highp", "mediump", "lowp", "superp", "precision", "mat2x2", "mat2x3",
    "mat2x4", "mat3x2", "mat3x3", "mat3x4", "mat4x2", "mat4x3", "mat4x4", "uint", "uvec2", "uvec3",
    "uvec4", "nonuniformEXT", "demote", "attribute", "varying", "noperspective", "coherent",
    "devicecoherent", "queuefamilycoherent", "workgroupcoherent", "subgroupcoherent",
    "shadercallcoherent", "nonprivate", "restrict", "readonly", "writeonly", "atomic_uint",
    "volatile", "nontemporal", "patch", "sample", "subroutine", "dmat2", "dmat3", "dmat4",
    "dmat2x2", "dmat2x3", "dmat2x4", "dmat3x2", "dmat3x3", "dmat3x4", "dmat4x2", "dmat4x3",
    "dmat4x4", "image1D", "iimage1D", "uimage1D", "image2D", "iimage2D", "uimage2D", "image3D",
    "iimage3D", "uimage3D", "image2DRect", "iimage2DRect", "uimage2DRect", "imageCube",
    "iimageCube", "uimageCube", "imageBuffer", "iimageBuffer", "uimageBuffer", "image1DArray",
    "iimage1DArray", "uimage1DArray", "image2DArray", "iimage2DArray", "uimage2DArray",
    "imageCubeArray", "iimageCubeArray", "uimageCubeArray", "image2DMS", "iimage2DMS", "uimage2DMS",
    "image2DMSArray", "iimage2DMSArray", "uimage2DMSArray", "i64image1D", "u64image1D",
    "i64image2D", "u64image2D", "i64image3D", "u64image3D", "i64image2DRect", "u64image2DRect",
    "i64imageCube", "u64imageCube", "i64imageBuffer", "u64imageBuffer", "i64image1DArray",
    "u64image1DArray", "i64image2DArray", "u64image2DArray", "i64imageCubeArray",
    "u64imageCubeArray", "i64image2DMS", "u64image2DMS", "i64image2DMSArray", "u64image2DMSArray",
    "double", "dvec2", "dvec3", "dvec4", "int64_t", "uint64_t", "i64vec2", "i64vec3", "i64vec4",
    "u64vec2", "u64vec3", "u64vec4", "int8_t", "i8vec2", "i8vec3", "i8vec4", "uint8_t", "u8vec2",
    "u8vec3", "u8vec4", "int16_t", "i16vec2", "i16vec3", "i16vec4", "uint16_t", "u16vec2",
    "u16vec3", "u16vec4", "int32_t", "i32vec2", "i32vec3", "i32vec4", "uint32_t", "u32vec2",
    "u32vec3", "u32vec4", "float16_t", "f16vec2", "f16vec3", "f16vec4", "f16mat2", "f16mat3",
    "f16mat4", "f16mat2x2", "f16mat2x3", "f16mat2x4", "f16mat3x2", "f16mat3x3", "f16mat3x4",
    "f16mat4x2", "f16mat4x3", "f16mat4x4", "bfloat16_t", "bf16vec2", "bf16vec3", "bf16vec4",
    "floate5m2_t", "fe5m2vec2", "fe5m2vec3", "fe5m2vec4", "floate4m3_t", "fe4m3vec2", "fe4m3vec3",
    "fe4m3vec4", "float32_t", "f32vec2", "f32vec3", "f32vec4", "f32mat2", "f32mat3", "f32mat4",
    "f32mat2x2", "f32mat2x3", "f32mat2x4", "f32mat3x2", "f32mat3x3", "f32mat3x4", "f32mat4x2",
    "f32mat4x3", "f32mat4x4", "float64_t", "f64vec2", "f64vec3", "f64vec4", "f64mat2", "f64mat3",
    "f64mat4", "f64mat2x2", "f64mat2x3", "f64mat2x4", "f64mat3x2", "f64mat3x3", "f64mat3x4",
    "f64mat4x2", "f64mat4x3", "f64mat4x4", "spirv_instruction", "spirv_execution_mode",
    "spirv_execution_mode_id", "spirv_decorate", "spirv_decorate_id", "spirv_decorate_string",
    "spirv_type", "spirv_storage_class", "spirv_by_reference", "spirv_literal", "sampler2D",
    "samplerCube", "samplerCubeShadow", "sampler2DArray", "sampler2DArrayShadow", "isampler2D",
    "isampler3D", "isamplerCube", "isampler2DArray", "usampler2D", "usampler3D", "usamplerCube",
    "usampler2DArray", "sampler3D", "sampler2DShadow", "texture2D", "textureCube", "texture2DArray",
    "itexture2D", "itexture3D", "itextureCube", "itexture2DArray", "utexture2D", "utexture3D",
    "utextureCube", "utexture2DArray", "texture3D", "sampler", "samplerShadow", "textureCubeArray",
    "itextureCubeArray", "utextureCubeArray", "samplerCubeArray", "samplerCubeArrayShadow",
    "isamplerCubeArray", "usamplerCubeArray", "sampler1DArrayShadow", "isampler1DArray",
    "usampler1D", "isampler1D", "usampler1DArray", "samplerBuffer", "isampler2DRect",
    "usampler2DRect", "isamplerBuffer", "usamplerBuffer", "sampler2DMS", "isampler2DMS",
    "usampler2DMS", "sampler2DMSArray", "isampler2DMSArray", "usampler2DMSArray", "sampler1D",
    "sampler1DShadow", "sampler2DRect", "sampler2DRectShadow", "sampler1DArray",
    "samplerExternalOES", "__samplerExternal2DY2YEXT", "itexture1DArray", "utexture1D",
    "itexture1D", "utexture1DArray", "textureBuffer", "itexture2DRect", "utexture2DRect",
    "itextureBuffer", "utextureBuffer", "texture2DMS", "itexture2DMS", "utexture2DMS",
    "texture2DMSArray", "itexture2DMSArray", "utexture2DMSArray", "texture1D", "texture2DRect",
    "texture1DArray", "attachmentEXT", "iattachmentEXT", "uattachmentEXT", "subpassInput",
    "subpassInputMS", "isubpassInput", "isubpassInputMS", "usubpassInput", "usubpassInputMS",
    "f16sampler1D", "f16sampler2D", "f16sampler3D", "f16sampler2DRect", "f16samplerCube",
    "f16sampler1DArray", "f16sampler2DArray", "f16samplerCubeArray", "f16samplerBuffer",
    "f16sampler2DMS", "f16sampler2DMSArray", "f16sampler1DShadow", "f16sampler2DShadow",
    "f16sampler2DRectShadow", "f16samplerCubeShadow", "f16sampler1DArrayShadow",
    "f16sampler2DArrayShadow", "f16samplerCubeArrayShadow", "f16image1D", "f16image2D",
    "f16image3D", "f16image2DRect", "f16imageCube", "f16image1DArray", "f16image2DArray",
    "f16imageCubeArray", "f16imageBuffer", "f16image2DMS", "f16image2DMSArray", "f16texture1D",
    "f16texture2D", "f16texture3D", "f16texture2DRect", "f16textureCube", "f16texture1DArray",
    "f16texture2DArray", "f16textureCubeArray", "f16textureBuffer", "f16texture2DMS",
    "f16texture2DMSArray", "f16subpassInput", "f16subpassInputMS", "__explicitInterpAMD",
    "pervertexNV", "pervertexEXT", "precise", "rayPayloadNV", "rayPayloadEXT", "rayPayloadInNV",
    "rayPayloadInEXT", "hitAttributeNV", "hitAttributeEXT", "callableDataNV", "callableDataEXT",
    "callableDataInNV", "callableDataInEXT", "accelerationStructureNV", "accelerationStructureEXT",
    "rayQueryEXT", "perprimitiveNV", "perviewNV", "taskNV", "perprimitiveEXT",
    "taskPayloadSharedEXT", "fcoopmatNV", "icoopmatNV", "ucoopmatNV", "coopmat", "hitObjectNV",
    "hitObjectAttributeNV", "__function", "tensorLayoutNV", "tensorViewNV", "coopvecNV", "require",
    "binding", "include", "extension", "local_size_x_id", "local_size_y_id", "local_size_z_id",
    "constant_id", "push_constant",
];

/// Keywords starting with `prefix`; an empty prefix yields all of them
pub fn keywords_with_prefix<'a>(
    keywords: &'a [&'static str],
    prefix: &'a str,
) -> impl Iterator<Item = &'static str> + 'a {
    keywords.iter().copied().filter(move |kw| kw.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_no_duplicates() {
        let unique: HashSet<_> = KEYWORDS.iter().collect();
        assert_eq!(unique.len(), KEYWORDS.len());
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let hits: Vec<_> = keywords_with_prefix(KEYWORDS, "unif").collect();
        assert_eq!(hits, vec!["uniform"]);

        assert_eq!(keywords_with_prefix(KEYWORDS, "Unif").count(), 0);
        assert_eq!(keywords_with_prefix(KEYWORDS, "").count(), KEYWORDS.len());
    }

    #[test]
    fn test_directive_and_layout_words() {
        for word in [
            "extension", "include", "require", "binding", "push_constant", "constant_id",
            "local_size_x_id", "f64mat3", "bfloat16_t",
        ] {
            assert!(KEYWORDS.contains(&word), "missing {}", word);
        }
    }
}
