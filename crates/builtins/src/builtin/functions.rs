// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin GLSL function overloads

use crate::spec::{BuiltinSpec, func};

/// One overload per `genType` (`float`, `vec2`, `vec3`, `vec4`), every
/// parameter and the result sharing that type
macro_rules! gen_type {
    ($name:literal $(, $param:literal)*) => {
        [
            func($name, "float", &[$(("float", $param)),*]),
            func($name, "vec2", &[$(("vec2", $param)),*]),
            func($name, "vec3", &[$(("vec3", $param)),*]),
            func($name, "vec4", &[$(("vec4", $param)),*]),
        ]
    };
}

/// Like `gen_type!` but returning a scalar `float`
macro_rules! gen_type_to_float {
    ($name:literal $(, $param:literal)*) => {
        [
            func($name, "float", &[$(("float", $param)),*]),
            func($name, "float", &[$(("vec2", $param)),*]),
            func($name, "float", &[$(("vec3", $param)),*]),
            func($name, "float", &[$(("vec4", $param)),*]),
        ]
    };
}

/// Get all builtin functions
pub fn all_functions() -> Vec<BuiltinSpec> {
    let mut functions = Vec::new();

    // Angle and trigonometry
    functions.extend(gen_type!("radians", "degrees"));
    functions.extend(gen_type!("degrees", "radians"));
    functions.extend(gen_type!("sin", "angle"));
    functions.extend(gen_type!("cos", "angle"));
    functions.extend(gen_type!("tan", "angle"));
    functions.extend(gen_type!("asin", "x"));
    functions.extend(gen_type!("acos", "x"));
    functions.extend(gen_type!("atan", "y", "x"));
    functions.extend(gen_type!("atan", "y_over_x"));

    // Exponential
    functions.extend(gen_type!("pow", "x", "y"));
    functions.extend(gen_type!("exp", "x"));
    functions.extend(gen_type!("log", "x"));
    functions.extend(gen_type!("exp2", "x"));
    functions.extend(gen_type!("log2", "x"));
    functions.extend(gen_type!("sqrt", "x"));
    functions.extend(gen_type!("inversesqrt", "x"));

    // Common
    functions.extend(gen_type!("abs", "x"));
    functions.extend(gen_type!("sign", "x"));
    functions.extend(gen_type!("floor", "x"));
    functions.extend(gen_type!("ceil", "x"));
    functions.extend(gen_type!("fract", "x"));
    functions.extend(gen_type!("mod", "x", "y"));
    functions.extend(gen_type!("min", "x", "y"));
    functions.extend(gen_type!("max", "x", "y"));
    functions.extend(gen_type!("clamp", "x", "minVal", "maxVal"));
    functions.extend(gen_type!("mix", "x", "y", "a"));
    functions.extend(gen_type!("step", "edge", "x"));
    functions.extend(gen_type!("smoothstep", "edge0", "edge1", "x"));

    // Geometric
    functions.extend(gen_type_to_float!("length", "x"));
    functions.extend(gen_type_to_float!("distance", "p0", "p1"));
    functions.extend(gen_type_to_float!("dot", "x", "y"));
    functions.extend(gen_type!("normalize", "x"));
    functions.extend(gen_type!("faceforward", "N", "I", "Nref"));
    functions.extend(gen_type!("reflect", "I", "N"));
    functions.push(func("cross", "vec3", &[("vec3", "x"), ("vec3", "y")]));
    functions.push(func(
        "refract",
        "vec3",
        &[("vec3", "I"), ("vec3", "N"), ("float", "eta")],
    ));

    // Matrix
    functions.push(func("transpose", "mat4", &[("mat4", "m")]));
    functions.push(func("inverse", "mat4", &[("mat4", "m")]));
    functions.push(func("determinant", "float", &[("mat4", "m")]));
    functions.push(func(
        "outerProduct",
        "mat4",
        &[("vec4", "c"), ("vec4", "r")],
    ));

    // Derivatives
    functions.extend(gen_type!("dFdx", "p"));
    functions.extend(gen_type!("dFdy", "p"));
    functions.extend(gen_type!("fwidth", "p"));

    // Texture lookup
    functions.push(func(
        "texture",
        "vec4",
        &[("sampler2D", "sampler"), ("vec2", "P")],
    ));
    functions.push(func(
        "texture",
        "vec4",
        &[("sampler3D", "sampler"), ("vec3", "P")],
    ));
    functions.push(func(
        "texture",
        "vec4",
        &[("samplerCube", "sampler"), ("vec3", "P")],
    ));
    functions.push(func(
        "textureLod",
        "vec4",
        &[("sampler2D", "sampler"), ("vec2", "P"), ("float", "lod")],
    ));
    functions.push(func(
        "texelFetch",
        "vec4",
        &[("sampler2D", "sampler"), ("ivec2", "P"), ("int", "lod")],
    ));
    functions.push(func(
        "textureSize",
        "ivec2",
        &[("sampler2D", "sampler"), ("int", "lod")],
    ));

    // Image
    functions.push(func(
        "imageLoad",
        "vec4",
        &[("image2D", "image"), ("ivec2", "P")],
    ));
    functions.push(func(
        "imageStore",
        "void",
        &[("image2D", "image"), ("ivec2", "P"), ("vec4", "data")],
    ));
    functions.push(func("imageSize", "ivec2", &[("image2D", "image")]));

    // Synchronization
    functions.push(func("barrier", "void", &[]));
    functions.push(func("memoryBarrier", "void", &[]));
    functions.push(func("memoryBarrierShared", "void", &[]));
    functions.push(func("groupMemoryBarrier", "void", &[]));

    // Atomics
    functions.push(func(
        "atomicAdd",
        "uint",
        &[("uint", "mem"), ("uint", "data")],
    ));
    functions.push(func(
        "atomicCounterIncrement",
        "uint",
        &[("atomic_uint", "c")],
    ));

    functions
}
