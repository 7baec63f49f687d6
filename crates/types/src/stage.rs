// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Shader stages
//!
//! The stage decides which builtin variables are visible in a document.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline stage a shader source is compiled for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    #[default]
    Fragment,
    Compute,
}

impl ShaderStage {
    /// Infer the stage from a file extension (`.vert`, `.frag`, ...)
    ///
    /// Double extensions such as `shade.frag.glsl` are looked through.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let (_, exts) = file_name.split_once('.')?;
        exts.rsplit('.').find_map(Self::from_extension)
    }

    /// Map a single extension to a stage
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "vert" | "vs" => Some(ShaderStage::Vertex),
            "tesc" => Some(ShaderStage::TessControl),
            "tese" => Some(ShaderStage::TessEvaluation),
            "geom" | "gs" => Some(ShaderStage::Geometry),
            "frag" | "fs" => Some(ShaderStage::Fragment),
            "comp" | "cs" => Some(ShaderStage::Compute),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            ShaderStage::from_path(Path::new("/shaders/blit.vert")),
            Some(ShaderStage::Vertex)
        );
        assert_eq!(
            ShaderStage::from_path(Path::new("lighting.frag.glsl")),
            Some(ShaderStage::Fragment)
        );
        assert_eq!(
            ShaderStage::from_path(Path::new("cull.comp")),
            Some(ShaderStage::Compute)
        );
        assert_eq!(ShaderStage::from_path(Path::new("common.glsl")), None);
        assert_eq!(ShaderStage::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_from_path_prefers_last_extension() {
        assert_eq!(
            ShaderStage::from_path(Path::new("post.vert.frag")),
            Some(ShaderStage::Fragment)
        );
        assert_eq!(
            ShaderStage::from_path(Path::new("shadow.v2.comp.glsl")),
            Some(ShaderStage::Compute)
        );
        assert_eq!(ShaderStage::from_path(Path::new("frag")), None);
    }
}
