// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Front end seam
//!
//! This module connects the server to whatever compiles shader sources and
//! reports their symbols.
//!
//! The snapshot front end is responsible for:
//! - Locating the JSON symbol snapshot of a document
//! - Reusing loaded snapshots across completion requests until the file
//!   changes on disk
//! - Falling back to a builtin-only environment when no snapshot exists
//!
//! A snapshot is looked up at the configured path first, then next to the
//! shader as `<file>.symbols.json`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use tower_lsp::lsp_types::Url;
use tracing::{debug, info};

use shader_lsp_oracle::{OracleError, OracleResult, StaticOracle, TypeOracle};
use shader_lsp_types::ShaderStage;

/// Suffix of sidecar snapshot files
pub const SNAPSHOT_SUFFIX: &str = ".symbols.json";

/// Source of symbol environments for documents
#[async_trait]
pub trait FrontEnd: Send + Sync {
    /// Produce the symbol environment for the document at `uri`
    async fn analyze(&self, uri: &Url, text: &str) -> OracleResult<Arc<dyn TypeOracle>>;
}

/// Front end backed by JSON snapshots written by an external compiler
pub struct SnapshotFrontEnd {
    /// Configured snapshot shared by every document
    snapshot: Option<PathBuf>,

    /// Loaded snapshots (keyed by path) with the modification time they were
    /// loaded at
    cache: Mutex<HashMap<PathBuf, (Option<SystemTime>, Arc<StaticOracle>)>>,

    /// Builtin-only environments (keyed by stage)
    fallbacks: Mutex<HashMap<ShaderStage, Arc<StaticOracle>>>,
}

impl SnapshotFrontEnd {
    /// Create a front end reading `snapshot` for every document, or sidecar
    /// snapshots when `None`
    pub fn new(snapshot: Option<PathBuf>) -> Self {
        Self {
            snapshot,
            cache: Mutex::new(HashMap::new()),
            fallbacks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of snapshots currently cached
    pub async fn cached_count(&self) -> usize {
        self.cache.lock().await.len()
    }

    /// Snapshot file for a document, if one exists
    async fn locate(&self, uri: &Url) -> Option<PathBuf> {
        if let Some(path) = &self.snapshot {
            return Some(path.clone());
        }

        let source = uri.to_file_path().ok()?;
        let mut sidecar = source.into_os_string();
        sidecar.push(SNAPSHOT_SUFFIX);
        let sidecar = PathBuf::from(sidecar);

        let metadata = tokio::fs::metadata(&sidecar).await.ok()?;
        metadata.is_file().then_some(sidecar)
    }

    /// Get or load the snapshot at `path`
    ///
    /// The cache lock is not held while the file is read.
    async fn load(&self, path: &Path) -> OracleResult<Arc<StaticOracle>> {
        let io_error = |source| OracleError::Io {
            path: path.to_path_buf(),
            source,
        };
        let modified = tokio::fs::metadata(path)
            .await
            .map_err(io_error)?
            .modified()
            .ok();

        // Check if we already have a current snapshot for this path
        if let Some((loaded_at, oracle)) = self.cache.lock().await.get(path) {
            if *loaded_at == modified {
                return Ok(oracle.clone());
            }
        }

        let json = tokio::fs::read_to_string(path).await.map_err(io_error)?;
        let oracle = Arc::new(StaticOracle::from_json(&json)?);
        info!(
            path = %path.display(),
            globals = oracle.globals().len(),
            "Loaded symbol snapshot"
        );

        self.cache
            .lock()
            .await
            .insert(path.to_path_buf(), (modified, oracle.clone()));
        Ok(oracle)
    }

    /// Get or build the builtin-only environment for `stage`
    async fn fallback(&self, stage: ShaderStage) -> Arc<StaticOracle> {
        let mut fallbacks = self.fallbacks.lock().await;
        fallbacks
            .entry(stage)
            .or_insert_with(|| Arc::new(StaticOracle::builtin_only(stage)))
            .clone()
    }
}

impl Default for SnapshotFrontEnd {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl FrontEnd for SnapshotFrontEnd {
    async fn analyze(&self, uri: &Url, _text: &str) -> OracleResult<Arc<dyn TypeOracle>> {
        match self.locate(uri).await {
            Some(path) => Ok(self.load(&path).await? as Arc<dyn TypeOracle>),
            None => {
                let stage = ShaderStage::from_path(Path::new(uri.path())).unwrap_or_default();
                debug!(%uri, ?stage, "No symbol snapshot, using builtins only");
                Ok(self.fallback(stage).await as Arc<dyn TypeOracle>)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "stage": "vertex",
        "types": [ { "basic": "float", "vector_size": 3 } ],
        "globals": [ { "name": "normal", "ty": 0 } ]
    }"#;

    fn write_snapshot(path: &Path, json: &str) {
        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn test_configured_snapshot_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.json");
        write_snapshot(&path, SNAPSHOT);

        let front_end = SnapshotFrontEnd::new(Some(path.clone()));
        let uri = Url::parse("file:///any/shade.frag").unwrap();

        let first = front_end.analyze(&uri, "").await.unwrap();
        assert_eq!(first.globals().len(), 1);
        let _second = front_end.analyze(&uri, "").await.unwrap();
        assert_eq!(front_end.cached_count().await, 1);
    }

    #[tokio::test]
    async fn test_sidecar_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let shader = dir.path().join("shade.vert");
        write_snapshot(&dir.path().join("shade.vert.symbols.json"), SNAPSHOT);

        let front_end = SnapshotFrontEnd::default();
        let uri = Url::from_file_path(&shader).unwrap();
        let oracle = front_end.analyze(&uri, "").await.unwrap();
        assert_eq!(oracle.globals()[0].name, "normal");
    }

    #[tokio::test]
    async fn test_fallback_is_builtin_only() {
        let front_end = SnapshotFrontEnd::default();
        let uri = Url::parse("file:///nowhere/particles.comp").unwrap();

        let oracle = front_end.analyze(&uri, "").await.unwrap();
        assert!(oracle.globals().is_empty());
        assert!(oracle.builtins().iter().any(|b| b.name() == "gl_GlobalInvocationID"));
        assert_eq!(front_end.cached_count().await, 0);
    }

    #[tokio::test]
    async fn test_changed_snapshot_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.json");
        write_snapshot(&path, SNAPSHOT);

        let front_end = SnapshotFrontEnd::new(Some(path.clone()));
        let uri = Url::parse("file:///shade.frag").unwrap();
        let first = front_end.analyze(&uri, "").await.unwrap();

        let reloaded = SNAPSHOT.replace("normal", "tangent");
        write_snapshot(&path, &reloaded);
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + std::time::Duration::from_secs(5))
            .unwrap();

        let second = front_end.analyze(&uri, "").await.unwrap();
        assert_eq!(first.globals()[0].name, "normal");
        assert_eq!(second.globals()[0].name, "tangent");
        assert_eq!(front_end.cached_count().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_sidecar_loads() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(&dir.path().join("a.vert.symbols.json"), SNAPSHOT);
        write_snapshot(
            &dir.path().join("b.vert.symbols.json"),
            &SNAPSHOT.replace("normal", "tangent"),
        );

        let front_end = SnapshotFrontEnd::default();
        let a = Url::from_file_path(dir.path().join("a.vert")).unwrap();
        let b = Url::from_file_path(dir.path().join("b.vert")).unwrap();

        let (a, b) = tokio::join!(front_end.analyze(&a, ""), front_end.analyze(&b, ""));
        assert_eq!(a.unwrap().globals()[0].name, "normal");
        assert_eq!(b.unwrap().globals()[0].name, "tangent");
        assert_eq!(front_end.cached_count().await, 2);
    }

    #[tokio::test]
    async fn test_missing_configured_snapshot_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let front_end = SnapshotFrontEnd::new(Some(dir.path().join("missing.json")));

        let uri = Url::parse("file:///shade.frag").unwrap();
        let result = front_end.analyze(&uri, "").await;
        assert!(matches!(result, Err(OracleError::Io { .. })));
    }
}
