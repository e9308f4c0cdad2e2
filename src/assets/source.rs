use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{BannerError, BannerResult};

/// Resolves asset references (logo refs, base image refs) to bytes.
///
/// Implementations are constructed once at startup and shared by reference across render
/// workers, so they must be `Send + Sync`.
pub trait AssetSource: Send + Sync {
    /// Load the bytes behind `reference`. A reference that does not exist is
    /// [`BannerError::NotFound`].
    fn load(&self, reference: &str) -> BannerResult<Vec<u8>>;
}

impl<T: AssetSource + ?Sized> AssetSource for Arc<T> {
    fn load(&self, reference: &str) -> BannerResult<Vec<u8>> {
        (**self).load(reference)
    }
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn load(&self, reference: &str) -> BannerResult<Vec<u8>> {
        (**self).load(reference)
    }
}

/// Reads assets from files below a root directory.
#[derive(Clone, Debug)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    /// Serve files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for FsAssetSource {
    fn load(&self, reference: &str) -> BannerResult<Vec<u8>> {
        let norm = normalize_rel_path(reference)?;
        let path = self.root.join(Path::new(&norm));
        if !path.is_file() {
            return Err(BannerError::not_found(format!(
                "asset '{}'",
                path.display()
            )));
        }
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(BannerError::from)
    }
}

/// In-memory asset map keyed by normalized reference.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetSource {
    entries: HashMap<String, Arc<Vec<u8>>>,
}

impl MemoryAssetSource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `reference`, replacing any previous entry.
    pub fn insert(&mut self, reference: &str, bytes: Vec<u8>) -> BannerResult<()> {
        let norm = normalize_rel_path(reference)?;
        self.entries.insert(norm, Arc::new(bytes));
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, reference: &str, bytes: Vec<u8>) -> BannerResult<Self> {
        self.insert(reference, bytes)?;
        Ok(self)
    }

    /// Number of stored assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetSource for MemoryAssetSource {
    fn load(&self, reference: &str) -> BannerResult<Vec<u8>> {
        let norm = normalize_rel_path(reference)?;
        self.entries
            .get(&norm)
            .map(|b| b.as_ref().clone())
            .ok_or_else(|| BannerError::not_found(format!("asset '{norm}'")))
    }
}

/// Normalize and validate a relative asset reference.
///
/// The result uses `/` separators, drops `.` segments, and rejects absolute paths or parent
/// traversals (`..`).
pub fn normalize_rel_path(source: &str) -> BannerResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(BannerError::validation("asset reference must be non-empty"));
    }
    if s.starts_with('/') || s.chars().nth(1) == Some(':') {
        return Err(BannerError::validation("asset references must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BannerError::validation(
                "asset references must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BannerError::validation(
            "asset reference must contain a file name",
        ));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
