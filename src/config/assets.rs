use std::collections::BTreeMap;

use crate::foundation::error::{ReelError, ReelResult};

/// Normalize and validate reel-relative asset paths.
///
/// The result uses `/` separators and drops `.` segments. Absolute paths and `..` are rejected.
pub fn normalize_rel_path(source: &str) -> ReelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ReelError::validation("asset paths must be relative"));
    }
    if s.trim().is_empty() {
        return Err(ReelError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ReelError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ReelError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Named references to external files (photos, headshots, map topology).
///
/// Only the paths are checked here; nothing is opened.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AssetCatalog(pub BTreeMap<String, String>);

impl AssetCatalog {
    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) {
        self.0.insert(key.into(), path.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn validate(&self) -> ReelResult<()> {
        for (key, path) in &self.0 {
            if key.trim().is_empty() {
                return Err(ReelError::validation("asset key must be non-empty"));
            }
            normalize_rel_path(path)
                .map_err(|e| e.with_prefix(&format!("asset '{key}'")))?;
        }
        Ok(())
    }

    /// Normalized relative path for `key`.
    pub fn path(&self, key: &str) -> ReelResult<String> {
        let raw = self
            .0
            .get(key)
            .ok_or_else(|| ReelError::validation(format!("unknown asset key '{key}'")))?;
        normalize_rel_path(raw)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/assets.rs"]
mod tests;
