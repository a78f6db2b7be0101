//! Mapping request paths onto the document root.
//!
//! A request path goes through two stages. First it is normalized lexically,
//! with `..` clamped at `/`, so it can never climb above the root on paper.
//! Then it is joined onto the canonical root and canonicalized for real,
//! which resolves symlinks; the result must still start with the canonical
//! root or it is treated as missing.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::http::mime::ContentType;

/// What a request path points at inside the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A directory, by canonical path
    Directory(PathBuf),
    /// A regular file, by canonical path, with its content type
    File(PathBuf, ContentType),
    /// Nothing servable: absent, unreadable, or outside the root
    Missing,
}

/// Normalizes a raw request path without touching the filesystem.
///
/// The result is always absolute and has no trailing slash unless it is
/// the root itself.
///
/// ```
/// # use docserve::site::resolve::normalize_path;
/// assert_eq!(normalize_path("/a/./b/../c/"), "/a/c");
/// assert_eq!(normalize_path("/../../etc/passwd"), "/etc/passwd");
/// assert_eq!(normalize_path("deep"), "/deep");
/// ```
pub fn normalize_path(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    format!("/{}", segments.join("/"))
}

/// The confinement boundary. Holds the root in canonical form so prefix
/// checks compare like with like.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    /// Canonicalizes `path` and checks that it is a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let root = std::fs::canonicalize(path)
            .with_context(|| format!("document root {} is not accessible", path.display()))?;

        if !root.is_dir() {
            anyhow::bail!("document root {} is not a directory", root.display());
        }

        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolves a normalized request path to a canonical filesystem path
    /// under the root, or `None` if it does not exist or escapes the root.
    pub async fn confine(&self, normalized: &str) -> Option<PathBuf> {
        let joined = self.root.join(normalized.trim_start_matches('/'));

        let canonical = match tokio::fs::canonicalize(&joined).await {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(path = %joined.display(), error = %e, "Path does not resolve");
                return None;
            }
        };

        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                requested = normalized,
                resolved = %canonical.display(),
                "Rejected path outside document root"
            );
            return None;
        }

        Some(canonical)
    }

    /// Classifies a normalized request path.
    ///
    /// The content type of a file comes from the name that was requested,
    /// not from whatever a symlink points at.
    pub async fn classify(&self, normalized: &str) -> Target {
        let Some(path) = self.confine(normalized).await else {
            return Target::Missing;
        };

        let target = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Target::Directory(path),
            Ok(meta) if meta.is_file() => {
                Target::File(path, ContentType::from_path(Path::new(normalized)))
            }
            _ => Target::Missing,
        };

        tracing::debug!(requested = normalized, ?target, "Classified path");
        target
    }
}
