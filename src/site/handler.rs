//! Turning a parsed request into a response from the document root.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;
use url::Url;

use crate::config::Config;
use crate::http::mime::ContentType;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::site::resolve::{DocumentRoot, Target, normalize_path};

/// Serves files from a confined document root.
///
/// Immutable once built, so one instance is shared by every connection.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: DocumentRoot,
    index: String,
    public_url: Url,
}

impl StaticFiles {
    pub fn new(root: DocumentRoot, index: impl Into<String>, public_url: Url) -> Self {
        Self {
            root,
            index: index.into(),
            public_url,
        }
    }

    /// Opens the configured document root and redirect base.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let root = DocumentRoot::open(&cfg.static_files.root)?;
        let public_url = cfg.public_url().context("Invalid public URL")?;

        tracing::info!(
            root = %root.path().display(),
            index = %cfg.static_files.index,
            public_url = %public_url,
            "Serving static files"
        );

        Ok(Self::new(root, cfg.static_files.index.clone(), public_url))
    }

    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    /// Produces the response for a GET request.
    ///
    /// Never fails: every outcome, including I/O trouble, is a status code.
    pub async fn respond(&self, request: &Request) -> Response {
        let normalized = normalize_path(&request.path);

        match self.root.classify(&normalized).await {
            Target::Directory(_) if !request.is_dir_like() => {
                let location = self.redirect_location(&normalized);
                tracing::debug!(path = %request.path, %location, "Redirecting to directory");
                Response::moved_permanently(location)
            }
            Target::Directory(_) => self.serve_index(&normalized).await,
            Target::File(path, content_type) => serve_file(&path, content_type).await,
            Target::Missing => Response::not_found(),
        }
    }

    async fn serve_index(&self, dir: &str) -> Response {
        let index = format!("{}/{}", dir.trim_end_matches('/'), self.index);

        match self.root.classify(&index).await {
            Target::File(path, _) => serve_file(&path, ContentType::Html).await,
            _ => {
                tracing::debug!(dir, "Directory has no index");
                Response::not_found()
            }
        }
    }

    /// Absolute URL for a directory, with the trailing slash added.
    ///
    /// The path is appended as-is. Request paths are never percent-decoded,
    /// so re-encoding here would point the client at a different name.
    fn redirect_location(&self, normalized: &str) -> String {
        let mut base = self.public_url.clone();
        base.set_query(None);
        base.set_fragment(None);
        let dir = normalized.trim_end_matches('/');
        format!("{}{}/", base.as_str().trim_end_matches('/'), dir)
    }
}

async fn serve_file(path: &Path, content_type: ContentType) -> Response {
    match tokio::fs::read(path).await {
        Ok(content) => Response::ok(content_type, content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "File vanished before read");
            Response::not_found()
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read file");
            Response::internal_error()
        }
    }
}
