//! Shared document-root fixture for integration tests.

#![allow(dead_code)]

use docserve::site::handler::StaticFiles;
use docserve::site::resolve::DocumentRoot;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub const INDEX_HTML: &str = "<!DOCTYPE html>\n<h1>home</h1>\n";
pub const DEEP_INDEX_HTML: &str = "<h1>deep</h1>\n";
pub const BASE_CSS: &str = "body { color: #333; }\n";
pub const BINARY: &[u8] = &[0x00, 0x9f, 0x92, 0x96, 0xff];
pub const SECRET: &str = "root:x:0:0\n";

/// A throwaway directory laid out as:
///
/// ```text
/// <dir>/secret.txt          outside the document root
/// <dir>/www/index.html
/// <dir>/www/base.css
/// <dir>/www/foo.bin
/// <dir>/www/deep/index.html
/// <dir>/www/deep/deep.css
/// <dir>/www/empty/          directory without an index
/// ```
pub struct Fixture {
    pub dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("docserve-test-{}-{}", std::process::id(), id));
        let www = dir.join("www");

        std::fs::create_dir_all(www.join("deep")).unwrap();
        std::fs::create_dir_all(www.join("empty")).unwrap();
        std::fs::write(dir.join("secret.txt"), SECRET).unwrap();
        std::fs::write(www.join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(www.join("base.css"), BASE_CSS).unwrap();
        std::fs::write(www.join("foo.bin"), BINARY).unwrap();
        std::fs::write(www.join("deep/index.html"), DEEP_INDEX_HTML).unwrap();
        std::fs::write(www.join("deep/deep.css"), "h1 { }\n").unwrap();

        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.join("www")
    }

    pub fn write(&self, rel: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn site(&self) -> StaticFiles {
        self.site_with_url("http://localhost:8080")
    }

    pub fn site_with_url(&self, public_url: &str) -> StaticFiles {
        StaticFiles::new(
            DocumentRoot::open(self.root()).unwrap(),
            "index.html",
            Url::parse(public_url).unwrap(),
        )
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
