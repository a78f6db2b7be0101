use std::path::Path;

/// Content types the server knows how to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Css,
    OctetStream,
}

impl ContentType {
    /// Picks a content type from the file extension. Anything that is not
    /// `.html` or `.css` is served as an opaque byte stream.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("html") => ContentType::Html,
            Some("css") => ContentType::Css,
            _ => ContentType::OctetStream,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Css => "text/css",
            ContentType::OctetStream => "application/octet-stream",
        }
    }

    pub fn header_value(&self) -> String {
        format!("{}; charset=utf-8", self.as_str())
    }
}
