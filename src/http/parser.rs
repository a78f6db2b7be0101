use std::fmt;

use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};

/// Why a request line was rejected before path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Buffer held no tokens at all
    Empty,
    /// Bytes are not valid UTF-8
    InvalidEncoding,
    /// A recognized method other than GET
    MethodNotAllowed(Method),
    /// First token is not a known method
    UnknownMethod(String),
    /// GET without a path token
    MissingPath,
}

impl ParseError {
    pub fn status(&self) -> StatusCode {
        match self {
            ParseError::MethodNotAllowed(_) => StatusCode::MethodNotAllowed,
            _ => StatusCode::BadRequest,
        }
    }

    /// The early-exit response sent instead of resolving a path.
    pub fn into_response(self) -> Response {
        Response::error(self.status())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty request"),
            ParseError::InvalidEncoding => write!(f, "request line is not valid UTF-8"),
            ParseError::MethodNotAllowed(m) => write!(f, "method {} not allowed", m),
            ParseError::UnknownMethod(m) => write!(f, "unknown method {:?}", m),
            ParseError::MissingPath => write!(f, "request line has no path"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses the request line at the start of `buf`.
///
/// Only the first two whitespace-separated tokens matter: the method and the
/// path. The version token, headers and anything else in the buffer are
/// ignored. The buffer may have been cut off at the read limit, so a
/// truncated trailing UTF-8 sequence is dropped rather than rejected.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {
    let text = decode(buf)?;
    let mut parts = text.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::Empty)?;

    match Method::from_str(method_str) {
        Some(Method::GET) => {}
        Some(method) => return Err(ParseError::MethodNotAllowed(method)),
        None => return Err(ParseError::UnknownMethod(method_str.to_string())),
    }

    let path = parts.next().ok_or(ParseError::MissingPath)?;

    Ok(Request::get(path))
}

fn decode(buf: &[u8]) -> Result<&str, ParseError> {
    match std::str::from_utf8(buf) {
        Ok(s) => Ok(s),
        // error_len() is None only when the input ends mid-character
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&buf[..e.valid_up_to()])
            .map_err(|_| ParseError::InvalidEncoding),
        Err(_) => Err(ParseError::InvalidEncoding),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request_line(req).unwrap();

        assert_eq!(parsed.method, Method::GET);
        assert_eq!(parsed.path, "/");
    }

    #[test]
    fn truncated_multibyte_tail_is_dropped() {
        // "é" is 0xC3 0xA9; cut after the first byte
        let req = b"GET /caf\xC3\xA9 HTTP/1.1\r\nX: \xC3";

        let parsed = parse_request_line(req).unwrap();

        assert_eq!(parsed.path, "/café");
    }

    #[test]
    fn invalid_byte_in_middle_is_rejected() {
        let req = b"GET /\xFF HTTP/1.1\r\n";

        assert_eq!(parse_request_line(req), Err(ParseError::InvalidEncoding));
    }
}
