use bytes::{BufMut, Bytes, BytesMut};
use serde::Deserialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// How a response is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// `Content-Length` on every response and a blank line before the body,
    /// even when the body is empty.
    #[default]
    Standard,
    /// Minimal framing: no `Content-Length`, and
    /// bodiless responses end after their last header line with no blank
    /// line.
    Legacy,
}

pub fn serialize_response(resp: &Response, framing: Framing) -> Bytes {
    let body_len = resp.body.as_ref().map_or(0, |b| b.len());
    let mut buf = BytesMut::with_capacity(128 + body_len);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        put_header(&mut buf, k, v);
    }

    match framing {
        Framing::Standard => {
            put_header(&mut buf, "Content-Length", &body_len.to_string());
            buf.put_slice(b"\r\n");
            if let Some(body) = &resp.body {
                buf.put_slice(body);
            }
        }
        Framing::Legacy => {
            if let Some(body) = &resp.body {
                buf.put_slice(b"\r\n");
                buf.put_slice(body);
            }
        }
    }

    buf.freeze()
}

fn put_header(buf: &mut BytesMut, key: &str, value: &str) {
    buf.put_slice(key.as_bytes());
    buf.put_slice(b": ");
    buf.put_slice(value.as_bytes());
    buf.put_slice(b"\r\n");
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response, framing: Framing) -> Self {
        Self {
            buffer: serialize_response(response, framing),
            written: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
