use bytes::BytesMut;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::config::ServerConfig;
use crate::http::parser::{ParseError, parse_request_line};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::{Framing, ResponseWriter};
use crate::site::handler::StaticFiles;

/// Per-connection knobs taken from the server config.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub read_limit: usize,
    /// How long to wait for more bytes once something has arrived.
    pub line_timeout: Duration,
    pub framing: Framing,
}

impl From<&ServerConfig> for ConnectionOptions {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            read_limit: cfg.read_limit,
            line_timeout: Duration::from_millis(cfg.line_timeout_ms),
            framing: cfg.framing,
        }
    }
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    site: Arc<StaticFiles>,
    options: ConnectionOptions,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Result<Request, ParseError>),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: Arc<StaticFiles>, options: ConnectionOptions) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(options.read_limit),
            site,
            options,
            state: ConnectionState::Reading,
        }
    }

    /// Serves exactly one request, then shuts the stream down.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(parsed) => ConnectionState::Processing(parsed),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(parsed) => {
                    let response = Self::handle_request(&self.site, parsed).await;
                    let writer = ResponseWriter::new(&response, self.options.framing);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.stream.shutdown().await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the first line ends, the peer stops sending, or the read
    /// limit is hit. The first read waits indefinitely; later reads give up
    /// after `line_timeout` and whatever is buffered gets parsed. Returns
    /// `None` if the peer closed without sending anything.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, ParseError>>> {
        let limit = self.options.read_limit;
        let mut temp = [0u8; 1024];

        while self.buffer.len() < limit && !self.buffer.contains(&b'\n') {
            let want = (limit - self.buffer.len()).min(temp.len());
            let n = if self.buffer.is_empty() {
                self.stream.read(&mut temp[..want]).await?
            } else {
                match timeout(self.options.line_timeout, self.stream.read(&mut temp[..want])).await {
                    Ok(res) => res?,
                    Err(_) => {
                        tracing::debug!(buffered = self.buffer.len(), "Request line not terminated, parsing what arrived");
                        break;
                    }
                }
            };

            if n == 0 {
                break;
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }

        if self.buffer.is_empty() {
            return Ok(None);
        }

        let parsed = parse_request_line(&self.buffer);
        self.buffer.clear();
        Ok(Some(parsed))
    }

    async fn handle_request(site: &StaticFiles, parsed: &Result<Request, ParseError>) -> Response {
        let response = match parsed {
            Ok(request) => site.respond(request).await,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected request line");
                e.clone().into_response()
            }
        };

        match parsed {
            Ok(request) => tracing::info!(
                method = %request.method,
                path = %request.path,
                status = response.status.as_u16(),
                "Request served"
            ),
            Err(_) => tracing::info!(status = response.status.as_u16(), "Request rejected"),
        }

        response
    }
}
