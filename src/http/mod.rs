//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request line per connection,
//! GET only, no headers or bodies read, connection closed after the reply.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine (read, process, write, close)
//! - **`parser`**: Parses the request line and classifies rejected requests
//! - **`request`**: Method and request representation
//! - **`response`**: Status codes and responses with a builder
//! - **`writer`**: Serializes responses under standard or legacy framing
//! - **`mime`**: Content type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read the request line (bounded)
//!        └──────┬──────┘
//!               │ Bytes received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse, resolve path, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut down stream
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docserve::http::connection::{Connection, ConnectionOptions};
//! use docserve::site::handler::StaticFiles;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let site = Arc::new(StaticFiles::from_config(&Default::default())?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let site = Arc::clone(&site);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, site, ConnectionOptions::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
