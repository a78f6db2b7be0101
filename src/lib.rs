//! docserve - static file server
//!
//! Serves GET requests from a confined document root, one request per
//! connection.

pub mod config;
pub mod http;
pub mod server;
pub mod site;
