//! Static site serving.
//!
//! - **`resolve`**: lexical normalization, root confinement and target classification
//! - **`handler`**: builds the redirect, content or error response for a request

pub mod handler;
pub mod resolve;
