//! Request extractors: JSON documents and path segments resolved to stored rows.

mod json_body;
mod resolve;

pub use json_body::JsonDocument;
pub use resolve::{Found, Resolve};
