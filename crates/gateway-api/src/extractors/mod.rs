//! Request extractors
//!
//! Custom Axum extractors for authentication, client metadata, path
//! parameters, and validated JSON bodies.

pub mod auth;
pub mod client;
pub mod path;
pub mod validated;

pub use auth::CurrentUser;
pub use client::{client_meta_from_headers, ClientInfo};
pub use path::IdPath;
pub use validated::ValidatedJson;
