//! HTTP request handlers
//!
//! Thin translation layer between HTTP and the service crate: extractors
//! pull inputs out of the request, services do the work, and the response
//! module maps results back onto status codes.

pub mod applications;
pub mod auth;
pub mod health;
pub mod settings;
pub mod users;
