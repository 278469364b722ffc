//! # gateway-api
//!
//! HTTP server for the development gateway, built with Axum: cookie-based
//! session endpoints, planning application CRUD, account settings, and the
//! access gate guarding protected page prefixes.

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::run;
