//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod account;
pub mod application;
pub mod auth;
pub mod context;
pub mod error;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use account::AccountService;
pub use application::ApplicationService;
pub use auth::{AuthService, AuthTokens};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use session::{IssuedSession, SessionService};
