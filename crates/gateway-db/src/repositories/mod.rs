//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in gateway-core.
//! Each repository handles database operations for a specific domain entity.

mod application;
mod audit_log;
mod error;
mod session;
mod user;

pub use application::PgApplicationRepository;
pub use audit_log::PgAuditLogRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;
