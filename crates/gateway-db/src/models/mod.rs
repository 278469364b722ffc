//! Database models - SQLx-compatible structs for PostgreSQL tables

mod application;
mod audit_log;
mod session;
mod user;

pub use application::ApplicationModel;
pub use audit_log::AuditLogModel;
pub use session::RefreshSessionModel;
pub use user::UserModel;
