//! Domain entities - core business objects

mod application;
mod audit;
mod session;
mod user;

pub use application::{Application, ApplicationStatus, DocumentRequirement};
pub use audit::AuditEntry;
pub use session::{ClientMeta, RefreshSession};
pub use user::User;
