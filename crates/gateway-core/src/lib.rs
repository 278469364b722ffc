//! # gateway-core
//!
//! Domain layer containing entities, repository traits, and the progress calculator.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod progress;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    Application, ApplicationStatus, AuditEntry, ClientMeta, DocumentRequirement, RefreshSession,
    User,
};
pub use error::DomainError;
pub use progress::{
    compute_progress, ProgressBreakdown, ProgressReport, ProgressWeights, ResolvedWeights,
};
pub use traits::{
    ApplicationRepository, AuditLogRepository, RepoResult, SessionRepository, UserRepository,
};
