//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ApplicationRepository, AuditLogRepository, RepoResult, SessionRepository, UserRepository,
};
