//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every port here can be satisfied by an
//! in-memory fake, which is how the service layer is unit tested.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Application, AuditEntry, RefreshSession, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a live (not soft-deleted) user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find a live user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if an email is held by a live user, optionally ignoring one user
    /// (the caller changing their own address)
    async fn email_exists(&self, email: &str, excluding: Option<Uuid>) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update email, forename, and surname
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()>;

    /// Soft delete: anonymize the email and set the deletion timestamp.
    /// Returns false when the user is absent or already deleted.
    async fn soft_delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly issued session
    async fn create(&self, session: &RefreshSession) -> RepoResult<()>;

    /// Find the unrevoked session matching a token hash. Expiry is the
    /// caller's concern; an expired-but-unrevoked row is still returned.
    async fn find_active_by_hash(&self, token_hash: &str) -> RepoResult<Option<RefreshSession>>;

    /// Rotation step: atomically create `replacement` and revoke the session
    /// `old_id`, linking it to its successor. Returns false (and persists
    /// nothing) when `old_id` was already revoked - the caller lost a
    /// concurrent rotation race and must treat the token as spent.
    async fn supersede(&self, old_id: Uuid, replacement: &RefreshSession) -> RepoResult<bool>;

    /// Revoke the unrevoked session matching a token hash. Idempotent; a miss
    /// is not an error.
    async fn revoke_by_hash(&self, token_hash: &str) -> RepoResult<()>;

    /// Revoke every unrevoked session belonging to a user. Returns the number
    /// of sessions revoked.
    async fn revoke_all_for_user(&self, user_id: Uuid) -> RepoResult<u64>;
}

// ============================================================================
// Application Repository
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Create a new application
    async fn create(&self, application: &Application) -> RepoResult<()>;

    /// Find an application by ID, scoped to its owner. A non-owner sees
    /// the same `None` as a missing row.
    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> RepoResult<Option<Application>>;

    /// List a user's applications, newest first
    async fn list_for_user(&self, user_id: Uuid) -> RepoResult<Vec<Application>>;

    /// Update an existing application
    async fn update(&self, application: &Application) -> RepoResult<()>;

    /// Delete an application, scoped to its owner. Returns false when the
    /// row is absent or owned by someone else.
    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append one audit entry. There is no read path.
    async fn record(&self, entry: &AuditEntry) -> RepoResult<()>;
}
