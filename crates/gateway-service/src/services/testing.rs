//! In-memory repository fakes for service unit tests
//!
//! Each fake satisfies one port with a mutex-guarded `Vec`, mirroring the
//! visibility rules of the real PostgreSQL repositories (soft-deleted users
//! are invisible, revoked sessions do not resolve by hash, application reads
//! are owner-scoped). Tests reach past the ports through the extra inspection
//! helpers on each fake.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use gateway_common::auth::{JwtService, PasswordService};
use gateway_core::entities::{Application, AuditEntry, RefreshSession, User};
use gateway_core::error::DomainError;
use gateway_core::traits::{
    ApplicationRepository, AuditLogRepository, RepoResult, SessionRepository, UserRepository,
};

use super::context::{ServiceContext, ServiceContextBuilder};

fn lock<T>(rows: &Mutex<T>) -> MutexGuard<'_, T> {
    rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ============================================================================
// Users
// ============================================================================

/// Users stored alongside their password hashes
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<(User, String)>>,
}

impl InMemoryUsers {
    /// Hard-remove a row, bypassing soft deletion. Simulates a user that has
    /// vanished underneath a still-live credential.
    pub fn remove(&self, id: Uuid) {
        lock(&self.rows).retain(|(user, _)| user.id != id);
    }

    /// Fetch a row regardless of deletion state
    pub fn find_any(&self, id: Uuid) -> Option<User> {
        lock(&self.rows)
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(lock(&self.rows)
            .iter()
            .find(|(user, _)| user.id == id && !user.is_deleted())
            .map(|(user, _)| user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(lock(&self.rows)
            .iter()
            .find(|(user, _)| user.email == email && !user.is_deleted())
            .map(|(user, _)| user.clone()))
    }

    async fn email_exists(&self, email: &str, excluding: Option<Uuid>) -> RepoResult<bool> {
        Ok(lock(&self.rows).iter().any(|(user, _)| {
            user.email == email && !user.is_deleted() && Some(user.id) != excluding
        }))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut rows = lock(&self.rows);
        if rows
            .iter()
            .any(|(existing, _)| existing.email == user.email && !existing.is_deleted())
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        rows.push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut rows = lock(&self.rows);
        if rows
            .iter()
            .any(|(existing, _)| existing.email == user.email && !existing.is_deleted() && existing.id != user.id)
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        match rows
            .iter_mut()
            .find(|(existing, _)| existing.id == user.id && !existing.is_deleted())
        {
            Some((existing, _)) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        Ok(lock(&self.rows)
            .iter()
            .find(|(user, _)| user.id == id && !user.is_deleted())
            .map(|(_, hash)| hash.clone()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()> {
        match lock(&self.rows)
            .iter_mut()
            .find(|(user, _)| user.id == id && !user.is_deleted())
        {
            Some((_, hash)) => {
                *hash = password_hash.to_string();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(id)),
        }
    }

    async fn soft_delete(&self, id: Uuid) -> RepoResult<bool> {
        match lock(&self.rows)
            .iter_mut()
            .find(|(user, _)| user.id == id && !user.is_deleted())
        {
            Some((user, _)) => {
                user.email = User::anonymized_email(id);
                user.deleted_at = Some(Utc::now());
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[derive(Default)]
pub struct InMemorySessions {
    rows: Mutex<Vec<RefreshSession>>,
}

impl InMemorySessions {
    /// Fetch a row by primary key, revoked or not
    pub fn find_by_id(&self, id: Uuid) -> Option<RefreshSession> {
        lock(&self.rows).iter().find(|s| s.id == id).cloned()
    }

    /// Push the expiry of the row holding `token_hash` into the past
    pub fn force_expire(&self, token_hash: &str) {
        if let Some(session) = lock(&self.rows)
            .iter_mut()
            .find(|s| s.token_hash == token_hash)
        {
            session.expires_at = Utc::now() - Duration::hours(1);
        }
    }

    /// Number of unrevoked rows
    pub fn active_count(&self) -> usize {
        lock(&self.rows).iter().filter(|s| !s.is_revoked()).count()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn create(&self, session: &RefreshSession) -> RepoResult<()> {
        lock(&self.rows).push(session.clone());
        Ok(())
    }

    async fn find_active_by_hash(&self, token_hash: &str) -> RepoResult<Option<RefreshSession>> {
        Ok(lock(&self.rows)
            .iter()
            .find(|s| s.token_hash == token_hash && !s.is_revoked())
            .cloned())
    }

    async fn supersede(&self, old_id: Uuid, replacement: &RefreshSession) -> RepoResult<bool> {
        let mut rows = lock(&self.rows);
        let Some(old) = rows.iter_mut().find(|s| s.id == old_id && !s.is_revoked()) else {
            // Lost the rotation race: the replacement must not exist either
            return Ok(false);
        };
        let now = Utc::now();
        old.revoked_at = Some(now);
        old.replaced_by = Some(replacement.id);
        old.last_used_at = Some(now);
        rows.push(replacement.clone());
        Ok(true)
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> RepoResult<()> {
        if let Some(session) = lock(&self.rows)
            .iter_mut()
            .find(|s| s.token_hash == token_hash && !s.is_revoked())
        {
            session.revoked_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> RepoResult<u64> {
        let mut revoked = 0;
        for session in lock(&self.rows)
            .iter_mut()
            .filter(|s| s.user_id == user_id && !s.is_revoked())
        {
            session.revoked_at = Some(Utc::now());
            revoked += 1;
        }
        Ok(revoked)
    }
}

// ============================================================================
// Applications
// ============================================================================

#[derive(Default)]
pub struct InMemoryApplications {
    rows: Mutex<Vec<Application>>,
}

impl InMemoryApplications {
    /// Total stored rows, all owners
    pub fn count(&self) -> usize {
        lock(&self.rows).len()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplications {
    async fn create(&self, application: &Application) -> RepoResult<()> {
        lock(&self.rows).push(application.clone());
        Ok(())
    }

    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> RepoResult<Option<Application>> {
        Ok(lock(&self.rows)
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> RepoResult<Vec<Application>> {
        let mut owned: Vec<Application> = lock(&self.rows)
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update(&self, application: &Application) -> RepoResult<()> {
        match lock(&self.rows)
            .iter_mut()
            .find(|a| a.id == application.id && a.user_id == application.user_id)
        {
            Some(existing) => {
                *existing = application.clone();
                Ok(())
            }
            None => Err(DomainError::ApplicationNotFound(application.id)),
        }
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|a| !(a.id == id && a.user_id == user_id));
        Ok(rows.len() < before)
    }
}

// ============================================================================
// Audit log
// ============================================================================

#[derive(Default)]
pub struct InMemoryAudit {
    rows: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAudit {
    /// Recorded actions, oldest first
    pub fn actions(&self) -> Vec<String> {
        lock(&self.rows).iter().map(|e| e.action.clone()).collect()
    }

    /// All recorded entries, oldest first
    pub fn entries(&self) -> Vec<AuditEntry> {
        lock(&self.rows).clone()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAudit {
    async fn record(&self, entry: &AuditEntry) -> RepoResult<()> {
        lock(&self.rows).push(entry.clone());
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

/// A fully wired [`ServiceContext`] over in-memory fakes, with handles kept
/// on each fake for direct inspection.
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUsers>,
    pub sessions: Arc<InMemorySessions>,
    pub applications: Arc<InMemoryApplications>,
    pub audit: Arc<InMemoryAudit>,
}

impl TestHarness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let sessions = Arc::new(InMemorySessions::default());
        let applications = Arc::new(InMemoryApplications::default());
        let audit = Arc::new(InMemoryAudit::default());

        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .session_repo(sessions.clone())
            .application_repo(applications.clone())
            .audit_repo(audit.clone())
            .jwt_service(Arc::new(JwtService::new(
                "test-secret-key-that-is-long-enough",
                900,
            )))
            .password_service(Arc::new(PasswordService::new()))
            .refresh_ttl_seconds(604_800)
            .build()
            .unwrap();

        Self {
            ctx,
            users,
            sessions,
            applications,
            audit,
        }
    }
}
