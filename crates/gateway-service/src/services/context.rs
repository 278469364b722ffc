//! Service context - dependency container for services
//!
//! Holds the repositories and auth services every use case needs. The
//! context deliberately carries no database pool: services only see the
//! repository ports, which keeps the whole layer testable against
//! in-memory implementations.

use std::sync::Arc;

use gateway_common::auth::{JwtService, PasswordService};
use gateway_core::traits::{
    ApplicationRepository, AuditLogRepository, SessionRepository, UserRepository,
};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,

    // Auth services
    jwt_service: Arc<JwtService>,
    password_service: Arc<PasswordService>,

    // Refresh session lifetime
    refresh_ttl_seconds: i64,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        audit_repo: Arc<dyn AuditLogRepository>,
        jwt_service: Arc<JwtService>,
        password_service: Arc<PasswordService>,
        refresh_ttl_seconds: i64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            application_repo,
            audit_repo,
            jwt_service,
            password_service,
            refresh_ttl_seconds,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the refresh session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the application repository
    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    /// Get the audit log repository
    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        self.password_service.as_ref()
    }

    /// Lifetime of a freshly issued refresh session, in seconds
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    application_repo: Option<Arc<dyn ApplicationRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<Arc<PasswordService>>,
    refresh_ttl_seconds: Option<i64>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn application_repo(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.application_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn refresh_ttl_seconds(mut self, seconds: i64) -> Self {
        self.refresh_ttl_seconds = Some(seconds);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.session_repo
                .ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            self.application_repo
                .ok_or_else(|| ServiceError::validation("application_repo is required"))?,
            self.audit_repo
                .ok_or_else(|| ServiceError::validation("audit_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.password_service
                .ok_or_else(|| ServiceError::validation("password_service is required"))?,
            self.refresh_ttl_seconds
                .ok_or_else(|| ServiceError::validation("refresh_ttl_seconds is required"))?,
        ))
    }
}
