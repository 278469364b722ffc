//! Account service
//!
//! Self-service operations on the signed-in user's own account: renaming,
//! changing email or password, and soft deletion. Name changes and deletions
//! are audited; deletion anonymizes the email so the address can be reused.

use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use gateway_core::entities::AuditEntry;

use crate::dto::{ChangeEmailRequest, ChangePasswordRequest, UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rename the user. Audited as [`AuditEntry::ACCOUNT_UPDATE_NAME`].
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let forename = request.forename.trim();
        let surname = request.surname.trim();

        if forename.len() < 2 {
            return Err(ServiceError::validation(
                "Forename must be at least 2 characters",
            ));
        }
        if surname.len() < 2 {
            return Err(ServiceError::validation(
                "Surname must be at least 2 characters",
            ));
        }

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        user.set_name(forename.to_string(), surname.to_string());
        self.ctx.user_repo().update(&user).await?;

        let entry = AuditEntry::new(
            user_id,
            AuditEntry::ACCOUNT_UPDATE_NAME,
            Some(json!({ "forename": forename, "surname": surname })),
        );
        self.ctx.audit_repo().record(&entry).await?;

        info!("Profile updated");
        Ok(UserResponse::from(&user))
    }

    /// Change the account email. The address is normalized before the
    /// uniqueness check, and an address held by another live account is a
    /// conflict.
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn update_email(
        &self,
        user_id: Uuid,
        request: ChangeEmailRequest,
    ) -> ServiceResult<UserResponse> {
        let email = request.email.trim().to_lowercase();

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if self
            .ctx
            .user_repo()
            .email_exists(&email, Some(user_id))
            .await?
        {
            return Err(ServiceError::conflict("Email already in use"));
        }

        user.set_email(email);
        self.ctx.user_repo().update(&user).await?;

        info!("Email updated");
        Ok(UserResponse::from(&user))
    }

    /// Change the account password. The current password must verify;
    /// getting it wrong is an authentication failure, not a validation one.
    /// Existing sessions stay live.
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn update_password(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| {
                warn!("Password change failed: no password hash");
                ServiceError::invalid_credentials()
            })?;

        let is_valid = self
            .ctx
            .password_service()
            .verify(&request.current_password, &current_hash)?;
        if !is_valid {
            warn!("Password change failed: wrong current password");
            return Err(ServiceError::invalid_credentials());
        }

        let new_hash = self.ctx.password_service().hash(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(user_id, &new_hash)
            .await?;

        info!("Password updated");
        Ok(())
    }

    /// Soft-delete the account: revoke every session, anonymize the email,
    /// and record [`AuditEntry::ACCOUNT_SOFT_DELETE`]. The freed address can
    /// register again.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_account(&self, user_id: Uuid) -> ServiceResult<()> {
        let revoked = self
            .ctx
            .session_repo()
            .revoke_all_for_user(user_id)
            .await?;

        let deleted = self.ctx.user_repo().soft_delete(user_id).await?;
        if !deleted {
            return Err(ServiceError::not_found("User", user_id.to_string()));
        }

        let entry = AuditEntry::new(user_id, AuditEntry::ACCOUNT_SOFT_DELETE, None);
        self.ctx.audit_repo().record(&entry).await?;

        info!(sessions_revoked = revoked, "Account soft-deleted");
        Ok(())
    }
}
