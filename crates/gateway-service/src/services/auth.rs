//! Authentication service
//!
//! Handles registration, sign-in, sign-out, token refresh, and resolving
//! the current user from an access token.

use tracing::{info, instrument, warn};

use gateway_core::entities::{ClientMeta, User};

use crate::dto::{RegisterRequest, SignInRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// Token pair established for a signed-in user, destined for cookies
pub struct AuthTokens {
    /// Signed JWT access token
    pub access: String,
    /// Raw opaque refresh token (only its hash is stored)
    pub refresh_raw: String,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access", &"<redacted>")
            .field("refresh_raw", &"<redacted>")
            .finish()
    }
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and sign it in
    #[instrument(skip(self, request, client), fields(email = %request.email))]
    pub async fn register(
        &self,
        request: RegisterRequest,
        client: &ClientMeta,
    ) -> ServiceResult<(UserResponse, AuthTokens)> {
        let email = normalize_email(&request.email);
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

        if self.ctx.user_repo().email_exists(&email, None).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let user = User::new(email, forename.to_string(), surname.to_string());
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        let tokens = self.establish(&user, client).await?;
        Ok((UserResponse::from(&user), tokens))
    }

    /// Sign in with email and password
    ///
    /// Unknown email and wrong password fail identically, and no session is
    /// created on failure.
    #[instrument(skip(self, request, client), fields(email = %request.email))]
    pub async fn sign_in(
        &self,
        request: SignInRequest,
        client: &ClientMeta,
    ) -> ServiceResult<(UserResponse, AuthTokens)> {
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Sign-in failed: unknown email");
                ServiceError::invalid_credentials()
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Sign-in failed: no password hash");
                ServiceError::invalid_credentials()
            })?;

        let is_valid = self
            .ctx
            .password_service()
            .verify(&request.password, &password_hash)?;
        if !is_valid {
            warn!(user_id = %user.id, "Sign-in failed: wrong password");
            return Err(ServiceError::invalid_credentials());
        }

        info!(user_id = %user.id, "User signed in");

        let tokens = self.establish(&user, client).await?;
        Ok((UserResponse::from(&user), tokens))
    }

    /// Sign out by revoking the presented refresh token, if any
    ///
    /// Always succeeds: signing out without a refresh cookie, or with one
    /// that is already dead, is not an error.
    #[instrument(skip(self, refresh_raw))]
    pub async fn sign_out(&self, refresh_raw: Option<&str>) -> ServiceResult<()> {
        if let Some(raw) = refresh_raw {
            SessionService::new(self.ctx).revoke(raw).await?;
        }
        Ok(())
    }

    /// Exchange a refresh token for a fresh token pair
    ///
    /// `Ok(None)` means the presented token bought nothing — unknown,
    /// expired, already rotated, or its owner no longer exists.
    #[instrument(skip(self, refresh_raw, client))]
    pub async fn refresh(
        &self,
        refresh_raw: &str,
        client: &ClientMeta,
    ) -> ServiceResult<Option<(UserResponse, AuthTokens)>> {
        let Some(rotated) = SessionService::new(self.ctx)
            .rotate(refresh_raw, client)
            .await?
        else {
            return Ok(None);
        };

        let Some(user) = self
            .ctx
            .user_repo()
            .find_by_id(rotated.session.user_id)
            .await?
        else {
            warn!(user_id = %rotated.session.user_id, "Refresh failed: user no longer exists");
            return Ok(None);
        };

        let access = self.ctx.jwt_service().sign(user.id, &user.email)?;
        Ok(Some((
            UserResponse::from(&user),
            AuthTokens {
                access,
                refresh_raw: rotated.raw,
            },
        )))
    }

    /// Resolve the user behind an access token, if any
    ///
    /// Absent, invalid, or expired tokens — and tokens for deleted users —
    /// all come back as `Ok(None)`; only storage faults are errors.
    #[instrument(skip(self, access_token))]
    pub async fn current_user(
        &self,
        access_token: Option<&str>,
    ) -> ServiceResult<Option<UserResponse>> {
        let Some(token) = access_token else {
            return Ok(None);
        };
        let Ok(claims) = self.ctx.jwt_service().verify(token) else {
            return Ok(None);
        };
        let Ok(user_id) = claims.user_id() else {
            return Ok(None);
        };

        let user = self.ctx.user_repo().find_by_id(user_id).await?;
        Ok(user.map(|u| UserResponse::from(&u)))
    }

    /// Sign an access token and issue a refresh session for a user
    async fn establish(&self, user: &User, client: &ClientMeta) -> ServiceResult<AuthTokens> {
        let access = self.ctx.jwt_service().sign(user.id, &user.email)?;
        let issued = SessionService::new(self.ctx).issue(user.id, client).await?;
        Ok(AuthTokens {
            access,
            refresh_raw: issued.raw,
        })
    }
}

/// Lowercase and trim an email for storage and lookup
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
