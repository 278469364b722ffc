//! Application service
//!
//! Owner-scoped CRUD over planning applications. Every read and delete is
//! keyed by `(id, user_id)`: an application belonging to someone else is
//! indistinguishable from one that does not exist.

use tracing::{debug, info, instrument};
use uuid::Uuid;

use gateway_core::entities::Application;

use crate::dto::{ApplicationResponse, CreateApplicationRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Application service
pub struct ApplicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApplicationService<'a> {
    /// Create a new ApplicationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an application with wizard defaults for a user
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateApplicationRequest,
    ) -> ServiceResult<ApplicationResponse> {
        let name = request.name.trim();
        let site_location = request.site_location.trim();
        let application_type = request.application_type.trim();
        let proposal = request.proposal.trim();

        if name.len() < 4 {
            return Err(ServiceError::validation("Name must be at least 4 characters"));
        }
        if site_location.len() < 4 {
            return Err(ServiceError::validation(
                "Site location must be at least 4 characters",
            ));
        }
        if application_type.is_empty() {
            return Err(ServiceError::validation("Application type is required"));
        }
        if proposal.len() < 10 {
            return Err(ServiceError::validation(
                "Proposal must be at least 10 characters",
            ));
        }

        let application = Application::new(
            user_id,
            name.to_string(),
            site_location.to_string(),
            application_type.to_string(),
            proposal.to_string(),
        );
        self.ctx.application_repo().create(&application).await?;

        info!(application_id = %application.id, "Application created");

        Ok(ApplicationResponse::from(application))
    }

    /// List a user's applications, newest first
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list(&self, user_id: Uuid) -> ServiceResult<Vec<ApplicationResponse>> {
        let applications = self.ctx.application_repo().list_for_user(user_id).await?;

        debug!(count = applications.len(), "Listed applications");

        Ok(applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect())
    }

    /// Fetch one application the user owns
    #[instrument(skip(self), fields(user_id = %user_id, application_id = %id))]
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> ServiceResult<ApplicationResponse> {
        let application = self
            .ctx
            .application_repo()
            .find_owned(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Application", id.to_string()))?;

        Ok(ApplicationResponse::from(application))
    }

    /// Delete one application the user owns
    #[instrument(skip(self), fields(user_id = %user_id, application_id = %id))]
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> ServiceResult<()> {
        let deleted = self
            .ctx
            .application_repo()
            .delete_owned(id, user_id)
            .await?;
        if !deleted {
            return Err(ServiceError::not_found("Application", id.to_string()));
        }

        info!(application_id = %id, "Application deleted");
        Ok(())
    }
}
