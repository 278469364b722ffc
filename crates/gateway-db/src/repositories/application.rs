//! PostgreSQL implementation of ApplicationRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gateway_core::entities::Application;
use gateway_core::traits::{ApplicationRepository, RepoResult};

use crate::models::ApplicationModel;

use super::error::{application_not_found, map_db_error};

/// PostgreSQL implementation of ApplicationRepository
///
/// All lookups are scoped by owner: a row that exists but belongs to someone
/// else is indistinguishable from a missing one.
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self, application))]
    async fn create(&self, application: &Application) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO applications
                (id, user_id, name, site_location, application_type, proposal, status,
                 site_boundary, action_plan, questions, documents, weights,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(application.id)
        .bind(application.user_id)
        .bind(&application.name)
        .bind(&application.site_location)
        .bind(&application.application_type)
        .bind(&application.proposal)
        .bind(application.status.as_str())
        .bind(&application.site_boundary)
        .bind(&application.action_plan)
        .bind(Json(&application.questions))
        .bind(Json(&application.documents))
        .bind(Json(&application.weights))
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(
            r"
            SELECT id, user_id, name, site_location, application_type, proposal, status,
                   site_boundary, action_plan, questions, documents, weights,
                   created_at, updated_at
            FROM applications
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Application::from))
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Uuid) -> RepoResult<Vec<Application>> {
        let results = sqlx::query_as::<_, ApplicationModel>(
            r"
            SELECT id, user_id, name, site_location, application_type, proposal, status,
                   site_boundary, action_plan, questions, documents, weights,
                   created_at, updated_at
            FROM applications
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Application::from).collect())
    }

    #[instrument(skip(self, application))]
    async fn update(&self, application: &Application) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE applications
            SET name = $3, site_location = $4, application_type = $5, proposal = $6,
                status = $7, site_boundary = $8, action_plan = $9, questions = $10,
                documents = $11, weights = $12, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(application.id)
        .bind(application.user_id)
        .bind(&application.name)
        .bind(&application.site_location)
        .bind(&application.application_type)
        .bind(&application.proposal)
        .bind(application.status.as_str())
        .bind(&application.site_boundary)
        .bind(&application.action_plan)
        .bind(Json(&application.questions))
        .bind(Json(&application.documents))
        .bind(Json(&application.weights))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(application_not_found(application.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM applications
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
