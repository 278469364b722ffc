//! Application entity <-> model mapper

use gateway_core::entities::{Application, ApplicationStatus, DocumentRequirement};
use gateway_core::progress::ProgressWeights;

use crate::models::ApplicationModel;

/// Convert ApplicationModel to Application entity
///
/// Jsonb decoding is lenient: a malformed `questions` or `documents` value
/// becomes an empty list, an unrecognized `status` falls back to Submitted,
/// and `weights` degrades per field via [`ProgressWeights::from_value`].
impl From<ApplicationModel> for Application {
    fn from(model: ApplicationModel) -> Self {
        let questions: Vec<bool> = serde_json::from_value(model.questions).unwrap_or_default();
        let documents: Vec<DocumentRequirement> =
            serde_json::from_value(model.documents).unwrap_or_default();
        let weights = ProgressWeights::from_value(model.weights.as_ref());

        Application {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            site_location: model.site_location,
            application_type: model.application_type,
            proposal: model.proposal,
            status: ApplicationStatus::from(model.status.as_str()),
            site_boundary: model.site_boundary,
            action_plan: model.action_plan,
            questions,
            documents,
            weights,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
