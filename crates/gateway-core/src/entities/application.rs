//! Application entity - a planning/building-control submission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::progress::ProgressWeights;

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Draft,
    #[default]
    Submitted,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Storage representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(value: &str) -> Self {
        match value {
            "draft" => Self::Draft,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Submitted, // Default for unknown values
        }
    }
}

fn default_required() -> bool {
    true
}

/// One entry in an application's document checklist.
///
/// `required` defaults to true: only an explicit `false` marks a document
/// optional, and optional documents never count towards progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequirement {
    pub name: String,
    #[serde(default)]
    pub uploaded: bool,
    #[serde(default = "default_required")]
    pub required: bool,
}

impl DocumentRequirement {
    /// A document the applicant must supply
    #[must_use]
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            uploaded: false,
            required: true,
        }
    }

    /// A document the applicant may supply
    #[must_use]
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            uploaded: false,
            required: false,
        }
    }
}

/// Application entity owned by exactly one user
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub site_location: String,
    pub application_type: String,
    pub proposal: String,
    pub status: ApplicationStatus,
    /// Site boundary drawing; progress only cares about presence
    pub site_boundary: Option<JsonValue>,
    /// Action plan blob; progress only cares about presence
    pub action_plan: Option<JsonValue>,
    pub questions: Vec<bool>,
    pub documents: Vec<DocumentRequirement>,
    pub weights: ProgressWeights,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Size of the fixed wizard question set
    pub const QUESTION_COUNT: usize = 12;

    /// Document checklist every new application starts with
    #[must_use]
    pub fn starter_documents() -> Vec<DocumentRequirement> {
        vec![
            DocumentRequirement::required("Site Plan"),
            DocumentRequirement::required("Location Plan"),
            DocumentRequirement::optional("Design & Access Statement"),
        ]
    }

    /// Create a new application with wizard defaults: every question
    /// unanswered, the starter document checklist, standard weights.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        name: String,
        site_location: String,
        application_type: String,
        proposal: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            site_location,
            application_type,
            proposal,
            status: ApplicationStatus::Submitted,
            site_boundary: None,
            action_plan: None,
            questions: vec![false; Self::QUESTION_COUNT],
            documents: Self::starter_documents(),
            weights: ProgressWeights::standard(),
            created_at: now,
            updated_at: now,
        }
    }
}
