//! Progress calculator - weighted completion percentage for an application
//!
//! Pure computation: no I/O, no clock, no shared state. The four progress
//! categories (site boundary, action plan, questions, documents) each yield a
//! completion fraction in [0, 1]; the weighted sum is rounded half away from
//! zero and clamped into [0, 100].

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::entities::Application;

/// Stored per-application weights. Every field is optional; absent or
/// malformed values fall back to the standard weight for that field alone,
/// never dragging the other fields down with them.
///
/// Weights are not validated to sum to 1. The final percent is clamped
/// instead, so a lopsided weights record cannot push the result out of range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProgressWeights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_boundary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_plan: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<f64>,
}

impl ProgressWeights {
    /// The standard weights, spelled out. New applications persist these
    /// explicitly rather than relying on the fallback.
    #[must_use]
    pub fn standard() -> Self {
        let defaults = ResolvedWeights::DEFAULT;
        Self {
            site_boundary: Some(defaults.site_boundary),
            action_plan: Some(defaults.action_plan),
            questions: Some(defaults.questions),
            documents: Some(defaults.documents),
        }
    }

    /// Read weights out of a stored JSON value, field by field. Anything that
    /// is not a JSON number (missing key, string, null, the whole value not
    /// being an object) leaves that field unset.
    #[must_use]
    pub fn from_value(value: Option<&JsonValue>) -> Self {
        match value {
            Some(JsonValue::Object(map)) => Self {
                site_boundary: map.get("site_boundary").and_then(JsonValue::as_f64),
                action_plan: map.get("action_plan").and_then(JsonValue::as_f64),
                questions: map.get("questions").and_then(JsonValue::as_f64),
                documents: map.get("documents").and_then(JsonValue::as_f64),
            },
            _ => Self::default(),
        }
    }

    /// Apply per-field defaults
    #[must_use]
    pub fn resolve(&self) -> ResolvedWeights {
        let defaults = ResolvedWeights::DEFAULT;
        ResolvedWeights {
            site_boundary: self.site_boundary.unwrap_or(defaults.site_boundary),
            action_plan: self.action_plan.unwrap_or(defaults.action_plan),
            questions: self.questions.unwrap_or(defaults.questions),
            documents: self.documents.unwrap_or(defaults.documents),
        }
    }
}

/// Weights after per-field default fallback
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedWeights {
    pub site_boundary: f64,
    pub action_plan: f64,
    pub questions: f64,
    pub documents: f64,
}

impl ResolvedWeights {
    /// Standard weight split across the four categories
    pub const DEFAULT: Self = Self {
        site_boundary: 0.2,
        action_plan: 0.2,
        questions: 0.3,
        documents: 0.3,
    };
}

/// Completion percentage plus the per-category inputs it was derived from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub percent: u8,
    pub breakdown: ProgressBreakdown,
}

/// Per-category detail backing a [`ProgressReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressBreakdown {
    pub weights: ResolvedWeights,
    pub site_boundary_done: bool,
    pub action_plan_done: bool,
    pub questions_answered: usize,
    pub questions_total: usize,
    pub documents_uploaded: usize,
    pub documents_required: usize,
}

/// Compute the weighted completion percentage for an application.
///
/// Category fractions:
/// - site boundary / action plan: 1 when the blob is present, else 0
/// - questions: answered / total, 0 for an empty list
/// - documents: uploaded-and-required / required, 0 when nothing is required
///   (optional documents never count, uploaded or not)
#[must_use]
pub fn compute_progress(application: &Application) -> ProgressReport {
    let weights = application.weights.resolve();

    let site_boundary_done = application.site_boundary.is_some();
    let action_plan_done = application.action_plan.is_some();

    let questions_total = application.questions.len();
    let questions_answered = application
        .questions
        .iter()
        .filter(|answered| **answered)
        .count();
    let questions_fraction = fraction(questions_answered, questions_total);

    let documents_required = application
        .documents
        .iter()
        .filter(|doc| doc.required)
        .count();
    let documents_uploaded = application
        .documents
        .iter()
        .filter(|doc| doc.required && doc.uploaded)
        .count();
    let documents_fraction = fraction(documents_uploaded, documents_required);

    let weighted = f64::from(u8::from(site_boundary_done)) * weights.site_boundary
        + f64::from(u8::from(action_plan_done)) * weights.action_plan
        + questions_fraction * weights.questions
        + documents_fraction * weights.documents;

    // Round half away from zero, then clamp; hostile weights stay in range
    let percent = (weighted * 100.0).round().clamp(0.0, 100.0) as u8;

    ProgressReport {
        percent,
        breakdown: ProgressBreakdown {
            weights,
            site_boundary_done,
            action_plan_done,
            questions_answered,
            questions_total,
            documents_uploaded,
            documents_required,
        },
    }
}

/// done / total as a fraction, 0 for an empty denominator (never NaN)
fn fraction(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64
    }
}
