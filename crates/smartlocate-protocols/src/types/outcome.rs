//! Classification service results, decoded once at the service boundary.

use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// The state of a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    /// A usable box in screenshot-pixel space.
    Predicted(BoundingBox),
    /// No prediction yet; a human may be asked to annotate.
    Pending {
        review_url: Option<String>,
        needs_reload: bool,
    },
    /// The service rejected the request.
    Failed { message: String },
}

impl PredictionOutcome {
    pub fn predicted_box(&self) -> Option<&BoundingBox> {
        match self {
            PredictionOutcome::Predicted(bbox) => Some(bbox),
            _ => None,
        }
    }

    pub fn is_predicted(&self) -> bool {
        self.predicted_box().is_some()
    }
}

/// What the service already knows about a screenshot and element name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingElement {
    /// The screenshot has been uploaded before.
    pub exists_screenshot: bool,
    /// The element record is locked against updates.
    pub is_frozen: bool,
    pub outcome: PredictionOutcome,
}

impl ExistingElement {
    /// Whether the screenshot should be uploaded alongside an element update.
    pub fn needs_upload(&self) -> bool {
        !self.exists_screenshot && !self.is_frozen
    }
}
