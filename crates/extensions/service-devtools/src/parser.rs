//! Decoding of service responses into protocol types.

use smartlocate_protocols::{ExistingElement, PredictionOutcome};

use crate::api::ApiResponse;

const DEFAULT_FAILURE: &str = "classification service reported a failure";

impl ApiResponse {
    /// Decode a `/detect` response. An unsuccessful detection is a failure
    /// whatever else it carries.
    pub fn into_classification(self) -> PredictionOutcome {
        if self.success {
            self.into_outcome()
        } else {
            PredictionOutcome::Failed {
                message: failure_message(self.message),
            }
        }
    }

    /// Decode the prediction state carried by a response.
    pub fn into_outcome(self) -> PredictionOutcome {
        match self.predicted_element {
            Some(bbox) if self.success => PredictionOutcome::Predicted(bbox),
            _ if self.tc_url.is_some() || self.needs_reload.is_some() => {
                PredictionOutcome::Pending {
                    review_url: self.tc_url,
                    needs_reload: self.needs_reload.unwrap_or(false),
                }
            }
            _ if !self.success => PredictionOutcome::Failed {
                message: failure_message(self.message),
            },
            _ => PredictionOutcome::Pending {
                review_url: None,
                needs_reload: false,
            },
        }
    }

    /// Decode a stored-record lookup.
    pub fn into_existing(self) -> ExistingElement {
        let exists_screenshot = self.exists_screenshot;
        let is_frozen = self.is_frozen;
        ExistingElement {
            exists_screenshot,
            is_frozen,
            outcome: self.into_outcome(),
        }
    }
}

fn failure_message(message: Option<String>) -> String {
    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_FAILURE.to_string())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
