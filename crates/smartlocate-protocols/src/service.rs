//! Classification service protocol definitions.
//!
//! The service predicts where a named element sits on a screenshot and keeps
//! per-test-case records of confirmed element boxes. All boxes exchanged with
//! the service are in screenshot-pixel space.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::types::{BoundingBox, ExistingElement, PredictionOutcome, Screenshot};

#[async_trait]
pub trait ClassificationService: Send + Sync {
    /// Announce a test run for `test_case`.
    async fn check_in(&self, test_case: &str) -> Result<(), ServiceError>;

    /// Look up a stored prediction for this screenshot and element name.
    async fn check_existing(
        &self,
        screenshot_hash: &str,
        element_name: &str,
    ) -> Result<ExistingElement, ServiceError>;

    /// Ask the classifier to locate `element_name` on `screenshot`.
    async fn classify(
        &self,
        screenshot: &Screenshot,
        context_hint: &str,
        element_name: &str,
        test_case: &str,
    ) -> Result<PredictionOutcome, ServiceError>;

    /// Fetch (or open) the human-review record for an element.
    ///
    /// Repeated calls with the same `event_id` belong to one review cycle.
    async fn review_box(
        &self,
        element_name: &str,
        screenshot_hash: &str,
        test_case: &str,
        event_id: &str,
    ) -> Result<PredictionOutcome, ServiceError>;

    /// Upload a screenshot for an element of a test case.
    async fn upload_screenshot(
        &self,
        screenshot: &Screenshot,
        element_name: &str,
        test_case: &str,
    ) -> Result<(), ServiceError>;

    /// Record the confirmed box of an element.
    async fn update_element(
        &self,
        bbox: &BoundingBox,
        screenshot_hash: &str,
        element_name: &str,
        test_case: &str,
    ) -> Result<(), ServiceError>;
}
