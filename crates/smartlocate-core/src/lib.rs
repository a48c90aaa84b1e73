//! # SmartLocate Core
//!
//! Resolves human-readable element descriptions to live page elements.
//!
//! ## Components
//!
//! - [`SmartLocator`] - Entry point bound to one driver, service and test case
//! - [`BoxResolver`] - Maps a predicted box onto the best-overlapping element
//! - [`PredictionPoller`] - Obtains a prediction, waiting on human review when interactive
//! - [`ScaleFactor`] - Conversion between screenshot pixels and viewport units
//!
//! Boxes returned by the classification service are in screenshot pixels.
//! Element boxes reported by the driver are in viewport units. The
//! [`ScaleFactor`] measured at registration converts between the two.

pub mod collector;
pub mod error;
pub mod geometry;
pub mod hashing;
pub mod locator;
pub mod poller;
pub mod resolver;
pub mod review;
pub mod scale;
pub mod session;

#[cfg(test)]
mod test_support;

pub use collector::{collect_elements, CollectedElement};
pub use error::LocatorError;
pub use geometry::{center_contained, iou, overlap_area};
pub use hashing::{screenshot_hash, Capture};
pub use locator::{SmartLocator, SELECTOR_NAME_PREFIX};
pub use poller::{PollState, PredictionPoller, PredictionSession};
pub use resolver::{
    rank_candidates, select_candidate, BoxResolver, Candidate, Resolution, CONFIDENCE_THRESHOLD,
};
pub use review::SystemReviewLauncher;
pub use scale::ScaleFactor;
pub use session::{LocatorSession, PollOptions};
