//! Obtains a prediction for an element and resolves it.
//!
//! Non-interactive lookups ask the service once: a stored prediction for
//! the screenshot, or a fresh classification. Interactive lookups upload the
//! screenshot and poll the review record until a human has annotated it,
//! re-capturing the page whenever the service asks for a reload.

use std::future::Future;
use std::sync::Arc;

use smartlocate_protocols::{
    BoundingBox, ClassificationService, Driver, ExistingElement, PredictionOutcome,
    ReviewLauncher, Screenshot, ScreenshotSource, ServiceError,
};
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::LocatorError;
use crate::hashing::Capture;
use crate::resolver::{BoxResolver, Resolution};
use crate::session::LocatorSession;

/// Where an interactive lookup stands after a service response.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// Nothing received yet.
    NoPrediction,
    /// The review page is open and the reviewer has not finished.
    AwaitingHuman,
    /// The service wants a fresh screenshot of the page.
    ReloadRequested,
    /// A box is available.
    Resolved(BoundingBox),
}

/// Mutable bookkeeping for one interactive lookup.
#[derive(Debug, Clone)]
pub struct PredictionSession {
    pub element_name: String,
    /// Fingerprint of the most recently uploaded screenshot.
    pub screenshot_hash: String,
    /// Identifies this review cycle to the service.
    pub event_id: String,
    pub review_opened: bool,
    pub reloads: u32,
    pub state: PollState,
}

impl PredictionSession {
    pub fn new(element_name: impl Into<String>, screenshot_hash: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            screenshot_hash: screenshot_hash.into(),
            event_id: Uuid::new_v4().to_string(),
            review_opened: false,
            reloads: 0,
            state: PollState::NoPrediction,
        }
    }
}

/// Drives the classification service until a prediction is available.
pub struct PredictionPoller {
    driver: Arc<dyn Driver>,
    service: Arc<dyn ClassificationService>,
    launcher: Arc<dyn ReviewLauncher>,
    resolver: BoxResolver,
    session: Arc<LocatorSession>,
}

impl PredictionPoller {
    pub fn new(
        driver: Arc<dyn Driver>,
        service: Arc<dyn ClassificationService>,
        launcher: Arc<dyn ReviewLauncher>,
        resolver: BoxResolver,
        session: Arc<LocatorSession>,
    ) -> Self {
        Self {
            driver,
            service,
            launcher,
            resolver,
            session,
        }
    }

    pub fn resolver(&self) -> &BoxResolver {
        &self.resolver
    }

    /// Obtain a prediction for `element_name` on `capture` and resolve it.
    ///
    /// `existing` is a stored-prediction lookup the caller already made for
    /// this capture, reused instead of asking again.
    pub async fn locate(
        &self,
        element_name: &str,
        capture: Capture,
        existing: Option<ExistingElement>,
        cancel: &CancellationToken,
    ) -> Result<Option<Resolution>, LocatorError> {
        let predicted = if self.session.interactive {
            self.await_review(element_name, capture, cancel).await?
        } else {
            self.predict_once(element_name, &capture, existing).await?
        };
        self.resolver.resolve(&predicted).await
    }

    async fn predict_once(
        &self,
        element_name: &str,
        capture: &Capture,
        existing: Option<ExistingElement>,
    ) -> Result<BoundingBox, LocatorError> {
        let existing = match existing {
            Some(existing) => existing,
            None => {
                self.service
                    .check_existing(&capture.hash, element_name)
                    .await?
            }
        };
        if let PredictionOutcome::Predicted(bbox) = existing.outcome {
            debug!("Using stored prediction for '{}'", element_name);
            return Ok(bbox);
        }

        let outcome = self
            .service
            .classify(&capture.screenshot, "", element_name, &self.session.test_case)
            .await?;
        match outcome {
            PredictionOutcome::Predicted(bbox) => Ok(bbox),
            PredictionOutcome::Failed { message } => {
                Err(LocatorError::ClassificationFailed(message))
            }
            PredictionOutcome::Pending { .. } => Err(LocatorError::ClassificationFailed(format!(
                "no prediction returned for '{}'",
                element_name
            ))),
        }
    }

    async fn await_review(
        &self,
        element_name: &str,
        capture: Capture,
        cancel: &CancellationToken,
    ) -> Result<BoundingBox, LocatorError> {
        let test_case = self.session.test_case.as_str();
        let deadline = self.session.poll.timeout.map(|t| Instant::now() + t);
        let mut session = PredictionSession::new(element_name, capture.hash.clone());

        self.guarded(
            self.upload(&capture.screenshot, element_name),
            deadline,
            cancel,
        )
        .await??;

        loop {
            let response = self
                .guarded(
                    self.service.review_box(
                        element_name,
                        &session.screenshot_hash,
                        test_case,
                        &session.event_id,
                    ),
                    deadline,
                    cancel,
                )
                .await?;

            match response {
                Ok(outcome) => {
                    let state = self.advance(&mut session, outcome)?;
                    session.state = state;
                }
                Err(e) if session.review_opened && e.is_retryable() => {
                    warn!("Review poll for '{}' failed, retrying: {}", element_name, e);
                }
                Err(e) => return Err(e.into()),
            }

            match session.state {
                PollState::Resolved(bbox) => {
                    info!(
                        "Review for '{}' finished after {} reload(s)",
                        element_name, session.reloads
                    );
                    return Ok(bbox);
                }
                PollState::ReloadRequested => {
                    self.guarded(self.reload(&mut session), deadline, cancel)
                        .await??;
                    session.state = PollState::AwaitingHuman;
                }
                PollState::NoPrediction | PollState::AwaitingHuman => {}
            }

            self.guarded(sleep(self.session.poll.interval), deadline, cancel)
                .await?;
        }
    }

    /// Apply one service response to the session.
    fn advance(
        &self,
        session: &mut PredictionSession,
        outcome: PredictionOutcome,
    ) -> Result<PollState, LocatorError> {
        match outcome {
            PredictionOutcome::Predicted(bbox) => Ok(PollState::Resolved(bbox)),
            PredictionOutcome::Pending {
                review_url,
                needs_reload,
            } => {
                if !session.review_opened {
                    let url = review_url.ok_or_else(|| {
                        LocatorError::MissingReviewUrl(session.element_name.clone())
                    })?;
                    self.launcher.open(&url);
                    session.review_opened = true;
                }
                if needs_reload {
                    Ok(PollState::ReloadRequested)
                } else {
                    Ok(PollState::AwaitingHuman)
                }
            }
            PredictionOutcome::Failed { message } if session.review_opened => {
                warn!(
                    "Review service reported '{}' for '{}', still waiting",
                    message, session.element_name
                );
                Ok(PollState::AwaitingHuman)
            }
            PredictionOutcome::Failed { message } => {
                Err(LocatorError::ClassificationFailed(message))
            }
        }
    }

    /// Re-capture the page and upload it, switching the session to the new
    /// screenshot.
    async fn reload(&self, session: &mut PredictionSession) -> Result<(), LocatorError> {
        let capture = Capture::new(self.driver.capture_screenshot().await?);
        self.upload(&capture.screenshot, &session.element_name)
            .await?;
        debug!(
            "Reloaded screenshot for '{}': {} -> {}",
            session.element_name, session.screenshot_hash, capture.hash
        );
        session.screenshot_hash = capture.hash;
        session.reloads += 1;
        Ok(())
    }

    /// Upload a screenshot for review. A refusal, for example of a
    /// screenshot the service already stores, does not stop the review.
    async fn upload(&self, screenshot: &Screenshot, element_name: &str) -> Result<(), LocatorError> {
        match self
            .service
            .upload_screenshot(screenshot, element_name, &self.session.test_case)
            .await
        {
            Err(ServiceError::Rejected(message)) => {
                warn!(
                    "Screenshot upload for '{}' was refused: {}",
                    element_name, message
                );
                Ok(())
            }
            other => other.map_err(LocatorError::from),
        }
    }

    /// Run `fut` unless the lookup is cancelled or its deadline passes first.
    async fn guarded<F: Future>(
        &self,
        fut: F,
        deadline: Option<Instant>,
        cancel: &CancellationToken,
    ) -> Result<F::Output, LocatorError> {
        let expired = async {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LocatorError::Cancelled),
            _ = expired => Err(LocatorError::TimedOut(
                self.session.poll.timeout.unwrap_or_default(),
            )),
            output = fut => Ok(output),
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
