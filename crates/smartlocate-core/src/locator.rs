//! The public locator bound to one page, one service and one test case.

use std::sync::Arc;

use smartlocate_protocols::{
    BoundingBox, ClassificationService, Driver, ElementHandle, ElementQuery, ElementRef,
    ExistingElement, ReviewLauncher, ScreenshotSource,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::LocatorError;
use crate::hashing::Capture;
use crate::poller::PredictionPoller;
use crate::resolver::BoxResolver;
use crate::scale::ScaleFactor;
use crate::session::LocatorSession;

/// Element name recorded for selector lookups made without an explicit name.
pub const SELECTOR_NAME_PREFIX: &str = "wdio_by_selector_";

/// Finds elements by description, and backs selector queries with the
/// classification service.
pub struct SmartLocator {
    session: Arc<LocatorSession>,
    driver: Arc<dyn Driver>,
    service: Arc<dyn ClassificationService>,
    poller: PredictionPoller,
}

impl SmartLocator {
    /// Measure the page scale and check in with the service.
    pub async fn register(
        session: LocatorSession,
        driver: Arc<dyn Driver>,
        service: Arc<dyn ClassificationService>,
        launcher: Arc<dyn ReviewLauncher>,
    ) -> Result<Self, LocatorError> {
        let scale = ScaleFactor::measure(driver.as_ref()).await?;
        service.check_in(&session.test_case).await?;
        info!(
            "Registered test case '{}' (scale {}, interactive: {})",
            session.test_case,
            scale.value(),
            session.interactive
        );
        Ok(Self::with_scale(session, driver, service, launcher, scale))
    }

    /// Build a locator with a known scale, without contacting the service.
    pub fn with_scale(
        session: LocatorSession,
        driver: Arc<dyn Driver>,
        service: Arc<dyn ClassificationService>,
        launcher: Arc<dyn ReviewLauncher>,
        scale: ScaleFactor,
    ) -> Self {
        let session = Arc::new(session);
        let resolver = BoxResolver::new(driver.clone(), session.tag_filters(), scale);
        let poller = PredictionPoller::new(
            driver.clone(),
            service.clone(),
            launcher,
            resolver,
            session.clone(),
        );
        Self {
            session,
            driver,
            service,
            poller,
        }
    }

    pub fn session(&self) -> &LocatorSession {
        &self.session
    }

    pub fn scale(&self) -> ScaleFactor {
        self.poller.resolver().scale()
    }

    /// Locate the element described by `name` on the current page.
    ///
    /// `Ok(None)` means a prediction was obtained but no element matched it
    /// closely enough.
    pub async fn find_by_description(&self, name: &str) -> Result<Option<ElementRef>, LocatorError> {
        self.find_by_description_with(name, &CancellationToken::new())
            .await
    }

    /// As [`find_by_description`](Self::find_by_description), abandoning a
    /// pending review when `cancel` fires.
    pub async fn find_by_description_with(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<ElementRef>, LocatorError> {
        let capture = self.capture().await?;
        let resolution = self.poller.locate(name, capture, None, cancel).await?;
        match resolution {
            Some(resolution) => {
                info!(
                    "Resolved '{}' via '{}' (score {:.3})",
                    name, resolution.tag_filter, resolution.score
                );
                Ok(Some(resolution.element))
            }
            None => {
                info!("No element matched the prediction for '{}'", name);
                Ok(None)
            }
        }
    }

    /// Query by CSS selector, recording the result with the service.
    ///
    /// When the selector finds an element its box is reported to the
    /// service. When it finds nothing, the element is located from the
    /// screenshot under `name`, which defaults to the selector with
    /// [`SELECTOR_NAME_PREFIX`]. Failures past the selector query and the
    /// screenshot are logged and the selector's own result is returned.
    pub async fn query_selector(
        &self,
        selector: &str,
        name: Option<&str>,
    ) -> Result<Option<ElementRef>, LocatorError> {
        let found = self.driver.query_one(selector).await?;
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", SELECTOR_NAME_PREFIX, selector));
        let capture = self.capture().await?;

        match self.assist_selector(found.as_ref(), &name, capture).await {
            Ok(element) => Ok(element),
            Err(e) => {
                warn!("Selector assist for '{}' failed: {}", name, e);
                Ok(found)
            }
        }
    }

    async fn assist_selector(
        &self,
        found: Option<&ElementRef>,
        name: &str,
        capture: Capture,
    ) -> Result<Option<ElementRef>, LocatorError> {
        let existing = self.service.check_existing(&capture.hash, name).await?;
        match found {
            Some(element) => {
                self.record_element(element, name, &capture, &existing)
                    .await?;
                Ok(Some(element.clone()))
            }
            None => {
                info!("Selector for '{}' found nothing, using screenshot", name);
                let resolution = self
                    .poller
                    .locate(name, capture, Some(existing), &CancellationToken::new())
                    .await?;
                Ok(resolution.map(|r| r.element))
            }
        }
    }

    async fn record_element(
        &self,
        element: &ElementRef,
        name: &str,
        capture: &Capture,
        existing: &ExistingElement,
    ) -> Result<(), LocatorError> {
        let (location, size) = futures::try_join!(element.location(), element.size())?;
        let bbox = self
            .scale()
            .to_screenshot(&BoundingBox::from_parts(location, size));

        if existing.needs_upload() {
            self.service
                .upload_screenshot(&capture.screenshot, name, &self.session.test_case)
                .await?;
        }
        self.service
            .update_element(&bbox, &capture.hash, name, &self.session.test_case)
            .await?;
        debug!("Recorded '{}' at {:?}", name, bbox);
        Ok(())
    }

    async fn capture(&self) -> Result<Capture, LocatorError> {
        Ok(Capture::new(self.driver.capture_screenshot().await?))
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
