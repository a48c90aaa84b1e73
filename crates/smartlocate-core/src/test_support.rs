//! In-memory driver, service and launcher used by the unit tests.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{ImageFormat, RgbaImage};
use smartlocate_protocols::{
    BoundingBox, ClassificationService, DriverError, ElementHandle, ElementQuery, ElementRef,
    ExistingElement, Point, PredictionOutcome, ReviewLauncher, Screenshot, ScreenshotSource,
    ServiceError, Size,
};

/// Encode a blank PNG of the given size.
pub fn png(width: u32, height: u32) -> Screenshot {
    let mut buf = Vec::new();
    RgbaImage::new(width, height)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    Screenshot::new(buf)
}

pub fn pending(review_url: Option<&str>, needs_reload: bool) -> PredictionOutcome {
    PredictionOutcome::Pending {
        review_url: review_url.map(str::to_string),
        needs_reload,
    }
}

#[derive(Debug)]
pub struct FakeElement {
    pub tag: String,
    pub bbox: BoundingBox,
}

impl FakeElement {
    pub fn new(tag: &str, bbox: BoundingBox) -> Arc<Self> {
        Arc::new(Self {
            tag: tag.to_string(),
            bbox,
        })
    }
}

#[async_trait]
impl ElementHandle for FakeElement {
    async fn location(&self) -> Result<Point, DriverError> {
        Ok(Point::new(self.bbox.x, self.bbox.y))
    }

    async fn size(&self) -> Result<Size, DriverError> {
        Ok(Size::new(self.bbox.width, self.bbox.height))
    }

    async fn tag_name(&self) -> Result<String, DriverError> {
        Ok(self.tag.clone())
    }
}

/// Returns the tag of a resolved element for assertions.
pub async fn tag_of(element: &ElementRef) -> String {
    element.tag_name().await.unwrap()
}

pub struct FakeDriver {
    elements: Vec<Arc<FakeElement>>,
    screenshots: Vec<Screenshot>,
    viewport: Size,
    fail_queries: bool,
    captures: AtomicUsize,
}

impl FakeDriver {
    pub fn new(elements: Vec<Arc<FakeElement>>) -> Self {
        Self {
            elements,
            screenshots: vec![png(200, 100)],
            viewport: Size::new(100.0, 50.0),
            fail_queries: false,
            captures: AtomicUsize::new(0),
        }
    }

    /// Successive captures return these in order, repeating the last one.
    pub fn with_screenshots(mut self, screenshots: Vec<Screenshot>) -> Self {
        self.screenshots = screenshots;
        self
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScreenshotSource for FakeDriver {
    async fn capture_screenshot(&self) -> Result<Screenshot, DriverError> {
        let n = self.captures.fetch_add(1, Ordering::SeqCst);
        let index = n.min(self.screenshots.len().saturating_sub(1));
        self.screenshots
            .get(index)
            .cloned()
            .ok_or_else(|| DriverError::Screenshot("no screenshot".to_string()))
    }

    async fn viewport_size(&self) -> Result<Size, DriverError> {
        Ok(self.viewport)
    }
}

#[async_trait]
impl ElementQuery for FakeDriver {
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, DriverError> {
        if self.fail_queries {
            return Err(DriverError::CommandFailed("query failed".to_string()));
        }
        Ok(self
            .elements
            .iter()
            .filter(|e| selector == "*" || e.tag == selector)
            .map(|e| e.clone() as ElementRef)
            .collect())
    }
}

/// Classification service that replays scripted responses and records calls.
pub struct ScriptedService {
    pub existing: Mutex<Option<ExistingElement>>,
    pub classify: Mutex<PredictionOutcome>,
    pub reviews: Mutex<VecDeque<PredictionOutcome>>,
    /// Per review call: `Some` fails that call without consuming a review.
    pub review_errors: Mutex<VecDeque<Option<ServiceError>>>,
    /// Per upload call: `Some` fails that upload.
    pub upload_errors: Mutex<VecDeque<Option<ServiceError>>>,
    pub fail_existing: bool,
    pub fail_updates: bool,
    pub fail_check_in: bool,
    pub calls: Mutex<Vec<String>>,
    pub review_requests: Mutex<Vec<(String, String)>>,
    pub updates: Mutex<Vec<(BoundingBox, String, String)>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            existing: Mutex::new(None),
            classify: Mutex::new(PredictionOutcome::Failed {
                message: "no classification scripted".to_string(),
            }),
            reviews: Mutex::new(VecDeque::new()),
            review_errors: Mutex::new(VecDeque::new()),
            upload_errors: Mutex::new(VecDeque::new()),
            fail_existing: false,
            fail_updates: false,
            fail_check_in: false,
            calls: Mutex::new(Vec::new()),
            review_requests: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn with_existing(self, existing: ExistingElement) -> Self {
        *self.existing.lock().unwrap() = Some(existing);
        self
    }

    pub fn with_classify(self, outcome: PredictionOutcome) -> Self {
        *self.classify.lock().unwrap() = outcome;
        self
    }

    pub fn with_reviews(self, outcomes: Vec<PredictionOutcome>) -> Self {
        *self.reviews.lock().unwrap() = outcomes.into();
        self
    }

    pub fn with_review_errors(self, errors: Vec<Option<ServiceError>>) -> Self {
        *self.review_errors.lock().unwrap() = errors.into();
        self
    }

    pub fn with_upload_errors(self, errors: Vec<Option<ServiceError>>) -> Self {
        *self.upload_errors.lock().unwrap() = errors.into();
        self
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl ClassificationService for ScriptedService {
    async fn check_in(&self, _test_case: &str) -> Result<(), ServiceError> {
        self.record("check_in");
        if self.fail_check_in {
            return Err(ServiceError::Authentication("invalid api key".to_string()));
        }
        Ok(())
    }

    async fn check_existing(
        &self,
        _screenshot_hash: &str,
        _element_name: &str,
    ) -> Result<ExistingElement, ServiceError> {
        self.record("check_existing");
        if self.fail_existing {
            return Err(ServiceError::Network("connection reset".to_string()));
        }
        Ok(self
            .existing
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(ExistingElement {
                exists_screenshot: false,
                is_frozen: false,
                outcome: pending(None, false),
            }))
    }

    async fn classify(
        &self,
        _screenshot: &Screenshot,
        _context_hint: &str,
        _element_name: &str,
        _test_case: &str,
    ) -> Result<PredictionOutcome, ServiceError> {
        self.record("classify");
        Ok(self.classify.lock().unwrap().clone())
    }

    async fn review_box(
        &self,
        element_name: &str,
        screenshot_hash: &str,
        _test_case: &str,
        event_id: &str,
    ) -> Result<PredictionOutcome, ServiceError> {
        self.record("review_box");
        assert!(!element_name.is_empty());
        self.review_requests
            .lock()
            .unwrap()
            .push((screenshot_hash.to_string(), event_id.to_string()));
        if let Some(Some(err)) = self.review_errors.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| pending(None, false)))
    }

    async fn upload_screenshot(
        &self,
        _screenshot: &Screenshot,
        _element_name: &str,
        _test_case: &str,
    ) -> Result<(), ServiceError> {
        self.record("upload");
        match self.upload_errors.lock().unwrap().pop_front() {
            Some(Some(err)) => Err(err),
            _ => Ok(()),
        }
    }

    async fn update_element(
        &self,
        bbox: &BoundingBox,
        screenshot_hash: &str,
        element_name: &str,
        _test_case: &str,
    ) -> Result<(), ServiceError> {
        self.record("update");
        if self.fail_updates {
            return Err(ServiceError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        self.updates.lock().unwrap().push((
            *bbox,
            screenshot_hash.to_string(),
            element_name.to_string(),
        ));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingLauncher {
    pub urls: Mutex<Vec<String>>,
}

impl ReviewLauncher for RecordingLauncher {
    fn open(&self, url: &str) {
        self.urls.lock().unwrap().push(url.to_string());
    }
}
