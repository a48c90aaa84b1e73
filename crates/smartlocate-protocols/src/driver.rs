//! Automation driver protocol definitions.
//!
//! A driver captures screenshots of the page under test and enumerates its
//! live elements. Element handles are owned by the driver; the locator only
//! reads them and hands them back to the caller.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DriverError;
use crate::types::{Point, Screenshot, Size};

/// Shared reference to a live element.
pub type ElementRef = Arc<dyn ElementHandle>;

/// Source of page screenshots.
#[async_trait]
pub trait ScreenshotSource: Send + Sync {
    /// Capture the current viewport as an encoded image.
    async fn capture_screenshot(&self) -> Result<Screenshot, DriverError>;

    /// Logical size of the viewport, in the same space element boxes use.
    async fn viewport_size(&self) -> Result<Size, DriverError>;
}

/// Enumerates elements of the live document.
#[async_trait]
pub trait ElementQuery: Send + Sync {
    /// All elements matching a CSS selector, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, DriverError>;

    /// The first element matching a CSS selector.
    async fn query_one(&self, selector: &str) -> Result<Option<ElementRef>, DriverError> {
        Ok(self.query_all(selector).await?.into_iter().next())
    }
}

/// Opaque reference to one live element.
#[async_trait]
pub trait ElementHandle: Send + Sync + fmt::Debug {
    /// Top-left corner in viewport coordinates.
    async fn location(&self) -> Result<Point, DriverError>;

    /// Rendered size in viewport coordinates.
    async fn size(&self) -> Result<Size, DriverError>;

    /// Lower-case tag name.
    async fn tag_name(&self) -> Result<String, DriverError>;
}

/// Combined driver used by the locator.
pub trait Driver: ScreenshotSource + ElementQuery {}

impl<T: ScreenshotSource + ElementQuery> Driver for T {}
