//! Screenshot-to-viewport scale.

use std::io::Cursor;

use image::ImageReader;
use smartlocate_protocols::{BoundingBox, Screenshot, ScreenshotSource};
use tracing::debug;

use crate::error::LocatorError;

/// Ratio of screenshot pixels to viewport units.
///
/// Greater than one on high-density displays, where a screenshot holds more
/// pixels than the page reports for its viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(value: f64) -> Result<Self, LocatorError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(LocatorError::InvalidScale(format!(
                "scale must be a positive number, got {}",
                value
            )))
        }
    }

    pub fn identity() -> Self {
        Self(1.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Scale from a screenshot width in pixels and a viewport width.
    pub fn from_widths(screenshot_width: f64, viewport_width: f64) -> Result<Self, LocatorError> {
        if viewport_width <= 0.0 {
            return Err(LocatorError::InvalidScale(format!(
                "viewport width must be positive, got {}",
                viewport_width
            )));
        }
        Self::new(screenshot_width / viewport_width)
    }

    /// Capture a screenshot and compare its width with the viewport width.
    pub async fn measure<S>(source: &S) -> Result<Self, LocatorError>
    where
        S: ScreenshotSource + ?Sized,
    {
        let screenshot = source.capture_screenshot().await?;
        let (width, height) = image_dimensions(&screenshot)?;
        let viewport = source.viewport_size().await?;
        let scale = Self::from_widths(width as f64, viewport.width)?;
        debug!(
            "Measured scale {} from {}x{} screenshot and {}x{} viewport",
            scale.0, width, height, viewport.width, viewport.height
        );
        Ok(scale)
    }

    /// Screenshot pixels to viewport units.
    pub fn to_viewport(&self, bbox: &BoundingBox) -> BoundingBox {
        bbox.scaled_down(self.0)
    }

    /// Viewport units to screenshot pixels.
    pub fn to_screenshot(&self, bbox: &BoundingBox) -> BoundingBox {
        bbox.scaled_up(self.0)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::identity()
    }
}

/// Pixel dimensions of an encoded screenshot, read from its header.
pub fn image_dimensions(screenshot: &Screenshot) -> Result<(u32, u32), LocatorError> {
    ImageReader::new(Cursor::new(screenshot.bytes()))
        .with_guessed_format()
        .map_err(|e| LocatorError::ScreenshotDecode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| LocatorError::ScreenshotDecode(e.to_string()))
}
