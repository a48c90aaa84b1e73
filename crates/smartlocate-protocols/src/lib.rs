//! # SmartLocate Protocols
//!
//! Shared types and collaborator traits for the SmartLocate element locator.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`ScreenshotSource`] - Captures screenshots and reports the viewport size
//! - [`ElementQuery`] - Enumerates live elements for a selector
//! - [`ElementHandle`] - Opaque reference to one live element
//! - [`Driver`] - Screenshot source and element query in one
//! - [`ClassificationService`] - Remote service predicting element boxes
//! - [`ReviewLauncher`] - Opens a human-review page

pub mod driver;
pub mod error;
pub mod review;
pub mod service;
pub mod types;

pub use driver::{Driver, ElementHandle, ElementQuery, ElementRef, ScreenshotSource};
pub use error::{DriverError, ServiceError};
pub use review::ReviewLauncher;
pub use service::ClassificationService;
pub use types::*;
