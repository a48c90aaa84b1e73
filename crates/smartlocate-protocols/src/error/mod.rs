//! Error types for the SmartLocate protocol layer.

mod driver;
mod service;

pub use driver::*;
pub use service::*;
