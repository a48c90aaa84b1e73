//! Chrome DevTools Protocol page driver for SmartLocate.
//!
//! Connects to a Chromium-based browser started with
//! `--remote-debugging-port`, attaches to its first page and exposes it
//! through the SmartLocate driver traits.

pub mod cdp;
mod driver;
mod element;

pub use driver::CdpDriver;
pub use element::{quad_bounds, CdpElement};

#[cfg(test)]
mod test_browser;
