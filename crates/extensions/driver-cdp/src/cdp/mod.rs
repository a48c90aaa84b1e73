//! Chrome DevTools Protocol (CDP) client.
//!
//! Commands are multiplexed over one browser WebSocket. Page commands carry
//! the flattened session ID returned by `Target.attachToTarget`.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.attach_page(&target_id).await?;
//! let png = page.screenshot(ScreenshotFormat::Png).await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
