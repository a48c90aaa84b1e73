//! Driver implementation over an attached page.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info};

use smartlocate_protocols::{
    DriverError, ElementQuery, ElementRef, Screenshot, ScreenshotSource, Size,
};

use crate::cdp::{CdpClient, CdpError, PageSession, ScreenshotFormat};
use crate::element::CdpElement;

const VIEWPORT_EXPRESSION: &str = "({width: window.innerWidth, height: window.innerHeight})";

/// Page driver speaking CDP to a Chromium-based browser.
pub struct CdpDriver {
    // Owns the WebSocket receive task.
    _client: CdpClient,
    page: Arc<PageSession>,
}

impl CdpDriver {
    /// Connect to `endpoint` and attach to its first page.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let client = CdpClient::connect(endpoint).await?;
        let page = client.first_page().await?;
        info!(
            "Attached to page target {} at {}",
            page.target_id(),
            endpoint
        );
        Ok(Self {
            _client: client,
            page: Arc::new(page),
        })
    }

    pub fn page(&self) -> &PageSession {
        &self.page
    }

    async fn element_for(&self, node_id: i64) -> Result<ElementRef, DriverError> {
        let node = self.page.describe_node(node_id).await.map_err(|e| {
            if e.is_server_error() {
                DriverError::StaleElement(format!("node {}: {}", node_id, e))
            } else {
                e.into()
            }
        })?;
        Ok(Arc::new(CdpElement::new(
            self.page.clone(),
            node.backend_node_id,
            node.tag_name(),
        )))
    }
}

/// Read `{width, height}` from an evaluated viewport expression.
fn parse_viewport(value: &Value) -> Result<Size, DriverError> {
    match (value["width"].as_f64(), value["height"].as_f64()) {
        (Some(width), Some(height)) => Ok(Size::new(width, height)),
        _ => Err(DriverError::CommandFailed(format!(
            "unexpected viewport value: {}",
            value
        ))),
    }
}

#[async_trait]
impl ScreenshotSource for CdpDriver {
    async fn capture_screenshot(&self) -> Result<Screenshot, DriverError> {
        let data = self
            .page
            .screenshot(ScreenshotFormat::Png)
            .await
            .map_err(|e| DriverError::Screenshot(e.to_string()))?;
        Screenshot::from_base64(&data).map_err(|e| DriverError::Screenshot(e.to_string()))
    }

    async fn viewport_size(&self) -> Result<Size, DriverError> {
        let value = self.page.evaluate(VIEWPORT_EXPRESSION).await?;
        parse_viewport(&value)
    }
}

#[async_trait]
impl ElementQuery for CdpDriver {
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, DriverError> {
        let node_ids = self
            .page
            .query_selector_all(selector)
            .await
            .map_err(|e| {
                if e.is_server_error() {
                    DriverError::InvalidSelector(format!("{}: {}", selector, e))
                } else {
                    e.into()
                }
            })?;
        debug!("Selector '{}' matched {} node(s)", selector, node_ids.len());

        let elements = try_join_all(node_ids.into_iter().map(|id| self.element_for(id))).await?;
        Ok(elements)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
