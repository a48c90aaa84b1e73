//! CDP page session for interacting with a single page.

use serde_json::{json, Value};
use tracing::debug;

use super::client::Transport;
use super::error::CdpError;
use super::protocol::{BoxModel, DomNode, ScreenshotFormat};

/// A session attached to a single page target.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Transport,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Transport) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("DOM.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Capture the viewport. Returns base64-encoded image data.
    pub async fn screenshot(&self, format: ScreenshotFormat) -> Result<String, CdpError> {
        let result = self
            .call(
                "Page.captureScreenshot",
                Some(json!({
                    "format": format,
                    "captureBeyondViewport": false,
                })),
            )
            .await?;

        result["data"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| CdpError::InvalidResponse("Missing screenshot data".to_string()))
    }

    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Document root node, without children.
    pub async fn get_document(&self) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": 0})))
            .await?;

        let root: DomNode = serde_json::from_value(result["root"].clone())?;
        Ok(root)
    }

    /// Node IDs of all elements matching `selector`, in document order.
    pub async fn query_selector_all(&self, selector: &str) -> Result<Vec<i64>, CdpError> {
        let doc = self.get_document().await?;

        let result = self
            .call(
                "DOM.querySelectorAll",
                Some(json!({
                    "nodeId": doc.node_id,
                    "selector": selector,
                })),
            )
            .await?;

        let node_ids: Vec<i64> = result["nodeIds"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default();

        Ok(node_ids)
    }

    /// Describe a node by its (document-scoped) node ID.
    pub async fn describe_node(&self, node_id: i64) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.describeNode", Some(json!({"nodeId": node_id})))
            .await?;

        let node: DomNode = serde_json::from_value(result["node"].clone())?;
        Ok(node)
    }

    /// Box model of a node by its backend node ID. `None` when the node has
    /// no layout box.
    pub async fn get_box_model(&self, backend_node_id: i64) -> Result<Option<BoxModel>, CdpError> {
        let result = self
            .call(
                "DOM.getBoxModel",
                Some(json!({"backendNodeId": backend_node_id})),
            )
            .await;

        match result {
            Ok(r) => {
                let model: BoxModel = serde_json::from_value(r["model"].clone())?;
                Ok(Some(model))
            }
            Err(e) if e.is_server_error() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
