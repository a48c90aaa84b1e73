//! In-process browser stand-in: HTTP discovery via wiremock plus a
//! WebSocket endpoint that answers CDP commands from a fixed page.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Base64 of the bytes `\x89PNG`.
pub const SCREENSHOT_DATA: &str = "iVBORw==";

pub struct FakeBrowser {
    pub http: MockServer,
    pub commands: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeBrowser {
    /// Browser with one page target.
    pub async fn start() -> Self {
        Self::start_with_targets(json!([
            {"id": "worker-1", "type": "service_worker", "url": "https://example.com/sw.js"},
            {"id": "page-1", "type": "page", "title": "Checkout", "url": "https://example.com/checkout"}
        ]))
        .await
    }

    pub async fn start_with_targets(targets: Value) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let ws_addr = listener.local_addr().unwrap();
        let commands = Arc::new(Mutex::new(Vec::new()));

        let recorded = commands.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
                    while let Some(Ok(msg)) = ws.next().await {
                        let Message::Text(text) = msg else {
                            continue;
                        };
                        let request: Value = serde_json::from_str(&text).unwrap();
                        let method = request["method"].as_str().unwrap_or_default().to_string();
                        let params = request["params"].clone();
                        recorded.lock().push((method.clone(), params.clone()));

                        let mut response = match answer(&method, &params) {
                            Ok(result) => json!({"id": request["id"], "result": result}),
                            Err((code, message)) => json!({
                                "id": request["id"],
                                "error": {"code": code, "message": message}
                            }),
                        };
                        if let Some(session) = request.get("sessionId") {
                            response["sessionId"] = session.clone();
                        }
                        // Unsolicited events must not disturb pending commands.
                        let event = json!({"method": "Page.frameNavigated", "params": {}});
                        let _ = ws.send(Message::Text(event.to_string().into())).await;
                        if ws.send(Message::Text(response.to_string().into())).await.is_err() {
                            break;
                        }
                    }
                });
            }
        });

        let http = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Browser": "HeadlessChrome/120.0.6099.109",
                "Protocol-Version": "1.3",
                "webSocketDebuggerUrl": format!("ws://{}/devtools/browser/fake", ws_addr),
            })))
            .mount(&http)
            .await;
        Mock::given(method("GET"))
            .and(path("/json/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(targets))
            .mount(&http)
            .await;
        Mock::given(method("PUT"))
            .and(path("/json/new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "page-new", "type": "page", "title": "", "url": "about:blank"
            })))
            .mount(&http)
            .await;

        Self { http, commands }
    }

    pub fn endpoint(&self) -> String {
        self.http.uri()
    }

    pub fn methods(&self) -> Vec<String> {
        self.commands.lock().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.commands
            .lock()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

/// The page: a document with two buttons. The first has a layout box, the
/// second is hidden.
fn answer(method: &str, params: &Value) -> Result<Value, (i64, String)> {
    match method {
        "Target.attachToTarget" => Ok(json!({
            "sessionId": format!("session-{}", params["targetId"].as_str().unwrap_or_default())
        })),
        "Page.enable" | "DOM.enable" | "Runtime.enable" => Ok(json!({})),
        "DOM.getDocument" => Ok(json!({
            "root": {"nodeId": 1, "backendNodeId": 1, "nodeType": 9, "nodeName": "#document"}
        })),
        "DOM.querySelectorAll" => match params["selector"].as_str().unwrap_or_default() {
            "button" => Ok(json!({"nodeIds": [10, 11]})),
            // Removed from the document before it can be described
            "form" => Ok(json!({"nodeIds": [99]})),
            "##" => Err((-32000, "DOM Error while querying".to_string())),
            _ => Ok(json!({"nodeIds": []})),
        },
        "DOM.describeNode" => match params["nodeId"].as_i64() {
            Some(id @ (10 | 11)) => Ok(json!({
                "node": {
                    "nodeId": id,
                    "backendNodeId": id + 100,
                    "nodeType": 1,
                    "nodeName": "BUTTON",
                    "localName": "button"
                }
            })),
            _ => Err((-32000, "Could not find node with given id".to_string())),
        },
        "DOM.getBoxModel" => match params["backendNodeId"].as_i64() {
            Some(110) => Ok(json!({
                "model": {
                    "content": [12.0, 22.0, 108.0, 22.0, 108.0, 68.0, 12.0, 68.0],
                    "padding": [11.0, 21.0, 109.0, 21.0, 109.0, 69.0, 11.0, 69.0],
                    "border": [10.0, 20.0, 110.0, 20.0, 110.0, 70.0, 10.0, 70.0],
                    "margin": [10.0, 20.0, 110.0, 20.0, 110.0, 70.0, 10.0, 70.0],
                    "width": 100,
                    "height": 50
                }
            })),
            _ => Err((-32000, "Could not compute box model.".to_string())),
        },
        "Page.captureScreenshot" => Ok(json!({"data": SCREENSHOT_DATA})),
        "Runtime.evaluate" => {
            let expression = params["expression"].as_str().unwrap_or_default();
            if expression.contains("innerWidth") {
                Ok(json!({"result": {"type": "object", "value": {"width": 1280, "height": 720}}}))
            } else if expression.starts_with("throw") {
                Ok(json!({
                    "result": {"type": "object", "subtype": "error"},
                    "exceptionDetails": {"exceptionId": 1, "text": "Uncaught"}
                }))
            } else {
                Ok(json!({"result": {"type": "number", "value": 2}}))
            }
        }
        _ => Err((-32601, format!("'{}' wasn't found", method))),
    }
}
