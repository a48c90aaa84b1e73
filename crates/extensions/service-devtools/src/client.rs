//! HTTP client for the dev-tools.ai classification service.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use smartlocate_protocols::{
    BoundingBox, ClassificationService, ExistingElement, PredictionOutcome, Screenshot,
    ServiceError,
};

use crate::api::{
    ActionInfoRequest, AddActionInfoRequest, ApiResponse, Authenticated, CheckInRequest,
    DetectRequest, ExistsRequest, UploadRequest,
};

const DEFAULT_API_URL: &str = "https://smartdriver.dev-tools.ai";

/// Classification service reached over JSON/HTTPS.
pub struct DevToolsClient {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl DevToolsClient {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create a client for a self-hosted or test service.
    pub fn with_url(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Apply a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ServiceError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(self)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn post<T: Serialize>(&self, path: &str, body: T) -> Result<ApiResponse, ServiceError> {
        let url = format!("{}{}", self.api_url, path);
        debug!("POST {}", url);

        let request = self.client.post(&url).json(&Authenticated {
            api_key: &self.api_key,
            body,
        });
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or(body);
            return Err(match status.as_u16() {
                401 | 403 => ServiceError::Authentication(message),
                code => ServiceError::Api {
                    status: code,
                    message,
                },
            });
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    /// Post to an endpoint that only acknowledges.
    async fn post_ack<T: Serialize>(&self, path: &str, body: T) -> Result<(), ServiceError> {
        let response = self.post(path, body).await?;
        if response.success {
            Ok(())
        } else {
            Err(ServiceError::Rejected(response.message.unwrap_or_else(|| {
                format!("{} was not acknowledged", path)
            })))
        }
    }
}

#[async_trait]
impl ClassificationService for DevToolsClient {
    async fn check_in(&self, test_case: &str) -> Result<(), ServiceError> {
        let response = self
            .post(
                "/check_in",
                CheckInRequest {
                    test_case_name: test_case,
                },
            )
            .await?;
        if !response.success {
            warn!(
                "Check-in for '{}' was not acknowledged: {}",
                test_case,
                response.message.unwrap_or_default()
            );
        }
        Ok(())
    }

    async fn check_existing(
        &self,
        screenshot_hash: &str,
        element_name: &str,
    ) -> Result<ExistingElement, ServiceError> {
        let response = self
            .post(
                "/exists",
                ExistsRequest {
                    screenshot_uuid: screenshot_hash,
                    label: element_name,
                },
            )
            .await?;
        Ok(response.into_existing())
    }

    async fn classify(
        &self,
        screenshot: &Screenshot,
        context_hint: &str,
        element_name: &str,
        test_case: &str,
    ) -> Result<PredictionOutcome, ServiceError> {
        let response = self
            .post(
                "/detect",
                DetectRequest {
                    screenshot: screenshot.to_base64(),
                    context: context_hint,
                    label: element_name,
                    test_case_name: test_case,
                },
            )
            .await?;
        Ok(response.into_classification())
    }

    async fn review_box(
        &self,
        element_name: &str,
        screenshot_hash: &str,
        test_case: &str,
        event_id: &str,
    ) -> Result<PredictionOutcome, ServiceError> {
        let response = self
            .post(
                "/testcase/get_action_info",
                ActionInfoRequest {
                    label: element_name,
                    screenshot_uuid: screenshot_hash,
                    test_case_name: test_case,
                    event_id,
                },
            )
            .await?;
        Ok(response.into_outcome())
    }

    async fn upload_screenshot(
        &self,
        screenshot: &Screenshot,
        element_name: &str,
        test_case: &str,
    ) -> Result<(), ServiceError> {
        self.post_ack(
            "/upload_test_element",
            UploadRequest {
                screenshot: screenshot.to_base64(),
                label: element_name,
                test_case_name: test_case,
            },
        )
        .await
    }

    async fn update_element(
        &self,
        bbox: &BoundingBox,
        screenshot_hash: &str,
        element_name: &str,
        test_case: &str,
    ) -> Result<(), ServiceError> {
        self.post_ack(
            "/add_action_info",
            AddActionInfoRequest {
                x: bbox.x,
                y: bbox.y,
                width: bbox.width,
                height: bbox.height,
                screenshot_uuid: screenshot_hash,
                label: element_name,
                test_case_name: test_case,
            },
        )
        .await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
