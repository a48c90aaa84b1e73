//! Service request and response bodies.

use serde::{Deserialize, Deserializer, Serialize};
use smartlocate_protocols::BoundingBox;

/// Wraps every request body with the API key.
#[derive(Debug, Serialize)]
pub struct Authenticated<'a, T> {
    pub api_key: &'a str,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Serialize)]
pub struct CheckInRequest<'a> {
    pub test_case_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ExistsRequest<'a> {
    pub screenshot_uuid: &'a str,
    pub label: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DetectRequest<'a> {
    /// Base64-encoded screenshot.
    pub screenshot: String,
    pub context: &'a str,
    pub label: &'a str,
    pub test_case_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ActionInfoRequest<'a> {
    pub label: &'a str,
    pub screenshot_uuid: &'a str,
    pub test_case_name: &'a str,
    pub event_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UploadRequest<'a> {
    pub screenshot: String,
    pub label: &'a str,
    pub test_case_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AddActionInfoRequest<'a> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub screenshot_uuid: &'a str,
    pub label: &'a str,
    pub test_case_name: &'a str,
}

/// Response shared by every endpoint. Fields are present or absent
/// depending on the endpoint and the state of the record.
#[derive(Debug, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "null_as_false")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub predicted_element: Option<BoundingBox>,
    #[serde(default)]
    pub needs_reload: Option<bool>,
    #[serde(default)]
    pub tc_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub exists_screenshot: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_frozen: bool,
}

/// The service sends `null` for unset flags.
fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
