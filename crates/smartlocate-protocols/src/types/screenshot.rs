//! Screenshot payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

/// Encoded image bytes (PNG) as captured from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    data: Bytes,
}

impl Screenshot {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Decode a base64 payload, as returned by CDP.
    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        let data = STANDARD.decode(encoded)?;
        Ok(Self::new(data))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Base64 form used by the classification service.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_base64() {
        let shot = Screenshot::new(vec![0x89, b'P', b'N', b'G']);
        let encoded = shot.to_base64();
        assert_eq!(encoded, "iVBORw==");
        assert_eq!(Screenshot::from_base64(&encoded).unwrap(), shot);
    }

    #[test]
    fn test_screenshot_invalid_base64() {
        assert!(Screenshot::from_base64("not base64!").is_err());
    }

    #[test]
    fn test_screenshot_empty() {
        let shot = Screenshot::new(Vec::new());
        assert!(shot.is_empty());
        assert_eq!(shot.len(), 0);
    }
}
