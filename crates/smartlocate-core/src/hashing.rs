//! Screenshot fingerprints.

use md5::{Digest, Md5};
use smartlocate_protocols::Screenshot;

/// Lower-case hex MD5 of the base64 form of the screenshot.
///
/// The classification service derives the same key from uploaded
/// screenshots, so both sides must agree on it.
pub fn screenshot_hash(screenshot: &Screenshot) -> String {
    format!("{:x}", Md5::digest(screenshot.to_base64().as_bytes()))
}

/// A screenshot paired with its fingerprint.
#[derive(Debug, Clone)]
pub struct Capture {
    pub screenshot: Screenshot,
    pub hash: String,
}

impl Capture {
    pub fn new(screenshot: Screenshot) -> Self {
        let hash = screenshot_hash(&screenshot);
        Self { screenshot, hash }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_value() {
        let hash = screenshot_hash(&Screenshot::new(b"abc".to_vec()));
        assert_eq!(
            hash,
            "f4c0128178a6a21b7a3dd76729725d91"
        );
    }

    #[test]
    fn test_hash_is_deterministic() {
        let a = Capture::new(Screenshot::new(vec![1u8, 2, 3]));
        let b = Capture::new(Screenshot::new(vec![1u8, 2, 3]));
        let c = Capture::new(Screenshot::new(vec![1u8, 2, 4]));
        assert_eq!(a.hash, b.hash);
        assert_ne!(a.hash, c.hash);
        assert_eq!(a.hash.len(), 32);
    }
}
