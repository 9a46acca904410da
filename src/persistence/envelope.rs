//! Versioned wrapper around saved payloads

use serde::{Deserialize, Serialize};

use super::PersistenceError;

/// Current on-disk format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(payload: T) -> Self {
        Self {
            version: SAVE_VERSION,
            payload,
        }
    }

    /// Unwrap the payload if the version is one we understand
    pub fn into_payload(self) -> Result<T, PersistenceError> {
        if self.version != SAVE_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_unwraps() {
        let env = Envelope::new(42u32);
        assert_eq!(env.into_payload().expect("payload"), 42);
    }

    #[test]
    fn test_future_version_rejected() {
        let env: Envelope<u32> =
            serde_json::from_str(r#"{ "version": 9, "payload": 3 }"#).expect("parse");
        assert!(matches!(
            env.into_payload(),
            Err(PersistenceError::UnsupportedVersion {
                found: 9,
                expected: SAVE_VERSION
            })
        ));
    }
}
