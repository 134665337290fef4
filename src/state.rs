//! # Rotation State Persistence
//!
//! The clock keeps one persisted value: a rotation counter bumped every time
//! the view saves its state. It has no effect on rendering and exists only so
//! a recreated view can pick up where the previous one left off.
//!
//! ## Storage
//! - **Location**: configurable, `/tmp/clock_rotation_state.json` by default
//! - **Format**: `{"rotation": 3}`
//! - **Recovery**: a missing or malformed file restores the zero state
//!
//! ## Error Handling
//! Restoring a value of the wrong type or range is an
//! [`StateError::InvalidPersistedState`]. Because the counter is cosmetic,
//! callers normally recover through [`RotationState::restore_or_reset`].

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;

/// Errors from restoring or persisting the rotation counter.
#[derive(Error, Debug)]
pub enum StateError {
    /// Persisted value has the wrong type or is out of range
    #[error("invalid persisted state: {0}")]
    InvalidPersistedState(String),

    /// State file could not be read or written
    #[error("state IO: {0}")]
    Io(#[from] io::Error),

    /// State file is not valid JSON
    #[error("state JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rotation counter carried across view recreation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    rotation: u32,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.rotation
    }

    /// Current counter value, unchanged.
    pub fn serialize(&self) -> u32 {
        self.rotation
    }

    /// Restore from a raw persisted integer.
    pub fn deserialize(raw: i64) -> Result<Self, StateError> {
        u32::try_from(raw)
            .map(|rotation| Self { rotation })
            .map_err(|_| StateError::InvalidPersistedState(format!("rotation {raw} out of range")))
    }

    /// Restore from an arbitrary JSON value; only non-negative integers are
    /// accepted.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, StateError> {
        match value.as_i64() {
            Some(raw) => Self::deserialize(raw),
            None => Err(StateError::InvalidPersistedState(format!(
                "expected an integer rotation, found {value}"
            ))),
        }
    }

    /// Restore `raw`, falling back to the zero state if it is invalid.
    pub fn restore_or_reset(raw: i64) -> Self {
        Self::deserialize(raw).unwrap_or_else(|error| {
            log::warn!("Resetting rotation counter: {}", error);
            Self::default()
        })
    }

    /// The state to persist on save: one past the live counter, which is left
    /// untouched.
    pub fn on_save(&self) -> Self {
        Self {
            rotation: self.rotation.saturating_add(1),
        }
    }

    /// Write the counter to `path` as JSON.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), StateError> {
        let contents = serde_json::to_string(self)?;
        fs::write(&path, contents)?;
        log::debug!(
            "Saved rotation {} to {}",
            self.rotation,
            path.as_ref().display()
        );
        Ok(())
    }

    /// Read the counter from `path`.
    ///
    /// Never fails: a missing, unreadable or malformed file yields the zero
    /// state.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load(&path) {
            Ok(state) => state,
            Err(StateError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "No rotation state at {}, starting from 0",
                    path.as_ref().display()
                );
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "Ignoring rotation state at {}: {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn try_load<P: AsRef<Path>>(path: P) -> Result<Self, StateError> {
        let contents = fs::read_to_string(path)?;
        let document: serde_json::Value = serde_json::from_str(&contents)?;
        match document.get("rotation") {
            Some(value) => Self::from_json(value),
            None => Err(StateError::InvalidPersistedState(
                "missing \"rotation\" field".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip() {
        for x in [0i64, 1, 42, u32::MAX as i64] {
            let state = RotationState::deserialize(x).unwrap();
            assert_eq!(state.serialize() as i64, x);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            RotationState::deserialize(-1),
            Err(StateError::InvalidPersistedState(_))
        ));
        assert!(matches!(
            RotationState::deserialize(u32::MAX as i64 + 1),
            Err(StateError::InvalidPersistedState(_))
        ));
    }

    #[test]
    fn test_restore_or_reset() {
        assert_eq!(RotationState::restore_or_reset(7).value(), 7);
        assert_eq!(RotationState::restore_or_reset(-3).value(), 0);
    }

    #[test]
    fn test_from_json_shapes() {
        assert_eq!(RotationState::from_json(&json!(5)).unwrap().value(), 5);
        for bad in [json!("5"), json!(1.5), json!(null), json!({"rotation": 1}), json!(-2)] {
            assert!(
                matches!(
                    RotationState::from_json(&bad),
                    Err(StateError::InvalidPersistedState(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_on_save_leaves_live_counter() {
        let state = RotationState::deserialize(4).unwrap();
        assert_eq!(state.on_save().value(), 5);
        assert_eq!(state.on_save().value(), 5);
        assert_eq!(state.serialize(), 4);

        let maxed = RotationState::deserialize(u32::MAX as i64).unwrap();
        assert_eq!(maxed.on_save().value(), u32::MAX);
    }

    #[test]
    fn test_file_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let state = RotationState::deserialize(1).unwrap().on_save();
        state.save_to_path(file.path()).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, r#"{"rotation":2}"#);
        assert_eq!(RotationState::load_from_path(file.path()).value(), 2);
    }

    #[test]
    fn test_malformed_file_resets() {
        let file = NamedTempFile::new().unwrap();
        for contents in ["not json", r#"{"rotation":"three"}"#, r#"{"spin":3}"#, "[]"] {
            fs::write(file.path(), contents).unwrap();
            assert_eq!(
                RotationState::load_from_path(file.path()),
                RotationState::default(),
                "{contents} should reset"
            );
        }
    }

    #[test]
    fn test_missing_file_resets() {
        let state = RotationState::load_from_path("/nonexistent/clock_rotation_state.json");
        assert_eq!(state.value(), 0);
    }
}
