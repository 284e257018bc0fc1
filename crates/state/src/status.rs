use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::StateError;

/// Lifecycle label of the model slot.
///
/// The numeric codes are part of the external contract (status reports carry
/// the code, not the name). Code 1 is unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ModelStatus {
    #[default]
    Offline = 0,
    Loading = 2,
    Working = 3,
}

impl ModelStatus {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Offline),
            2 => Some(Self::Loading),
            3 => Some(Self::Working),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Loading => "loading",
            Self::Working => "working",
        }
    }

    /// True once a model is loaded and serving.
    pub fn is_ready(self) -> bool {
        self == Self::Working
    }
}

impl From<ModelStatus> for u8 {
    fn from(status: ModelStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for ModelStatus {
    type Error = StateError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(StateError::UnknownStatus(code))
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_keep_the_gap() {
        assert_eq!(ModelStatus::Offline.code(), 0);
        assert_eq!(ModelStatus::Loading.code(), 2);
        assert_eq!(ModelStatus::Working.code(), 3);
        assert!(matches!(ModelStatus::try_from(1), Err(StateError::UnknownStatus(1))));
        assert!(ModelStatus::try_from(4).is_err());
        assert_eq!(ModelStatus::try_from(2).ok(), Some(ModelStatus::Loading));
    }

    #[test]
    fn serializes_as_code() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&ModelStatus::Working)?, "3");
        let status: ModelStatus = serde_json::from_str("2")?;
        assert_eq!(status, ModelStatus::Loading);
        assert!(serde_json::from_str::<ModelStatus>("1").is_err());
        Ok(())
    }

    #[test]
    fn default_is_offline_and_not_ready() {
        assert_eq!(ModelStatus::default(), ModelStatus::Offline);
        assert!(!ModelStatus::Loading.is_ready());
        assert!(ModelStatus::Working.is_ready());
        assert_eq!(ModelStatus::Working.to_string(), "working");
    }
}
