//! Shared domain types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which device a cross-device payload originated from.
///
/// The watch produces live readings and raises alerts; the phone queries
/// history and receives relayed alert messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceRole {
    /// The wearable running the monitoring session.
    Watch,
    /// The companion handset.
    Phone,
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Watch => write!(f, "watch"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(DeviceRole::Watch.to_string(), "watch");
        assert_eq!(DeviceRole::Phone.to_string(), "phone");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn role_serde_roundtrip() {
        let json = serde_json::to_string(&DeviceRole::Watch).unwrap();
        let parsed: DeviceRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DeviceRole::Watch);
    }
}
