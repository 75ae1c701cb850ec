//! Clamp mode of a patch-clamp recording

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recording configuration that decides units and thresholds
///
/// Modes other than current clamp and voltage clamp (for example `i=0`)
/// are kept verbatim in `Other` so they can be reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClampMode {
    /// Current clamp: primary channel is membrane potential in volts
    CurrentClamp,
    /// Voltage clamp: primary channel is membrane current in amperes
    VoltageClamp,
    /// Any other reported mode
    Other(String),
}

impl ClampMode {
    /// Short label used in recording metadata ("ic", "vc", ...)
    pub fn label(&self) -> &str {
        match self {
            ClampMode::CurrentClamp => "ic",
            ClampMode::VoltageClamp => "vc",
            ClampMode::Other(label) => label,
        }
    }
}

impl FromStr for ClampMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ClampMode::from(s.to_string()))
    }
}

impl From<String> for ClampMode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ic" => ClampMode::CurrentClamp,
            "vc" => ClampMode::VoltageClamp,
            _ => ClampMode::Other(s),
        }
    }
}

impl From<ClampMode> for String {
    fn from(mode: ClampMode) -> Self {
        match mode {
            ClampMode::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ClampMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("ic".parse::<ClampMode>().unwrap(), ClampMode::CurrentClamp);
        assert_eq!("vc".parse::<ClampMode>().unwrap(), ClampMode::VoltageClamp);
        assert_eq!(
            "i=0".parse::<ClampMode>().unwrap(),
            ClampMode::Other("i=0".to_string())
        );
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&ClampMode::VoltageClamp).unwrap();
        assert_eq!(json, "\"vc\"");

        let mode: ClampMode = serde_json::from_str("\"xyz\"").unwrap();
        assert_eq!(mode, ClampMode::Other("xyz".to_string()));
        assert_eq!(mode.to_string(), "xyz");
    }
}
