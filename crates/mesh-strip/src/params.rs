//! Parameters for strip building.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "config")]
use crate::error::{StripError, StripResult};

/// Parameters for strip building.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct StripParams {
    /// Fail on edges shared by more than two triangles instead of
    /// stripping around them.
    pub strict_manifold: bool,
    /// Once a strip stops growing forward, try to grow it from its first
    /// triangle in the opposite direction.
    pub extend_backward: bool,
}

impl Default for StripParams {
    fn default() -> Self {
        Self {
            strict_manifold: false,
            extend_backward: true,
        }
    }
}

impl StripParams {
    /// Default parameters with manifold validation enabled.
    pub fn strict() -> Self {
        Self {
            strict_manifold: true,
            ..Self::default()
        }
    }

    /// Toggle backward extension.
    pub fn with_backward_extension(mut self, enabled: bool) -> Self {
        self.extend_backward = enabled;
        self
    }
}

#[cfg(feature = "config")]
impl StripParams {
    /// Parse parameters from a TOML document.
    pub fn from_toml(input: &str) -> StripResult<Self> {
        toml::from_str(input).map_err(|e| StripError::Config {
            details: e.to_string(),
        })
    }

    /// Serialize parameters as TOML.
    pub fn to_toml(&self) -> StripResult<String> {
        toml::to_string_pretty(self).map_err(|e| StripError::Config {
            details: e.to_string(),
        })
    }

    /// Parse parameters from a JSON document.
    pub fn from_json(input: &str) -> StripResult<Self> {
        serde_json::from_str(input).map_err(|e| StripError::Config {
            details: e.to_string(),
        })
    }

    /// Serialize parameters as JSON.
    pub fn to_json(&self) -> StripResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StripError::Config {
            details: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = StripParams::default();
        assert!(!params.strict_manifold);
        assert!(params.extend_backward);
    }

    #[test]
    fn test_builders() {
        let params = StripParams::strict().with_backward_extension(false);
        assert!(params.strict_manifold);
        assert!(!params.extend_backward);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_toml_partial_document() {
        let params = StripParams::from_toml("strict_manifold = true").unwrap();
        assert_eq!(params, StripParams::strict());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_json_roundtrip() {
        let params = StripParams::strict().with_backward_extension(false);
        let json = params.to_json().unwrap();
        assert_eq!(StripParams::from_json(&json).unwrap(), params);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_bad_document() {
        let err = StripParams::from_toml("strict_manifold = \"yes\"").unwrap_err();
        assert!(matches!(err, StripError::Config { .. }));
    }
}
