//! Configuration for the aggregation engine.

use serde::{Deserialize, Serialize};

use stitch_common::{StitchError, StitchResult};

/// Configuration for aggregate views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Maximum number of child datasets one view may combine.
    pub max_children: usize,

    /// Maximum number of axis positions a single read request may cover.
    pub max_request_positions: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            max_children: 32,
            max_request_positions: 1_048_576,
        }
    }
}

impl AggregateConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STITCH_MAX_CHILDREN") {
            if let Ok(n) = val.parse() {
                config.max_children = n;
            }
        }

        if let Ok(val) = std::env::var("STITCH_MAX_REQUEST_POSITIONS") {
            if let Ok(n) = val.parse() {
                config.max_request_positions = n;
            }
        }

        config
    }

    /// Parse configuration from a JSON document.
    pub fn from_json(json: &str) -> StitchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> StitchResult<()> {
        if self.max_children == 0 {
            return Err(StitchError::configuration("max_children must be > 0"));
        }

        if self.max_request_positions == 0 {
            return Err(StitchError::configuration(
                "max_request_positions must be > 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AggregateConfig::default();
        assert_eq!(config.max_children, 32);
        assert_eq!(config.max_request_positions, 1_048_576);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = AggregateConfig::from_json(
            r#"{"max_children": 4, "max_request_positions": 1000}"#,
        )
        .unwrap();
        assert_eq!(config.max_children, 4);
        assert_eq!(config.max_request_positions, 1000);

        assert!(AggregateConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AggregateConfig::default();
        config.max_children = 0;
        assert!(config.validate().is_err());

        config = AggregateConfig::default();
        config.max_request_positions = 0;
        assert!(config.validate().is_err());
    }
}
