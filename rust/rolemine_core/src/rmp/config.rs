//! Miner configuration and its JSON form.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the greedy selector evaluates candidate areas within one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// One candidate at a time, in pool order.
    #[default]
    Sequential,
    /// Areas computed concurrently from a snapshot, then merged in pool
    /// order. Same result as `Sequential`. Falls back to it when the
    /// `parallel` feature is off.
    Parallel,
}

/// Per-invocation knobs of `basic_rmp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Uncovered cells tolerated at termination.
    pub delta_factor: usize,
    pub scan: ScanMode,
}

impl MinerConfig {
    pub fn with_delta_factor(delta_factor: usize) -> Self {
        MinerConfig {
            delta_factor,
            ..Self::default()
        }
    }
}

/// Parse a miner config from a JSON string. Missing fields take defaults.
pub fn parse_miner_config(json: &str) -> Result<MinerConfig> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MinerError;

    #[test]
    fn parse_full_config() {
        let json = r#"{"delta_factor":2,"scan":"parallel"}"#;
        let config = parse_miner_config(json).unwrap();
        assert_eq!(config.delta_factor, 2);
        assert_eq!(config.scan, ScanMode::Parallel);
    }

    #[test]
    fn parse_empty_object_uses_defaults() {
        let config = parse_miner_config("{}").unwrap();
        assert_eq!(config, MinerConfig::default());
        assert_eq!(config.scan, ScanMode::Sequential);
    }

    #[test]
    fn negative_delta_factor_is_rejected() {
        let err = parse_miner_config(r#"{"delta_factor":-1}"#).unwrap_err();
        assert!(matches!(err, MinerError::Config(_)));
    }

    #[test]
    fn unknown_scan_mode_is_rejected() {
        assert!(parse_miner_config(r#"{"scan":"gpu"}"#).is_err());
    }
}
