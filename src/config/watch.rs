//! `[watch]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[watch]` section in motif.toml - change-event handling.
///
/// # Example
/// ```toml
/// [watch]
/// debounce_ms = 300
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Debounce window for batching rapid change events, in milliseconds.
    #[serde(default = "defaults::watch::debounce_ms")]
    #[educe(Default = defaults::watch::debounce_ms())]
    pub debounce_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::super::MotifConfig;

    #[test]
    fn test_watch_config_defaults() {
        let config: MotifConfig = toml::from_str("").unwrap();
        assert_eq!(config.watch.debounce_ms, 300);
    }

    #[test]
    fn test_watch_config_custom() {
        let config = r#"
            [watch]
            debounce_ms = 150
        "#;
        let config: MotifConfig = toml::from_str(config).unwrap();
        assert_eq!(config.watch.debounce_ms, 150);
    }

    #[test]
    fn test_watch_unknown_field_rejection() {
        let config = r#"
            [watch]
            unknown = "field"
        "#;
        let result: Result<MotifConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
