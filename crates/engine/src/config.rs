use crate::types::FRAME_TICK_MS;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u32,
    pub frame_ms: u32,
    pub start_stage: u32,
    pub log_path: Option<String>,
    /// Acknowledge line-clear animations automatically once their duration has elapsed
    pub auto_ack: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            frame_ms: FRAME_TICK_MS,
            start_stage: 1,
            log_path: None,
            auto_ack: true,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables; unparseable values fall back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u32 = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let seed = parse_u32("TETRASCAPE_SEED", defaults.seed);
        let frame_ms = parse_u32("TETRASCAPE_FRAME_MS", defaults.frame_ms).max(1);
        let start_stage = parse_u32("TETRASCAPE_START_STAGE", defaults.start_stage).max(1);

        let log_path = lookup("TETRASCAPE_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let auto_ack = lookup("TETRASCAPE_AUTO_ACK")
            .map(|v| {
                let v = v.trim().to_lowercase();
                v == "1" || v == "true"
            })
            .unwrap_or(defaults.auto_ack);

        Self {
            seed,
            frame_ms,
            start_stage,
            log_path,
            auto_ack,
        }
    }
}
