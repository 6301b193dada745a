//! Runtime configuration from environment variables.

use std::env;

pub const DEFAULT_FRAME_MS: u64 = 50;
pub const DEFAULT_MAX_CATCH_UP_MS: u64 = 1000;
pub const DEFAULT_MAX_PENDING: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Fixed RNG seed; random per session when unset
    pub seed: Option<u32>,
    /// Wall-clock polling period
    pub frame_ms: u64,
    /// Most wall-clock time fed into a session per wake-up
    pub max_catch_up_ms: u64,
    /// Command channel capacity
    pub max_pending: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: DEFAULT_FRAME_MS,
            max_catch_up_ms: DEFAULT_MAX_CATCH_UP_MS,
            max_pending: DEFAULT_MAX_PENDING,
        }
    }
}

impl RuntimeConfig {
    /// Read `ECO_GAMES_SEED`, `ECO_GAMES_FRAME_MS`, `ECO_GAMES_MAX_CATCH_UP_MS`
    /// and `ECO_GAMES_MAX_PENDING`. Unset or unparsable values use defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(key, value = %raw, "ignoring unparsable setting");
                    None
                }
            }
        }

        let defaults = Self::default();
        Self {
            seed: parse(&lookup, "ECO_GAMES_SEED"),
            frame_ms: parse(&lookup, "ECO_GAMES_FRAME_MS")
                .unwrap_or(defaults.frame_ms)
                .max(1),
            max_catch_up_ms: parse(&lookup, "ECO_GAMES_MAX_CATCH_UP_MS")
                .unwrap_or(defaults.max_catch_up_ms)
                .max(1),
            max_pending: parse(&lookup, "ECO_GAMES_MAX_PENDING")
                .unwrap_or(defaults.max_pending)
                .max(1),
        }
    }

    /// Configured seed, or a fresh random one
    pub fn seed_or_random(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[]));
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.frame_ms, 50);
        assert_eq!(config.max_catch_up_ms, 1000);
    }

    #[test]
    fn test_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("ECO_GAMES_SEED", "42"),
            ("ECO_GAMES_FRAME_MS", " 10 "),
            ("ECO_GAMES_MAX_CATCH_UP_MS", "250"),
            ("ECO_GAMES_MAX_PENDING", "0"),
        ]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.seed_or_random(), 42);
        assert_eq!(config.frame_ms, 10);
        assert_eq!(config.max_catch_up_ms, 250);
        assert_eq!(config.max_pending, 1);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("ECO_GAMES_SEED", "-1"),
            ("ECO_GAMES_FRAME_MS", "fast"),
        ]));
        assert_eq!(config.seed, None);
        assert_eq!(config.frame_ms, DEFAULT_FRAME_MS);
    }
}
