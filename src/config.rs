//! Runtime configuration read from `FRAGTRIS_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::SettleMode;
use crate::types::DEFAULT_TICK_MS;

const SCORES_FILE_NAME: &str = ".fragtris_scores.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub seed: u32,
    pub tick_ms: u32,
    pub settle: SettleMode,
    /// `None` keeps high scores in memory for this run only.
    pub scores_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            tick_ms: DEFAULT_TICK_MS,
            settle: SettleMode::PerTick,
            scores_path: home_scores_path(env::var("HOME").ok()),
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup("FRAGTRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let tick_ms = lookup("FRAGTRIS_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(DEFAULT_TICK_MS);

        let settle = lookup("FRAGTRIS_SETTLE")
            .and_then(|s| SettleMode::from_str(s.trim()))
            .unwrap_or(SettleMode::PerTick);

        // Set but empty disables the file.
        let scores_path = match lookup("FRAGTRIS_SCORES_PATH") {
            Some(s) => non_empty(s).map(PathBuf::from),
            None => home_scores_path(lookup("HOME")),
        };

        let log_path = lookup("FRAGTRIS_LOG_PATH")
            .and_then(non_empty)
            .map(PathBuf::from);

        Self {
            seed,
            tick_ms,
            settle,
            scores_path,
            log_path,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms))
    }
}

fn non_empty(s: String) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn home_scores_path(home: Option<String>) -> Option<PathBuf> {
    home.and_then(non_empty)
        .map(|home| PathBuf::from(home).join(SCORES_FILE_NAME))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[("HOME", "/home/player")]));
        assert_eq!(cfg.tick_ms, 500);
        assert_eq!(cfg.settle, SettleMode::PerTick);
        assert_eq!(
            cfg.scores_path,
            Some(PathBuf::from("/home/player/.fragtris_scores.json"))
        );
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_explicit_values() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("FRAGTRIS_SEED", "12345"),
            ("FRAGTRIS_TICK_MS", " 250 "),
            ("FRAGTRIS_SETTLE", "instant"),
            ("FRAGTRIS_SCORES_PATH", "/tmp/scores.json"),
            ("FRAGTRIS_LOG_PATH", "/tmp/events.jsonl"),
        ]));
        assert_eq!(cfg.seed, 12345);
        assert_eq!(cfg.tick_duration(), Duration::from_millis(250));
        assert_eq!(cfg.settle, SettleMode::Immediate);
        assert_eq!(cfg.scores_path, Some(PathBuf::from("/tmp/scores.json")));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/events.jsonl")));
    }

    #[test]
    fn test_garbage_falls_back() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("FRAGTRIS_TICK_MS", "fast"),
            ("FRAGTRIS_SETTLE", "sometimes"),
            ("FRAGTRIS_LOG_PATH", "   "),
        ]));
        assert_eq!(cfg.tick_ms, 500);
        assert_eq!(cfg.settle, SettleMode::PerTick);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_zero_tick_falls_back() {
        let cfg = Config::from_lookup(lookup_from(&[("FRAGTRIS_TICK_MS", "0")]));
        assert_eq!(cfg.tick_ms, 500);
    }

    #[test]
    fn test_empty_scores_path_disables_file() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("HOME", "/home/player"),
            ("FRAGTRIS_SCORES_PATH", ""),
        ]));
        assert_eq!(cfg.scores_path, None);

        let no_home = Config::from_lookup(lookup_from(&[]));
        assert_eq!(no_home.scores_path, None);
    }
}
