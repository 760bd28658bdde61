//! Run configuration from environment.

use std::env;
use std::path::PathBuf;

use delivery_core::FlightRules;

pub const DEFAULT_REST_URL: &str = "https://ilp-rest.azurewebsites.net/";
pub const DEFAULT_OUTPUT_DIR: &str = "resultfiles";

#[derive(Debug, Clone)]
pub struct Config {
    pub rest_url: String,
    pub output_dir: PathBuf,
    pub move_budget: u32,
    pub max_expansions: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = FlightRules::default();
        Self {
            rest_url: var("DELIVERY_REST_URL").unwrap_or_else(|| DEFAULT_REST_URL.to_string()),
            output_dir: var("DELIVERY_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            move_budget: var("DELIVERY_MOVE_BUDGET")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.move_budget),
            max_expansions: var("DELIVERY_MAX_EXPANSIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_expansions),
        }
    }

    /// Flight rules for this run, starting from the defaults.
    pub fn flight_rules(&self) -> FlightRules {
        FlightRules::default()
            .with_move_budget(self.move_budget)
            .with_max_expansions(self.max_expansions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_vars(|_| None);
        assert_eq!(config.rest_url, DEFAULT_REST_URL);
        assert_eq!(config.output_dir, PathBuf::from("resultfiles"));
        assert_eq!(config.move_budget, 2000);
        assert_eq!(config.max_expansions, 100_000);
    }

    #[test]
    fn test_env_overrides_and_bad_numbers() {
        let vars: HashMap<&str, &str> = [
            ("DELIVERY_REST_URL", "http://localhost:8080"),
            ("DELIVERY_OUTPUT_DIR", "/tmp/out"),
            ("DELIVERY_MOVE_BUDGET", "500"),
            ("DELIVERY_MAX_EXPANSIONS", "lots"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.rest_url, "http://localhost:8080");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.move_budget, 500);
        assert_eq!(config.max_expansions, 100_000);

        let rules = config.flight_rules();
        assert_eq!(rules.move_budget, 500);
        assert_eq!(rules.heuristic_weight, 1.5);
    }
}
