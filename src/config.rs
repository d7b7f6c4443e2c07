//! Run configuration loaded from environment variables.
//!
//! Every knob has a working default, so a bare `trail-enricher` invocation
//! against a checked-out data directory needs no environment at all.

use std::env;
use std::path::PathBuf;

/// Pipeline configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- File locations ---
    /// Input dataset path; when unset, the default candidates are searched
    pub input_path: Option<PathBuf>,
    /// Output dataset path; when unset, the input is enriched in place
    pub output_path: Option<PathBuf>,
    /// Progress file path; when unset, placed next to the output
    pub progress_path: Option<PathBuf>,

    // --- Enrichment shape ---
    /// How many of the longest trails get service-derived profiles
    pub service_trail_limit: usize,
    /// Sampled points per service-derived profile
    pub samples_per_trail: usize,
    /// Concurrent elevation lookups per trail
    pub lookup_batch_width: usize,
    /// Trails between mid-run checkpoints
    pub checkpoint_interval: usize,

    // --- Elevation service ---
    /// EPQS endpoint
    pub epqs_url: String,
    /// Total attempts per point lookup
    pub max_attempts: u32,
    /// Base retry delay in milliseconds (grows linearly per attempt)
    pub retry_base_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            input_path: env::var("TRAILS_INPUT").ok().map(PathBuf::from),
            output_path: env::var("TRAILS_OUTPUT").ok().map(PathBuf::from),
            progress_path: env::var("TRAILS_PROGRESS").ok().map(PathBuf::from),
            service_trail_limit: env::var("ELEVATION_TRAIL_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
            samples_per_trail: env::var("ELEVATION_SAMPLES")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20),
            lookup_batch_width: env::var("ELEVATION_BATCH_WIDTH")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            checkpoint_interval: env::var("CHECKPOINT_INTERVAL")
                .unwrap_or_else(|_| "25".to_string())
                .parse()
                .unwrap_or(25),
            epqs_url: env::var("EPQS_URL")
                .unwrap_or_else(|_| "https://epqs.nationalmap.gov/v1/json".to_string()),
            max_attempts: env::var("EPQS_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            retry_base_delay_ms: env::var("EPQS_RETRY_DELAY_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .unwrap_or(500),
        }
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            progress_path: None,
            service_trail_limit: 100,
            samples_per_trail: 20,
            lookup_batch_width: 5,
            checkpoint_interval: 25,
            epqs_url: "http://127.0.0.1:1".to_string(),
            max_attempts: 3,
            retry_base_delay_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        env::remove_var("ELEVATION_TRAIL_LIMIT");
        env::remove_var("ELEVATION_SAMPLES");
        env::remove_var("EPQS_URL");

        let config = Config::from_env();

        assert_eq!(config.service_trail_limit, 100);
        assert_eq!(config.samples_per_trail, 20);
        assert_eq!(config.lookup_batch_width, 5);
        assert_eq!(config.checkpoint_interval, 25);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.epqs_url, "https://epqs.nationalmap.gov/v1/json");
    }

    #[test]
    fn test_unparseable_numbers_fall_back_to_defaults() {
        env::set_var("ELEVATION_BATCH_WIDTH", "lots");
        let config = Config::from_env();
        assert_eq!(config.lookup_batch_width, 5);
        env::remove_var("ELEVATION_BATCH_WIDTH");
    }
}
