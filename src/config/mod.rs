// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod core;
pub mod loader;
pub mod validation;

pub use core::{AppConfig, FuzzerConfig, HttpConfig, ObservabilityConfig};
pub use loader::{apply_env_overrides, ConfigFormat, ConfigLoader};
pub use validation::ConfigValidator;

use anyhow::Result;

impl AppConfig {
    /// Defaults plus environment variable overrides, for runs without a config file
    ///
    /// Supports the following environment variables:
    /// - FUZZ_FC_EXT: extension of synthesized upload names
    /// - FUZZABLE_HEADERS: comma separated header names
    /// - FUZZABLE_COOKIE: true/false
    /// - PROBE_WORKERS: probe pool size
    /// - LOG_LEVEL: Logging level
    pub fn from_env() -> Result<Self> {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config)?;
        ConfigValidator::validate_app_config(&config)?;
        Ok(config)
    }
}
