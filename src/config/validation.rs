// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use validator::Validate;

use super::core::AppConfig;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate_app_config(config: &AppConfig) -> Result<()> {
        config.validate()
            .context("Configuration validation failed")?;

        Self::validate_fuzzer_config(config)?;
        Self::validate_http_config(config)?;

        Ok(())
    }

    fn validate_fuzzer_config(config: &AppConfig) -> Result<()> {
        let ext = config.fuzzer.fuzz_fc_ext.trim_start_matches('.');
        if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow::anyhow!(
                "fuzzFCExt must be alphanumeric, got {:?}",
                config.fuzzer.fuzz_fc_ext
            ));
        }

        for header in &config.fuzzer.fuzzable_headers {
            if !is_http_token(header) {
                return Err(anyhow::anyhow!("Invalid fuzzable header name: {:?}", header));
            }
        }

        Ok(())
    }

    fn validate_http_config(config: &AppConfig) -> Result<()> {
        if config.http.probe_workers == 0 {
            return Err(anyhow::anyhow!("Probe workers must be greater than 0"));
        }

        if config.http.cache_enabled {
            if config.http.cache_max_capacity == 0 {
                return Err(anyhow::anyhow!("Cache capacity must be greater than 0 when enabled"));
            }

            if config.http.cache_ttl_secs == 0 {
                return Err(anyhow::anyhow!("Cache TTL must be greater than 0 when enabled"));
            }
        }

        Ok(())
    }
}

/// RFC 7230 `token`
fn is_http_token(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConfigValidator::validate_app_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_extension_and_header() {
        let mut config = AppConfig::default();
        config.fuzzer.fuzz_fc_ext = "p/hp".to_string();
        assert!(ConfigValidator::validate_app_config(&config).is_err());

        let mut config = AppConfig::default();
        config.fuzzer.fuzzable_headers = vec!["Bad Header".to_string()];
        assert!(ConfigValidator::validate_app_config(&config).is_err());
    }

    #[test]
    fn test_cache_requires_ttl() {
        let mut config = AppConfig::default();
        config.http.cache_ttl_secs = 0;
        assert!(ConfigValidator::validate_app_config(&config).is_err());

        config.http.cache_enabled = false;
        assert!(ConfigValidator::validate_app_config(&config).is_ok());
    }
}
