// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub fuzzer: FuzzerConfig,

    #[serde(default)]
    #[validate(nested)]
    pub http: HttpConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Which request surfaces the mutation engine may fuzz.
///
/// Keys keep the names scan profiles have always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FuzzerConfig {
    #[serde(rename = "fuzzFileName", default = "default_false")]
    pub fuzz_file_name: bool,

    #[serde(rename = "fuzzFileContent", default = "default_true")]
    pub fuzz_file_content: bool,

    /// Extension of synthesized upload file names
    #[validate(length(max = 16))]
    #[serde(rename = "fuzzFCExt", default = "default_fc_ext")]
    pub fuzz_fc_ext: String,

    #[serde(rename = "fuzzURLParts", default = "default_false")]
    pub fuzz_url_parts: bool,

    #[serde(rename = "fuzzableCookie", default = "default_false")]
    pub fuzzable_cookie: bool,

    #[validate(length(max = 64))]
    #[serde(default)]
    pub fuzzable_headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HttpConfig {
    #[validate(range(min = 1, max = 3600))]
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[validate(range(min = 0, max = 10))]
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    #[serde(default = "default_cache_capacity")]
    pub cache_max_capacity: u64,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    #[validate(range(min = 1, max = 256))]
    #[serde(default = "default_probe_workers")]
    pub probe_workers: usize,

    #[validate(range(min = 1, max = 10000))]
    #[serde(default = "default_queue_capacity")]
    pub probe_queue_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_false")]
    pub log_json: bool,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        Self {
            fuzz_file_name: false,
            fuzz_file_content: true,
            fuzz_fc_ext: default_fc_ext(),
            fuzz_url_parts: false,
            fuzzable_cookie: false,
            fuzzable_headers: Vec::new(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            max_retries: default_retries(),
            cache_enabled: true,
            cache_max_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl(),
            probe_workers: default_probe_workers(),
            probe_queue_capacity: default_queue_capacity(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_fc_ext() -> String {
    "txt".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}

fn default_cache_capacity() -> u64 {
    10000
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_probe_workers() -> usize {
    8
}

fn default_queue_capacity() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_facing_key_names() {
        let yaml = r#"
fuzzer:
  fuzzFileName: true
  fuzzFCExt: gif
  fuzzableCookie: true
  fuzzable_headers: [Referer]
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.fuzzer.fuzz_file_name);
        assert!(config.fuzzer.fuzz_file_content);
        assert!(!config.fuzzer.fuzz_url_parts);
        assert_eq!(config.fuzzer.fuzz_fc_ext, "gif");
        assert_eq!(config.fuzzer.fuzzable_headers, vec!["Referer"]);
        assert_eq!(config.http, HttpConfig::default());
    }

    #[test]
    fn test_range_validation() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.http.probe_workers = 0;
        assert!(config.validate().is_err());
    }
}
