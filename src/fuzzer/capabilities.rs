// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::Serialize;

use crate::config::FuzzerConfig;

/// Immutable snapshot of which request surfaces may be fuzzed on this run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitySet {
    /// Header names to fuzz, de-duplicated case-insensitively, in config order
    pub fuzzable_headers: Vec<String>,
    pub fuzz_cookie: bool,
    pub fuzz_file_name: bool,
    pub fuzz_url_parts: bool,
    pub fuzz_file_content: bool,
    /// Extension for synthesized upload names
    pub file_content_ext: String,
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self {
            fuzzable_headers: Vec::new(),
            fuzz_cookie: false,
            fuzz_file_name: false,
            fuzz_url_parts: false,
            fuzz_file_content: false,
            file_content_ext: "txt".to_string(),
        }
    }
}

impl CapabilitySet {
    /// Everything on, used by the CLI `--all-surfaces` flag and in tests
    pub fn all(fuzzable_headers: Vec<String>) -> Self {
        Self {
            fuzzable_headers: dedup_headers(fuzzable_headers),
            fuzz_cookie: true,
            fuzz_file_name: true,
            fuzz_url_parts: true,
            fuzz_file_content: true,
            ..Self::default()
        }
    }

    pub fn fuzzes_headers(&self) -> bool {
        !self.fuzzable_headers.is_empty()
    }
}

impl From<&FuzzerConfig> for CapabilitySet {
    fn from(config: &FuzzerConfig) -> Self {
        let ext = config.fuzz_fc_ext.trim().trim_start_matches('.');
        Self {
            fuzzable_headers: dedup_headers(config.fuzzable_headers.clone()),
            fuzz_cookie: config.fuzzable_cookie,
            fuzz_file_name: config.fuzz_file_name,
            fuzz_url_parts: config.fuzz_url_parts,
            fuzz_file_content: config.fuzz_file_content,
            file_content_ext: if ext.is_empty() {
                "txt".to_string()
            } else {
                ext.to_string()
            },
        }
    }
}

fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let header = header.trim().to_string();
        if header.is_empty() || unique.iter().any(|h| h.eq_ignore_ascii_case(&header)) {
            continue;
        }
        unique.push(header);
    }
    unique
}
