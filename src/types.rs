// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Information finding reported by the WAF fingerprinter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WafFinding {
    /// e.g. `Found ModSecurity`
    pub name: String,
    pub vendor: String,
    /// Detailed version/product string when the signature exposes one
    pub detail: Option<String>,
    pub url: String,
    /// Id of the response that carried the signature
    pub response_id: u64,
    pub description: String,
    pub discovered_at: DateTime<Utc>,
}

impl WafFinding {
    pub fn new(vendor: &str, detail: Option<String>, url: &str, response_id: u64) -> Self {
        let mut description = format!(
            "The remote network seems to have a \"{}\" WAF deployed to protect access to the web server.",
            vendor
        );
        if let Some(detail) = &detail {
            description.push_str(&format!(
                " The following is a detailed version of the WAF: \"{}\".",
                detail
            ));
        }

        Self {
            name: format!("Found {}", vendor),
            vendor: vendor.to_string(),
            detail,
            url: url.to_string(),
            response_id,
            description,
            discovered_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for WafFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}

/// Shared, append-only findings store
#[derive(Debug, Clone, Default)]
pub struct FindingsStore {
    findings: Arc<RwLock<Vec<WafFinding>>>,
}

impl FindingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, finding: WafFinding) {
        self.findings.write().push(finding);
    }

    pub fn all(&self) -> Vec<WafFinding> {
        self.findings.read().clone()
    }

    /// Whether a vendor was already reported
    pub fn has_vendor(&self, vendor: &str) -> bool {
        self.findings.read().iter().any(|f| f.vendor == vendor)
    }

    pub fn len(&self) -> usize {
        self.findings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.read().is_empty()
    }
}
