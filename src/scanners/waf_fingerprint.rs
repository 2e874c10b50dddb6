// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::errors::ScannerResult;
use crate::fuzzer::utils::rand_alpha;
use crate::http_client::{HttpClient, HttpResponse};
use crate::request::FuzzableRequest;
use crate::scanners::run_once::RunOnceGuard;
use crate::types::{FindingsStore, WafFinding};
use crate::worker::ProbePool;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub const PLUGIN_NAME: &str = "fingerprint_waf";

static AIRLOCK_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^AL[_-]?(SESS|LB)=").expect("valid Airlock regex"));
static BARRACUDA_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^barra_counter_session=").expect("valid Barracuda regex"));
static DENY_ALL_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^sessioncookie=").expect("valid Deny All regex"));
static F5_ASM_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^TS[a-zA-Z0-9]{3,6}=").expect("valid F5 ASM regex"));
static F5_TRAFFIC_SHIELD_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ASINFO=").expect("valid TrafficShield regex"));
static TEROS_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^st8id=").expect("valid TEROS regex"));
static NET_CONTINUUM_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^NCI__SessionId=").expect("valid NetContinuum regex"));
static HYPER_GUARD_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^WODSESSION=").expect("valid HyperGuard regex"));
static BINARY_SEC_SERVER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^BinarySec").expect("valid BinarySec regex"));
static MOD_SECURITY_SERVER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)mod_security|NOYB").expect("valid ModSecurity regex"));

/// Header names URLScan rejects with a 404, probed in this order
const URLSCAN_PROBE_HEADERS: [&str; 4] = ["If", "Translate", "Lock-Token", "Transfer-Encoding"];

/// One WAF signature check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WafCheck {
    UrlScan,
    ModSecurity,
    SecureIis,
    Airlock,
    Barracuda,
    DenyAll,
    F5Asm,
    F5TrafficShield,
    Teros,
    NetContinuum,
    BinarySec,
    HyperGuard,
}

impl WafCheck {
    pub fn all() -> Vec<WafCheck> {
        vec![
            WafCheck::UrlScan,
            WafCheck::ModSecurity,
            WafCheck::SecureIis,
            WafCheck::Airlock,
            WafCheck::Barracuda,
            WafCheck::DenyAll,
            WafCheck::F5Asm,
            WafCheck::F5TrafficShield,
            WafCheck::Teros,
            WafCheck::NetContinuum,
            WafCheck::BinarySec,
            WafCheck::HyperGuard,
        ]
    }

    pub fn vendor(&self) -> &'static str {
        match self {
            WafCheck::UrlScan => "URLScan",
            WafCheck::ModSecurity => "ModSecurity",
            WafCheck::SecureIis => "SecureIIS",
            WafCheck::Airlock => "Airlock",
            WafCheck::Barracuda => "Barracuda",
            WafCheck::DenyAll => "Deny All rWeb",
            WafCheck::F5Asm => "F5 ASM",
            WafCheck::F5TrafficShield => "F5 TrafficShield",
            WafCheck::Teros => "TEROS",
            WafCheck::NetContinuum => "NetContinuum",
            WafCheck::BinarySec => "BinarySec",
            WafCheck::HyperGuard => "HyperGuard",
        }
    }

    fn cookie_signature(&self) -> Option<&'static Regex> {
        let regex: &'static Lazy<Regex> = match self {
            WafCheck::Airlock => &AIRLOCK_COOKIE,
            WafCheck::Barracuda => &BARRACUDA_COOKIE,
            WafCheck::DenyAll => &DENY_ALL_COOKIE,
            WafCheck::F5Asm => &F5_ASM_COOKIE,
            WafCheck::F5TrafficShield => &F5_TRAFFIC_SHIELD_COOKIE,
            WafCheck::Teros => &TEROS_COOKIE,
            WafCheck::NetContinuum => &NET_CONTINUUM_COOKIE,
            WafCheck::HyperGuard => &HYPER_GUARD_COOKIE,
            _ => return None,
        };
        Some(Lazy::force(regex))
    }

    fn server_signature(&self) -> Option<&'static Regex> {
        match self {
            WafCheck::BinarySec => Some(Lazy::force(&BINARY_SEC_SERVER)),
            WafCheck::ModSecurity => Some(Lazy::force(&MOD_SECURITY_SERVER)),
            _ => None,
        }
    }

    /// Match this check's passive signature (cookie or `Server` banner)
    /// against a plain response. Returns the header value that matched.
    pub fn passive_match(&self, response: &HttpResponse) -> Option<String> {
        if let Some(regex) = self.cookie_signature() {
            return set_cookie_values(response)
                .into_iter()
                .find(|cookie| regex.is_match(cookie));
        }

        let regex = self.server_signature()?;
        response
            .header("server")
            .filter(|server| regex.is_match(server))
    }
}

impl fmt::Display for WafCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.vendor())
    }
}

fn set_cookie_values(response: &HttpResponse) -> Vec<String> {
    if !response.set_cookies.is_empty() {
        return response.set_cookies.clone();
    }
    response.header("set-cookie").into_iter().collect()
}

/// Identifies a Web Application Firewall in front of the target and, when
/// the signature exposes one, its version. Runs at most once per instance.
pub struct WafFingerprinter {
    http_client: Arc<HttpClient>,
    pool: ProbePool,
    guard: RunOnceGuard,
    findings: FindingsStore,
}

impl WafFingerprinter {
    pub fn new(http_client: Arc<HttpClient>, pool: ProbePool) -> Self {
        Self {
            http_client,
            pool,
            guard: RunOnceGuard::new(PLUGIN_NAME),
            findings: FindingsStore::new(),
        }
    }

    /// Report into an existing store instead of a private one
    pub fn with_findings(mut self, findings: FindingsStore) -> Self {
        self.findings = findings;
        self
    }

    pub fn findings(&self) -> &FindingsStore {
        &self.findings
    }

    /// Run every signature check against the request URL.
    ///
    /// Checks run on the probe pool in no particular order. A check that
    /// fails on the network contributes nothing. A second call on the same
    /// instance fails with `AlreadyExecuted`.
    pub async fn discover(&self, request: &FuzzableRequest) -> ScannerResult<Vec<WafFinding>> {
        self.guard.enter()?;

        let url = request.url().to_string();
        let headers = request.headers().to_pairs();
        info!(
            "[WAF-Fingerprint] Running {} checks against {} with {} workers",
            WafCheck::all().len(),
            url,
            self.pool.workers()
        );

        let client = Arc::clone(&self.http_client);
        let outcomes = self
            .pool
            .run(WafCheck::all(), move |check| {
                let client = Arc::clone(&client);
                let url = url.clone();
                let headers = headers.clone();
                async move { run_check(check, &client, &url, headers).await }
            })
            .await;

        let mut found = Vec::new();
        for outcome in outcomes {
            if let Ok(Some(finding)) = outcome.result {
                info!("[WAF-Fingerprint] {}", finding.description);
                self.findings.append(finding.clone());
                found.push(finding);
            }
        }

        Ok(found)
    }
}

async fn run_check(
    check: WafCheck,
    client: &HttpClient,
    url: &str,
    headers: Vec<(String, String)>,
) -> anyhow::Result<Option<WafFinding>> {
    debug!("[WAF-Fingerprint] detect {}", check);

    match check {
        WafCheck::SecureIis => {
            let headers = with_header(&headers, "Transfer-Encoding", rand_alpha(1025));
            let response = client.get_cached(url, headers).await?;
            Ok((response.status_code == 404).then(|| report(check, &response, None, url)))
        }
        WafCheck::UrlScan => {
            let original = client.get_cached(url, Vec::new()).await?;
            if original.status_code == 404 {
                return Ok(None);
            }

            for name in URLSCAN_PROBE_HEADERS {
                let probe = with_header(&headers, name, rand_alpha(8));
                let response = client.get_cached(url, probe).await?;
                if response.status_code == 404 {
                    return Ok(Some(report(check, &response, None, url)));
                }
            }
            Ok(None)
        }
        _ => {
            let response = client.get_cached(url, Vec::new()).await?;
            Ok(check
                .passive_match(&response)
                .map(|detail| report(check, &response, Some(detail), url)))
        }
    }
}

/// Copy of `headers` with `name` set, replacing any case-insensitive match
fn with_header(headers: &[(String, String)], name: &str, value: String) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = headers
        .iter()
        .filter(|(k, _)| !k.eq_ignore_ascii_case(name))
        .cloned()
        .collect();
    out.push((name.to_string(), value));
    out
}

fn report(check: WafCheck, response: &HttpResponse, detail: Option<String>, url: &str) -> WafFinding {
    WafFinding::new(check.vendor(), detail, url, response.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response_with(cookies: &[&str], server: Option<&str>) -> HttpResponse {
        let mut headers = HashMap::new();
        if let Some(server) = server {
            headers.insert("server".to_string(), server.to_string());
        }
        let mut response = HttpResponse::new(200, "", headers);
        response.set_cookies = cookies.iter().map(|c| c.to_string()).collect();
        response
    }

    #[test]
    fn test_twelve_distinct_vendors() {
        let vendors: std::collections::HashSet<_> =
            WafCheck::all().iter().map(|c| c.vendor()).collect();
        assert_eq!(vendors.len(), 12);
    }

    #[test]
    fn test_cookie_signatures_are_anchored() {
        let response = response_with(&["foo=1", "AL_SESS=abc; path=/"], None);
        assert_eq!(
            WafCheck::Airlock.passive_match(&response),
            Some("AL_SESS=abc; path=/".to_string())
        );

        let response = response_with(&["xst8id=1"], None);
        assert_eq!(WafCheck::Teros.passive_match(&response), None);
    }

    #[test]
    fn test_f5_asm_cookie_length() {
        assert!(WafCheck::F5Asm
            .passive_match(&response_with(&["TS01a2b3=x"], None))
            .is_some());
        assert!(WafCheck::F5Asm
            .passive_match(&response_with(&["TSab=x"], None))
            .is_none());
    }

    #[test]
    fn test_server_banners() {
        let response = response_with(&[], Some("binarysec/3.2"));
        assert_eq!(
            WafCheck::BinarySec.passive_match(&response),
            Some("binarysec/3.2".to_string())
        );

        let response = response_with(&[], Some("Apache/2.2 (Unix) mod_security/2.5"));
        assert!(WafCheck::ModSecurity.passive_match(&response).is_some());
        assert!(WafCheck::BinarySec.passive_match(&response).is_none());
    }

    #[test]
    fn test_active_checks_have_no_passive_signature() {
        let response = response_with(&["AL_SESS=1"], Some("BinarySec"));
        assert_eq!(WafCheck::UrlScan.passive_match(&response), None);
        assert_eq!(WafCheck::SecureIis.passive_match(&response), None);
    }

    #[test]
    fn test_with_header_replaces_case_insensitively() {
        let headers = vec![
            ("transfer-encoding".to_string(), "chunked".to_string()),
            ("Accept".to_string(), "*/*".to_string()),
        ];
        let out = with_header(&headers, "Transfer-Encoding", "abc".to_string());
        assert_eq!(
            out,
            vec![
                ("Accept".to_string(), "*/*".to_string()),
                ("Transfer-Encoding".to_string(), "abc".to_string()),
            ]
        );
    }
}
