// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use rand::Rng;
use tracing::debug;

/// Framework session/view-state tokens that are never mutated.
/// Matching is exact and case-sensitive.
pub const IGNORED_PARAMETERS: &[&str] = &[
    // ASP.NET / DotNetNuke
    "__EVENTTARGET",
    "__EVENTARGUMENT",
    "__VIEWSTATE",
    "__VIEWSTATEENCRYPTED",
    "__EVENTVALIDATION",
    "__dnnVariable",
    // JSF
    "javax.faces.ViewState",
    "jsf_state_64",
    "jsf_sequence",
    "jsf_tree",
    "jsf_tree_64",
    "jsf_viewid",
    "jsf_state",
    // ColdFusion
    "cfid",
    "cftoken",
    // Session ids
    "ASP.NET_sessionid",
    "ASPSESSIONID",
    "PHPSESSID",
    "JSESSIONID",
];

/// Returns true if the parameter must be skipped by every strategy
pub fn is_ignored_parameter(name: &str) -> bool {
    if IGNORED_PARAMETERS.contains(&name) {
        debug!("[Fuzzer] Skipping reserved parameter: {}", name);
        return true;
    }
    false
}

/// Random string of ASCII letters
pub fn rand_alpha(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| {
            let idx: u8 = rng.random_range(0..52);
            if idx < 26 {
                (b'a' + idx) as char
            } else {
                (b'A' + idx - 26) as char
            }
        })
        .collect()
}

/// File name for a synthesized upload: 7 random letters plus `ext`
pub fn upload_file_name(ext: &str) -> String {
    format!("{}.{}", rand_alpha(7), ext)
}

/// Non-empty and made only of ASCII digits
pub fn is_digit_only(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Percent-encode everything outside `A-Za-z0-9-_.~`, leaving the
/// characters in `safe` untouched.
pub fn percent_encode(value: &str, safe: &str) -> String {
    if safe.is_empty() {
        return urlencoding::encode(value).into_owned();
    }

    let mut encoded = String::with_capacity(value.len());
    let mut piece = String::new();
    for ch in value.chars() {
        if safe.contains(ch) {
            encoded.push_str(&urlencoding::encode(&piece));
            piece.clear();
            encoded.push(ch);
        } else {
            piece.push(ch);
        }
    }
    encoded.push_str(&urlencoding::encode(&piece));
    encoded
}
