// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::MutationResult;
use crate::fuzzer::mutant::{assemble_path, Mutant, MutantKind, PathEncoding, UrlFragments};
use crate::fuzzer::utils::percent_encode;
use crate::request::FuzzableRequest;

static ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9]+").expect("valid alnum regex"));

/// Split a file name into alternating alnum and non-alnum runs
pub fn split_file_name(name: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut last = 0;
    for run in ALNUM_RUN.find_iter(name) {
        if run.start() > last {
            chunks.push(&name[last..run.start()]);
        }
        chunks.push(run.as_str());
        last = run.end();
    }
    if last < name.len() {
        chunks.push(&name[last..]);
    }
    chunks
}

/// Mutants that replace one alnum run of the last path segment.
///
/// Each candidate is emitted fully percent-encoded, then again with `/` left
/// unescaped when that produces a different URL.
pub fn create_filename_mutants(
    request: &FuzzableRequest,
    probes: &[String],
    append: bool,
) -> MutationResult<Vec<Mutant>> {
    let mut mutants = Vec::new();
    let chunks = split_file_name(request.filename());

    for (idx, chunk) in chunks.iter().enumerate() {
        if !ALNUM_RUN.is_match(chunk) {
            continue;
        }

        for probe in probes {
            let prefix = if append { *chunk } else { "" };
            let fragments = |safe: &str| UrlFragments {
                start: chunks[..idx].concat(),
                fuzzed: format!("{}{}", prefix, percent_encode(probe, safe)),
                end: chunks[idx + 1..].concat(),
            };

            let encoded = assemble_path(
                MutantKind::FileName,
                request,
                fragments(""),
                chunk,
                probe,
                PathEncoding::default(),
            )?;

            let unescaped = assemble_path(
                MutantKind::FileName,
                request,
                fragments("/"),
                chunk,
                probe,
                PathEncoding {
                    double_encoding: false,
                    safe_chars: "/".to_string(),
                },
            )?;

            let differs = unescaped.uri() != encoded.uri();
            mutants.push(encoded);
            if differs {
                mutants.push(unescaped);
            }
        }
    }

    Ok(mutants)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(mutants: &[Mutant]) -> Vec<String> {
        mutants.iter().map(|m| m.uri()).collect()
    }

    #[test]
    fn test_split() {
        assert_eq!(split_file_name("def.html"), vec!["def", ".", "html"]);
        assert_eq!(split_file_name("-a--b"), vec!["-", "a", "--", "b"]);
        assert!(split_file_name("").is_empty());
    }

    #[test]
    fn test_encoded_probe_without_slash() {
        let request = FuzzableRequest::get("http://www.w3af.com/abc/def.html").unwrap();
        let probes = vec!["ping!".to_string(), "pong-".to_string()];
        let mutants = create_filename_mutants(&request, &probes, false).unwrap();

        assert_eq!(
            urls(&mutants),
            vec![
                "http://www.w3af.com/abc/ping%21.html",
                "http://www.w3af.com/abc/pong-.html",
                "http://www.w3af.com/abc/def.ping%21",
                "http://www.w3af.com/abc/def.pong-",
            ]
        );
        assert_eq!(mutants[0].original_value(), "def");
        assert_eq!(mutants[0].var(), "fuzzedFname");
    }

    #[test]
    fn test_append_keeps_chunk() {
        let request = FuzzableRequest::get("http://www.w3af.com/abc/def.html").unwrap();
        let mutants = create_filename_mutants(&request, &["X".to_string()], true).unwrap();
        assert_eq!(
            urls(&mutants),
            vec!["http://www.w3af.com/abc/defX.html", "http://www.w3af.com/abc/def.htmlX"]
        );
    }

    #[test]
    fn test_directory_url_has_no_mutants() {
        let request = FuzzableRequest::get("http://www.w3af.com/abc/").unwrap();
        assert!(create_filename_mutants(&request, &["X".to_string()], false)
            .unwrap()
            .is_empty());
    }
}
