// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::errors::MutationResult;
use crate::fuzzer::mutant::{assemble_path, Mutant, MutantKind, PathEncoding, UrlFragments};
use crate::fuzzer::utils::percent_encode;
use crate::request::FuzzableRequest;

/// Mutants that replace one non-empty path segment.
///
/// Both a single- and a double-encoded variant are emitted for every
/// (segment, probe) pair.
pub fn create_url_parts_mutants(
    request: &FuzzableRequest,
    probes: &[String],
    append: bool,
) -> MutationResult<Vec<Mutant>> {
    let mut mutants = Vec::new();
    let path = request.path();
    let chunks: Vec<&str> = path.split('/').collect();

    for (idx, chunk) in chunks.iter().enumerate() {
        if chunk.is_empty() {
            continue;
        }

        let start = format!("{}/", chunks[..idx].join("/"));
        let end = if idx + 1 < chunks.len() {
            format!("/{}", chunks[idx + 1..].join("/"))
        } else {
            String::new()
        };
        let prefix = if append { *chunk } else { "" };

        for probe in probes {
            let single = percent_encode(probe, "");
            let double = percent_encode(&single, "");

            for (fuzzed, double_encoding) in [(single, false), (double, true)] {
                mutants.push(assemble_path(
                    MutantKind::UrlParts,
                    request,
                    UrlFragments {
                        start: start.clone(),
                        fuzzed: format!("{}{}", prefix, fuzzed),
                        end: end.clone(),
                    },
                    chunk,
                    probe,
                    PathEncoding {
                        double_encoding,
                        safe_chars: String::new(),
                    },
                )?);
            }
        }
    }

    Ok(mutants)
}
