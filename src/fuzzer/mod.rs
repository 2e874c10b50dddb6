// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Mutation Engine
 * Turns one captured request into an ordered population of mutants
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

pub mod capabilities;
pub mod form_filler;
pub mod mutant;
pub mod strategies;
pub mod utils;

pub use capabilities::CapabilitySet;
pub use mutant::{Mutant, MutantKind, MutantSummary, MutatedSurface, UrlFragments};

use tracing::debug;

use crate::errors::{MutationError, MutationResult};
use crate::http_client::HttpResponse;
use crate::request::{DataContainer, FuzzableRequest, JsonNode, ParamValue, RequestBody};
use strategies::{
    create_container_mutants, create_file_content_mutants, create_filename_mutants,
    create_url_parts_mutants, fuzz_json, ContainerOptions,
};

/// How a request body is fuzzed
#[derive(Debug, Clone, PartialEq)]
pub enum BodyClass {
    /// Flat name/value pairs (url-encoded or form)
    Container(DataContainer),
    Json(JsonNode),
    /// Neither grammar matched; no body mutants
    Unsupported,
}

/// Classify a body. Strict url-encoded parsing wins over JSON, so a body
/// valid under both grammars is always a container.
pub fn classify_body(body: &RequestBody) -> BodyClass {
    match body {
        RequestBody::Empty => BodyClass::Unsupported,
        RequestBody::UrlEncoded(container) => BodyClass::Container(container.clone()),
        RequestBody::Form(form) => BodyClass::Container(form.fields().clone()),
        RequestBody::Json(node) => BodyClass::Json(node.clone()),
        RequestBody::Raw(raw) => {
            if let Ok(container) = DataContainer::parse_strict(raw) {
                BodyClass::Container(container)
            } else if let Ok(node) = JsonNode::parse(raw) {
                BodyClass::Json(node)
            } else {
                BodyClass::Unsupported
            }
        }
    }
}

/// True when the body is (or parses as) JSON and not as url-encoded data
pub fn is_json(request: &FuzzableRequest) -> bool {
    matches!(classify_body(request.body()), BodyClass::Json(_))
}

/// Builds mutants for one capability snapshot
#[derive(Debug, Clone, Default)]
pub struct MutantFactory {
    capabilities: CapabilitySet,
}

impl MutantFactory {
    pub fn new(capabilities: CapabilitySet) -> Self {
        Self { capabilities }
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Generate every mutant for `request`.
    ///
    /// Order: query string, file name, URL parts (bodyless requests) or
    /// POST/JSON then file content (requests with a body), then headers,
    /// then cookie. `fuzzable_params` restricts flat-container fuzzing to
    /// the named fields; empty means all.
    pub fn create_mutants(
        &self,
        request: &FuzzableRequest,
        probes: &[String],
        append: bool,
        fuzzable_params: &[String],
        baseline: Option<&HttpResponse>,
    ) -> MutationResult<Vec<Mutant>> {
        let mut result = Vec::new();
        if probes.is_empty() {
            return Ok(result);
        }

        let caps = &self.capabilities;
        let text_probes: Vec<ParamValue> = probes.iter().map(|p| ParamValue::from(p.as_str())).collect();
        let options = ContainerOptions {
            append,
            fuzzable_params,
            file_ext: &caps.file_content_ext,
        };

        if !request.is_post_data() {
            fuzzing("create_container_mutants/QS", request);
            result.extend(create_container_mutants(
                MutantKind::QueryString,
                request,
                request.query(),
                &text_probes,
                options,
            )?);

            if caps.fuzz_file_name {
                fuzzing("create_filename_mutants", request);
                result.extend(create_filename_mutants(request, probes, append)?);
            }

            if caps.fuzz_url_parts {
                fuzzing("create_url_parts_mutants", request);
                result.extend(create_url_parts_mutants(request, probes, append)?);
            }
        } else {
            match classify_body(require_body(request)?) {
                BodyClass::Json(document) => {
                    fuzzing("fuzz_json", request);
                    result.extend(create_json_mutants(request, &document, probes, append));
                }
                BodyClass::Container(fields) => {
                    fuzzing("create_container_mutants/post-data", request);
                    let base = with_classified_body(request, &fields);
                    result.extend(create_container_mutants(
                        MutantKind::PostData,
                        &base,
                        &fields,
                        &text_probes,
                        options,
                    )?);
                }
                BodyClass::Unsupported => {
                    debug!(
                        "Body of {} is neither url-encoded nor JSON, skipping POST mutants",
                        request.describe()
                    );
                }
            }

            if caps.fuzz_file_content {
                fuzzing("create_file_content_mutants", request);
                result.extend(create_file_content_mutants(
                    request,
                    probes,
                    append,
                    &caps.file_content_ext,
                )?);
            }
        }

        if caps.fuzzes_headers() {
            fuzzing("create_container_mutants/headers", request);
            let headers: DataContainer = caps
                .fuzzable_headers
                .iter()
                .map(|name| (name.as_str(), ""))
                .collect();
            result.extend(create_container_mutants(
                MutantKind::Headers,
                request,
                &headers,
                &text_probes,
                options,
            )?);
        }

        if caps.fuzz_cookie {
            if let Some(cookie) = request.cookie().filter(|c| !c.is_empty()) {
                fuzzing("create_container_mutants/cookie", request);
                result.extend(create_container_mutants(
                    MutantKind::Cookie,
                    request,
                    cookie.values(),
                    &text_probes,
                    options,
                )?);
            }
        }

        if let Some(baseline) = baseline {
            link_baseline(&mut result, baseline);
        }

        Ok(result)
    }
}

/// Attach the baseline body and reuse its ETag as `If-None-Match`
fn link_baseline(mutants: &mut [Mutant], baseline: &HttpResponse) {
    let etag = baseline.header("ETag");

    for mutant in mutants.iter_mut() {
        mutant.set_original_response_body(baseline.body.as_str());
        if let Some(etag) = &etag {
            mutant.set_header("If-None-Match", etag);
        }
    }
}

fn create_json_mutants(
    request: &FuzzableRequest,
    document: &JsonNode,
    probes: &[String],
    append: bool,
) -> Vec<Mutant> {
    fuzz_json(document, probes, append)
        .into_iter()
        .map(|candidate| {
            mutant::assemble_json(
                request,
                candidate.document,
                candidate.original_value,
                candidate.modified_value,
            )
        })
        .collect()
}

/// Raw bodies that parsed as url-encoded become url-encoded bodies on the mutants
fn with_classified_body(request: &FuzzableRequest, fields: &DataContainer) -> FuzzableRequest {
    match request.body() {
        RequestBody::Raw(_) => request
            .clone()
            .with_body(RequestBody::UrlEncoded(fields.clone())),
        _ => request.clone(),
    }
}

/// Body strategies only run on requests that carry a body
pub fn require_body(request: &FuzzableRequest) -> MutationResult<&RequestBody> {
    if request.is_post_data() {
        Ok(request.body())
    } else {
        Err(MutationError::invariant(format!(
            "{} has no body to fuzz",
            request.describe()
        )))
    }
}

fn fuzzing(what: &str, who: &FuzzableRequest) {
    debug!("Calling \"{}\" with \"{}\" as fuzzable request.", what, who.describe());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencoded_wins_over_json() {
        let body = RequestBody::Raw("5".to_string());
        // "5" is not a name=value pair, so it is JSON
        assert!(matches!(classify_body(&body), BodyClass::Json(JsonNode::Integer(5))));

        let body = RequestBody::Raw("a=5".to_string());
        assert!(matches!(classify_body(&body), BodyClass::Container(_)));

        let body = RequestBody::Raw("<xml/>".to_string());
        assert_eq!(classify_body(&body), BodyClass::Unsupported);
    }

    #[test]
    fn test_empty_probe_list() {
        let request = FuzzableRequest::get("http://w3af.com/?a=1").unwrap();
        let factory = MutantFactory::new(CapabilitySet::all(vec!["Referer".to_string()]));
        assert!(factory.create_mutants(&request, &[], false, &[], None).unwrap().is_empty());
    }

    #[test]
    fn test_require_body() {
        let request = FuzzableRequest::get("http://w3af.com/").unwrap();
        assert!(matches!(
            require_body(&request),
            Err(MutationError::InvariantViolation { .. })
        ));
    }
}
