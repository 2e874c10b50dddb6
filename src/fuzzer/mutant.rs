// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Mutant Assembly
 * One record type for every mutation kind, built by free assembly functions
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{MutationError, MutationResult};
use crate::request::{Cookie, DataContainer, FuzzableRequest, JsonNode, RequestBody};

/// Variable name used for JSON body mutants
pub const JSON_VAR: &str = "JSON data";
/// Variable name used for file name mutants
pub const FILENAME_VAR: &str = "fuzzedFname";
/// Variable name used for URL path segment mutants
pub const URL_PARTS_VAR: &str = "fuzzedUrlParts";

/// Which request surface a mutant changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutantKind {
    QueryString,
    PostData,
    FileName,
    UrlParts,
    Headers,
    Json,
    Cookie,
    FileContent,
}

impl fmt::Display for MutantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutantKind::QueryString => "query string",
            MutantKind::PostData => "post data",
            MutantKind::FileName => "file name",
            MutantKind::UrlParts => "URL parts",
            MutantKind::Headers => "header",
            MutantKind::Json => "JSON",
            MutantKind::Cookie => "cookie",
            MutantKind::FileContent => "file content",
        };
        f.write_str(name)
    }
}

/// Three-part reconstruction of a path or file name around the fuzzed chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlFragments {
    pub start: String,
    /// Encoded value placed between `start` and `end`
    pub fuzzed: String,
    pub end: String,
}

impl UrlFragments {
    pub fn joined(&self) -> String {
        format!("{}{}{}", self.start, self.fuzzed, self.end)
    }
}

/// The mutated surface as the strategy produced it
#[derive(Debug, Clone, PartialEq)]
pub enum MutatedSurface {
    Container(DataContainer),
    Json(JsonNode),
    Url(UrlFragments),
}

/// A candidate request differing from the original in exactly one field
#[derive(Debug, Clone)]
pub struct Mutant {
    kind: MutantKind,
    request: FuzzableRequest,
    surface: MutatedSurface,
    var: String,
    index: usize,
    original_value: String,
    mod_value: String,
    double_encoding: bool,
    safe_chars: String,
    original_response_body: Option<String>,
}

impl Mutant {
    pub fn kind(&self) -> MutantKind {
        self.kind
    }

    /// The fully mutated request, ready to send
    pub fn request(&self) -> &FuzzableRequest {
        &self.request
    }

    pub fn surface(&self) -> &MutatedSurface {
        &self.surface
    }

    /// Mutated container for flat-container mutants
    pub fn dc(&self) -> Option<&DataContainer> {
        match &self.surface {
            MutatedSurface::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn json(&self) -> Option<&JsonNode> {
        match &self.surface {
            MutatedSurface::Json(node) => Some(node),
            _ => None,
        }
    }

    pub fn fragments(&self) -> Option<&UrlFragments> {
        match &self.surface {
            MutatedSurface::Url(fragments) => Some(fragments),
            _ => None,
        }
    }

    pub fn var(&self) -> &str {
        &self.var
    }

    /// Repetition index of `var` (0 unless the name repeats)
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn original_value(&self) -> &str {
        &self.original_value
    }

    /// The value actually placed into the field
    pub fn mod_value(&self) -> &str {
        &self.mod_value
    }

    pub fn is_double_encoded(&self) -> bool {
        self.double_encoding
    }

    pub fn safe_chars(&self) -> &str {
        &self.safe_chars
    }

    pub fn original_response_body(&self) -> Option<&str> {
        self.original_response_body.as_deref()
    }

    pub fn set_original_response_body(&mut self, body: impl Into<String>) {
        self.original_response_body = Some(body.into());
    }

    /// Set a header on the mutated request. Header mutants keep their fuzzed header.
    pub fn set_header(&mut self, name: &str, value: &str) {
        if self.kind == MutantKind::Headers && self.var.eq_ignore_ascii_case(name) {
            return;
        }
        self.request.headers_mut().set(name, value);
    }

    pub fn uri(&self) -> String {
        self.request.uri()
    }

    /// Human-readable location, for findings
    pub fn found_at(&self) -> String {
        let mut description = format!(
            "\"{}\", using HTTP method {}. The modified {} was \"{}\"",
            self.uri(),
            self.request.method(),
            self.kind,
            self.var
        );
        if self.index > 0 {
            description.push_str(&format!(" (repetition {})", self.index));
        }
        if let Some(body) = self.request.post_data() {
            description.push_str(&format!(" and the sent data was: \"{}\"", body));
        }
        description.push('.');
        description
    }

    pub fn summary(&self) -> MutantSummary {
        MutantSummary {
            kind: self.kind,
            variable: self.var.clone(),
            index: self.index,
            original_value: self.original_value.clone(),
            modified_value: self.mod_value.clone(),
            method: self.request.method().to_string(),
            uri: self.uri(),
            headers: self.request.headers().to_pairs(),
            cookie: self.request.cookie().map(Cookie::to_header_value),
            body: self.request.post_data(),
            double_encoding: self.double_encoding,
            has_baseline: self.original_response_body.is_some(),
        }
    }
}

/// Serialisable mutant description for reports and the CLI
#[derive(Debug, Clone, Serialize)]
pub struct MutantSummary {
    pub kind: MutantKind,
    pub variable: String,
    pub index: usize,
    pub original_value: String,
    pub modified_value: String,
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub double_encoding: bool,
    pub has_baseline: bool,
}

/// Identity of one flat-container mutation
#[derive(Debug, Clone)]
pub struct ContainerChange<'a> {
    pub var: &'a str,
    pub index: usize,
    pub original_value: &'a str,
    pub mod_value: &'a str,
}

/// Bind a mutated flat container to a clone of `base`.
///
/// Only query string, POST data, file content, header and cookie mutants
/// are container based.
pub fn assemble_container(
    kind: MutantKind,
    base: &FuzzableRequest,
    container: DataContainer,
    change: ContainerChange<'_>,
) -> MutationResult<Mutant> {
    let mut request = base.clone();

    match kind {
        MutantKind::QueryString => request.set_query(container.clone()),
        MutantKind::PostData | MutantKind::FileContent => {
            let body = match base.body() {
                RequestBody::Form(form) => RequestBody::Form(form.with_fields(container.clone())),
                _ => RequestBody::UrlEncoded(container.clone()),
            };
            request.set_body(body);
        }
        MutantKind::Headers => {
            let value = container
                .value(change.var, change.index)
                .map(|v| v.as_text().to_string())
                .ok_or_else(|| {
                    MutationError::invariant(format!("header {} missing from container", change.var))
                })?;
            request.headers_mut().set(change.var, value);
        }
        MutantKind::Cookie => request.set_cookie(Some(Cookie::from_container(container.clone()))),
        MutantKind::FileName | MutantKind::UrlParts | MutantKind::Json => {
            return Err(MutationError::UnsupportedAssembly { kind });
        }
    }

    Ok(Mutant {
        kind,
        request,
        surface: MutatedSurface::Container(container),
        var: change.var.to_string(),
        index: change.index,
        original_value: change.original_value.to_string(),
        mod_value: change.mod_value.to_string(),
        double_encoding: false,
        safe_chars: String::new(),
        original_response_body: None,
    })
}

/// Bind a mutated JSON document to a clone of `base`
pub fn assemble_json(
    base: &FuzzableRequest,
    document: JsonNode,
    original_value: String,
    mod_value: String,
) -> Mutant {
    let mut request = base.clone();
    request.set_body(RequestBody::Json(document.clone()));

    Mutant {
        kind: MutantKind::Json,
        request,
        surface: MutatedSurface::Json(document),
        var: JSON_VAR.to_string(),
        index: 0,
        original_value,
        mod_value,
        double_encoding: false,
        safe_chars: String::new(),
        original_response_body: None,
    }
}

/// Encoding options of a path mutant
#[derive(Debug, Clone, Default)]
pub struct PathEncoding {
    pub double_encoding: bool,
    pub safe_chars: String,
}

/// Rebuild the URL path of a clone of `base` from `fragments`.
///
/// File name fragments replace the last path segment; URL-parts fragments
/// replace the whole path.
pub fn assemble_path(
    kind: MutantKind,
    base: &FuzzableRequest,
    fragments: UrlFragments,
    original_value: &str,
    mod_value: &str,
    encoding: PathEncoding,
) -> MutationResult<Mutant> {
    let (var, path) = match kind {
        MutantKind::FileName => (
            FILENAME_VAR,
            format!("{}{}", base.directory(), fragments.joined()),
        ),
        MutantKind::UrlParts => (URL_PARTS_VAR, fragments.joined()),
        _ => return Err(MutationError::UnsupportedAssembly { kind }),
    };

    let mut request = base.clone();
    request.set_path(path);

    Ok(Mutant {
        kind,
        request,
        surface: MutatedSurface::Url(fragments),
        var: var.to_string(),
        index: 0,
        original_value: original_value.to_string(),
        mod_value: mod_value.to_string(),
        double_encoding: encoding.double_encoding,
        safe_chars: encoding.safe_chars,
        original_response_body: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FieldKind, Form};

    fn change<'a>(var: &'a str, original: &'a str, modified: &'a str) -> ContainerChange<'a> {
        ContainerChange {
            var,
            index: 0,
            original_value: original,
            mod_value: modified,
        }
    }

    #[test]
    fn test_query_string_assembly() {
        let base = FuzzableRequest::get("http://w3af.com/?a=1").unwrap();
        let mut dc = base.query().clone();
        dc.set("a", 0, "x");

        let mutant =
            assemble_container(MutantKind::QueryString, &base, dc, change("a", "1", "x")).unwrap();
        assert_eq!(mutant.uri(), "http://w3af.com/?a=x");
        assert_eq!(base.uri(), "http://w3af.com/?a=1");
        assert!(mutant.found_at().contains("query string"));
    }

    #[test]
    fn test_post_data_keeps_form_kinds() {
        let mut form = Form::new();
        form.add_input("upload", FieldKind::File, "");
        form.add_input("comment", FieldKind::Text, "");
        let base = FuzzableRequest::post("http://w3af.com/up", RequestBody::Form(form)).unwrap();

        let mut dc = base.form().unwrap().fields().clone();
        dc.set("comment", 0, "x");
        let mutant =
            assemble_container(MutantKind::PostData, &base, dc, change("comment", "", "x")).unwrap();

        let mutated = mutant.request().form().unwrap();
        assert_eq!(mutated.kind("upload"), FieldKind::File);
        assert_eq!(mutated.fields().value("comment", 0).unwrap().as_text(), "x");
    }

    #[test]
    fn test_header_assembly_sets_only_fuzzed_header() {
        let base = FuzzableRequest::get("http://w3af.com/").unwrap();
        let dc: DataContainer = vec![("Referer", "x"), ("User-Agent", "")].into_iter().collect();

        let mutant =
            assemble_container(MutantKind::Headers, &base, dc, change("Referer", "", "x")).unwrap();
        assert_eq!(mutant.request().headers().len(), 1);
        assert_eq!(mutant.request().headers().get("referer"), Some("x"));
    }

    #[test]
    fn test_wrong_assembly_is_rejected() {
        let base = FuzzableRequest::get("http://w3af.com/a").unwrap();
        let err = assemble_container(
            MutantKind::Json,
            &base,
            DataContainer::new(),
            change("a", "", ""),
        )
        .unwrap_err();
        assert_eq!(err, MutationError::UnsupportedAssembly { kind: MutantKind::Json });

        let fragments = UrlFragments {
            start: String::new(),
            fuzzed: "x".to_string(),
            end: String::new(),
        };
        assert!(assemble_path(
            MutantKind::Cookie,
            &base,
            fragments,
            "a",
            "x",
            PathEncoding::default()
        )
        .is_err());
    }

    #[test]
    fn test_set_header_respects_fuzzed_header() {
        let base = FuzzableRequest::get("http://w3af.com/").unwrap();
        let dc: DataContainer = vec![("If-None-Match", "probe")].into_iter().collect();
        let mut mutant = assemble_container(
            MutantKind::Headers,
            &base,
            dc,
            change("If-None-Match", "", "probe"),
        )
        .unwrap();

        mutant.set_header("If-None-Match", "\"etag\"");
        assert_eq!(mutant.request().headers().get("if-none-match"), Some("probe"));
    }
}
