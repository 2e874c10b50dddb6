// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};

use super::cookie::Cookie;
use super::data_container::{FileUpload, ParamValue};
use super::form::{FieldKind, Form};
use super::fuzzable_request::{FuzzableRequest, RequestBody};
use super::headers::Headers;
use crate::errors::{MutationError, MutationResult};

/// A captured request as handed over by a crawler or proxy (JSON/YAML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedRequest {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: Vec<CapturedHeader>,
    #[serde(default)]
    pub cookie: Option<String>,
    /// Raw body, classified later by the orchestrator
    #[serde(default)]
    pub body: Option<String>,
    /// Form fields; when present they take precedence over `body`
    #[serde(default)]
    pub form: Vec<CapturedField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedField {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub value: String,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_field_type() -> String {
    "text".to_string()
}

impl CapturedRequest {
    pub fn from_json(raw: &str) -> MutationResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| MutationError::invalid_request(format!("bad captured request: {}", e)))
    }
}

impl TryFrom<CapturedRequest> for FuzzableRequest {
    type Error = MutationError;

    fn try_from(captured: CapturedRequest) -> MutationResult<Self> {
        let mut request = FuzzableRequest::new(&captured.url, &captured.method)?;

        let mut headers = Headers::new();
        let mut cookie_header = captured.cookie;
        for header in captured.headers {
            if header.name.eq_ignore_ascii_case("cookie") {
                cookie_header.get_or_insert(header.value);
            } else {
                headers.set(&header.name, header.value);
            }
        }
        request = request.with_headers(headers);

        if let Some(raw) = cookie_header.filter(|raw| !raw.trim().is_empty()) {
            request = request.with_cookie(Cookie::parse(&raw));
        }

        let body = if !captured.form.is_empty() {
            let mut form = Form::new();
            for field in captured.form {
                let kind = FieldKind::from_input_type(&field.field_type);
                let value = match kind {
                    FieldKind::File => ParamValue::File(FileUpload::placeholder(field.value)),
                    _ => ParamValue::Text(field.value),
                };
                form.add_input(&field.name, kind, value);
            }
            RequestBody::Form(form)
        } else {
            match captured.body {
                Some(raw) if !raw.is_empty() => RequestBody::Raw(raw),
                _ => RequestBody::Empty,
            }
        };

        Ok(request.with_body(body))
    }
}
