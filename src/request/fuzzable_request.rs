// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Fuzzable Request
 * Owned, deep-cloneable model of one captured HTTP request
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use url::{Position, Url};

use super::cookie::Cookie;
use super::data_container::DataContainer;
use super::form::Form;
use super::headers::Headers;
use super::json::JsonNode;
use crate::errors::{MutationError, MutationResult};

/// The single body representation a request carries
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded`
    UrlEncoded(DataContainer),
    /// HTML form, multipart when it has upload fields
    Form(Form),
    Json(JsonNode),
    /// Not yet classified (or unsupported, e.g. XML)
    Raw(String),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    /// Encoded body as it would go on the wire
    pub fn encode(&self) -> Option<String> {
        match self {
            RequestBody::Empty => None,
            RequestBody::UrlEncoded(container) => Some(container.to_urlencoded()),
            RequestBody::Form(form) => Some(form.fields().to_urlencoded()),
            RequestBody::Json(node) => Some(node.to_value().to_string()),
            RequestBody::Raw(raw) => Some(raw.clone()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RequestBody::Empty => "empty",
            RequestBody::UrlEncoded(_) => "urlencoded",
            RequestBody::Form(form) if form.is_multipart() => "multipart",
            RequestBody::Form(_) => "form",
            RequestBody::Json(_) => "json",
            RequestBody::Raw(_) => "raw",
        }
    }
}

/// A request the mutation engine can fuzz.
///
/// The URL is stored without its query string; the query lives in `query`
/// so it can be mutated as a container. A rebuilt path is kept verbatim in
/// `raw_path`, dot segments included. Cloning is deep.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzableRequest {
    url: Url,
    raw_path: Option<String>,
    method: String,
    query: DataContainer,
    headers: Headers,
    cookie: Option<Cookie>,
    body: RequestBody,
}

impl FuzzableRequest {
    /// Parse `url`, splitting off its query string into a container
    pub fn new(url: &str, method: &str) -> MutationResult<Self> {
        let mut parsed = Url::parse(url)
            .map_err(|e| MutationError::invalid_request(format!("bad URL {:?}: {}", url, e)))?;

        let query = parsed
            .query()
            .map(DataContainer::parse_query)
            .unwrap_or_default();
        parsed.set_query(None);
        parsed.set_fragment(None);

        Ok(Self {
            url: parsed,
            raw_path: None,
            method: method.to_ascii_uppercase(),
            query,
            headers: Headers::new(),
            cookie: None,
            body: RequestBody::Empty,
        })
    }

    pub fn get(url: &str) -> MutationResult<Self> {
        Self::new(url, "GET")
    }

    pub fn post(url: &str, body: RequestBody) -> MutationResult<Self> {
        Ok(Self::new(url, "POST")?.with_body(body))
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookie = Some(cookie);
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// URL without the query string
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn query(&self) -> &DataContainer {
        &self.query
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn cookie(&self) -> Option<&Cookie> {
        self.cookie.as_ref()
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Replace the path without normalizing `.` and `..` segments
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.raw_path = Some(path.into());
    }

    /// Path as it is sent, rebuilt paths verbatim
    pub fn path(&self) -> &str {
        self.raw_path.as_deref().unwrap_or_else(|| self.url.path())
    }

    pub fn set_query(&mut self, query: DataContainer) {
        self.query = query;
    }

    pub fn set_cookie(&mut self, cookie: Option<Cookie>) {
        self.cookie = cookie;
    }

    pub fn set_body(&mut self, body: RequestBody) {
        self.body = body;
    }

    /// Full URL including the encoded query string
    pub fn uri(&self) -> String {
        let mut uri = format!("{}{}", &self.url[..Position::BeforePath], self.path());
        if !self.query.is_empty() {
            uri.push('?');
            uri.push_str(&self.query.to_urlencoded());
        }
        uri
    }

    /// Last path segment (may be empty for directory URLs)
    pub fn filename(&self) -> &str {
        self.path().rsplit('/').next().unwrap_or("")
    }

    /// Path up to and including the last `/`
    pub fn directory(&self) -> &str {
        let path = self.path();
        match path.rfind('/') {
            Some(idx) => &path[..=idx],
            None => "/",
        }
    }

    /// Whether the request carries a body (and is fuzzed through it)
    pub fn is_post_data(&self) -> bool {
        !self.body.is_empty()
    }

    /// Encoded body, if any
    pub fn post_data(&self) -> Option<String> {
        self.body.encode()
    }

    /// Upload field names of a form body, in form order
    pub fn file_fields(&self) -> Vec<String> {
        match &self.body {
            RequestBody::Form(form) => form.file_fields(),
            _ => Vec::new(),
        }
    }

    pub fn form(&self) -> Option<&Form> {
        match &self.body {
            RequestBody::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Short one-line description for logs
    pub fn describe(&self) -> String {
        format!("{} {} ({} body)", self.method, self.uri(), self.body.kind_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::form::FieldKind;

    #[test]
    fn test_query_is_split_off() {
        let request = FuzzableRequest::get("http://w3af.com/a/b.php?x=1&y=2#frag").unwrap();
        assert_eq!(request.url().as_str(), "http://w3af.com/a/b.php");
        assert_eq!(request.query().len(), 2);
        assert_eq!(request.uri(), "http://w3af.com/a/b.php?x=1&y=2");
        assert_eq!(request.filename(), "b.php");
        assert_eq!(request.directory(), "/a/");
        assert!(!request.is_post_data());
    }

    #[test]
    fn test_directory_url_has_empty_filename() {
        let request = FuzzableRequest::get("http://w3af.com/a/").unwrap();
        assert_eq!(request.filename(), "");
        assert_eq!(request.directory(), "/a/");
    }

    #[test]
    fn test_clone_is_deep() {
        let original = FuzzableRequest::get("http://w3af.com/?a=1").unwrap();
        let mut copy = original.clone();
        let mut query = copy.query().clone();
        query.set("a", 0, "2");
        copy.set_query(query);
        copy.headers_mut().set("X-Test", "1");

        assert_eq!(original.query().value("a", 0).unwrap().as_text(), "1");
        assert!(original.headers().is_empty());
    }

    #[test]
    fn test_form_body_file_fields() {
        let mut form = Form::new();
        form.add_input("name", FieldKind::Text, "x");
        form.add_input("upload", FieldKind::File, "");
        let request = FuzzableRequest::post("http://w3af.com/up", RequestBody::Form(form)).unwrap();

        assert!(request.is_post_data());
        assert_eq!(request.file_fields(), vec!["upload".to_string()]);
        assert_eq!(request.body().kind_name(), "multipart");
    }

    #[test]
    fn test_rebuilt_path_keeps_dot_segments() {
        let mut request = FuzzableRequest::get("http://w3af.com:8080/abc/def.html?x=1").unwrap();
        request.set_path("/abc/../../etc/passwd.html");

        assert_eq!(request.uri(), "http://w3af.com:8080/abc/../../etc/passwd.html?x=1");
        assert_eq!(request.filename(), "passwd.html");
        assert_eq!(request.directory(), "/abc/../../etc/");
        assert_eq!(request.url().path(), "/abc/def.html");
    }

    #[test]
    fn test_bad_url_is_invalid_request() {
        let err = FuzzableRequest::get("not a url").unwrap_err();
        assert!(matches!(err, MutationError::InvalidRequest { .. }));
    }
}
