// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Ordered, repeatable-key parameter container.
//!
//! Query strings, url-encoded bodies, form fields, cookies and the fuzzable
//! header set are all carried as a [`DataContainer`]. Parameter order is
//! insertion order and survives cloning, which keeps mutant emission order
//! deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{MutationError, MutationResult};

/// An uploaded file as carried inside a multipart body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub filename: String,
    pub content: String,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Empty upload used to keep multipart bodies multipart
    pub fn placeholder(filename: impl Into<String>) -> Self {
        Self::new(filename, String::new())
    }
}

/// A single parameter value: plain text or a file-content placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    File(FileUpload),
}

impl ParamValue {
    /// Text form of the value (file content for uploads)
    pub fn as_text(&self) -> &str {
        match self {
            ParamValue::Text(text) => text,
            ParamValue::File(upload) => &upload.content,
        }
    }

    /// Only empty text counts as "not filled in"
    pub fn is_empty(&self) -> bool {
        matches!(self, ParamValue::Text(text) if text.is_empty())
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, ParamValue::File(_))
    }

    /// `self + probe`, keeping upload metadata when the probe carries it
    pub fn appended(&self, probe: &ParamValue) -> ParamValue {
        match probe {
            ParamValue::Text(text) => ParamValue::Text(format!("{}{}", self.as_text(), text)),
            ParamValue::File(upload) => ParamValue::File(FileUpload {
                filename: upload.filename.clone(),
                content: format!("{}{}", self.as_text(), upload.content),
            }),
        }
    }

    /// Value as it travels in a url-encoded body (uploads send their file name)
    fn wire_value(&self) -> &str {
        match self {
            ParamValue::Text(text) => text,
            ParamValue::File(upload) => &upload.filename,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<FileUpload> for ParamValue {
    fn from(value: FileUpload) -> Self {
        ParamValue::File(value)
    }
}

/// Ordered mapping from parameter name to its (possibly repeated) values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataContainer {
    params: Vec<(String, Vec<ParamValue>)>,
}

impl DataContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient `application/x-www-form-urlencoded` parsing, used for query strings
    pub fn parse_query(query: &str) -> Self {
        let mut container = Self::new();
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            container.push(name.into_owned(), value.into_owned());
        }
        container
    }

    /// Strict url-encoded parsing.
    ///
    /// Every `&`/`;` separated field must be a `name=value` pair (blank values
    /// allowed). An empty body fails. Escapes that are not UTF-8 decode lossily.
    pub fn parse_strict(body: &str) -> MutationResult<Self> {
        let mut container = Self::new();

        for field in body.split(['&', ';']) {
            let (name, value) = field.split_once('=').ok_or_else(|| {
                MutationError::invalid_request(format!("bad url-encoded field: {:?}", field))
            })?;
            container.push(decode_component(name), decode_component(value));
        }

        Ok(container)
    }

    /// Append `value` to `name`, creating the parameter when it is new
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value),
            None => self.params.push((name, vec![value])),
        }
    }

    /// Replace every value of `name`, keeping its position if present
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<ParamValue>) {
        let name = name.into();
        match self.params.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = values,
            None => self.params.push((name, values)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[ParamValue]> {
        self.params
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn value(&self, name: &str, index: usize) -> Option<&ParamValue> {
        self.get(name).and_then(|values| values.get(index))
    }

    /// Overwrite one `(name, index)` slot. Returns false when the slot does not exist.
    pub fn set(&mut self, name: &str, index: usize, value: impl Into<ParamValue>) -> bool {
        match self
            .params
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .and_then(|(_, values)| values.get_mut(index))
        {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParamValue])> {
        self.params
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<ParamValue>)> {
        self.params
            .iter_mut()
            .map(|(name, values)| (name.as_str(), values))
    }

    /// Number of distinct parameter names
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serialize as `application/x-www-form-urlencoded`
    pub fn to_urlencoded(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, values) in &self.params {
            for value in values {
                serializer.append_pair(name, value.wire_value());
            }
        }
        serializer.finish()
    }
}

impl fmt::Display for DataContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_urlencoded())
    }
}

impl<N: Into<String>, V: Into<ParamValue>> FromIterator<(N, V)> for DataContainer {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut container = Self::new();
        for (name, value) in iter {
            container.push(name, value);
        }
        container
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
