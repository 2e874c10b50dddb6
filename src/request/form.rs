// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::data_container::{DataContainer, ParamValue};

/// HTML control kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Checkbox,
    Radio,
    Select,
    File,
    Password,
    Hidden,
}

impl FieldKind {
    /// Map an `<input type>` / tag name onto a field kind.
    /// Anything text-like (email, tel, textarea, ...) is `Text`.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            "select" => FieldKind::Select,
            "file" => FieldKind::File,
            "password" => FieldKind::Password,
            "hidden" => FieldKind::Hidden,
            _ => FieldKind::Text,
        }
    }

    /// Kinds whose value is picked from a fixed set or is an upload
    pub fn is_choice_or_file(&self) -> bool {
        matches!(
            self,
            FieldKind::Checkbox | FieldKind::Radio | FieldKind::Select | FieldKind::File
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::Select => "select",
            FieldKind::File => "file",
            FieldKind::Password => "password",
            FieldKind::Hidden => "hidden",
        };
        f.write_str(name)
    }
}

/// An HTML form: a data container plus the control kind of every field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    fields: DataContainer,
    kinds: HashMap<String, FieldKind>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field value. The first kind recorded for a name is kept.
    pub fn add_input(&mut self, name: &str, kind: FieldKind, value: impl Into<ParamValue>) {
        self.kinds.entry(name.to_string()).or_insert(kind);
        self.fields.push(name, value);
    }

    /// Kind of a field; fields added without a kind are text
    pub fn kind(&self, name: &str) -> FieldKind {
        self.kinds.get(name).copied().unwrap_or(FieldKind::Text)
    }

    /// Upload field names in form order
    pub fn file_fields(&self) -> Vec<String> {
        self.fields
            .names()
            .filter(|name| self.kind(name) == FieldKind::File)
            .map(str::to_string)
            .collect()
    }

    pub fn is_multipart(&self) -> bool {
        self.fields.names().any(|name| self.kind(name) == FieldKind::File)
    }

    pub fn fields(&self) -> &DataContainer {
        &self.fields
    }

    /// Same field kinds over a different set of values
    pub fn with_fields(&self, fields: DataContainer) -> Self {
        Self {
            fields,
            kinds: self.kinds.clone(),
        }
    }

    /// Encode as `multipart/form-data` with the given boundary
    pub fn to_multipart(&self, boundary: &str) -> String {
        let mut body = String::new();
        for (name, values) in self.fields.iter() {
            for value in values {
                body.push_str(&format!("--{}\r\n", boundary));
                match value {
                    ParamValue::Text(text) => {
                        body.push_str(&format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                            name, text
                        ));
                    }
                    ParamValue::File(upload) => {
                        body.push_str(&format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                            name, upload.filename
                        ));
                        body.push_str("Content-Type: application/octet-stream\r\n\r\n");
                        body.push_str(&upload.content);
                        body.push_str("\r\n");
                    }
                }
            }
        }
        body.push_str(&format!("--{}--\r\n", boundary));
        body
    }
}
