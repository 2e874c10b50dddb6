// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Structured request model: the mutable surfaces of one HTTP request.

pub mod captured;
pub mod cookie;
pub mod data_container;
pub mod form;
pub mod fuzzable_request;
pub mod headers;
pub mod json;

pub use captured::CapturedRequest;
pub use cookie::Cookie;
pub use data_container::{DataContainer, FileUpload, ParamValue};
pub use form::{FieldKind, Form};
pub use fuzzable_request::{FuzzableRequest, RequestBody};
pub use headers::Headers;
pub use json::JsonNode;
