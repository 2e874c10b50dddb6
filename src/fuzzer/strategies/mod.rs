// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Positional mutation strategies, one per request surface.

pub mod container;
pub mod file_content;
pub mod filename;
pub mod json;
pub mod url_parts;

pub use container::{create_container_mutants, ContainerOptions};
pub use file_content::create_file_content_mutants;
pub use filename::create_filename_mutants;
pub use json::{fuzz_json, JsonCandidate};
pub use url_parts::create_url_parts_mutants;
