// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use super::container::{create_container_mutants, ContainerOptions};
use crate::errors::{MutationError, MutationResult};
use crate::fuzzer::mutant::{Mutant, MutantKind};
use crate::fuzzer::utils::upload_file_name;
use crate::request::{FileUpload, FuzzableRequest, ParamValue};

/// Upload each probe as the content of every file field of a multipart form
pub fn create_file_content_mutants(
    request: &FuzzableRequest,
    probes: &[String],
    append: bool,
    file_ext: &str,
) -> MutationResult<Vec<Mutant>> {
    let file_vars = request.file_fields();
    if file_vars.is_empty() {
        return Ok(Vec::new());
    }

    let form = request
        .form()
        .ok_or_else(|| MutationError::invariant("file fields without a form body"))?;

    let uploads: Vec<ParamValue> = probes
        .iter()
        .map(|probe| ParamValue::File(FileUpload::new(upload_file_name(file_ext), probe.as_str())))
        .collect();

    create_container_mutants(
        MutantKind::FileContent,
        request,
        form.fields(),
        &uploads,
        ContainerOptions {
            append,
            fuzzable_params: &file_vars,
            file_ext,
        },
    )
}
