// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::errors::MutationResult;
use crate::fuzzer::form_filler::smart_fill;
use crate::fuzzer::mutant::{assemble_container, ContainerChange, Mutant, MutantKind};
use crate::fuzzer::utils::{is_ignored_parameter, upload_file_name};
use crate::request::{DataContainer, FileUpload, Form, FuzzableRequest, ParamValue};

/// Knobs shared by every flat-container run
#[derive(Debug, Clone, Copy)]
pub struct ContainerOptions<'a> {
    pub append: bool,
    /// Only these names are fuzzed; empty means all
    pub fuzzable_params: &'a [String],
    /// Extension for re-populated upload placeholders
    pub file_ext: &'a str,
}

/// One mutant per (name, repetition index, probe), in container order.
///
/// `container` is the surface being fuzzed (query string, form fields,
/// headers or cookie). When it is the request's own form body, other empty
/// text-like fields are auto-filled and upload fields get fresh placeholders
/// so the body stays multipart.
pub fn create_container_mutants(
    kind: MutantKind,
    request: &FuzzableRequest,
    container: &DataContainer,
    probes: &[ParamValue],
    options: ContainerOptions<'_>,
) -> MutationResult<Vec<Mutant>> {
    let mut mutants = Vec::new();

    let form = match kind {
        MutantKind::PostData | MutantKind::FileContent => request.form(),
        _ => None,
    };
    let file_vars = request.file_fields();

    for (name, values) in container.iter() {
        if is_ignored_parameter(name) {
            continue;
        }
        if !options.fuzzable_params.is_empty()
            && !options.fuzzable_params.iter().any(|p| p == name)
        {
            continue;
        }

        for (index, original) in values.iter().enumerate() {
            for probe in probes {
                // Uploads are fuzzed by the file content strategy only
                if file_vars.iter().any(|f| f == name) && !probe.is_upload() {
                    continue;
                }

                let mut dc = container.clone();

                if let Some(form) = form {
                    fill_other_fields(&mut dc, form, name, index);
                    repopulate_uploads(&mut dc, &file_vars, options.file_ext);
                }

                let new_value = if options.append {
                    original.appended(probe)
                } else {
                    probe.clone()
                };
                let mod_value = new_value.as_text().to_string();
                dc.set(name, index, new_value);

                mutants.push(assemble_container(
                    kind,
                    request,
                    dc,
                    ContainerChange {
                        var: name,
                        index,
                        original_value: original.as_text(),
                        mod_value: &mod_value,
                    },
                )?);
            }
        }
    }

    Ok(mutants)
}

/// Smart-fill every empty text-like slot except the one being fuzzed
fn fill_other_fields(dc: &mut DataContainer, form: &Form, fuzzed: &str, fuzzed_index: usize) {
    for (name, values) in dc.iter_mut() {
        if form.kind(name).is_choice_or_file() {
            continue;
        }
        for (index, value) in values.iter_mut().enumerate() {
            if (name, index) == (fuzzed, fuzzed_index) {
                continue;
            }
            if value.is_empty() {
                *value = ParamValue::Text(smart_fill(name));
            }
        }
    }
}

fn repopulate_uploads(dc: &mut DataContainer, file_vars: &[String], ext: &str) {
    for name in file_vars {
        let placeholder = ParamValue::File(FileUpload::placeholder(upload_file_name(ext)));
        if !dc.set(name, 0, placeholder.clone()) {
            dc.push(name.as_str(), placeholder);
        }
    }
}
