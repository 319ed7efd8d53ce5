use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;

use crate::discover::{UserInput, discover};
use crate::error::SynthesisError;
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::spec::Specification;
use crate::synthesize::{RequestDescriptor, Synthesizer};
use crate::values::{InputValues, NoValues};

/// What the host has to ask the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Values are needed before `operation` can be called.
    ParameterInput {
        inputs: IndexMap<String, UserInput>,
        path: String,
        method: HttpMethod,
        operation: Operation,
    },
    /// An API document has to be picked.
    ApiSelection { available: Vec<String> },
}

/// Outcome of preparing a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Next {
    Send(RequestDescriptor),
    Prompt(Dialog),
}

/// Decide whether `operation` can be called right away or the user has to
/// be asked first. Nothing to ask means the request is built with no values.
pub fn prepare_call(
    spec: &Specification,
    synthesizer: &Synthesizer<'_>,
    path: &str,
    method: HttpMethod,
    operation: &Operation,
    previous: &impl InputValues,
) -> Result<Next, SynthesisError> {
    let inputs = discover(spec, operation, previous);
    if inputs.is_empty() {
        let request = synthesizer.synthesize(operation, method, path, &NoValues)?;
        return Ok(Next::Send(request));
    }

    Ok(Next::Prompt(Dialog::ParameterInput {
        inputs,
        path: path.to_string(),
        method,
        operation: operation.clone(),
    }))
}

/// List the `.yml`/`.yaml` documents in `dir`, sorted by name.
pub fn api_selection(dir: &Path) -> io::Result<Dialog> {
    let mut available = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "yml" || e == "yaml");
        if !is_yaml || !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            available.push(name.to_string());
        }
    }
    available.sort();
    Ok(Dialog::ApiSelection { available })
}
