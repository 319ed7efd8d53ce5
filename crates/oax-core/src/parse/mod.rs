pub mod components;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod server;
pub mod spec;

use crate::error::ParseError;
use crate::raw::RawDocument;
use spec::Specification;

/// Both artifacts of one parse: the typed, still unresolved specification
/// and the raw tree that reference targets are looked up in.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub spec: Specification,
    pub raw: RawDocument,
}

/// Parse an OpenAPI document (YAML or JSON text) into its typed and raw forms.
///
/// The text is decoded twice: typed decoding keeps field paths and source
/// positions for error reporting, the raw decoding keeps every node.
pub fn parse_document(input: &str) -> Result<ParsedDocument, ParseError> {
    let spec = from_yaml(input)?;
    let raw = RawDocument::from_yaml(input)?;
    Ok(ParsedDocument { spec, raw })
}

/// Parse an OpenAPI document into a typed specification without resolving `$ref`s.
pub fn from_yaml(input: &str) -> Result<Specification, ParseError> {
    let spec: Specification =
        serde_yaml_ng::from_str(input).map_err(|e| ParseError::from_yaml(&e))?;
    validate_version(&spec)?;
    Ok(spec)
}

fn validate_version(spec: &Specification) -> Result<(), ParseError> {
    if !spec.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedFeature(format!(
            "OpenAPI version {}",
            spec.openapi
        )));
    }
    Ok(())
}
