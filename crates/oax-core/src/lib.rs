pub mod call;
pub mod config;
pub mod dialog;
pub mod discover;
pub mod error;
pub mod parse;
pub mod raw;
pub mod resolve;
pub mod synthesize;
pub mod values;

use error::Error;
use parse::spec::Specification;

/// Parse an OpenAPI document and resolve all of its `$ref`s.
///
/// Either the whole document resolves or an error is returned; there is no
/// partially resolved result.
pub fn load(input: &str) -> Result<Specification, Error> {
    let parsed = parse::parse_document(input)?;
    let resolved = resolve::resolve(&parsed.spec, &parsed.raw)?;
    log::debug!(
        "loaded {} {} with {} paths",
        resolved.info.title,
        resolved.info.version,
        resolved.paths.len()
    );
    Ok(resolved)
}
