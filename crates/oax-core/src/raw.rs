use serde_yaml_ng::Value;

use crate::error::{ParseError, ResolveError};

/// The document as a generic tree of mappings, sequences and scalars.
///
/// Used only as the lookup source for reference targets while resolving.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    root: Value,
}

impl RawDocument {
    pub fn from_yaml(input: &str) -> Result<Self, ParseError> {
        let root: Value = serde_yaml_ng::from_str(input).map_err(|e| ParseError::from_yaml(&e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Locate the node a document-relative reference such as
    /// `#/components/schemas/User` points at.
    ///
    /// Path tokens are JSON Pointer encoded (`~1` is `/`, `~0` is `~`).
    /// Mappings are indexed by key, sequences by decimal position.
    pub fn lookup(&self, reference: &str) -> Result<&Value, ResolveError> {
        let Some(fragment) = reference.strip_prefix('#') else {
            return Err(ResolveError::UnsupportedFeature(format!(
                "non-local references are not supported, reference was '{reference}'"
            )));
        };

        if fragment.is_empty() {
            return Ok(&self.root);
        }
        let pointer = fragment
            .strip_prefix('/')
            .ok_or_else(|| ResolveError::UnresolvedReference(reference.to_string()))?;

        let mut node = &self.root;
        for token in pointer.split('/') {
            let token = decode_token(token);
            log::trace!("{reference}: descending into '{token}'");
            node = child(node, &token)
                .ok_or_else(|| ResolveError::UnresolvedReference(reference.to_string()))?;
        }
        Ok(node)
    }
}

fn decode_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn child<'a>(node: &'a Value, token: &str) -> Option<&'a Value> {
    match node {
        Value::Mapping(map) => map.get(token).or_else(|| {
            // Unquoted numeric keys such as response codes decode as numbers.
            token
                .parse::<u64>()
                .ok()
                .and_then(|n| map.get(Value::Number(n.into())))
        }),
        Value::Sequence(items) => token.parse::<usize>().ok().and_then(|i| items.get(i)),
        Value::Tagged(tagged) => child(&tagged.value, token),
        _ => None,
    }
}
