use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(
        "malformed document at {}: {message}{}",
        display_path(path),
        display_position(*line, *column)
    )]
    Malformed {
        /// Dotted field path reported by the decoder, empty for the document root.
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),
}

impl ParseError {
    /// Build a `Malformed` error from a YAML decoding failure, splitting the
    /// decoder's `path: message at line L column C` rendering into parts.
    pub(crate) fn from_yaml(err: &serde_yaml_ng::Error) -> Self {
        let location = err.location();
        let mut rendered = err.to_string();
        if let Some(idx) = rendered.rfind(" at line ") {
            if location.is_some() {
                rendered.truncate(idx);
            }
        }

        let (path, message) = match rendered.split_once(": ") {
            Some((prefix, rest)) if !prefix.contains(' ') => (prefix.to_string(), rest.to_string()),
            _ => (String::new(), rendered),
        };

        ParseError::Malformed {
            path,
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
            message,
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

fn display_position(line: Option<usize>, column: Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" (line {line}, column {column})"),
        (Some(line), None) => format!(" (line {line})"),
        _ => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),

    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("circular reference detected: {reference} (via {})", chain.join(" -> "))]
    CircularReference {
        reference: String,
        chain: Vec<String>,
    },

    #[error("reference target {reference} is not a valid definition: {message}")]
    InvalidTarget { reference: String, message: String },
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("no request body given, but one is required for {0}")]
    MissingRequestBody(String),

    #[error("unsupported request content type, declared: [{}]", .0.join(", "))]
    UnsupportedContentType(Vec<String>),

    #[error("unsupported HTTP method for request synthesis: {0}")]
    UnsupportedMethod(String),

    #[error("failed to encode form body: {0}")]
    FormEncoding(#[from] serde_urlencoded::ser::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("request error: {0}")]
    Synthesis(#[from] SynthesisError),
}
