use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::discover::{leaf_key, server_key};
use crate::error::SynthesisError;
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::parameter::ParameterLocation;
use crate::parse::request_body::{APPLICATION_JSON, FORM_URLENCODED};
use crate::parse::schema::Schema;
use crate::parse::server::{Server, placeholders};
use crate::parse::spec::Specification;
use crate::values::InputValues;

pub const CONTENT_TYPE: &str = "Content-Type";

/// A ready-to-send request. The core never sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestPayload>,
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub content_type: String,
    pub text: String,
}

/// Turns a resolved operation plus user values into a [`RequestDescriptor`].
///
/// Only the first server is ever used for the base URL.
#[derive(Debug, Clone)]
pub struct Synthesizer<'a> {
    server: Option<&'a Server>,
    fallback_base_url: Option<String>,
}

impl<'a> Synthesizer<'a> {
    pub fn new(spec: &'a Specification) -> Self {
        Self {
            server: spec.servers.first(),
            fallback_base_url: None,
        }
    }

    /// Base URL used when the document declares no servers.
    pub fn with_fallback_base_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_base_url = Some(url.into());
        self
    }

    /// Build the request for `operation` reached via `method` on `path`.
    ///
    /// Unknown keys in `values` are ignored.
    pub fn synthesize(
        &self,
        operation: &Operation,
        method: HttpMethod,
        path: &str,
        values: &impl InputValues,
    ) -> Result<RequestDescriptor, SynthesisError> {
        let mut url = self.base_url(values);
        url.push_str(&substitute_path(operation, path, values));
        append_query(&mut url, operation, values)?;

        let mut headers: IndexMap<String, String> = operation
            .inline_parameters()
            .filter(|p| p.location == ParameterLocation::Header)
            .filter_map(|p| {
                values
                    .non_empty(&p.name)
                    .map(|v| (p.name.clone(), v.to_string()))
            })
            .collect();

        let body = match method {
            HttpMethod::Get | HttpMethod::Delete => None,
            HttpMethod::Post => Some(request_payload(operation, path, values)?),
            HttpMethod::Put => {
                return Err(SynthesisError::UnsupportedMethod(method.to_string()));
            }
        };
        if let Some(payload) = &body {
            headers.insert(CONTENT_TYPE.to_string(), payload.content_type.clone());
        }

        log::debug!("synthesized {method} {url}");
        Ok(RequestDescriptor {
            url,
            method,
            headers,
            body,
        })
    }

    /// The first server's URL with its `{name}` placeholders replaced by the
    /// `baseUrl.0.<name>` values present, forced onto `https`.
    pub fn base_url(&self, values: &impl InputValues) -> String {
        let Some(server) = self.server else {
            log::warn!("document declares no servers, using fallback base URL");
            return self.fallback_base_url.clone().unwrap_or_default();
        };

        let mut url = server.url.clone();
        for name in placeholders(&server.url) {
            if let Some(value) = values.value(&server_key(0, name)) {
                url = url.replace(&format!("{{{name}}}"), value);
            }
        }
        force_https(&url)
    }
}

fn force_https(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("http://") {
        format!("https://{rest}")
    } else if url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Replace `{name}` for every path parameter, with the empty string when no value was given.
pub fn substitute_path(operation: &Operation, path: &str, values: &impl InputValues) -> String {
    operation
        .inline_parameters()
        .filter(|p| p.location == ParameterLocation::Path)
        .fold(path.to_string(), |acc, p| {
            acc.replace(
                &format!("{{{}}}", p.name),
                values.value(&p.name).unwrap_or_default(),
            )
        })
}

fn append_query(
    url: &mut String,
    operation: &Operation,
    values: &impl InputValues,
) -> Result<(), SynthesisError> {
    let pairs: Vec<(&str, &str)> = operation
        .inline_parameters()
        .filter(|p| p.location == ParameterLocation::Query)
        .filter_map(|p| values.non_empty(&p.name).map(|v| (p.name.as_str(), v)))
        .collect();
    if pairs.is_empty() {
        return Ok(());
    }
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&serde_urlencoded::to_string(&pairs)?);
    Ok(())
}

fn request_payload(
    operation: &Operation,
    path: &str,
    values: &impl InputValues,
) -> Result<RequestPayload, SynthesisError> {
    let body = operation
        .request_body
        .as_ref()
        .ok_or_else(|| SynthesisError::MissingRequestBody(format!("POST {path}")))?;

    if let Some(schema) = body.schema_for(APPLICATION_JSON) {
        return Ok(RequestPayload {
            content_type: APPLICATION_JSON.to_string(),
            text: render_json(schema, APPLICATION_JSON, "", values),
        });
    }
    if let Some(schema) = body.schema_for(FORM_URLENCODED) {
        return Ok(RequestPayload {
            content_type: FORM_URLENCODED.to_string(),
            text: render_form(schema, values)?,
        });
    }

    Err(SynthesisError::UnsupportedContentType(
        body.content.keys().cloned().collect(),
    ))
}

/// Render `schema` as JSON text. Objects render their properties in order;
/// scalar leaves take the user's value verbatim, quoted only for strings.
///
/// `media_path` is the discovery key prefix (`<mediaType>.<dotted.path>`),
/// `field_path` the same path without the media type.
pub fn render_json(
    schema: &Schema,
    media_path: &str,
    field_path: &str,
    values: &impl InputValues,
) -> String {
    if schema.is_object() {
        let fields: Vec<String> = schema
            .properties
            .iter()
            .map(|(name, child)| {
                let child_field = if field_path.is_empty() {
                    name.clone()
                } else {
                    format!("{field_path}.{name}")
                };
                let rendered =
                    render_json(child, &format!("{media_path}.{name}"), &child_field, values);
                format!("{}:{rendered}", quote(name))
            })
            .collect();
        return format!("{{{}}}", fields.join(","));
    }

    match leaf_value(schema, media_path, field_path, values) {
        None => "null".to_string(),
        Some(value) if schema.is_string() => quote(value),
        Some(value) => value.to_string(),
    }
}

/// First non-empty value among: the plain title key, the discovery key,
/// the discovery key with title suffix, and the bare field path.
fn leaf_value<'v>(
    schema: &Schema,
    media_path: &str,
    field_path: &str,
    values: &'v impl InputValues,
) -> Option<&'v str> {
    let mut keys = Vec::with_capacity(4);
    if let Some(title) = schema.title() {
        keys.push(title.to_string());
    }
    keys.push(media_path.to_string());
    if schema.title().is_some() {
        keys.push(leaf_key(media_path, schema));
    }
    if !field_path.is_empty() {
        keys.push(field_path.to_string());
    }
    keys.iter().find_map(|k| values.non_empty(k))
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// One form field per top-level property, missing values sent empty.
fn render_form(schema: &Schema, values: &impl InputValues) -> Result<String, SynthesisError> {
    let fields: Vec<(&str, &str)> = schema
        .properties
        .keys()
        .map(|name| {
            let value = values
                .value(name)
                .or_else(|| values.value(&format!("{FORM_URLENCODED}.{name}")))
                .unwrap_or_default();
            (name.as_str(), value)
        })
        .collect();
    Ok(serde_urlencoded::to_string(&fields)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::NoValues;

    fn values(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn forces_https() {
        assert_eq!(force_https("http://api.example.com"), "https://api.example.com");
        assert_eq!(force_https("https://api.example.com"), "https://api.example.com");
        assert_eq!(force_https("api.example.com/v1"), "https://api.example.com/v1");
    }

    #[test]
    fn string_values_are_escaped() {
        let schema: Schema = serde_yaml_ng::from_str("type: string").unwrap();
        let rendered = render_json(
            &schema,
            "application/json",
            "",
            &values(&[("application/json", "say \"hi\"")]),
        );
        assert_eq!(rendered, r#""say \"hi\"""#);
    }

    #[test]
    fn titled_leaf_prefers_plain_title_key() {
        let schema: Schema = serde_yaml_ng::from_str("type: string\ntitle: nick").unwrap();
        let vals = values(&[
            ("nick", "sam"),
            ("application/json.name", "ignored"),
        ]);
        assert_eq!(
            render_json(&schema, "application/json.name", "name", &vals),
            r#""sam""#
        );
    }

    #[test]
    fn empty_value_renders_null() {
        let schema: Schema = serde_yaml_ng::from_str("type: integer").unwrap();
        assert_eq!(
            render_json(&schema, "application/json.age", "age", &values(&[("age", "")])),
            "null"
        );
        assert_eq!(
            render_json(&schema, "application/json.age", "age", &NoValues),
            "null"
        );
    }
}
