use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::parse::operation::Operation;
use crate::parse::schema::{Schema, scalar_text};
use crate::parse::server::Server;
use crate::parse::spec::Specification;
use crate::values::InputValues;

/// Prefix of keys naming server URL template variables.
pub const BASE_URL_KEY: &str = "baseUrl";

/// One value the user can fill in before a call is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub required: bool,
    pub details: Option<String>,
    /// Previously entered value, else the declared default, else empty.
    pub previous: String,
}

/// Key of a server URL template variable.
pub fn server_key(index: usize, variable: &str) -> String {
    format!("{BASE_URL_KEY}.{index}.{variable}")
}

/// Enumerate every user-fillable input of `operation`: server variables,
/// operation parameters, then request body fields per media type.
///
/// Keys are deterministic, so `previous` can recall what the user entered
/// for the same input last time.
pub fn discover(
    spec: &Specification,
    operation: &Operation,
    previous: &impl InputValues,
) -> IndexMap<String, UserInput> {
    let mut inputs = server_inputs(&spec.servers, previous);
    inputs.extend(parameter_inputs(operation, previous));

    if let Some(body) = &operation.request_body {
        for (media_type, content) in &body.content {
            if let Some(schema) = &content.schema {
                inputs.extend(schema_inputs(media_type, media_type, schema, false, previous));
            }
        }
    }

    inputs
}

/// Inputs for the URL template variables of every server.
pub fn server_inputs(
    servers: &[Server],
    previous: &impl InputValues,
) -> IndexMap<String, UserInput> {
    let mut inputs = IndexMap::new();

    for (index, server) in servers.iter().enumerate() {
        if server.variables.is_empty() {
            let placeholders = server.placeholders();
            if placeholders.len() > 1 {
                log::warn!(
                    "server {} has {} placeholders but no variables, only '{}' is prompted",
                    server.url,
                    placeholders.len(),
                    placeholders[0]
                );
            }
            if let Some(name) = placeholders.first() {
                let key = server_key(index, name);
                let input = UserInput {
                    name: name.to_string(),
                    required: true,
                    details: None,
                    previous: recall(previous, &key, None),
                };
                inputs.insert(key, input);
            }
            continue;
        }

        for (name, variable) in &server.variables {
            let key = server_key(index, name);
            let input = UserInput {
                name: name.clone(),
                required: true,
                details: variable.description.clone(),
                previous: recall(previous, &key, Some(variable.default.as_str())),
            };
            inputs.insert(key, input);
        }
    }

    inputs
}

fn parameter_inputs(
    operation: &Operation,
    previous: &impl InputValues,
) -> IndexMap<String, UserInput> {
    operation
        .inline_parameters()
        .map(|param| {
            let default = param.default_value().map(scalar_text);
            let input = UserInput {
                name: param.name.clone(),
                required: param.required,
                details: param.help().map(str::to_string),
                previous: recall(previous, &param.name, default.as_deref()),
            };
            (param.name.clone(), input)
        })
        .collect()
}

/// Inputs for the scalar leaves under `schema`. `path` is the dotted key
/// accumulated so far, `name` the display name of this node.
fn schema_inputs(
    path: &str,
    name: &str,
    schema: &Schema,
    required: bool,
    previous: &impl InputValues,
) -> IndexMap<String, UserInput> {
    if schema.is_object() {
        let mut inputs = IndexMap::new();
        for (child, child_schema) in &schema.properties {
            let child_path = format!("{path}.{child}");
            let child_required = schema.required.iter().any(|r| r == child);
            inputs.extend(schema_inputs(
                &child_path,
                child,
                child_schema,
                child_required,
                previous,
            ));
        }
        return inputs;
    }

    let key = leaf_key(path, schema);
    let default = schema.default_value.as_ref().map(scalar_text);
    let input = UserInput {
        name: name.to_string(),
        required,
        details: schema.description.clone(),
        previous: recall(previous, &key, default.as_deref()),
    };
    IndexMap::from([(key, input)])
}

/// Key of a request body leaf: its dotted path, suffixed with the schema
/// title when there is one.
pub fn leaf_key(path: &str, schema: &Schema) -> String {
    match schema.title() {
        Some(title) => format!("{path}.{title}"),
        None => path.to_string(),
    }
}

fn recall(previous: &impl InputValues, key: &str, default: Option<&str>) -> String {
    previous
        .value(key)
        .or(default)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::schema::{SchemaType, TypeSet};
    use crate::values::NoValues;

    fn scalar(ty: SchemaType) -> Schema {
        Schema {
            schema_type: Some(TypeSet::Single(ty)),
            ..Schema::default()
        }
    }

    #[test]
    fn leaf_key_appends_title() {
        let mut schema = scalar(SchemaType::String);
        assert_eq!(leaf_key("application/json.name", &schema), "application/json.name");
        schema.title = Some("Name".into());
        assert_eq!(
            leaf_key("application/json.name", &schema),
            "application/json.name.Name"
        );
        schema.title = Some(String::new());
        assert_eq!(leaf_key("application/json.name", &schema), "application/json.name");
    }

    #[test]
    fn nested_leaves_take_required_from_parent() {
        let mut address = Schema::default();
        address
            .properties
            .insert("city".into(), scalar(SchemaType::String));
        address
            .properties
            .insert("zip".into(), scalar(SchemaType::String));
        address.required = vec!["zip".into()];

        let mut root = Schema::default();
        root.properties.insert("address".into(), address);
        root.required = vec!["address".into()];

        let inputs = schema_inputs("application/json", "application/json", &root, false, &NoValues);
        let keys: Vec<_> = inputs.keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["application/json.address.city", "application/json.address.zip"]
        );
        assert!(!inputs["application/json.address.city"].required);
        assert!(inputs["application/json.address.zip"].required);
        assert_eq!(inputs["application/json.address.zip"].name, "zip");
    }

    #[test]
    fn previous_value_wins_over_default() {
        let mut schema = scalar(SchemaType::Integer);
        schema.default_value = Some(serde_json::json!(10));
        let mut previous: IndexMap<String, String> = IndexMap::new();

        let inputs = schema_inputs(
            "application/json",
            "application/json",
            &schema,
            false,
            &previous,
        );
        assert_eq!(inputs["application/json"].previous, "10");

        previous.insert("application/json".to_string(), "25".to_string());
        let inputs = schema_inputs(
            "application/json",
            "application/json",
            &schema,
            false,
            &previous,
        );
        assert_eq!(inputs["application/json"].previous, "25");
    }

    #[test]
    fn server_without_variables_uses_first_placeholder() {
        let servers = vec![Server {
            url: "https://{tenant}.example.com/{stage}".into(),
            description: None,
            variables: IndexMap::new(),
        }];
        let inputs = server_inputs(&servers, &NoValues);
        assert_eq!(inputs.len(), 1);
        let input = &inputs["baseUrl.0.tenant"];
        assert!(input.required);
        assert_eq!(input.previous, "");
    }
}
