use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    pub fn contains(&self, ty: &SchemaType) -> bool {
        match self {
            TypeSet::Single(t) => t == ty,
            TypeSet::Multiple(types) => types.contains(ty),
        }
    }
}

/// A schema node.
///
/// Before resolution a schema may carry only a `$ref` marker. After
/// resolution `reference` is `None` everywhere in the tree and the node holds
/// the target's own content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    /// Names of the immediate properties that must be present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl Schema {
    /// A schema that is nothing but a pointer to another definition.
    pub fn reference(ref_path: impl Into<String>) -> Self {
        Self {
            reference: Some(ref_path.into()),
            ..Self::default()
        }
    }

    pub fn is_object(&self) -> bool {
        !self.properties.is_empty()
    }

    pub fn is_string(&self) -> bool {
        self.schema_type
            .as_ref()
            .is_some_and(|t| t.contains(&SchemaType::String))
    }

    /// Non-empty title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// True when no reference marker remains anywhere in this subtree.
    pub fn is_resolved(&self) -> bool {
        self.reference.is_none()
            && self.properties.values().all(Schema::is_resolved)
            && self.items.as_deref().is_none_or(Schema::is_resolved)
    }
}

/// Render a YAML/JSON scalar default the way a user would type it.
pub fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_text_unquotes_strings() {
        assert_eq!(scalar_text(&serde_json::json!("eu")), "eu");
        assert_eq!(scalar_text(&serde_json::json!(42)), "42");
        assert_eq!(scalar_text(&serde_json::json!(true)), "true");
        assert_eq!(scalar_text(&serde_json::Value::Null), "");
    }

    #[test]
    fn nested_reference_is_not_resolved() {
        let mut schema = Schema::default();
        schema
            .properties
            .insert("owner".into(), Schema::reference("#/components/schemas/User"));
        assert!(!schema.is_resolved());
        schema.properties.clear();
        assert!(schema.is_resolved());
    }
}
