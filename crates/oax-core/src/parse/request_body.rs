use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::Schema;

pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A media type entry of a request body or response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// A request body definition, or a `$ref` marker pointing at one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, Content>,

    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    /// Schema declared for a media type, if any.
    pub fn schema_for(&self, media_type: &str) -> Option<&Schema> {
        self.content.get(media_type).and_then(|c| c.schema.as_ref())
    }
}
