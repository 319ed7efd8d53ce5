use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::request_body::Content;

/// A response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, Content>,
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}

impl ResponseOrRef {
    pub fn as_response(&self) -> Option<&Response> {
        match self {
            ResponseOrRef::Response(r) => Some(r),
            ResponseOrRef::Ref { .. } => None,
        }
    }
}
