use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::synthesize::RequestDescriptor;

pub const EMPTY_BODY: &str = "<empty>";
pub const NETWORK_NOT_AVAILABLE: &str = "<NETWORK NOT AVAILABLE>";
/// Response code recorded when the round trip itself failed.
pub const NETWORK_FAILURE_CODE: u16 = 503;

/// Log entry for one executed request and the response it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCall {
    pub method: String,
    pub api: String,
    pub request_headers: IndexMap<String, Vec<String>>,
    pub request_body: String,
    pub response_code: u16,
    pub response_body: String,
}

impl ApiCall {
    pub fn from_response(request: &RequestDescriptor, code: u16, body: String) -> Self {
        Self {
            response_code: code,
            response_body: if body.is_empty() {
                EMPTY_BODY.to_string()
            } else {
                body
            },
            ..Self::request_only(request)
        }
    }

    /// Record a round trip that produced no response at all.
    pub fn network_failure(request: &RequestDescriptor, message: Option<&str>) -> Self {
        Self {
            response_code: NETWORK_FAILURE_CODE,
            response_body: message
                .filter(|m| !m.is_empty())
                .unwrap_or(NETWORK_NOT_AVAILABLE)
                .to_string(),
            ..Self::request_only(request)
        }
    }

    fn request_only(request: &RequestDescriptor) -> Self {
        Self {
            method: request.method.to_string(),
            api: request.url.clone(),
            request_headers: request
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), vec![v.clone()]))
                .collect(),
            request_body: request
                .body
                .as_ref()
                .map(|b| b.text.clone())
                .unwrap_or_default(),
            response_code: 0,
            response_body: String::new(),
        }
    }
}
