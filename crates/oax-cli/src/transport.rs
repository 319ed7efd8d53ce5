use std::time::Duration;

use anyhow::{Context, Result};
use oax_core::call::ApiCall;
use oax_core::parse::operation::HttpMethod;
use oax_core::synthesize::RequestDescriptor;
use reqwest::Method;
use reqwest::blocking::Client;

/// Blocking HTTP transport performing a single round trip per call.
pub struct Transport {
    client: Client,
}

impl Transport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Send `request` once. A failed round trip is recorded, not returned as an error.
    pub fn send(&self, request: &RequestDescriptor) -> ApiCall {
        let mut builder = self.client.request(method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.text.clone());
        }

        log::info!("{} {}", request.method, request.url);
        let response = builder.send().and_then(|response| {
            let code = response.status().as_u16();
            response.text().map(|text| (code, text))
        });

        match response {
            Ok((code, text)) => {
                log::debug!("{} {} -> {code}", request.method, request.url);
                ApiCall::from_response(request, code, text)
            }
            Err(err) => {
                log::warn!("{} {} failed: {err}", request.method, request.url);
                ApiCall::network_failure(request, Some(&err.to_string()))
            }
        }
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}
