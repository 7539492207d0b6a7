// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with the fixed Things Cloud protocol headers.

use reqwest::{Client, Method, RequestBuilder, Response};

use crate::config::CloudConfig;
use crate::error::CloudError;

/// Schema version declared on every history/commit request.
const SCHEMA_VERSION: &str = "301";

/// HTTP client for Things Cloud operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: CloudConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: CloudConfig) -> Result<Self, CloudError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request carrying the protocol headers the server expects on
    /// history and commit calls.
    pub fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Accept", "application/json")
            .header("Accept-Charset", "UTF-8")
            .header("Accept-Language", "en-gb")
            .header("Schema", SCHEMA_VERSION)
            .header("Content-Type", "application/json; charset=UTF-8")
            .header("App-Id", &self.config.app_id)
            .header("App-Instance-Id", format!("-{}", self.config.app_id))
            .header("Push-Priority", "5")
    }

    /// Builds a bare request without the protocol headers (account endpoints).
    pub fn build_plain_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Accept", "application/json")
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, CloudError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let text = resp
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            if status == reqwest::StatusCode::UNAUTHORIZED {
                Err(CloudError::Auth(text))
            } else {
                Err(CloudError::Http(format!("{status}: {text}")))
            }
        }
    }
}
