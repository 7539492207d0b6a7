// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Account login and shared-session bootstrap.

use base64::Engine;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use serde::Deserialize;

use crate::config::CloudConfig;
use crate::error::CloudError;
use crate::http::HttpClient;
use crate::types::HeadIndex;

/// Account credentials.
///
/// The password is kept private and only leaves this type encoded into the
/// authorization headers the server expects.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from an email address and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// `Password ...` authorization header value for the account endpoint.
    fn password_header(&self) -> String {
        let quoted = utf8_percent_encode(&self.password, NON_ALPHANUMERIC);
        format!("Password {quoted}")
    }

    /// `B64SON ...` authorization header value for the session endpoint.
    fn b64son_header(&self) -> String {
        let payload = serde_json::json!({"ep": {"e": self.email, "p": self.password}});
        let encoded = base64::engine::general_purpose::STANDARD.encode(payload.to_string());
        format!("B64SON {encoded}")
    }
}

/// Account status reported by the server.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AccountStatus {
    /// The account is active.
    #[serde(rename = "SYAccountStatusActive")]
    Active,
}

/// Account metadata returned by the account endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// Accepted service-level agreement version.
    #[serde(rename = "SLA-version-accepted")]
    pub sla_version_accepted: String,

    /// Account email address.
    pub email: String,

    /// The history key identifying this account's change history; this is the
    /// `account` value of [`CloudConfig`](crate::CloudConfig).
    #[serde(rename = "history-key")]
    pub history_key: String,

    /// Outstanding account issues.
    #[serde(default)]
    pub issues: Vec<serde_json::Value>,

    /// Mail-to-inbox address.
    #[serde(rename = "maildrop-email")]
    pub maildrop_email: String,

    /// Account status.
    pub status: AccountStatus,
}

/// A negotiated shared session.
#[derive(Debug, Clone, Deserialize)]
pub struct SharedSession {
    /// The account's head index at session creation.
    #[serde(rename = "headIndex")]
    pub head_index: HeadIndex,

    /// Session secret for the history key.
    #[serde(rename = "historyKeySessionSecret")]
    pub history_key_session_secret: String,
}

/// A logged-in account.
#[derive(Debug, Clone)]
pub struct Account {
    credentials: Credentials,
    info: AccountInfo,
}

impl Account {
    /// Logs in with the given credentials and fetches the account metadata.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, rejected credentials, or an
    /// unexpected response body.
    pub async fn login(config: &CloudConfig, credentials: Credentials) -> Result<Self, CloudError> {
        let http = HttpClient::new(config.clone())?;
        let url = format!("{}/account/{}", config.base_url, credentials.email);
        let req = http
            .build_plain_request(Method::GET, &url)
            .header("Authorization", credentials.password_header());
        let resp = http.execute(req).await?;

        let info: AccountInfo = resp
            .json()
            .await
            .map_err(|e| CloudError::InvalidResponse(e.to_string()))?;
        tracing::info!(email = %info.email, "logged in");
        Ok(Self { credentials, info })
    }

    /// The account metadata fetched at login.
    #[must_use]
    pub fn info(&self) -> &AccountInfo {
        &self.info
    }

    /// Negotiates a new shared session.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, rejected credentials, or an
    /// unexpected response body.
    pub async fn shared_session(&self, config: &CloudConfig) -> Result<SharedSession, CloudError> {
        let http = HttpClient::new(config.clone())?;
        let req = http
            .build_plain_request(Method::POST, &config.session_url)
            .header("Authorization", self.credentials.b64son_header());
        let resp = http.execute(req).await?;

        resp.json()
            .await
            .map_err(|e| CloudError::InvalidResponse(e.to_string()))
    }
}
