// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the history and commit endpoints.

use std::sync::Arc;

use reqwest::Method;

use crate::config::CloudConfig;
use crate::error::CloudError;
use crate::http::HttpClient;
use crate::response::{CommitBody, CommitResponse, HistoryResponse};
use crate::types::HeadIndex;

/// Client for an account's change history on the Things Cloud server.
///
/// # Example
///
/// ```ignore
/// use things_cloud::{CloudClient, CloudConfig, HeadIndex};
///
/// # async fn example() -> Result<(), things_cloud::CloudError> {
/// let config = CloudConfig {
///     account: "my-history-key".to_string(),
///     ..Default::default()
/// };
///
/// let client = CloudClient::new(config)?;
/// let history = client.fetch_history(HeadIndex::new(0)).await?;
/// println!("head index: {}", history.current_item_index);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: Arc<HttpClient>,
    config: CloudConfig,
}

impl CloudClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing from the configuration or
    /// HTTP client initialization fails.
    pub fn new(config: CloudConfig) -> Result<Self, CloudError> {
        if config.account.is_empty() {
            return Err(CloudError::Config("account must not be empty".to_string()));
        }
        let http = HttpClient::new(config.clone())?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Fetches all history updates strictly after `since`.
    ///
    /// The response carries the server's current head index even when there
    /// are no new updates.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status, or a
    /// response body that does not parse as a history batch.
    pub async fn fetch_history(&self, since: HeadIndex) -> Result<HistoryResponse, CloudError> {
        tracing::debug!(%since, "fetching history");
        let url = self.history_url("items");
        let req = self
            .http
            .build_request(Method::GET, &url)
            .query(&[("start-index", since.get().to_string())]);
        let resp = self.http.execute(req).await?;

        let history: HistoryResponse = resp
            .json()
            .await
            .map_err(|e| CloudError::InvalidResponse(e.to_string()))?;
        tracing::debug!(
            head = %history.current_item_index,
            items = history.items.len(),
            "fetched history batch"
        );
        Ok(history)
    }

    /// Asks the server for its current head index.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`fetch_history`](Self::fetch_history).
    pub async fn current_index(&self, since: HeadIndex) -> Result<HeadIndex, CloudError> {
        let history = self.fetch_history(since).await?;
        Ok(history.current_item_index)
    }

    /// Commits a batch of updates with `ancestor` as the concurrency token.
    ///
    /// Returns the server head index after the accepted commit. The server
    /// rejects the commit when `ancestor` does not match its current head.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a rejected or failed commit, or
    /// a response body without a server head index.
    pub async fn commit(
        &self,
        ancestor: HeadIndex,
        body: &CommitBody,
    ) -> Result<HeadIndex, CloudError> {
        tracing::debug!(%ancestor, updates = body.len(), "committing");
        let url = self.history_url("commit");
        let req = self
            .http
            .build_request(Method::POST, &url)
            .query(&[
                ("ancestor-index", ancestor.get().to_string()),
                ("_cnt", "1".to_string()),
            ])
            .json(body);
        let resp = self.http.execute(req).await?;

        let commit: CommitResponse = resp
            .json()
            .await
            .map_err(|e| CloudError::InvalidResponse(e.to_string()))?;
        tracing::debug!(head = %commit.server_head_index, "commit accepted");
        Ok(commit.server_head_index)
    }

    fn history_url(&self, endpoint: &str) -> String {
        format!(
            "{}/history/{}/{endpoint}",
            self.config.base_url, self.config.account
        )
    }
}
