// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Things Cloud transport errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// HTTP layer error (network failure or non-success status).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Response body did not match the protocol schema.
    #[error("invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CloudError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}
