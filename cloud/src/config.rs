// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Things Cloud server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CloudConfig {
    /// Base URL of the versioned API (account and history endpoints).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// URL of the shared-session login endpoint.
    #[serde(default = "default_session_url")]
    pub session_url: String,

    /// The account's history key, as it appears in `history/{account}/...`
    /// URLs. Obtained from [`AccountInfo`](crate::AccountInfo) after login.
    pub account: String,

    /// Application identifier sent in the `App-Id` header.
    #[serde(default = "default_app_id")]
    pub app_id: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://cloud.culturedcode.com/version/1".to_string()
}

fn default_session_url() -> String {
    "https://cloud.culturedcode.com/api/account/login/getT3SharedSession".to_string()
}

fn default_app_id() -> String {
    "com.culturedcode.ThingsMac".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("things-cloud/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_url: default_session_url(),
            account: String::new(),
            app_id: default_app_id(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
