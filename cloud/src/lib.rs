// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Transport client for the Things Cloud synchronization protocol
//! (account login, shared-session bootstrap, and the `history`/`commit` API).

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod account;
mod client;
mod config;
mod error;
mod http;
mod response;
mod types;

pub use crate::account::{Account, AccountInfo, AccountStatus, Credentials, SharedSession};
pub use crate::client::CloudClient;
pub use crate::config::CloudConfig;
pub use crate::error::CloudError;
pub use crate::response::{
    CommitBody, CommitResponse, ENTITY_TASK, HistoryResponse, ItemUpdate, KIND_DELETE, KIND_EDIT,
    KIND_NEW,
};
pub use crate::types::HeadIndex;
