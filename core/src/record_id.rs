// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Length of every record identifier on the wire.
const ID_LEN: usize = 22;

/// Base-62 digits used when generating fresh identifiers.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Opaque 22-character record identifier.
///
/// Identifiers are globally unique and immutable after creation. Fresh ones
/// are generated from UUIDv4 entropy encoded in base 62; identifiers arriving
/// from the server are accepted as any 22 alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        let mut n = Uuid::new_v4().as_u128();
        let mut buf = [0u8; ID_LEN];
        for slot in buf.iter_mut().rev() {
            let digit = (n % 62) as usize;
            *slot = ALPHABET[digit];
            n /= 62;
        }
        // All bytes come from ALPHABET, so the buffer is valid UTF-8.
        Self(buf.iter().map(|&b| char::from(b)).collect())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error returned when parsing an invalid record identifier.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid record id {value:?}: expected 22 alphanumeric characters")]
pub struct InvalidRecordId {
    /// The rejected input.
    pub value: String,
}

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.len() == ID_LEN && value.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidRecordId {
                value: value.to_string(),
            })
        }
    }
}

impl TryFrom<String> for RecordId {
    type Error = InvalidRecordId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
