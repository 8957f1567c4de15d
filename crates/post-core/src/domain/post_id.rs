//! Time-sortable 160-bit identifiers.
//!
//! [`PostId`] wraps a KSUID: a 4-byte big-endian timestamp (seconds since
//! [`EPOCH`]) followed by a 16-byte random payload. The canonical text form is
//! 27 base62 characters, so byte-wise comparison of either encoding orders ids
//! by creation time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svix_ksuid::{Ksuid, KsuidLike};

use crate::error::DomainError;

/// Identifier epoch in Unix seconds (2014-05-13T16:53:20Z).
pub const EPOCH: i64 = 1_400_000_000;

/// Length of the binary encoding.
pub const BYTE_LEN: usize = 20;

/// Length of the canonical string encoding.
pub const STRING_LEN: usize = 27;

/// Length of the random payload.
pub const PAYLOAD_LEN: usize = 16;

const TIMESTAMP_LEN: usize = 4;

/// Identifier used for posts and author references.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(Ksuid);

impl PostId {
    /// "No identifier". Never a valid reference.
    pub fn nil() -> Self {
        Self(Ksuid::from_bytes([0; BYTE_LEN]))
    }

    /// Generate a fresh identifier from the system clock and thread-local entropy.
    ///
    /// Returns [`PostId::nil`] if the clock is outside the representable range.
    pub fn generate() -> Self {
        Self::from_parts(Utc::now(), rand::random()).unwrap_or_else(|_| Self::nil())
    }

    /// Build an identifier from a creation time and a payload.
    pub fn from_parts(time: DateTime<Utc>, payload: [u8; PAYLOAD_LEN]) -> Result<Self, DomainError> {
        let timestamp = u32::try_from(time.timestamp() - EPOCH).map_err(|_| {
            DomainError::invalid_argument(format!("time {time} is outside the identifier range"))
        })?;

        let mut bytes = [0; BYTE_LEN];
        bytes[..TIMESTAMP_LEN].copy_from_slice(&timestamp.to_be_bytes());
        bytes[TIMESTAMP_LEN..].copy_from_slice(&payload);
        Ok(Self(Ksuid::from_bytes(bytes)))
    }

    /// Parse the canonical 27-character string form.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.len() != STRING_LEN {
            return Err(DomainError::invalid_argument(format!(
                "identifier must be {STRING_LEN} characters, got {}",
                s.len()
            )));
        }

        let ksuid = Ksuid::from_base62(s)
            .map_err(|e| DomainError::invalid_argument(format!("invalid identifier {s:?}: {e}")))?;

        // Values past 160 bits decode truncated; only the canonical form is accepted.
        if ksuid.to_base62() != s {
            return Err(DomainError::invalid_argument(format!(
                "identifier {s:?} exceeds 160 bits"
            )));
        }
        Ok(Self(ksuid))
    }

    /// Decode the 20-byte binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DomainError> {
        let bytes = <[u8; BYTE_LEN]>::try_from(bytes).map_err(|_| {
            DomainError::invalid_argument(format!(
                "identifier must be {BYTE_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(Ksuid::from_bytes(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8; BYTE_LEN] {
        self.0.bytes()
    }

    pub fn is_nil(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }

    /// Seconds since [`EPOCH`].
    pub fn timestamp(&self) -> u32 {
        let bytes = self.as_bytes();
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Creation time embedded in the identifier.
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(EPOCH + i64::from(self.timestamp()), 0).unwrap_or_default()
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_base62())
    }
}

impl fmt::Debug for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostId({self})")
    }
}

impl FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&[u8]> for PostId {
    type Error = DomainError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl Serialize for PostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
