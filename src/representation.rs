//! Representation Module
//!
//! The value types used to talk to a backing store, and the empty sentinel
//! that encodes "no value" end to end.
//!
//! Most stores cannot tell "key absent" from "key present with a zero-length
//! value", so a zero-length representation is reserved for "no value": a
//! `None` is written as the empty sentinel, and an empty read is reported as
//! a miss. A present value must never encode to the sentinel.

use std::fmt;
use std::str::FromStr;

use crate::error::{CacheError, Result};

// == Representation Kind ==
/// Tag naming a supported store representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepresentationKind {
    /// UTF-8 text
    String,
    /// Raw byte sequence
    Bytes,
}

impl RepresentationKind {
    /// Human-readable list of accepted names, used in error messages.
    pub const ALLOWED: &'static str = "string, bytes";

    pub fn as_str(&self) -> &'static str {
        match self {
            RepresentationKind::String => "string",
            RepresentationKind::Bytes => "bytes",
        }
    }
}

impl fmt::Display for RepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepresentationKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(RepresentationKind::String),
            "bytes" | "byte-array" | "byte[]" => Ok(RepresentationKind::Bytes),
            _ => Err(CacheError::UnsupportedRepresentation {
                requested: s.to_string(),
                allowed: Self::ALLOWED.to_string(),
            }),
        }
    }
}

// == Representation ==
/// A value type a backing store can hold.
pub trait Representation: Clone + Send + Sync + 'static {
    /// Kind tag for this representation
    const KIND: RepresentationKind;

    /// The empty sentinel meaning "no value".
    fn absent() -> Self;

    /// Returns true if this value is the empty sentinel.
    fn is_absent(&self) -> bool;

    /// Bytes written to the store.
    fn to_stored(&self) -> Vec<u8>;

    /// Decodes bytes read from the store.
    fn from_stored(raw: Vec<u8>) -> Result<Self>;
}

impl Representation for String {
    const KIND: RepresentationKind = RepresentationKind::String;

    fn absent() -> Self {
        String::new()
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn to_stored(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn from_stored(raw: Vec<u8>) -> Result<Self> {
        Ok(String::from_utf8(raw)?)
    }
}

impl Representation for Vec<u8> {
    const KIND: RepresentationKind = RepresentationKind::Bytes;

    fn absent() -> Self {
        Vec::new()
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn to_stored(&self) -> Vec<u8> {
        self.clone()
    }

    fn from_stored(raw: Vec<u8>) -> Result<Self> {
        Ok(raw)
    }
}
