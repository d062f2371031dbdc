//! Store Options Module
//!
//! The expiration settings handed to a backing store alongside each write,
//! and their conversion to and from TTL values.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};
use crate::ttl::{ExpirationTtl, Ttl};

// == Store Options ==
/// Per-entry expiration settings understood by a backing store.
///
/// Options produced by this crate set exactly one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Expire at this point in time
    pub absolute_expiration: Option<DateTime<Utc>>,
    /// Expire this long after the write
    pub absolute_expiration_relative_to_now: Option<Duration>,
    /// Expire after this long without access
    pub sliding_expiration: Option<Duration>,
}

impl StoreOptions {
    pub fn absolute(at: DateTime<Utc>) -> Self {
        Self {
            absolute_expiration: Some(at),
            ..Self::default()
        }
    }

    pub fn relative(duration: Duration) -> Self {
        Self {
            absolute_expiration_relative_to_now: Some(duration),
            ..Self::default()
        }
    }

    pub fn sliding(duration: Duration) -> Self {
        Self {
            sliding_expiration: Some(duration),
            ..Self::default()
        }
    }

    /// Reads the options back as a TTL strategy.
    ///
    /// Precedence: absolute, then relative, then sliding. Options with none
    /// of the three set are rejected.
    pub fn to_ttl_strategy(&self) -> Result<ExpirationTtl> {
        ExpirationTtl::try_from(self)
    }
}

impl From<Ttl> for StoreOptions {
    fn from(ttl: Ttl) -> Self {
        if ttl.sliding {
            StoreOptions::sliding(ttl.duration)
        } else {
            StoreOptions::relative(ttl.duration)
        }
    }
}

impl From<&Ttl> for StoreOptions {
    fn from(ttl: &Ttl) -> Self {
        StoreOptions::from(*ttl)
    }
}

impl TryFrom<&StoreOptions> for ExpirationTtl {
    type Error = CacheError;

    fn try_from(options: &StoreOptions) -> Result<Self> {
        if let Some(at) = options.absolute_expiration {
            Ok(ExpirationTtl::Absolute(at))
        } else if let Some(duration) = options.absolute_expiration_relative_to_now {
            Ok(ExpirationTtl::Relative(duration))
        } else if let Some(duration) = options.sliding_expiration {
            Ok(ExpirationTtl::Sliding(duration))
        } else {
            Err(CacheError::UnrecognizedOptions(format!("{:?}", options)))
        }
    }
}
