//! TTL Strategy Module
//!
//! Defines the resolved [`Ttl`] value and the strategies that produce it.

use std::marker::PhantomData;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::context::Context;
use crate::ttl::StoreOptions;

// == Ttl ==
/// How long a cache entry should live.
///
/// `sliding == true` asks the store to restart the countdown on every access;
/// otherwise the entry expires `duration` after it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl {
    /// Time-to-live of the entry
    pub duration: Duration,
    /// Whether the countdown resets on access
    pub sliding: bool,
}

impl Ttl {
    /// A TTL of zero. Cache policies do not store values with this TTL.
    pub const ZERO: Ttl = Ttl {
        duration: Duration::ZERO,
        sliding: false,
    };

    // == Constructors ==
    pub fn new(duration: Duration, sliding: bool) -> Self {
        Self { duration, sliding }
    }

    /// Fixed countdown from the time of write.
    pub fn relative(duration: Duration) -> Self {
        Self::new(duration, false)
    }

    /// Countdown that restarts on every access.
    pub fn sliding(duration: Duration) -> Self {
        Self::new(duration, true)
    }

    pub fn is_zero(&self) -> bool {
        self.duration.is_zero()
    }
}

// == TtlStrategy ==
/// Produces the [`Ttl`] for an item about to be cached.
///
/// `value` is `None` when the caller stores "no value".
pub trait TtlStrategy<T>: Send + Sync {
    fn get_ttl(&self, context: &Context, value: Option<&T>) -> Ttl;
}

/// An already-resolved TTL is its own strategy.
impl<T> TtlStrategy<T> for Ttl {
    fn get_ttl(&self, _context: &Context, _value: Option<&T>) -> Ttl {
        *self
    }
}

// == ExpirationTtl ==
/// The three expiration styles a store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationTtl {
    /// Expire at a fixed point in time
    Absolute(DateTime<Utc>),
    /// Expire a fixed duration after the write
    Relative(Duration),
    /// Expire after a period without access
    Sliding(Duration),
}

impl ExpirationTtl {
    /// Resolves the strategy against the current clock.
    ///
    /// An absolute expiration already in the past resolves to a zero TTL.
    pub fn resolve(&self) -> Ttl {
        match *self {
            ExpirationTtl::Absolute(at) => {
                let remaining = (at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
                Ttl::relative(remaining)
            }
            ExpirationTtl::Relative(duration) => Ttl::relative(duration),
            ExpirationTtl::Sliding(duration) => Ttl::sliding(duration),
        }
    }

    /// Converts to store options.
    ///
    /// `Absolute` is turned into a relative duration at the moment of
    /// conversion, so it reads back as `Relative`.
    pub fn to_store_options(&self) -> StoreOptions {
        StoreOptions::from(self.resolve())
    }
}

impl<T> TtlStrategy<T> for ExpirationTtl {
    fn get_ttl(&self, _context: &Context, _value: Option<&T>) -> Ttl {
        self.resolve()
    }
}

// == ResultTtl ==
/// TTL computed from the context and the value being cached.
pub struct ResultTtl<T, F> {
    func: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> ResultTtl<T, F>
where
    F: Fn(&Context, Option<&T>) -> Ttl + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _marker: PhantomData,
        }
    }
}

impl<T, F> TtlStrategy<T> for ResultTtl<T, F>
where
    F: Fn(&Context, Option<&T>) -> Ttl + Send + Sync,
{
    fn get_ttl(&self, context: &Context, value: Option<&T>) -> Ttl {
        (self.func)(context, value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new("op")
    }

    #[test]
    fn test_relative_resolves_non_sliding() {
        let ttl = TtlStrategy::<()>::get_ttl(
            &ExpirationTtl::Relative(Duration::from_secs(10)),
            &ctx(),
            None,
        );
        assert_eq!(ttl, Ttl::relative(Duration::from_secs(10)));
        assert!(!ttl.sliding);
    }

    #[test]
    fn test_sliding_resolves_sliding() {
        let ttl = TtlStrategy::<()>::get_ttl(
            &ExpirationTtl::Sliding(Duration::from_secs(10)),
            &ctx(),
            None,
        );
        assert!(ttl.sliding);
        assert_eq!(ttl.duration, Duration::from_secs(10));
    }

    #[test]
    fn test_absolute_resolves_to_remaining_time() {
        let at = Utc::now() + chrono::Duration::days(1);
        let ttl = ExpirationTtl::Absolute(at).resolve();

        assert!(!ttl.sliding);
        let one_day = Duration::from_secs(24 * 60 * 60);
        assert!(ttl.duration <= one_day);
        assert!(ttl.duration >= one_day - Duration::from_secs(10));
    }

    #[test]
    fn test_absolute_in_past_is_zero() {
        let at = Utc::now() - chrono::Duration::minutes(5);
        let ttl = ExpirationTtl::Absolute(at).resolve();
        assert!(ttl.is_zero());
    }

    #[test]
    fn test_ttl_is_its_own_strategy() {
        let ttl = Ttl::sliding(Duration::from_secs(3));
        assert_eq!(TtlStrategy::<String>::get_ttl(&ttl, &ctx(), None), ttl);
    }

    #[test]
    fn test_result_ttl_sees_value() {
        let strategy = ResultTtl::new(|_ctx: &Context, value: Option<&u64>| match value {
            Some(secs) => Ttl::relative(Duration::from_secs(*secs)),
            None => Ttl::ZERO,
        });

        assert_eq!(
            strategy.get_ttl(&ctx(), Some(&42)),
            Ttl::relative(Duration::from_secs(42))
        );
        assert!(strategy.get_ttl(&ctx(), None).is_zero());
    }

    #[test]
    fn test_result_ttl_sees_context() {
        let strategy = ResultTtl::new(|ctx: &Context, _value: Option<&()>| {
            if ctx.operation_key().starts_with("hot:") {
                Ttl::sliding(Duration::from_secs(60))
            } else {
                Ttl::relative(Duration::from_secs(5))
            }
        });

        assert!(strategy.get_ttl(&Context::new("hot:feed"), None).sliding);
        assert!(!strategy.get_ttl(&Context::new("cold"), None).sliding);
    }
}
