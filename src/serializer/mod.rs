//! Serializer Module
//!
//! Pluggable, composable transformations between a caller's value type and
//! the representation adjacent to it in the chain.

mod chain;
mod json;
mod utf8;

pub use chain::Chain;
pub use json::JsonSerializer;
pub use utf8::Utf8Serializer;

use crate::error::{CacheError, Result};
use crate::representation::Representation;

// == Item Serializer ==
/// Invertible transformation between `T` and its representation `R`.
///
/// Implementations only see present values; the absent sentinel is handled
/// by [`serialize_item`] and [`deserialize_item`].
pub trait ItemSerializer<T, R>: Send + Sync {
    fn serialize(&self, value: &T) -> Result<R>;

    fn deserialize(&self, raw: R) -> Result<T>;
}

/// Extension methods available on every serializer.
pub trait ItemSerializerExt<T, M>: ItemSerializer<T, M> + Sized {
    /// Composes `self` (`T -> M`) with `next` (`M -> R`) into `T -> R`.
    fn then<R, S>(self, next: S) -> Chain<Self, S, M>
    where
        S: ItemSerializer<M, R>,
        M: Representation,
    {
        Chain::new(self, next)
    }
}

impl<T, M, S: ItemSerializer<T, M>> ItemSerializerExt<T, M> for S {}

// == Sentinel Policy ==
/// Serializes an optional value.
///
/// `None` becomes the empty sentinel. A present value that serializes to the
/// sentinel is rejected, since it would read back as a miss.
pub fn serialize_item<T, R, S>(serializer: &S, value: Option<&T>) -> Result<R>
where
    R: Representation,
    S: ItemSerializer<T, R> + ?Sized,
{
    match value {
        None => Ok(R::absent()),
        Some(value) => {
            let raw = serializer.serialize(value)?;
            if raw.is_absent() {
                return Err(CacheError::Serialization(format!(
                    "present value serialized to the empty {} sentinel",
                    R::KIND
                )));
            }
            Ok(raw)
        }
    }
}

/// Deserializes a raw value, reading the empty sentinel as `None`.
pub fn deserialize_item<T, R, S>(serializer: &S, raw: R) -> Result<Option<T>>
where
    R: Representation,
    S: ItemSerializer<T, R> + ?Sized,
{
    if raw.is_absent() {
        return Ok(None);
    }
    serializer.deserialize(raw).map(Some)
}
