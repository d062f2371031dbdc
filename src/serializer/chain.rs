//! Serializer composition.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{CacheError, Result};
use crate::representation::Representation;
use crate::serializer::{serialize_item, ItemSerializer};

// == Chain ==
/// Two serializers run back to back: `first` (`T -> M`) then `second` (`M -> R`).
///
/// The intermediate `M` is checked against the absent sentinel, so a stage
/// that maps a present value to "empty" fails instead of leaking a miss.
pub struct Chain<A, B, M> {
    first: A,
    second: B,
    _marker: PhantomData<fn() -> M>,
}

impl<A, B, M> Chain<A, B, M> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<A: Clone, B: Clone, M> Clone for Chain<A, B, M> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<A: fmt::Debug, B: fmt::Debug, M> fmt::Debug for Chain<A, B, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

impl<T, M, R, A, B> ItemSerializer<T, R> for Chain<A, B, M>
where
    M: Representation,
    A: ItemSerializer<T, M>,
    B: ItemSerializer<M, R>,
{
    fn serialize(&self, value: &T) -> Result<R> {
        let middle = serialize_item(&self.first, Some(value))?;
        self.second.serialize(&middle)
    }

    fn deserialize(&self, raw: R) -> Result<T> {
        let middle = self.second.deserialize(raw)?;
        if middle.is_absent() {
            return Err(CacheError::Serialization(format!(
                "stored value decoded to the empty {} sentinel",
                M::KIND
            )));
        }
        self.first.deserialize(middle)
    }
}
