//! JSON serializer backed by serde_json.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::serializer::ItemSerializer;

// == Json Serializer ==
/// Encodes any serde type as a JSON string.
///
/// JSON never renders a value as the empty string (`""` becomes `"\"\""`,
/// unit and `None` become `null`), so present values cannot collide with the
/// absent sentinel.
pub struct JsonSerializer<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSerializer<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonSerializer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSerializer")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> ItemSerializer<T, String> for JsonSerializer<T>
where
    T: Serialize + DeserializeOwned,
{
    fn serialize(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize(&self, raw: String) -> Result<T> {
        Ok(serde_json::from_str(&raw)?)
    }
}
