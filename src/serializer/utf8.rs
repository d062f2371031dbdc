//! UTF-8 serializer between strings and byte sequences.

use crate::error::Result;
use crate::serializer::ItemSerializer;

// == Utf8 Serializer ==
/// Encodes a `String` as its UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Serializer;

impl ItemSerializer<String, Vec<u8>> for Utf8Serializer {
    fn serialize(&self, value: &String) -> Result<Vec<u8>> {
        Ok(value.as_bytes().to_vec())
    }

    fn deserialize(&self, raw: Vec<u8>) -> Result<String> {
        Ok(String::from_utf8(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_utf8_round_trip() {
        let value = "naïve café".to_string();
        let raw = Utf8Serializer.serialize(&value).unwrap();
        assert_eq!(raw, value.as_bytes());
        assert_eq!(Utf8Serializer.deserialize(raw).unwrap(), value);
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        let result = Utf8Serializer.deserialize(vec![0xff]);
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }
}
