use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::{Deserializer, Unexpected, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An owned byte payload with a text-friendly wire form.
///
/// Human-readable formats carry it as a standard-alphabet, padded base64
/// string (`b"bytes"` becomes `"Ynl0ZXM="`); binary formats carry it as a
/// native byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteString(pub Vec<u8>);

impl ByteString {
    pub fn new(data: Vec<u8>) -> Self {
        ByteString(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(v: Vec<u8>) -> Self {
        ByteString(v)
    }
}

impl From<&[u8]> for ByteString {
    fn from(v: &[u8]) -> Self {
        ByteString(v.to_vec())
    }
}

impl Serialize for ByteString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&STANDARD.encode(&self.0))
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for ByteString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ByteStringVisitor;

        impl Visitor<'_> for ByteStringVisitor {
            type Value = ByteString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a base64 string or a byte string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                STANDARD
                    .decode(v)
                    .map(ByteString)
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ByteString(v.to_vec()))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ByteString(v))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(ByteStringVisitor)
        } else {
            deserializer.deserialize_byte_buf(ByteStringVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_form_is_base64() {
        let bytes = ByteString::from(&b"bytes"[..]);
        let json = serde_json::to_string(&bytes).unwrap();
        assert_eq!(json, r#""Ynl0ZXM=""#);
    }

    #[test]
    fn json_roundtrip() {
        let bytes: ByteString = serde_json::from_str(r#""Ynl0ZXM=""#).unwrap();
        assert_eq!(bytes.as_bytes(), b"bytes");
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let result: Result<ByteString, _> = serde_json::from_str(r#""not base64!""#);
        assert!(result.is_err());
    }

    #[test]
    fn cbor_form_is_native_bytes() {
        let bytes = ByteString::from(&b"bytes"[..]);
        let mut buf = Vec::new();
        ciborium::ser::into_writer(&bytes, &mut buf).unwrap();
        // Major type 2, length 5, then the raw payload.
        assert_eq!(buf[0], 0x45);
        assert_eq!(&buf[1..], b"bytes");

        let back: ByteString = ciborium::de::from_reader(buf.as_slice()).unwrap();
        assert_eq!(back, bytes);
    }
}
