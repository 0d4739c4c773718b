use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::nullable::Nullable;

/// The wire token for an explicit null field.
const NULL_TOKEN: &[u8] = b"null";

/// Error type for per-field decode operations.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The field bytes are not `null` and not a valid encoding of the
    /// payload type.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}

/// Error type for per-field encode operations.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The payload type's own encoder rejected the value.
    #[error("unsupported payload: {0}")]
    Unsupported(#[from] serde_json::Error),
}

impl<T: DeserializeOwned + Default> Nullable<T> {
    /// Decodes one field occurrence in place from its raw JSON sub-document
    /// bytes.
    ///
    /// The field is marked present before anything can fail. The exact token
    /// `null` (modulo surrounding whitespace) moves the field to the Null
    /// state with a default payload; anything else is delegated to the
    /// generic JSON decoder for `T`. On a malformed payload the value and
    /// null-ness are left as they were before the call; only the presence
    /// mark sticks.
    pub fn decode_json(&mut self, raw: &[u8]) -> Result<(), DecodeError> {
        self.present = true;
        if raw.trim_ascii() == NULL_TOKEN {
            self.value = T::default();
            self.not_nil = false;
            return Ok(());
        }
        match serde_json::from_slice(raw) {
            Ok(value) => {
                self.value = value;
                self.not_nil = true;
                Ok(())
            }
            Err(err) => Err(DecodeError::MalformedPayload(err)),
        }
    }
}

impl<T: Serialize> Nullable<T> {
    /// Encodes this field to raw JSON bytes.
    ///
    /// Null and Absent both encode as the null token; leaving an Absent
    /// field's key out of the document entirely is the enclosing record's
    /// omit marking, not this operation's concern. Payload encode failures
    /// carry through unchanged.
    pub fn encode_json(&self) -> Result<Vec<u8>, EncodeError> {
        if self.is_null() {
            return Ok(NULL_TOKEN.to_vec());
        }
        Ok(serde_json::to_vec(self.value())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_payload() {
        let mut field: Nullable<i64> = Nullable::default();
        field.decode_json(b"5").unwrap();
        assert!(field.has_value());
        assert_eq!(*field.value(), 5);
    }

    #[test]
    fn decode_null_token() {
        let mut field: Nullable<i64> = Nullable::default();
        field.decode_json(b" null ").unwrap();
        assert!(field.is_null());
        assert!(!field.is_omitted());
    }

    #[test]
    fn decode_null_over_value_clears_payload() {
        let mut field = Nullable::new(9i64);
        field.decode_json(b"null").unwrap();
        assert!(field.is_null());
        assert_eq!(*field.value(), 0);
    }

    #[test]
    fn malformed_payload_keeps_prior_state() {
        let mut field = Nullable::new(9i64);
        let err = field.decode_json(b"\"oops\"").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload(_)));
        // The presence mark is not rolled back, the rest is untouched.
        assert!(!field.is_omitted());
        assert!(field.has_value());
        assert_eq!(*field.value(), 9);
    }

    #[test]
    fn malformed_payload_on_absent_field_still_marks_present() {
        let mut field: Nullable<u8> = Nullable::default();
        // 300 does not fit the payload width.
        assert!(field.decode_json(b"300").is_err());
        assert!(!field.is_omitted());
        assert!(field.is_null());
        assert_eq!(*field.value(), 0);
    }

    #[test]
    fn encode_value() {
        let field = Nullable::new("test".to_string());
        assert_eq!(field.encode_json().unwrap(), b"\"test\"");
    }

    #[test]
    fn encode_null_and_absent_alike() {
        let mut field: Nullable<bool> = Nullable::default();
        assert_eq!(field.encode_json().unwrap(), b"null");
        field.set(true);
        field.reset();
        assert_eq!(field.encode_json().unwrap(), b"null");
    }

    #[test]
    fn roundtrip_via_raw_bytes() {
        let mut field: Nullable<f32> = Nullable::default();
        field.set(1.6);
        let raw = field.encode_json().unwrap();
        let mut back: Nullable<f32> = Nullable::default();
        back.decode_json(&raw).unwrap();
        assert!(back.has_value());
        assert_eq!(*back.value(), 1.6f32);
    }
}
