//! Tri-state nullable record fields for structured-data interchange.
//!
//! Core concepts:
//! - **Nullable**: A field that tells apart absent, null, and valued states
//! - **ByteString**: A byte payload carried as base64 text on JSON wires
//! - **decode_json / encode_json**: In-place per-field operations on raw
//!   sub-document bytes, for callers that slice records by hand
//!
//! `Option<T>` cannot say whether a key was missing or explicitly `null`.
//! `Nullable<T>` can, which is what lets a decode/encode pair reproduce its
//! input faithfully. The container never inspects the payload's shape; it
//! delegates to whatever serde codec the enclosing record uses, so nested
//! records, sequences, and primitives all work the same way.
//!
//! # Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use trivalent_core::Nullable;
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Profile {
//!     #[serde(default)]
//!     age: Nullable<u32>,
//!     #[serde(default, skip_serializing_if = "Nullable::is_omitted")]
//!     nickname: Nullable<String>,
//! }
//!
//! let profile: Profile = serde_json::from_str(r#"{"age":null}"#).unwrap();
//! assert!(profile.age.is_null());
//! assert!(!profile.age.is_omitted());
//! assert!(profile.nickname.is_omitted());
//!
//! // Absent fields with the skip marking vanish from the output again.
//! assert_eq!(serde_json::to_string(&profile).unwrap(), r#"{"age":null}"#);
//! ```

mod bytes;
mod json;
mod nullable;

pub use bytes::ByteString;
pub use json::{DecodeError, EncodeError};
pub use nullable::{
    Nullable, NullableBool, NullableBytes, NullableF32, NullableF64, NullableI8, NullableI16,
    NullableI32, NullableI64, NullableString, NullableU8, NullableU16, NullableU32, NullableU64,
};
