use serde::de::{Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use crate::bytes::ByteString;

/// A record field that tells apart absent, null, and valued states.
///
/// `Option<T>` collapses "the key was missing" and "the key was `null`" into
/// one case, which loses information a round-trip-faithful codec needs.
/// `Nullable<T>` keeps the three states separate:
///
/// - **Absent**: the key never occurred in the input and nothing was assigned
/// - **Null**: the key occurred with an explicit `null`
/// - **Value**: the key occurred with a payload of type `T`
///
/// A default-constructed field is Absent. Decoding or assignment moves it to
/// Null or Value; once present there is no way back to Absent.
///
/// Record integration with serde derive:
/// - `#[serde(default)]` on the field makes a missing key decode as Absent
/// - `#[serde(skip_serializing_if = "Nullable::is_omitted")]` drops Absent
///   fields from the output; without it an Absent field encodes as `null`
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Nullable<T> {
    pub(crate) value: T,
    pub(crate) not_nil: bool,
    pub(crate) present: bool,
}

impl<T> Nullable<T> {
    /// Creates a field already in the Value state.
    ///
    /// Both state flags are written together with the payload in a single
    /// struct literal, so no half-initialized state is observable.
    pub fn new(value: T) -> Self {
        Nullable {
            value,
            not_nil: true,
            present: true,
        }
    }

    /// Returns true when the field is Absent or Null.
    pub fn is_null(&self) -> bool {
        !self.not_nil
    }

    /// Returns true when the field holds an actual value.
    pub fn has_value(&self) -> bool {
        self.not_nil
    }

    /// Returns true when the field never occurred in the input and was never
    /// assigned.
    ///
    /// Also serves as the `skip_serializing_if` predicate that drops Absent
    /// fields from encoded output.
    pub fn is_omitted(&self) -> bool {
        !self.present
    }

    /// Returns the payload regardless of state.
    ///
    /// In the Absent and Null states this is `T::default()`. Check
    /// [`is_null`](Self::is_null) or [`is_omitted`](Self::is_omitted) before
    /// treating the result as data; this accessor never fails.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the payload only in the Value state.
    pub fn get(&self) -> Option<&T> {
        if self.not_nil { Some(&self.value) } else { None }
    }

    /// Consumes the field, returning the payload.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Consumes the field, returning `Some` only in the Value state.
    pub fn into_option(self) -> Option<T> {
        if self.not_nil { Some(self.value) } else { None }
    }

    /// Unconditionally moves the field to the Value state.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.not_nil = true;
        self.present = true;
    }
}

impl<T: Default> Nullable<T> {
    /// Clears the payload and marks the field null.
    ///
    /// `present` is left untouched: a field that was seen in the input stays
    /// seen (Value and Null both end up Null), and an Absent field stays
    /// Absent. Resetting means "this field is now null", not "this field was
    /// never there".
    pub fn reset(&mut self) {
        self.value = T::default();
        self.not_nil = false;
    }

    /// Builds a field from an `Option`: `Some` becomes Value, `None` becomes
    /// Null.
    ///
    /// An `Option` in hand means the field was produced rather than omitted,
    /// so the result is present either way.
    pub fn from_option(option: Option<T>) -> Self {
        match option {
            Some(value) => Nullable::new(value),
            None => Nullable {
                value: T::default(),
                not_nil: false,
                present: true,
            },
        }
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.not_nil {
            f.debug_tuple("Value").field(&self.value).finish()
        } else if self.present {
            f.write_str("Null")
        } else {
            f.write_str("Absent")
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.not_nil {
            self.value.serialize(serializer)
        } else {
            // Absent fields asked to encode behave exactly like Null; leaving
            // the key out entirely is the enclosing record's skip marking.
            serializer.serialize_none()
        }
    }
}

impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NullableVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for NullableVisitor<T>
        where
            T: Deserialize<'de> + Default,
        {
            type Value = Nullable<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("null or a payload value")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Nullable {
                    value: T::default(),
                    not_nil: false,
                    present: true,
                })
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_none()
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                T::deserialize(deserializer).map(Nullable::new)
            }
        }

        deserializer.deserialize_option(NullableVisitor(PhantomData))
    }
}

/// Boolean field that can be null.
pub type NullableBool = Nullable<bool>;

/// Byte payload field that can be null; base64 text on JSON wires.
pub type NullableBytes = Nullable<ByteString>;

/// String field that can be null.
pub type NullableString = Nullable<String>;

/// i8 field that can be null.
pub type NullableI8 = Nullable<i8>;

/// i16 field that can be null.
pub type NullableI16 = Nullable<i16>;

/// i32 field that can be null.
pub type NullableI32 = Nullable<i32>;

/// i64 field that can be null.
pub type NullableI64 = Nullable<i64>;

/// u8 field that can be null.
pub type NullableU8 = Nullable<u8>;

/// u16 field that can be null.
pub type NullableU16 = Nullable<u16>;

/// u32 field that can be null.
pub type NullableU32 = Nullable<u32>;

/// u64 field that can be null.
pub type NullableU64 = Nullable<u64>;

/// f32 field that can be null.
pub type NullableF32 = Nullable<f32>;

/// f64 field that can be null.
pub type NullableF64 = Nullable<f64>;
