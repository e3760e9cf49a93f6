//! Conversion of resolved environment text into field values

use crate::error::ConvertError;

/// Separator between list elements
pub const LIST_SEPARATOR: char = ',';

/// Broad category of a convertible type.
///
/// List conversion uses it to decide which element types are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Int,
    Bool,
    Float,
    List,
}

/// Types that can be assigned from environment text.
///
/// Implemented for `String`, every primitive integer, `bool`, `f32`, `f64`
/// and `Vec<T>`. Fields of any other type do not compile.
pub trait FromEnvValue: Sized {
    /// Category used for list element checks
    const KIND: Kind;

    /// Convert resolved text into a value
    fn from_env_value(raw: &str) -> Result<Self, ConvertError>;
}

impl FromEnvValue for String {
    const KIND: Kind = Kind::String;

    fn from_env_value(raw: &str) -> Result<Self, ConvertError> {
        Ok(raw.to_string())
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnvValue for $ty {
                const KIND: Kind = Kind::Int;

                fn from_env_value(raw: &str) -> Result<Self, ConvertError> {
                    raw.parse::<$ty>()
                        .map_err(|e| ConvertError::parse_error::<$ty>(raw, e))
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnvValue for $ty {
                const KIND: Kind = Kind::Float;

                fn from_env_value(raw: &str) -> Result<Self, ConvertError> {
                    raw.parse::<$ty>()
                        .map_err(|e| ConvertError::parse_error::<$ty>(raw, e))
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl FromEnvValue for bool {
    const KIND: Kind = Kind::Bool;

    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`
    fn from_env_value(raw: &str) -> Result<Self, ConvertError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ConvertError::parse_error::<bool>(
                raw,
                "expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False",
            )),
        }
    }
}

impl<T: FromEnvValue> FromEnvValue for Vec<T> {
    const KIND: Kind = Kind::List;

    /// Split on `,` and convert each element.
    ///
    /// Elements are not trimmed. Empty input is an empty list. Only string and
    /// integer elements are accepted.
    fn from_env_value(raw: &str) -> Result<Self, ConvertError> {
        if !matches!(T::KIND, Kind::String | Kind::Int) {
            return Err(ConvertError::unsupported_element::<T>());
        }
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        raw.split(LIST_SEPARATOR).map(T::from_env_value).collect()
    }
}
