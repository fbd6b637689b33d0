use std::collections::BTreeMap;
use std::fmt;

use crate::{Error, Result};

/// Column name to value, as exchanged with a [`DataStore`](crate::DataStore).
pub type Row = BTreeMap<String, Value>;

/// A single scalar stored in a column.
///
/// Booleans have no variant of their own and are stored as `0`/`1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }

    fn mismatch<T>(&self, expected: &'static str) -> Result<T> {
        Err(Error::Conversion {
            expected,
            found: self.kind(),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Real(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
            Value::Blob(value) => write!(f, "<{} bytes>", value.len()),
        }
    }
}

/// Conversion of a Rust value into a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Conversion of a [`Value`] back into a Rust value.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

macro_rules! integer_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(i).map_err(|_| {
                            Error::InvalidValue(format!(
                                "{i} out of range for {}",
                                stringify!($ty)
                            ))
                        }),
                        other => other.mismatch("integer"),
                    }
                }
            }
        )*
    };
}

integer_value!(i64, i32, i16, i8, u32, u16, u8);

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Real(*self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Real(r) => Ok(r),
            Value::Integer(i) => Ok(i as f64),
            other => other.mismatch("real"),
        }
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Real(f64::from(*self))
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        f64::from_value(value).map(|r| r as f32)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            Value::Integer(i) => {
                Err(Error::InvalidValue(format!("{i} is not a boolean")))
            }
            other => other.mismatch("boolean"),
        }
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => other.mismatch("text"),
        }
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(b) => Ok(b),
            other => other.mismatch("blob"),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    value.to_value()
                }
            }
        )*
    };
}

value_from!(i64, i32, i16, i8, u32, u16, u8, f64, f32, bool, String, &str, Vec<u8>);

impl<T: ToValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn optional() -> Result<()> {
        assert_eq!(Value::Null, None::<i64>.to_value());
        assert_eq!(Value::Integer(3), Some(3i64).to_value());
        assert_eq!(None, Option::<String>::from_value(Value::Null)?);
        assert_eq!(
            Some("a@x.com".to_string()),
            Option::<String>::from_value(Value::from("a@x.com"))?
        );

        Ok(())
    }

    #[test]
    fn widening_and_mismatch() -> Result<()> {
        assert_eq!(2.0, f64::from_value(Value::Integer(2))?);
        assert!(matches!(
            i64::from_value(Value::Text("2".into())),
            Err(Error::Conversion {
                expected: "integer",
                found: "text"
            })
        ));
        assert!(matches!(
            u8::from_value(Value::Integer(300)),
            Err(Error::InvalidValue(_))
        ));

        Ok(())
    }

    #[test]
    fn booleans() -> Result<()> {
        assert_eq!(Value::Integer(1), true.to_value());
        assert!(!bool::from_value(Value::Integer(0))?);
        assert!(bool::from_value(Value::Integer(2)).is_err());

        Ok(())
    }
}
