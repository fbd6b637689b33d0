use std::fmt;
use std::str::FromStr;

use crate::{Error, Result, Value};

/// Expected type of an attribute, checked by a [`Validator`](crate::Validator).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Real,
    Text,
    Boolean,
    Blob,
}

impl FieldType {
    /// Whether `value` may be stored in an attribute of this type.
    ///
    /// `Null` conforms to every type: presence is checked separately.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (FieldType::Integer, Value::Integer(_))
                | (FieldType::Real, Value::Real(_) | Value::Integer(_))
                | (FieldType::Text, Value::Text(_))
                | (FieldType::Blob, Value::Blob(_))
                | (FieldType::Boolean, Value::Integer(0 | 1))
        )
    }

    /// Reads a value of this type from its textual form.
    pub fn parse_value(&self, raw: &str) -> Result<Value> {
        if raw.eq_ignore_ascii_case("null") {
            return Ok(Value::Null);
        }

        let invalid = || Error::InvalidValue(format!("`{raw}` is not a valid {self}"));

        match self {
            FieldType::Integer => {
                raw.parse().map(Value::Integer).map_err(|_| invalid())
            }
            FieldType::Real => raw.parse().map(Value::Real).map_err(|_| invalid()),
            FieldType::Text => Ok(Value::Text(raw.to_string())),
            FieldType::Blob => Ok(Value::Blob(raw.as_bytes().to_vec())),
            FieldType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Value::Integer(1)),
                "false" | "no" | "0" => Ok(Value::Integer(0)),
                _ => Err(invalid()),
            },
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldType::Integer => "integer",
            FieldType::Real => "real",
            FieldType::Text => "text",
            FieldType::Boolean => "boolean",
            FieldType::Blob => "blob",
        })
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(FieldType::Integer),
            "real" | "float" | "double" => Ok(FieldType::Real),
            "text" | "string" => Ok(FieldType::Text),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "blob" | "bytes" => Ok(FieldType::Blob),
            _ => Err(Error::UnknownFieldType(s.to_string())),
        }
    }
}

/// Table metadata of an entity type.
///
/// The primary key is always one of the attributes. Constraints naming an
/// attribute that was never declared are kept as given; they simply never
/// match anything in the filtered views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    table_name: String,
    primary_key: String,
    attributes: Vec<String>,
    required_fields: Vec<String>,
    field_types: Vec<(String, FieldType)>,
    unique_fields: Vec<String>,
}

impl Schema {
    pub fn new<T: Into<String>, P: Into<String>>(table_name: T, primary_key: P) -> Self {
        let primary_key = primary_key.into();

        Self {
            table_name: table_name.into(),
            attributes: vec![primary_key.clone()],
            primary_key,
            required_fields: Vec::new(),
            field_types: Vec::new(),
            unique_fields: Vec::new(),
        }
    }

    pub fn attribute<T: Into<String>>(mut self, name: T) -> Self {
        let name = name.into();
        if !self.has_attribute(&name) {
            self.attributes.push(name);
        }
        self
    }

    pub fn required<T: Into<String>>(mut self, name: T) -> Self {
        self.required_fields.push(name.into());
        self
    }

    pub fn unique<T: Into<String>>(mut self, name: T) -> Self {
        self.unique_fields.push(name.into());
        self
    }

    pub fn field_type<T: Into<String>>(mut self, name: T, field_type: FieldType) -> Self {
        let name = name.into();
        self.field_types.retain(|(n, _)| n != &name);
        self.field_types.push((name, field_type));
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn attributes(&self) -> Vec<&str> {
        self.attributes.iter().map(String::as_str).collect()
    }

    pub fn required_fields(&self) -> Vec<&str> {
        self.required_fields.iter().map(String::as_str).collect()
    }

    pub fn field_types(&self) -> Vec<(&str, FieldType)> {
        self.field_types.iter().map(|(n, t)| (n.as_str(), *t)).collect()
    }

    pub fn unique_fields(&self) -> Vec<&str> {
        self.unique_fields.iter().map(String::as_str).collect()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }

    /// Attribute list restricted to `attributes`, in schema order.
    ///
    /// `None` selects every attribute.
    pub fn filter(&self, attributes: Option<&[&str]>) -> Vec<&str> {
        self.attributes
            .iter()
            .map(String::as_str)
            .filter(|name| attributes.map_or(true, |only| only.contains(name)))
            .collect()
    }
}
