use std::sync::Arc;

use crate::{Entity, Error, Hooks, Result, Row, Schema, Value};

/// An entity described at runtime by a shared [`Schema`].
///
/// Values are kept in a [`Row`]; attributes never assigned read as `NULL`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dynamic {
    schema: Arc<Schema>,
    values: Row,
}

impl Dynamic {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            values: Row::new(),
        }
    }

    pub fn values(&self) -> &Row {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Row {
        &mut self.values
    }
}

impl Entity for Dynamic {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn read(&self, attribute: &str) -> Option<Value> {
        if !self.schema.has_attribute(attribute) {
            return None;
        }

        Some(self.values.get(attribute).cloned().unwrap_or_default())
    }

    fn write(&mut self, attribute: &str, value: Value) -> Result<()> {
        if !self.schema.has_attribute(attribute) {
            return Err(Error::UnknownAttribute(attribute.to_string()));
        }

        self.values.insert(attribute.to_string(), value);
        Ok(())
    }
}

impl Hooks for Dynamic {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_write() -> Result<()> {
        let schema = Arc::new(Schema::new("tags", "id").attribute("label"));
        let mut tag = Dynamic::new(schema);

        assert_eq!(Some(Value::Null), tag.read("label"));
        assert_eq!(None, tag.read("color"));

        tag.write("label", Value::from("rust"))?;
        assert_eq!(Some(Value::from("rust")), tag.read("label"));

        assert!(matches!(
            tag.write("color", Value::from("red")),
            Err(Error::UnknownAttribute(name)) if name == "color"
        ));

        Ok(())
    }
}
