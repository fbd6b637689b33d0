pub mod table_display;

use anyhow::{bail, Result};

use rowkit::{FieldType, Schema, Value};

/// Reads `raw` as a value of `attribute`, following its declared type.
///
/// Untyped attributes are read as text. `null` is `NULL` in any case.
pub fn parse_value(schema: &Schema, attribute: &str, raw: &str) -> Result<Value> {
    if !schema.has_attribute(attribute) {
        bail!(rowkit::Error::UnknownAttribute(attribute.to_string()));
    }

    let field_type = schema
        .field_types()
        .into_iter()
        .find(|(name, _)| *name == attribute)
        .map(|(_, field_type)| field_type)
        .unwrap_or(FieldType::Text);

    Ok(field_type.parse_value(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse() -> Result<()> {
        let schema = Schema::new("users", "id")
            .attribute("name")
            .field_type("id", FieldType::Integer);

        assert_eq!(Value::Integer(4), parse_value(&schema, "id", "4")?);
        assert_eq!(Value::from("4"), parse_value(&schema, "name", "4")?);
        assert_eq!(Value::Null, parse_value(&schema, "name", "NULL")?);
        assert!(parse_value(&schema, "id", "four").is_err());
        assert!(parse_value(&schema, "email", "a@x.com").is_err());

        Ok(())
    }
}
