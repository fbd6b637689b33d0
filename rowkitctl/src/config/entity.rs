use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::Deserialize;

use rowkit::{FieldType, Schema};

/// An `[entities.<name>]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntityConfig {
    /// Defaults to the entity name
    pub table: Option<String>,
    /// Defaults to `id`
    pub primary_key: Option<String>,
    pub attributes: Vec<String>,
    pub required: Vec<String>,
    pub unique: Vec<String>,
    /// Attribute name to type tag, such as `integer` or `text`
    pub types: BTreeMap<String, String>,
}

impl EntityConfig {
    pub fn schema(&self, name: &str) -> Result<Schema> {
        let table = self.table.as_deref().unwrap_or(name);
        let primary_key = self.primary_key.as_deref().unwrap_or("id");

        let mut schema = Schema::new(table, primary_key);
        for attribute in &self.attributes {
            schema = schema.attribute(attribute.as_str());
        }

        let check = |kind: &str, attribute: &str| -> Result<()> {
            if attribute != primary_key && !self.attributes.iter().any(|a| a == attribute) {
                bail!("{kind} field `{attribute}` of entity {name} is not an attribute");
            }
            Ok(())
        };

        for attribute in &self.required {
            check("Required", attribute)?;
            schema = schema.required(attribute.as_str());
        }
        for attribute in &self.unique {
            check("Unique", attribute)?;
            schema = schema.unique(attribute.as_str());
        }
        for (attribute, tag) in &self.types {
            check("Typed", attribute)?;
            let field_type: FieldType = tag.parse()?;
            schema = schema.field_type(attribute.as_str(), field_type);
        }

        Ok(schema)
    }
}
