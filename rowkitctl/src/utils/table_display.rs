use rowkit::{Entity, Record, Value};
use tabled::{builder::Builder as TableBuilder, Table};

pub trait ColumnDisplay {
    fn to_column(&self) -> String;
}

impl ColumnDisplay for Value {
    fn to_column(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(text) => text.clone(),
            value => value.to_string(),
        }
    }
}

impl ColumnDisplay for &str {
    fn to_column(&self) -> String {
        self.to_string()
    }
}

/// One line per record, one column per attribute.
pub fn records_table<E: Entity>(attributes: &[&str], records: &[Record<E>]) -> Table {
    let mut builder = TableBuilder::new();
    builder.push_record(attributes.iter().map(ColumnDisplay::to_column));

    for record in records {
        builder.push_record(
            attributes
                .iter()
                .map(|name| record.read(name).unwrap_or_default().to_column()),
        );
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rowkit::{row, Dynamic, Schema};
    use std::sync::Arc;

    #[test]
    fn columns() {
        assert_eq!("", Value::Null.to_column());
        assert_eq!("a@x.com", Value::from("a@x.com").to_column());
        assert_eq!("3", Value::Integer(3).to_column());
        assert_eq!("<2 bytes>", Value::Blob(vec![0, 1]).to_column());
    }

    #[test]
    fn table() -> rowkit::Result<()> {
        let schema = Arc::new(Schema::new("users", "id").attribute("email"));
        let mut record = Record::new(Dynamic::new(schema));
        record.populate(&row! { "id" => 1, "email" => "a@x.com" }, None)?;

        let table = records_table(&["id", "email"], &[record]).to_string();
        assert!(table.contains("id"));
        assert!(table.contains("a@x.com"));

        Ok(())
    }
}
