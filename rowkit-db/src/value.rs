use rowkit::Value;
use rusqlite::types::{self, ToSqlOutput, ValueRef};

pub(crate) fn to_sql(value: &Value) -> ToSqlOutput<'_> {
    match value {
        Value::Null => ToSqlOutput::Owned(types::Value::Null),
        Value::Integer(i) => ToSqlOutput::Owned(types::Value::Integer(*i)),
        Value::Real(r) => ToSqlOutput::Owned(types::Value::Real(*r)),
        Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
    }
}

pub(crate) fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_and_write() -> rusqlite::Result<()> {
        let conn = rusqlite::Connection::open_in_memory()?;

        for value in [
            Value::Null,
            Value::Integer(-3),
            Value::Real(2.5),
            Value::from("héllo"),
            Value::Blob(vec![0, 159, 255]),
        ] {
            let read = conn.query_row("SELECT ?", [to_sql(&value)], |row| {
                Ok(from_sql(row.get_ref(0)?))
            })?;
            assert_eq!(value, read);
        }

        Ok(())
    }
}
