//! SQLite [`DataStore`] for rowkit.

use std::path::Path;

use log::debug;
use rusqlite::{params_from_iter, Connection};

use rowkit::{DataStore, Row, Value};

mod error;
pub use error::{Error, Result};

mod value;

/// A SQLite connection usable as a [`DataStore`].
///
/// Dereferences to the underlying [`rusqlite::Connection`].
#[derive(
    Debug,
    derive_more::From,
    derive_more::Into,
    derive_more::Deref,
    derive_more::DerefMut,
)]
pub struct Database(Connection);

impl Database {
    pub fn open<T: AsRef<Path>>(path: T) -> Result<Self> {
        match Connection::open(path) {
            Ok(connection) => Ok(connection.into()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn memory() -> Result<Self> {
        match Connection::open_in_memory() {
            Ok(connection) => Ok(connection.into()),
            Err(e) => Err(e.into()),
        }
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        debug!("{sql}");

        let mut statement = self.prepare(sql)?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = statement.query(bind(params))?;
        let mut result = Vec::new();

        while let Some(row) = rows.next()? {
            let mut entry = Row::new();
            for (index, column) in columns.iter().enumerate() {
                entry.insert(column.clone(), value::from_sql(row.get_ref(index)?));
            }
            result.push(entry);
        }

        Ok(result)
    }

    fn execute_with(&self, sql: &str, params: &[Value]) -> Result<usize> {
        debug!("{sql}");

        Ok(self.prepare(sql)?.execute(bind(params))?)
    }
}

impl DataStore for Database {
    fn select(
        &self,
        table: &str,
        columns: &[&str],
        condition: &str,
        params: &[Value],
    ) -> rowkit::Result<Vec<Row>> {
        let columns = if columns.is_empty() {
            String::from("*")
        } else {
            columns
                .iter()
                .map(|c| self.quote(c))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let sql = format!("SELECT {columns} FROM {}{}", self.quote(table), filter(condition));

        Ok(self.query(&sql, params)?)
    }

    fn insert(&self, table: &str, data: &Row) -> rowkit::Result<usize> {
        let sql = if data.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", self.quote(table))
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.quote(table),
                data.keys().map(|c| self.quote(c)).collect::<Vec<_>>().join(", "),
                vec!["?"; data.len()].join(", ")
            )
        };
        let params: Vec<Value> = data.values().cloned().collect();

        Ok(self.execute_with(&sql, &params)?)
    }

    fn update(
        &self,
        table: &str,
        data: &Row,
        condition: &str,
        params: &[Value],
    ) -> rowkit::Result<usize> {
        if data.is_empty() {
            return Err(Error::EmptyChangeset.into());
        }

        let sql = format!(
            "UPDATE {} SET {}{}",
            self.quote(table),
            data.keys()
                .map(|c| format!("{} = ?", self.quote(c)))
                .collect::<Vec<_>>()
                .join(", "),
            filter(condition)
        );
        let params: Vec<Value> = data.values().chain(params).cloned().collect();

        Ok(self.execute_with(&sql, &params)?)
    }

    fn delete(&self, table: &str, condition: &str, params: &[Value]) -> rowkit::Result<usize> {
        let sql = format!("DELETE FROM {}{}", self.quote(table), filter(condition));

        Ok(self.execute_with(&sql, params)?)
    }

    fn last_insert_id(&self) -> rowkit::Result<Value> {
        Ok(Value::Integer(self.last_insert_rowid()))
    }
}

fn bind(params: &[Value]) -> impl rusqlite::Params + '_ {
    params_from_iter(params.iter().map(value::to_sql))
}

fn filter(condition: &str) -> String {
    if condition.trim().is_empty() {
        String::new()
    } else {
        format!(" WHERE {condition}")
    }
}
