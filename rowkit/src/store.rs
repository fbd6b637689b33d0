use crate::{Result, Row, Value};

/// Database access used by a [`Repository`](crate::Repository).
///
/// `condition` is a raw SQL predicate with positional `?` placeholders bound
/// to `params`; an empty condition matches every row. Write operations return
/// the number of affected rows.
pub trait DataStore {
    fn select(
        &self,
        table: &str,
        columns: &[&str],
        condition: &str,
        params: &[Value],
    ) -> Result<Vec<Row>>;

    fn insert(&self, table: &str, data: &Row) -> Result<usize>;

    fn update(
        &self,
        table: &str,
        data: &Row,
        condition: &str,
        params: &[Value],
    ) -> Result<usize>;

    fn delete(&self, table: &str, condition: &str, params: &[Value]) -> Result<usize>;

    /// Identifier assigned by the most recent successful insert.
    fn last_insert_id(&self) -> Result<Value>;

    /// Table or column name as written in a condition.
    ///
    /// Double-quoted by default, embedded quotes doubled.
    fn quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }
}
