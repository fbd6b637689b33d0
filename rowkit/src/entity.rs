use crate::{Result, Schema, Value};

/// A type persisted as one row of a table.
///
/// `read`/`write` form the accessor table used to move values between the
/// entity and the store by attribute name. Usually generated with
/// `#[derive(Entity)]`.
pub trait Entity {
    fn schema(&self) -> &Schema;

    /// Current value of `attribute`, `None` when it is not an attribute.
    fn read(&self, attribute: &str) -> Option<Value>;

    fn write(&mut self, attribute: &str, value: Value) -> Result<()>;
}

/// Extension points of the save pipeline.
pub trait Hooks {
    /// Runs after validation; returning `false` aborts the save.
    fn before_save(&mut self) -> bool {
        true
    }

    /// Runs once the row has been written.
    fn after_save(&mut self) {}
}
