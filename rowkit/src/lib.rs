//! Active-record style persistence.
//!
//! An [`Entity`] exposes its table [`Schema`] and reads/writes its attributes
//! by name. A [`Repository`] builds the find/save/delete operations on top of
//! any [`DataStore`], keeping each loaded or created entity in a [`Record`]
//! that tracks whether it is persisted and why its last save failed.

mod error;
pub use error::{Error, Result};

mod value;
pub use value::{FromValue, Row, ToValue, Value};

mod schema;
pub use schema::{FieldType, Schema};

mod entity;
pub use entity::{Entity, Hooks};

mod store;
pub use store::DataStore;

mod validator;
pub use validator::{RuleValidator, Validator};

mod record;
pub use record::Record;

mod repository;
pub use repository::Repository;

mod dynamic;
pub use dynamic::Dynamic;

pub use rowkit_derive::Entity;


/// Builds a [`Row`] from `column => value` pairs.
///
/// ```
/// let row = rowkit::row! { "id" => 1, "email" => "a@x.com" };
/// assert_eq!(Some(&rowkit::Value::Integer(1)), row.get("id"));
/// ```
#[macro_export]
macro_rules! row {
    ($($column:expr => $value:expr),* $(,)?) => {
        {
            #[allow(unused_mut)]
            let mut row = $crate::Row::new();
            $(
                row.insert(::std::string::String::from($column), $crate::Value::from($value));
            )*
            row
        }
    };
}
