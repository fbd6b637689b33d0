use crate::{FieldType, Row, Value};

/// Rule checks run by [`Record::validate_with`](crate::Record::validate_with).
///
/// Messages accumulate on the validator until it is dropped; a record uses a
/// fresh validator for every validation.
pub trait Validator {
    fn check_required(&mut self, fields: &[&str], data: &Row) -> bool;
    fn check_types(&mut self, types: &[(&str, FieldType)], data: &Row) -> bool;
    fn errors(&self) -> &[String];
}

/// Default [`Validator`].
///
/// A required field is missing when it is absent, `NULL` or empty text. Type
/// checks only look at present, non-null values.
#[derive(Debug, Default)]
pub struct RuleValidator {
    errors: Vec<String>,
}

impl Validator for RuleValidator {
    fn check_required(&mut self, fields: &[&str], data: &Row) -> bool {
        let mut valid = true;

        for field in fields {
            let present = match data.get(*field) {
                None | Some(Value::Null) => false,
                Some(Value::Text(text)) => !text.is_empty(),
                Some(_) => true,
            };

            if !present {
                self.errors.push(format!("{field} is required"));
                valid = false;
            }
        }

        valid
    }

    fn check_types(&mut self, types: &[(&str, FieldType)], data: &Row) -> bool {
        let mut valid = true;

        for (field, field_type) in types {
            if let Some(value) = data.get(*field) {
                if !field_type.accepts(value) {
                    self.errors
                        .push(format!("{field} must be of type {field_type}"));
                    valid = false;
                }
            }
        }

        valid
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }
}
