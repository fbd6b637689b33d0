pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Store error")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Conflict with existing data. {0}")]
    NonUnique(String),
    #[error("Nothing to update")]
    EmptyChangeset,
    #[error("Unknown attribute {0}")]
    UnknownAttribute(String),
    #[error("Unknown field type {0}")]
    UnknownFieldType(String),
    #[error("Expected {expected} value, found {found}")]
    Conversion {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Invalid value. {0}")]
    InvalidValue(String),
}

impl Error {
    pub fn store<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Store(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn store_source() {
        let error = crate::test::failure();

        assert_eq!("Store error", error.to_string());
        assert_eq!(
            Some("disk I/O error".to_string()),
            error.source().map(|e| e.to_string())
        );
    }
}
