pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Sqlite error")]
    Sqlite(#[source] rusqlite::Error),
    #[error("Conflict with existing data. {0}")]
    NonUnique(String),
    #[error("Nothing to update")]
    EmptyChangeset,
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Error::NonUnique(msg.unwrap_or_default())
            }
            _ => Error::Sqlite(e),
        }
    }
}

impl From<Error> for rowkit::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::NonUnique(msg) => rowkit::Error::NonUnique(msg),
            Error::EmptyChangeset => rowkit::Error::EmptyChangeset,
            e => rowkit::Error::store(e),
        }
    }
}
