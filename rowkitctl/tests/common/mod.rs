use anyhow::Result;
use assert_cmd::{assert::Assert, Command};
use assert_fs::{fixture::FileWriteStr, fixture::PathChild, TempDir};

pub mod prelude {
    pub use super::Env;
    pub use anyhow::Result;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;
    pub use predicates::str;
}

const CONFIG: &str = "
[entities.users]
attributes = ['email', 'name']
required = ['email']
unique = ['email']

[entities.users.types]
id = 'integer'
email = 'text'
name = 'text'

[entities.tags]
table = 'labels'
primary_key = 'code'
attributes = ['title']
";

const SCHEMA: &str = "
CREATE TABLE users (
    id INTEGER NOT NULL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    name TEXT
);
CREATE TABLE labels (
    code TEXT NOT NULL PRIMARY KEY,
    title TEXT
);
";

pub struct Env {
    pub conf_dir: TempDir,
    pub data_dir: TempDir,
}

#[allow(unused_macros)]
macro_rules! cmd {
    ($env:ident, $($tail:tt)*) => {
        cmd!(@args $env.command()?, $($tail)* )
    };
    (@args $cmd:expr, --$arg:tt) => {
        $cmd.arg(concat!("--", stringify!($arg))).assert()
    };
    (@args $cmd:expr, $arg:tt) => {
        $cmd.arg(stringify!($arg)).assert()
    };
    (@args $cmd:expr, --$arg:tt $($tail:tt)*) => {
        cmd!(@args $cmd.arg(cmd!(@arg --$arg)), $($tail)*)
    };
    (@args $cmd:expr, $arg:tt $($tail:tt)*) => {
        cmd!(@args $cmd.arg(cmd!(@arg $arg)), $($tail)*)
    };
    (@arg --$arg:tt) => { concat!("--", stringify!($arg)) };
    (@arg $arg:tt) => { stringify!($arg) };
}

impl Env {
    /// Config declaring `users` and `tags`, with their tables created.
    pub fn new() -> Result<Self> {
        let env = Self::empty()?;

        env.conf_dir.child("config.toml").write_str(CONFIG)?;
        rowkit_db::Database::open(env.data_dir.child("db.rowkit").path())?
            .execute_batch(SCHEMA)?;

        Ok(env)
    }

    pub fn empty() -> Result<Self> {
        Ok(Self {
            conf_dir: TempDir::new()?,
            data_dir: TempDir::new()?,
        })
    }

    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("rowkitctl")?;
        cmd.arg("-C")
            .arg(self.conf_dir.path())
            .arg("-D")
            .arg(self.data_dir.path());
        Ok(cmd)
    }

    /// For arguments `cmd!` cannot spell, like `email=a@x.com`.
    #[allow(dead_code)]
    pub fn run(&self, args: &[&str]) -> Result<Assert> {
        Ok(self.command()?.args(args).assert())
    }
}
