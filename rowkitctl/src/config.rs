use std::collections::BTreeMap;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use rowkit::Schema;
use rowkit_db::Database;

use crate::cli::{Cli, Command};

mod entity;
pub use entity::EntityConfig;

/// Content of `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct File {
    data_dir: Option<PathBuf>,
    db: DbConfig,
    entities: BTreeMap<String, EntityConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DbConfig {
    filename: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            filename: "db.rowkit".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub dir: PathBuf,
    pub data_dir: PathBuf,
    cli: Cli,
    file: File,
}

impl Config {
    pub fn try_parse() -> Result<Self> {
        Self::try_parse_from(std::env::args_os())
    }

    pub fn try_parse_from<I, T>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::Parser;

        let cli = Cli::try_parse_from(iter)?;

        let dir = match cli.config.clone() {
            Some(dir) => dir,
            None => config_home()?,
        };
        let path = dir.join("config.toml");
        let file: File = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("Invalid configuration {}", path.display()))?,
            Err(_) => File::default(),
        };

        let data_dir = match cli.data.clone().or_else(|| file.data_dir.clone()) {
            Some(dir) => dir,
            None => data_home()?,
        };

        if !data_dir.is_dir() {
            return Err(anyhow!(
                "Data directory is not a dir: {}",
                data_dir.display()
            ));
        }

        Ok(Config {
            dir,
            data_dir,
            cli,
            file,
        })
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.cli.verbose.log_level_filter()
    }

    pub fn command(&self) -> &Command {
        &self.cli.command
    }

    pub fn entity_name(&self) -> &str {
        &self.cli.entity
    }

    /// Schema of the entity selected on the command line.
    pub fn schema(&self) -> Result<Arc<Schema>> {
        let name = self.entity_name();

        match self.file.entities.get(name) {
            Some(entity) => Ok(Arc::new(entity.schema(name)?)),
            None => Err(anyhow!("Unknown entity: {name}")),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.file.db.filename)
    }

    pub fn database(&self) -> Result<Database> {
        Ok(Database::open(self.database_path())?)
    }
}

fn config_home() -> Result<PathBuf> {
    match std::env::var("ROWKIT_CONFIG") {
        Ok(val) if !val.is_empty() => Ok(PathBuf::from(val)),
        _ => {
            let path = xdg::BaseDirectories::with_prefix("rowkit")?.get_config_home();
            if !path.exists() {
                create_dir_all(&path)?;
            }
            Ok(path)
        }
    }
}

fn data_home() -> Result<PathBuf> {
    match std::env::var("ROWKIT_DATA") {
        Ok(val) if !val.is_empty() => Ok(PathBuf::from(val)),
        _ => {
            let path = xdg::BaseDirectories::with_prefix("rowkit")?.get_data_home();
            if !path.exists() {
                create_dir_all(&path)?;
            }
            Ok(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::prelude::{assert_eq, *};
    use std::fs::create_dir;

    #[test]
    fn parse() -> Result<()> {
        with_dirs(|confd, datad| {
            let mut config = Config::try_parse_from(["arg0", "users", "list"])?;

            assert_eq!(config.dir, confd.path());
            assert_eq!(config.data_dir, datad.path());
            assert_eq!(config.database_path(), datad.child("db.rowkit").path());

            confd.child("config.toml").write_str(&format!(
                "data_dir = '{}'\n[db]\nfilename = 'test.db'",
                datad.child("foo").path().display()
            ))?;

            assert!(Config::try_parse_from(["arg0", "users", "list"]).is_err());
            create_dir(datad.child("foo").path())?;
            config = Config::try_parse_from(["arg0", "users", "list"])?;
            assert_eq!(config.data_dir, datad.child("foo").path());
            assert_eq!(
                config.database_path(),
                datad.child("foo").child("test.db").path()
            );

            config = Config::try_parse_from([
                "arg0",
                "--config",
                datad.child("bar").path().to_str().unwrap(),
                "users",
                "list",
            ])?;
            assert_eq!(config.dir, datad.child("bar").path());
            assert_eq!(config.data_dir, datad.path());

            create_dir(datad.child("bar").path())?;
            config = Config::try_parse_from([
                "arg0",
                "-D",
                datad.child("bar").path().to_str().unwrap(),
                "users",
                "list",
            ])?;
            assert_eq!(config.data_dir, datad.child("bar").path());

            Ok(())
        })
    }

    #[test]
    fn invalid_file() -> Result<()> {
        with_dirs(|confd, _| {
            confd.child("config.toml").write_str("[dbs]\nfilename = 'x'")?;
            assert!(Config::try_parse_from(["arg0", "users", "list"]).is_err());

            confd.child("config.toml").write_str("data_dir = 3")?;
            assert!(Config::try_parse_from(["arg0", "users", "list"]).is_err());

            Ok(())
        })
    }

    #[test]
    fn schema() -> Result<()> {
        with_dirs(|confd, _| {
            confd.child("config.toml").write_str(
                "[entities.users]\n\
                 attributes = ['email', 'name']\n\
                 required = ['email']\n\
                 unique = ['email']\n\
                 [entities.users.types]\n\
                 id = 'integer'\n\
                 email = 'text'\n",
            )?;

            let config = Config::try_parse_from(["arg0", "users", "list"])?;
            let schema = config.schema()?;
            assert_eq!("users", schema.table_name());
            assert_eq!(vec!["id", "email", "name"], schema.attributes());

            let config = Config::try_parse_from(["arg0", "posts", "list"])?;
            assert!(config.schema().is_err());

            Ok(())
        })
    }

    #[test]
    fn config_home_default() -> Result<()> {
        temp_env::with_var("ROWKIT_CONFIG", None::<&str>, || {
            let xdg_dirs = xdg::BaseDirectories::with_prefix("rowkit")?;
            assert_eq!(xdg_dirs.get_config_home(), config_home()?);
            Ok(())
        })
    }

    #[test]
    fn config_home_with_var() -> Result<()> {
        temp_env::with_var("ROWKIT_CONFIG", Some("./"), || {
            assert_eq!(PathBuf::from("./"), config_home()?);
            Ok(())
        })
    }

    #[test]
    fn data_home_default() -> Result<()> {
        temp_env::with_var("ROWKIT_DATA", None::<&str>, || {
            let xdg_dirs = xdg::BaseDirectories::with_prefix("rowkit")?;
            assert_eq!(xdg_dirs.get_data_home(), data_home()?);
            Ok(())
        })
    }

    #[test]
    fn data_home_with_var() -> Result<()> {
        temp_env::with_var("ROWKIT_DATA", Some("./"), || {
            assert_eq!(PathBuf::from("./"), data_home()?);
            Ok(())
        })
    }
}
