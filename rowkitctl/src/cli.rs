use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

/// Rowkit control
///
/// Operates on the entities declared in config.toml
#[derive(Clone, Debug, Parser)]
#[command(version, infer_subcommands = true)]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Sets a custom config directory
    ///
    /// The default value is $ROWKIT_CONFIG if it is set, or
    /// $XDG_CONFIG_HOME/rowkit otherwise
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        global = true,
        help_heading = "Global options"
    )]
    pub config: Option<PathBuf>,

    /// Sets a custom data directory
    ///
    /// The default value is the data_dir key of the configuration, then
    /// $ROWKIT_DATA if it is set, or $XDG_DATA_HOME/rowkit otherwise
    #[arg(
        short = 'D',
        long,
        value_name = "DIR",
        global = true,
        help_heading = "Global options"
    )]
    pub data: Option<PathBuf>,

    /// Name of the entity, as declared in the configuration
    pub entity: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List records
    List(Filter),
    /// Show a record
    Show {
        /// Primary key of the record
        pk: String,
    },
    /// Create a new record
    Create {
        /// Values of the record
        #[arg(value_name = "COLUMN=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Save without checking required fields and types
        #[arg(long)]
        no_validate: bool,
    },
    /// Update the given columns of a record
    Update {
        /// Primary key of the record
        pk: String,

        /// New values
        #[arg(value_name = "COLUMN=VALUE", required = true, value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Save without checking required fields and types
        #[arg(long)]
        no_validate: bool,
    },
    /// Delete a record
    Delete {
        /// Primary key of the record
        pk: String,
    },
    /// Delete every matching record
    DeleteAll(Filter),
}

#[derive(Args, Clone, Debug, Default)]
pub struct Filter {
    /// SQL condition selecting the records, with `?` placeholders
    #[arg(short = 'w', long = "where", value_name = "CONDITION")]
    pub condition: Option<String>,

    /// Value bound to the next `?` of the condition
    #[arg(short = 'p', long = "param", value_name = "VALUE")]
    pub params: Vec<String>,
}

impl Filter {
    pub fn condition(&self) -> &str {
        self.condition.as_deref().unwrap_or_default()
    }

    pub fn params(&self) -> Vec<rowkit::Value> {
        self.params.iter().map(|p| p.as_str().into()).collect()
    }
}

fn parse_assignment(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(anyhow!("expected COLUMN=VALUE, got `{arg}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn assignment() -> Result<()> {
        assert_eq!(
            ("email".to_string(), "a=b@x.com".to_string()),
            parse_assignment("email=a=b@x.com")?
        );
        assert_eq!(
            ("name".to_string(), String::new()),
            parse_assignment(" name =")?
        );
        assert!(parse_assignment("email").is_err());
        assert!(parse_assignment("=value").is_err());

        Ok(())
    }

    #[test]
    fn filter() -> Result<()> {
        let cli = Cli::try_parse_from([
            "arg0", "users", "list", "--where", "id > ?", "-p", "3",
        ])?;

        match cli.command {
            Command::List(filter) => {
                assert_eq!("id > ?", filter.condition());
                assert_eq!(vec![rowkit::Value::from("3")], filter.params());
            }
            command => panic!("unexpected command {command:?}"),
        }

        Ok(())
    }
}
