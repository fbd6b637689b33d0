use anyhow::{anyhow, bail, Result};

use rowkit::{Dynamic, Entity, Record, Repository, Row, Value};
use rowkit_db::Database;

use crate::cli::{Command, Filter};
use crate::config::Config;
use crate::utils::{parse_value, table_display::records_table};

struct CommandContext<'a> {
    name: &'a str,
    repository: Repository<'a, Dynamic, Database>,
}

pub fn run(config: &Config) -> Result<()> {
    let schema = config.schema()?;
    let db = config.database()?;
    let cmd = CommandContext {
        name: config.entity_name(),
        repository: Repository::with_prototype(&db, Dynamic::new(schema)),
    };

    match config.command() {
        Command::List(filter) => cmd.list(filter),
        Command::Show { pk } => cmd.show(pk),
        Command::Create {
            values,
            no_validate,
        } => cmd.create(values, !no_validate),
        Command::Update {
            pk,
            values,
            no_validate,
        } => cmd.update(pk, values, !no_validate),
        Command::Delete { pk } => cmd.delete(pk),
        Command::DeleteAll(filter) => cmd.delete_all(filter),
    }
}

impl CommandContext<'_> {
    fn list(&self, filter: &Filter) -> Result<()> {
        let records = self
            .repository
            .find_all(filter.condition(), &filter.params())?;

        println!(
            "{}",
            records_table(&self.repository.schema().attributes(), &records)
        );

        Ok(())
    }

    fn show(&self, pk: &str) -> Result<()> {
        let record = self.find(pk)?;

        for attribute in self.repository.schema().attributes() {
            println!(
                "{attribute}: {}",
                record.read(attribute).unwrap_or_default()
            );
        }

        Ok(())
    }

    fn create(&self, values: &[(String, String)], validate: bool) -> Result<()> {
        let mut record = self.repository.instantiate();
        record.populate(&self.row(values)?, None)?;

        let saved = self.repository.save_with(&mut record, validate, None)?;
        self.check_saved(&record, saved)
    }

    fn update(&self, pk: &str, values: &[(String, String)], validate: bool) -> Result<()> {
        let mut record = self.find(pk)?;
        let columns: Vec<&str> = values.iter().map(|(column, _)| column.as_str()).collect();

        record.populate(&self.row(values)?, Some(columns.as_slice()))?;

        let saved = self
            .repository
            .save_with(&mut record, validate, Some(columns.as_slice()))?;
        self.check_saved(&record, saved)
    }

    fn delete(&self, pk: &str) -> Result<()> {
        if !self.repository.delete_by_pk(self.pk(pk)?)? {
            bail!("Not found: {} {pk}", self.name);
        }

        Ok(())
    }

    fn delete_all(&self, filter: &Filter) -> Result<()> {
        let count = self
            .repository
            .delete_all(filter.condition(), &filter.params())?;

        println!("{count} record(s) deleted");

        Ok(())
    }

    fn find(&self, pk: &str) -> Result<Record<Dynamic>> {
        self.repository
            .find_by_pk(self.pk(pk)?)?
            .ok_or_else(|| anyhow!("Not found: {} {pk}", self.name))
    }

    fn pk(&self, raw: &str) -> Result<Value> {
        let schema = self.repository.schema();
        parse_value(schema, schema.primary_key(), raw)
    }

    fn row(&self, values: &[(String, String)]) -> Result<Row> {
        let schema = self.repository.schema();

        values
            .iter()
            .map(|(column, raw)| Ok((column.clone(), parse_value(schema, column, raw)?)))
            .collect()
    }

    fn check_saved(&self, record: &Record<Dynamic>, saved: bool) -> Result<()> {
        if saved {
            return Ok(());
        }

        for error in record.errors() {
            eprintln!("{error}");
        }
        bail!("{} not saved", self.name)
    }
}
