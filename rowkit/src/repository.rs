//! Generic find/save/delete operations over a [`DataStore`].
//!
//! The uniqueness check and the following insert or update are separate
//! round trips to the store and are not wrapped in a transaction: two
//! concurrent saves may both pass the check. A UNIQUE constraint in the
//! database, surfaced as [`Error::NonUnique`](crate::Error::NonUnique), is
//! what closes that gap.

use std::marker::PhantomData;

use log::{debug, warn};

use crate::{
    DataStore, Entity, Hooks, Record, Result, Row, RuleValidator, Schema,
    ToValue, Validator, Value,
};

pub struct Repository<'s, E, S, V = RuleValidator> {
    store: &'s S,
    prototype: E,
    validator: PhantomData<fn() -> V>,
}

impl<'s, E, S> Repository<'s, E, S, RuleValidator>
where
    E: Entity + Hooks + Clone,
    S: DataStore,
{
    pub fn new(store: &'s S) -> Self
    where
        E: Default,
    {
        Self::with_prototype(store, E::default())
    }

    /// Repository whose records start as clones of `prototype`.
    ///
    /// Needed for entities that carry their schema, like
    /// [`Dynamic`](crate::Dynamic).
    pub fn with_prototype(store: &'s S, prototype: E) -> Self {
        Self {
            store,
            prototype,
            validator: PhantomData,
        }
    }
}

impl<'s, E, S, V> Repository<'s, E, S, V>
where
    E: Entity + Hooks + Clone,
    S: DataStore,
    V: Validator + Default,
{
    /// Same repository, validating saves with `W` instead.
    pub fn with_validator<W: Validator + Default>(self) -> Repository<'s, E, S, W> {
        Repository {
            store: self.store,
            prototype: self.prototype,
            validator: PhantomData,
        }
    }

    pub fn store(&self) -> &'s S {
        self.store
    }

    pub fn schema(&self) -> &Schema {
        self.prototype.schema()
    }

    /// A new, unsaved record.
    pub fn instantiate(&self) -> Record<E> {
        Record::new(self.prototype.clone())
    }

    pub fn find(&self, condition: &str, params: &[Value]) -> Result<Option<Record<E>>> {
        self.select(condition, params)?
            .into_iter()
            .next()
            .map(|row| self.materialize(row))
            .transpose()
    }

    pub fn find_all(&self, condition: &str, params: &[Value]) -> Result<Vec<Record<E>>> {
        self.select(condition, params)?
            .into_iter()
            .map(|row| self.materialize(row))
            .collect()
    }

    pub fn find_by_pk<K: ToValue>(&self, pk: K) -> Result<Option<Record<E>>> {
        self.find(&self.pk_condition(), &[pk.to_value()])
    }

    pub fn exists(&self, condition: &str, params: &[Value]) -> Result<bool> {
        let schema = self.schema();
        let rows = self.store.select(
            schema.table_name(),
            &[schema.primary_key()],
            condition,
            params,
        )?;

        Ok(!rows.is_empty())
    }

    /// Reads the record's row again, overwriting its attributes.
    ///
    /// Returns `false`, leaving the record untouched, when the row is gone.
    pub fn reload(&self, record: &mut Record<E>) -> Result<bool> {
        let rows = self.select(&self.pk_condition(), &[record.primary_key_value()])?;

        match rows.into_iter().next() {
            Some(row) => {
                record.populate(&row, None)?;
                record.set_persisted();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deletes the row of `record`. The record itself stays usable.
    pub fn delete(&self, record: &Record<E>) -> Result<bool> {
        let table = self.schema().table_name();
        let pk = record.primary_key_value();

        let affected = self.store.delete(table, &self.pk_condition(), &[pk.clone()])?;
        debug!("delete from {table} where pk = {pk}: {affected} row(s)");

        Ok(affected > 0)
    }

    /// Deletes every matching row one by one, returning how many were
    /// deleted.
    ///
    /// Rows that fail to delete are logged and skipped; the ones already
    /// deleted stay deleted.
    pub fn delete_all(&self, condition: &str, params: &[Value]) -> Result<usize> {
        let table = self.schema().table_name();
        let mut deleted = 0;

        for record in self.find_all(condition, params)? {
            match self.delete(&record) {
                Ok(true) => deleted += 1,
                Ok(false) => {
                    warn!("row {} of {table} was not deleted", record.primary_key_value())
                }
                Err(e) => warn!(
                    "deleting row {} of {table} failed: {e}",
                    record.primary_key_value()
                ),
            }
        }

        Ok(deleted)
    }

    pub fn delete_by_pk<K: ToValue>(&self, pk: K) -> Result<bool> {
        match self.find_by_pk(pk)? {
            Some(record) => self.delete(&record),
            None => Ok(false),
        }
    }

    /// Validates and saves every attribute.
    pub fn save(&self, record: &mut Record<E>) -> Result<bool> {
        self.save_with(record, true, None)
    }

    /// Runs the save pipeline: validation, `before_save`, uniqueness check,
    /// insert or update, `after_save`.
    ///
    /// `attributes` restricts every step to those attributes. Returns
    /// `Ok(false)` when a step refuses the save; [`Record::errors`] then
    /// holds the reasons, if any.
    pub fn save_with(
        &self,
        record: &mut Record<E>,
        run_validation: bool,
        attributes: Option<&[&str]>,
    ) -> Result<bool> {
        let table = self.schema().table_name();
        record.clear_errors();

        if run_validation && !record.validate_with(&mut V::default(), attributes) {
            return Ok(false);
        }

        if !record.before_save() {
            debug!("save into {table} cancelled by before_save");
            return Ok(false);
        }

        if !self.check_unique(record, attributes)? {
            return Ok(false);
        }

        let saved = if record.is_new_record() {
            self.insert(record, attributes)?
        } else {
            self.update(record, attributes)?
        };

        if saved {
            record.set_persisted();
            record.after_save();
        }

        Ok(saved)
    }

    /// Looks for another row sharing a value with one of the (filtered)
    /// unique fields.
    ///
    /// Fields are combined with `OR`: one collision is enough to fail. `NULL`
    /// values never collide. On failure a single message naming the
    /// colliding fields is added to the record's errors.
    pub fn check_unique(
        &self,
        record: &mut Record<E>,
        attributes: Option<&[&str]>,
    ) -> Result<bool> {
        let schema = self.schema();
        let names = schema.filter(attributes);

        let mut fields = Vec::new();
        let mut params = Vec::new();

        for field in schema.unique_fields() {
            if !names.contains(&field) {
                continue;
            }

            let value = record.read(field).unwrap_or_default();
            if !value.is_null() {
                fields.push(field);
                params.push(value);
            }
        }

        if fields.is_empty() {
            return Ok(true);
        }

        let mut condition = format!(
            "({})",
            fields
                .iter()
                .map(|field| format!("{} = ?", self.store.quote(field)))
                .collect::<Vec<_>>()
                .join(" OR ")
        );

        if !record.is_new_record() {
            condition.push_str(&format!(
                " AND {} <> ?",
                self.store.quote(schema.primary_key())
            ));
            params.push(record.primary_key_value());
        }

        let rows = self
            .store
            .select(schema.table_name(), &fields, &condition, &params)?;

        if rows.is_empty() {
            return Ok(true);
        }

        let mut taken: Vec<&str> = fields
            .iter()
            .zip(params.iter())
            .filter(|(field, value)| rows.iter().any(|row| row.get(**field) == Some(*value)))
            .map(|(field, _)| *field)
            .collect();

        // values may come back with another representation
        if taken.is_empty() {
            taken = fields;
        }

        debug!("{} already taken in {}", taken.join(", "), schema.table_name());
        record.add_error(format!("{} must be unique", taken.join(", ")));

        Ok(false)
    }

    /// Inserts the (filtered) attributes as a new row.
    ///
    /// A `NULL` primary key is left out and, once the row is written, filled
    /// from the store's last insert id.
    pub fn insert(&self, record: &mut Record<E>, attributes: Option<&[&str]>) -> Result<bool> {
        let schema = self.schema();
        let pk = schema.primary_key();

        let mut data = record.to_row(attributes);
        let assigned = data.get(pk).is_some_and(|value| !value.is_null());
        if !assigned {
            data.remove(pk);
        }

        let affected = self.store.insert(schema.table_name(), &data)?;
        debug!("insert into {}: {affected} row(s)", schema.table_name());

        if affected == 0 {
            return Ok(false);
        }

        if !assigned {
            let id = self.store.last_insert_id()?;
            record.write(pk, id)?;
        }

        Ok(true)
    }

    /// Writes the (filtered) attributes, primary key excepted, to the
    /// record's row.
    pub fn update(&self, record: &mut Record<E>, attributes: Option<&[&str]>) -> Result<bool> {
        let schema = self.schema();

        let mut data = record.to_row(attributes);
        data.remove(schema.primary_key());

        let affected = self.store.update(
            schema.table_name(),
            &data,
            &self.pk_condition(),
            &[record.primary_key_value()],
        )?;
        debug!("update {}: {affected} row(s)", schema.table_name());

        Ok(affected > 0)
    }

    fn pk_condition(&self) -> String {
        format!("{} = ?", self.store.quote(self.schema().primary_key()))
    }

    fn select(&self, condition: &str, params: &[Value]) -> Result<Vec<Row>> {
        let schema = self.schema();
        self.store
            .select(schema.table_name(), &schema.attributes(), condition, params)
    }

    fn materialize(&self, row: Row) -> Result<Record<E>> {
        let mut record = Record::existing(self.prototype.clone());
        record.populate(&row, None)?;
        Ok(record)
    }
}
