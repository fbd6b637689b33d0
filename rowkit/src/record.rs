use crate::{Entity, Hooks, Result, Row, RuleValidator, Validator, Value};

/// An entity together with its persistence state.
///
/// Dereferences to the entity, so fields can be read and assigned directly.
#[derive(Debug, Clone, derive_more::Deref, derive_more::DerefMut)]
pub struct Record<E> {
    #[deref]
    #[deref_mut]
    entity: E,
    new_record: bool,
    errors: Vec<String>,
}

impl<E: Entity> Record<E> {
    /// Wraps an entity that has no row yet.
    pub fn new(entity: E) -> Self {
        Self {
            entity,
            new_record: true,
            errors: Vec::new(),
        }
    }

    /// Wraps an entity loaded from an existing row.
    pub(crate) fn existing(entity: E) -> Self {
        Self {
            entity,
            new_record: false,
            errors: Vec::new(),
        }
    }

    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub(crate) fn set_persisted(&mut self) {
        self.new_record = false;
    }

    /// Messages of the most recent `validate` or save attempt.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub(crate) fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub(crate) fn add_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn into_entity(self) -> E {
        self.entity
    }

    pub fn primary_key_value(&self) -> Value {
        let schema = self.entity.schema();
        self.entity.read(schema.primary_key()).unwrap_or_default()
    }

    /// Assigns every value of `data` whose key is one of the (filtered)
    /// attributes. Other keys are ignored.
    pub fn populate(
        &mut self,
        data: &Row,
        attributes: Option<&[&str]>,
    ) -> Result<&mut Self> {
        let names: Vec<String> = self
            .entity
            .schema()
            .filter(attributes)
            .into_iter()
            .map(str::to_string)
            .collect();

        for name in names {
            if let Some(value) = data.get(&name) {
                self.entity.write(&name, value.clone())?;
            }
        }

        Ok(self)
    }

    /// Current values of the (filtered) attributes.
    pub fn to_row(&self, attributes: Option<&[&str]>) -> Row {
        self.entity
            .schema()
            .filter(attributes)
            .into_iter()
            .map(|name| {
                (
                    name.to_string(),
                    self.entity.read(name).unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Checks required fields and field types with a fresh [`RuleValidator`].
    pub fn validate(&mut self, attributes: Option<&[&str]>) -> bool {
        self.validate_with(&mut RuleValidator::default(), attributes)
    }

    /// Checks required fields and field types of the (filtered) attributes.
    ///
    /// Resets [`errors`](Self::errors) first; on failure they hold the
    /// validator's messages.
    pub fn validate_with<V: Validator>(
        &mut self,
        validator: &mut V,
        attributes: Option<&[&str]>,
    ) -> bool {
        self.errors.clear();

        let schema = self.entity.schema();
        let names = schema.filter(attributes);
        let required: Vec<&str> = schema
            .required_fields()
            .into_iter()
            .filter(|field| names.contains(field))
            .collect();
        let types: Vec<(&str, crate::FieldType)> = schema
            .field_types()
            .into_iter()
            .filter(|(field, _)| names.contains(field))
            .collect();

        let data = self.to_row(attributes);

        let required_ok = validator.check_required(&required, &data);
        let types_ok = validator.check_types(&types, &data);

        if required_ok && types_ok {
            return true;
        }

        self.errors = validator.errors().to_vec();
        log::debug!(
            "validation of {} failed: {}",
            schema.table_name(),
            self.errors.join(", ")
        );
        false
    }
}

impl<E: Hooks> Record<E> {
    pub(crate) fn before_save(&mut self) -> bool {
        self.entity.before_save()
    }

    pub(crate) fn after_save(&mut self) {
        self.entity.after_save()
    }
}
