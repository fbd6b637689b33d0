use syn::{parse_macro_input, DeriveInput};

mod entity;

/// Implements `rowkit::Entity` for a struct with named fields.
///
/// The primary key field must be an `Option`, `None` until the row is stored.
///
/// ```ignore
/// #[derive(Clone, Default, Entity)]
/// #[entity(table = "users", primary_key = "id")]
/// struct User {
///     id: Option<i64>,
///     #[field(required, unique)]
///     email: Option<String>,
///     #[field(kind = "text")]
///     name: Option<String>,
///     #[field(skip)]
///     cache: Vec<String>,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity, field))]
pub fn derive_entity(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    entity::impl_entity(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
