use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Error, Result};

mod entity;
use entity::Entity;

mod field;
use field::Field;

pub fn impl_entity(input: DeriveInput) -> Result<TokenStream> {
    let entity = Entity::read(&input)?;
    let Entity {
        ident: struct_ident,
        table,
        primary_key,
        ..
    } = &entity;

    let mut schema = quote! {
        ::rowkit::Schema::new(#table, #primary_key)
    };
    let mut read_arms = quote!();
    let mut write_arms = quote!();
    let mut has_primary_key = false;

    for result in entity.fields() {
        let field = result?;
        if field.skip() {
            continue;
        }

        let name = field.name();
        let ident = field.ident();

        if name == primary_key.value() {
            if !field.is_option() {
                return Err(field.error("primary key field must be an Option"));
            }
            has_primary_key = true;
        }

        schema.extend(quote!(.attribute(#name)));
        if field.required() {
            schema.extend(quote!(.required(#name)));
        }
        if field.unique() {
            schema.extend(quote!(.unique(#name)));
        }
        if let Some(kind) = field.kind()? {
            schema.extend(quote!(.field_type(#name, ::rowkit::FieldType::#kind)));
        }

        read_arms.extend(quote! {
            #name => Some(::rowkit::ToValue::to_value(&self.#ident)),
        });
        write_arms.extend(quote! {
            #name => self.#ident = ::rowkit::FromValue::from_value(value)?,
        });
    }

    if !has_primary_key {
        return Err(Error::new(
            primary_key.span(),
            format!("no field named {}", primary_key.value()),
        ));
    }

    Ok(quote! {
        impl ::rowkit::Entity for #struct_ident {
            fn schema(&self) -> &::rowkit::Schema {
                static SCHEMA: ::std::sync::OnceLock<::rowkit::Schema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| #schema)
            }

            fn read(&self, attribute: &str) -> ::std::option::Option<::rowkit::Value> {
                match attribute {
                    #read_arms
                    _ => None,
                }
            }

            fn write(
                &mut self,
                attribute: &str,
                value: ::rowkit::Value,
            ) -> ::rowkit::Result<()> {
                match attribute {
                    #write_arms
                    _ => {
                        return Err(::rowkit::Error::UnknownAttribute(
                            attribute.to_string(),
                        ))
                    }
                }
                Ok(())
            }
        }
    })
}
