use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Error, GenericArgument, Ident, LitStr, PathArguments, Result, Type};

pub struct Field {
    syn_field: syn::Field,
    ident: Ident,
    required: bool,
    unique: bool,
    skip: bool,
    kind: Option<LitStr>,
}

impl Field {
    pub fn read(input: &syn::Field) -> Result<Field> {
        let Some(ident) = input.ident.clone() else {
            return Err(Error::new(input.span(), "field without a name"));
        };

        let mut field = Field {
            syn_field: input.clone(),
            ident,
            required: false,
            unique: false,
            skip: false,
            kind: None,
        };

        if let Some(attr) = input
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("field"))
        {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("required") {
                    field.required = true;
                    return Ok(());
                }

                if meta.path.is_ident("unique") {
                    field.unique = true;
                    return Ok(());
                }

                if meta.path.is_ident("skip") {
                    field.skip = true;
                    return Ok(());
                }

                if meta.path.is_ident("kind") {
                    field.kind = Some(meta.value()?.parse()?);
                    return Ok(());
                }

                Err(meta.error("unrecognized field attribute"))
            })?;
        }

        if field.skip && (field.required || field.unique || field.kind.is_some()) {
            return Err(field.error("a skipped field cannot carry constraints"));
        }

        Ok(field)
    }

    pub fn error(&self, message: &str) -> Error {
        Error::new(self.syn_field.span(), message)
    }

    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    pub fn name(&self) -> String {
        self.ident.to_string()
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn unique(&self) -> bool {
        self.unique
    }

    pub fn skip(&self) -> bool {
        self.skip
    }

    /// Whether the field is declared as an `Option<_>`.
    pub fn is_option(&self) -> bool {
        let Type::Path(path) = &self.syn_field.ty else {
            return false;
        };

        path.path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option")
    }

    /// `FieldType` variant of this field, explicit or inferred from its type.
    pub fn kind(&self) -> Result<Option<Ident>> {
        if let Some(kind) = &self.kind {
            return match variant(&kind.value()) {
                Some(variant) => Ok(Some(Ident::new(variant, kind.span()))),
                None => Err(Error::new(
                    kind.span(),
                    format!("unknown field kind {}", kind.value()),
                )),
            };
        }

        Ok(infer(&self.syn_field.ty).map(|variant| Ident::new(variant, Span::call_site())))
    }
}

fn variant(kind: &str) -> Option<&'static str> {
    match kind.to_ascii_lowercase().as_str() {
        "integer" | "int" => Some("Integer"),
        "real" | "float" | "double" => Some("Real"),
        "text" | "string" => Some("Text"),
        "boolean" | "bool" => Some("Boolean"),
        "blob" | "bytes" => Some("Blob"),
        _ => None,
    }
}

fn infer(ty: &Type) -> Option<&'static str> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;

    match segment.ident.to_string().as_str() {
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => Some("Integer"),
        "f32" | "f64" => Some("Real"),
        "String" => Some("Text"),
        "bool" => Some("Boolean"),
        "Option" => infer(first_argument(&segment.arguments)?),
        "Vec" => match first_argument(&segment.arguments)? {
            Type::Path(inner) if inner.path.is_ident("u8") => Some("Blob"),
            _ => None,
        },
        _ => None,
    }
}

fn first_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(arguments) = arguments else {
        return None;
    };

    arguments.args.iter().find_map(|argument| match argument {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}
