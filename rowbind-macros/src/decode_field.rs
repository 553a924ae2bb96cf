use proc_macro2::Span;
use quote::ToTokens;
use syn::{Field, Ident, LitStr, Type, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    /// Declaration index inside the struct.
    pub(crate) position: usize,
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Column name, `None` when the field is not mapped.
    pub(crate) name: Option<String>,
}

pub(crate) fn decode_field(position: usize, field: &Field) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .unwrap_or_else(|| Ident::new(&format!("_{}", position), Span::call_site()));
    let mut metadata = FieldMetadata {
        position,
        ident,
        ty: field.ty.clone(),
        name: None,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("rowbind") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `rowbind`, use it like: `#[rowbind(name = \"column\")]`");
        };
        let result = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!(
                        "Error while parsing `name`, use it like: `#[rowbind(name = \"column\")]`"
                    );
                };
                let value = v.value();
                // An empty name leaves the field unmapped
                metadata.name = if value.is_empty() { None } else { Some(value) };
            } else {
                panic!(
                    "Unknown attribute `{}` inside rowbind macro",
                    arg.path.to_token_stream()
                );
            }
            Ok(())
        });
        if let Err(e) = result {
            panic!("Error while parsing `rowbind` on field `{}`: {}", metadata.ident, e);
        }
    }
    metadata
}
