mod decode_field;
mod table_name;

use decode_field::{FieldMetadata, decode_field};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Fields, ItemStruct, parse_macro_input};
use table_name::table_name;

/// Implements `rowbind::Record` for a struct with named fields.
///
/// Fields are mapped with `#[rowbind(name = "column")]`, unannotated fields are ignored and need
/// not implement `ColumnValue`. The table defaults to the struct name in snake case and can be
/// set with `#[table_name("...")]`.
#[proc_macro_derive(Record, attributes(rowbind, table_name))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let name = &item.ident;
    if !item.generics.params.is_empty() {
        panic!("Record cannot be derived for `{}`: generic structs are not supported", name);
    }
    let Fields::Named(..) = &item.fields else {
        panic!("Record can only be derived for structs with named fields, `{}` is not", name);
    };
    let table_name = table_name(&item);
    let mapped: Vec<FieldMetadata> = item
        .fields
        .iter()
        .enumerate()
        .map(|(i, f)| decode_field(i, f))
        .filter(|m| m.name.is_some())
        .collect();
    let fields_defs = mapped.iter().map(|m| {
        let position = m.position;
        let column = m.name.as_deref().unwrap_or_default();
        let field = m.ident.to_string();
        let ty = &m.ty;
        quote! {
            ::rowbind::FieldDef {
                position: #position,
                name: #column,
                field: #field,
                kind: <#ty as ::rowbind::ColumnValue>::kind(),
            }
        }
    });
    let positions: Vec<_> = mapped.iter().map(|m| m.position).collect();
    let idents: Vec<_> = mapped.iter().map(|m| &m.ident).collect();
    quote! {
        impl ::rowbind::Record for #name {
            fn table_name() -> &'static str {
                #table_name
            }

            fn fields() -> &'static [::rowbind::FieldDef] {
                static RESULT: ::std::sync::LazyLock<Box<[::rowbind::FieldDef]>> =
                    ::std::sync::LazyLock::new(|| vec![#(#fields_defs),*].into_boxed_slice());
                &RESULT
            }

            fn field(&self, position: usize) -> Option<&dyn ::rowbind::ColumnValue> {
                match position {
                    #(#positions => Some(&self.#idents),)*
                    _ => None,
                }
            }

            fn field_mut(&mut self, position: usize) -> Option<&mut dyn ::rowbind::ColumnValue> {
                match position {
                    #(#positions => Some(&mut self.#idents),)*
                    _ => None,
                }
            }
        }
    }
    .into()
}
