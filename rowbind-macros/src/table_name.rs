use convert_case::{Case, Casing};
use syn::{ItemStruct, LitStr};

/// Value of `#[table_name("...")]`, the struct name in snake case otherwise.
pub(crate) fn table_name(item: &ItemStruct) -> String {
    let default_name = item.ident.to_string().to_case(Case::Snake);
    let Some(attr) = item
        .attrs
        .iter()
        .find(|attr| attr.meta.path().is_ident("table_name"))
    else {
        return default_name;
    };
    match attr
        .meta
        .require_list()
        .and_then(|v| v.parse_args::<LitStr>())
    {
        Ok(v) if !v.value().is_empty() => v.value(),
        _ => panic!(
            "Error while parsing `table_name`, use it like #[table_name(\"{}\")]",
            default_name
        ),
    }
}
