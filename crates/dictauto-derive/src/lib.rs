use proc_macro::TokenStream;

mod dict;
mod util;

/// Derive `DictRecord` and `Visitable`.
///
/// Structs with named fields become `Record` nodes; field options go in
/// `#[dict(...)]`:
///
/// - `kind = "..."`: mark a coded field with its type tag
/// - `code`: mark a coded field with an empty type tag
/// - `parent = "..."`: literal parent code
/// - `parent_field = "..."`: sibling field holding the parent code
/// - `target = "..."`: explicit item field name
/// - `item`: force the field to be an item slot
/// - `skip`: hide the field from the walker
///
/// Enums become `Base` leaves.
#[proc_macro_derive(Dict, attributes(dict))]
pub fn derive_dict(input: TokenStream) -> TokenStream {
    dict::derive_dict(input.into()).into()
}
