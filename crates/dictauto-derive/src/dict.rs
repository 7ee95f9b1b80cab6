use crate::util::{is_item_slot, with_bounds};
use darling::{
    FromDeriveInput, FromField, ast,
    util::{Flag, Ignored},
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DataEnum, DeriveInput, Error, Generics, Ident, Type, WherePredicate, parse_quote};

///
/// DictInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(dict), supports(struct_named))]
struct DictInput {
    ident: Ident,
    generics: Generics,
    data: ast::Data<Ignored, DictField>,
}

///
/// DictField
///

#[derive(Debug, FromField)]
#[darling(attributes(dict))]
struct DictField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    kind: Option<String>,

    #[darling(default)]
    parent: Option<String>,

    #[darling(default)]
    parent_field: Option<String>,

    #[darling(default)]
    target: Option<String>,

    #[darling(default)]
    code: Flag,

    #[darling(default)]
    item: Flag,

    #[darling(default)]
    skip: Flag,
}

impl DictField {
    fn is_coded(&self) -> bool {
        self.kind.is_some() || self.code.is_present()
    }

    fn is_item(&self) -> bool {
        !self.is_coded() && (self.item.is_present() || is_item_slot(&self.ty))
    }
}

///
/// Role
/// Field role after validation, in declaration order.
///

enum Role<'a> {
    Code(&'a DictField),
    Item,
    Plain,
}

struct Visible<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    role: Role<'a>,
}

// derive_dict
pub fn derive_dict(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match &input.data {
        Data::Enum(data) => derive_leaf(&input, data),
        Data::Struct(_) => derive_record(&input),
        Data::Union(_) => {
            Error::new_spanned(&input.ident, "Dict cannot be derived for unions").to_compile_error()
        }
    }
}

// Enums carry no field model and end the descent.
fn derive_leaf(input: &DeriveInput, data: &DataEnum) -> TokenStream {
    if let Some(err) = enum_dict_attrs(input, data) {
        return err.to_compile_error();
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::dictauto::traits::Visitable for #ident #ty_generics #where_clause {}
    }
}

// `#[dict]` anywhere on an enum would otherwise be accepted and ignored.
fn enum_dict_attrs(input: &DeriveInput, data: &DataEnum) -> Option<Error> {
    let variants = data.variants.iter().flat_map(|variant| {
        variant
            .attrs
            .iter()
            .chain(variant.fields.iter().flat_map(|field| field.attrs.iter()))
    });

    input
        .attrs
        .iter()
        .chain(variants)
        .filter(|attr: &&Attribute| attr.path().is_ident("dict"))
        .map(|attr| Error::new_spanned(attr, "`#[dict(...)]` has no effect on enums"))
        .reduce(|mut acc, err| {
            acc.combine(err);
            acc
        })
}

fn derive_record(input: &DeriveInput) -> TokenStream {
    let parsed = match DictInput::from_derive_input(input) {
        Ok(parsed) => parsed,
        Err(err) => return err.write_errors(),
    };
    let ident = &parsed.ident;
    let type_name = ident.to_string();

    let fields = parsed
        .data
        .as_ref()
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default();

    let visible = match validate(ident, &fields) {
        Ok(visible) => visible,
        Err(err) => return err.to_compile_error(),
    };

    let model = model_tokens(&type_name, &visible);
    let read_code = read_code_tokens(&type_name, &fields, &visible);
    let read_item = read_item_tokens(&visible);
    let write_item = write_item_tokens(&type_name, &visible);
    let (drive, drive_mut) = drive_tokens(&visible);

    let generics = with_bounds(&parsed.generics, bounds(&parsed.generics, &fields, &visible));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics ::dictauto::traits::DictRecord for #ident #ty_generics #where_clause {
            fn model(&self) -> &'static ::dictauto::model::RecordModel {
                #model
            }

            #read_code
            #read_item
            #write_item
        }

        impl #impl_generics ::dictauto::traits::Visitable for #ident #ty_generics #where_clause {
            fn kind(&self) -> ::dictauto::traits::NodeKind {
                ::dictauto::traits::NodeKind::Record
            }

            #drive
            #drive_mut
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate<'a>(ident: &Ident, fields: &[&'a DictField]) -> Result<Vec<Visible<'a>>, Error> {
    let mut errors: Vec<Error> = Vec::new();
    let mut visible = Vec::new();

    for &field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let mut fail = |message: String| errors.push(Error::new_spanned(field_ident, message));
        let has_dict_options = field.parent.is_some()
            || field.parent_field.is_some()
            || field.target.is_some();

        if field.skip.is_present() {
            if field.is_coded() || field.item.is_present() || has_dict_options {
                fail(format!("field `{field_ident}` is skipped and cannot carry other dict options"));
            }
            continue;
        }
        if field.is_coded() && field.item.is_present() {
            fail(format!("field `{field_ident}` cannot be both coded and an item slot"));
        }
        if !field.is_coded() && has_dict_options {
            fail(format!(
                "field `{field_ident}` sets parent, parent_field or target without `kind` or `code`"
            ));
        }

        let role = if field.is_coded() {
            Role::Code(field)
        } else if field.is_item() {
            Role::Item
        } else {
            Role::Plain
        };
        visible.push(Visible {
            ident: field_ident,
            ty: &field.ty,
            role,
        });
    }

    // parent fields must stay visible to `read_code`
    for field in &visible {
        let Role::Code(dict) = field.role else {
            continue;
        };
        let Some(parent_field) = dict.parent_field.as_deref().map(str::trim) else {
            continue;
        };
        if !visible.iter().any(|other| other.ident == parent_field) {
            errors.push(Error::new_spanned(
                field.ident,
                format!("parent_field `{parent_field}` does not name a field of `{ident}`"),
            ));
        }
    }

    match errors.into_iter().reduce(|mut acc, err| {
        acc.combine(err);
        acc
    }) {
        Some(err) => Err(err),
        None => Ok(visible),
    }
}

// ============================================================================
// Generation
// ============================================================================

fn model_tokens(type_name: &str, visible: &[Visible<'_>]) -> TokenStream {
    let fields = visible.iter().map(|field| {
        let name = field.ident.to_string();

        match field.role {
            Role::Code(dict) => {
                let kind = dict.kind.as_deref().unwrap_or_default();
                let parent = dict.parent.as_ref().map(|p| quote!(.parent(#p)));
                let parent_field = dict.parent_field.as_ref().map(|p| quote!(.parent_field(#p)));
                let target = dict.target.as_ref().map(|t| quote!(.target(#t)));

                quote! {
                    ::dictauto::model::FieldModel::code(
                        #name,
                        ::dictauto::model::DictId::new(#kind) #parent #parent_field #target,
                    )
                }
            }
            Role::Item => quote!(::dictauto::model::FieldModel::item(#name)),
            Role::Plain => quote!(::dictauto::model::FieldModel::plain(#name)),
        }
    });

    quote! {
        static MODEL: ::dictauto::model::RecordModel = ::dictauto::model::RecordModel {
            type_name: #type_name,
            fields: &[#(#fields),*],
        };

        &MODEL
    }
}

// Coded fields plus every field named as a parent.
fn code_readable<'a>(fields: &[&DictField], visible: &'a [Visible<'a>]) -> Vec<&'a Visible<'a>> {
    let parents: Vec<&str> = fields
        .iter()
        .filter_map(|field| field.parent_field.as_deref().map(str::trim))
        .collect();

    visible
        .iter()
        .filter(|field| {
            matches!(field.role, Role::Code(_)) || parents.iter().any(|p| field.ident == p)
        })
        .collect()
}

fn read_code_tokens(type_name: &str, fields: &[&DictField], visible: &[Visible<'_>]) -> TokenStream {
    let arms = code_readable(fields, visible).into_iter().map(|field| {
        let ident = field.ident;
        let name = ident.to_string();

        quote! {
            #name => Ok(::dictauto::traits::DictCode::dict_code(&self.#ident)),
        }
    });

    quote! {
        fn read_code(
            &self,
            field: &str,
        ) -> Result<Option<String>, ::dictauto::error::DictError> {
            match field {
                #(#arms)*
                _ => Err(::dictauto::error::DictError::unknown_field(
                    #type_name,
                    field,
                    ::dictauto::error::AccessAction::Read,
                )),
            }
        }
    }
}

fn item_slots<'a>(visible: &'a [Visible<'a>]) -> impl Iterator<Item = &'a Visible<'a>> {
    visible
        .iter()
        .filter(|field| matches!(field.role, Role::Item))
}

fn read_item_tokens(visible: &[Visible<'_>]) -> TokenStream {
    let arms = item_slots(visible).map(|field| {
        let ident = field.ident;
        let name = ident.to_string();

        quote! {
            #name => Some(self.#ident.as_ref()),
        }
    });

    quote! {
        fn read_item(&self, field: &str) -> Option<Option<&::dictauto::item::DictItem>> {
            match field {
                #(#arms)*
                _ => None,
            }
        }
    }
}

fn write_item_tokens(type_name: &str, visible: &[Visible<'_>]) -> TokenStream {
    let arms: Vec<_> = item_slots(visible)
        .map(|field| {
            let ident = field.ident;
            let name = ident.to_string();

            quote! {
                #name => {
                    self.#ident = Some(item);
                    Ok(())
                }
            }
        })
        .collect();

    let item = if arms.is_empty() {
        quote!(_item)
    } else {
        quote!(item)
    };

    quote! {
        fn write_item(
            &mut self,
            field: &str,
            #item: ::dictauto::item::DictItem,
        ) -> Result<(), ::dictauto::error::DictError> {
            match field {
                #(#arms)*
                _ => Err(::dictauto::error::DictError::unknown_field(
                    #type_name,
                    field,
                    ::dictauto::error::AccessAction::Write,
                )),
            }
        }
    }
}

// Coded fields go to the visitor, plain fields are descended into, item
// slots are leaves and are left alone.
fn drive_tokens(visible: &[Visible<'_>]) -> (TokenStream, TokenStream) {
    let mut drive = Vec::new();
    let mut drive_mut = Vec::new();

    for (index, field) in visible.iter().enumerate() {
        let ident = field.ident;
        let name = ident.to_string();

        match field.role {
            Role::Code(_) => {
                drive.push(quote! {
                    visitor.visit_code(self, &model.fields[#index]);
                });
                drive_mut.push(quote! {
                    visitor.visit_code_mut(self, &model.fields[#index]);
                });
            }
            Role::Plain => {
                drive.push(quote! {
                    ::dictauto::visitor::perform_visit(visitor, &self.#ident, #name);
                });
                drive_mut.push(quote! {
                    ::dictauto::visitor::perform_visit_mut(visitor, &mut self.#ident, #name);
                });
            }
            Role::Item => {}
        }
    }

    let has_code = visible
        .iter()
        .any(|field| matches!(field.role, Role::Code(_)));
    let model = has_code.then(|| {
        quote! {
            let model = <Self as ::dictauto::traits::DictRecord>::model(self);
        }
    });
    let visitor = if drive.is_empty() {
        quote!(_visitor)
    } else {
        quote!(visitor)
    };

    (
        quote! {
            fn drive(&self, #visitor: &mut dyn ::dictauto::visitor::VisitorCore) {
                #model
                #(#drive)*
            }
        },
        quote! {
            fn drive_mut(&mut self, #visitor: &mut dyn ::dictauto::visitor::VisitorMutCore) {
                #model
                #(#drive_mut)*
            }
        },
    )
}

// Generic records: params are walked, code fields must yield codes.
fn bounds(
    generics: &Generics,
    fields: &[&DictField],
    visible: &[Visible<'_>],
) -> Vec<WherePredicate> {
    if generics.type_params().next().is_none() {
        return Vec::new();
    }

    let mut bounds: Vec<WherePredicate> = visible
        .iter()
        .filter(|field| matches!(field.role, Role::Plain))
        .map(|field| {
            let ty = field.ty;
            parse_quote!(#ty: ::dictauto::traits::Visitable)
        })
        .collect();

    bounds.extend(code_readable(fields, visible).into_iter().map(|field| {
        let ty = field.ty;
        let bound: WherePredicate = parse_quote!(#ty: ::dictauto::traits::DictCode);
        bound
    }));

    bounds
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> String {
        derive_dict(quote!(#input)).to_string()
    }

    #[test]
    fn enum_becomes_a_leaf() {
        let out = expand(parse_quote! {
            enum Status { Active, Disabled }
        });

        assert!(out.contains("Visitable for Status"));
        assert!(!out.contains("DictRecord"));
    }

    #[test]
    fn dict_attrs_on_enums_are_rejected() {
        let out = expand(parse_quote! {
            #[dict(kind = "status")]
            enum Status {
                #[dict(skip)]
                Active,
                Disabled(#[dict(kind = "reason")] String),
            }
        });

        assert!(!out.contains("Visitable for Status"));
        assert_eq!(out.matches("has no effect on enums").count(), 3);
    }

    #[test]
    fn generic_record_bounds_land_in_where_clause() {
        let out = expand(parse_quote! {
            struct Page<T> where T: Clone {
                rows: Vec<T>,
            }
        });

        assert!(out.contains("where T : Clone ,"));
        assert!(out.contains("Vec < T > : :: dictauto :: traits :: Visitable"));
    }

    #[test]
    fn record_lists_visible_fields_only() {
        let out = expand(parse_quote! {
            struct Profile {
                #[dict(kind = "role")]
                role_id: Option<u32>,
                role_item: Option<DictItem>,
                #[dict(skip)]
                created: u64,
                name: String,
            }
        });

        assert!(out.contains("FieldModel :: code (\"role_id\""));
        assert!(out.contains("FieldModel :: item (\"role_item\")"));
        assert!(out.contains("FieldModel :: plain (\"name\")"));
        assert!(!out.contains("created"));
    }

    #[test]
    fn parent_field_must_exist() {
        let out = expand(parse_quote! {
            struct Address {
                #[dict(kind = "city", parent_field = "province")]
                city: String,
            }
        });

        assert!(out.contains("compile_error"));
        assert!(out.contains("parent_field `province` does not name a field of `Address`"));
    }

    #[test]
    fn skipped_parent_field_is_rejected() {
        let out = expand(parse_quote! {
            struct Address {
                #[dict(skip)]
                province: String,
                #[dict(kind = "city", parent_field = "province")]
                city: String,
            }
        });

        assert!(out.contains("compile_error"));
    }

    #[test]
    fn coded_item_conflict_is_rejected() {
        let out = expand(parse_quote! {
            struct Bad {
                #[dict(kind = "x", item)]
                code: Option<DictItem>,
            }
        });

        assert!(out.contains("cannot be both coded and an item slot"));
    }

    #[test]
    fn tuple_structs_are_rejected() {
        let out = expand(parse_quote! {
            struct Pair(String, String);
        });

        assert!(out.contains("compile_error"));
    }
}
