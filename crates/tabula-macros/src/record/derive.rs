//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates a `Record` implementation plus one key constant per exposed
//! field, so column declarations can refer to `Employee::NAME` instead of
//! a string literal.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result, Type};

use super::attrs::{parse_record_attrs, FieldKind};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut id_key: Option<String> = None;

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_record_attrs(&field.attrs)?;

        if attrs.skip {
            continue;
        }

        // Unannotated fields are not exposed
        let kind = match attrs.kind {
            Some(k) => k,
            None if attrs.id => {
                return Err(Error::new(
                    attrs.span,
                    "#[record(id)] needs a field kind, e.g. #[record(String, id)]",
                ))
            }
            None => continue,
        };

        let key = attrs.rename.unwrap_or_else(|| field_name.to_string());

        if attrs.id {
            if id_key.is_some() {
                return Err(Error::new(
                    field.span(),
                    "only one field can be marked #[record(id)]",
                ));
            }
            id_key = Some(key.clone());
        }

        let const_name = format_ident!("{}", to_screaming_snake_case(&key));
        field_constants.push(quote! {
            /// Column key constant.
            pub const #const_name: &'static str = #key;
        });

        let value_expr = if is_option(&field.ty) {
            let inner = value_expr(kind, quote! { v }, true);
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(v) => #inner,
                    ::core::option::Option::None => ::tabula::Value::None,
                }
            }
        } else {
            value_expr(kind, quote! { self.#field_name }, false)
        };

        field_matches.push(quote! {
            #key => #value_expr,
        });
    }

    let record_id = id_key.map(|key| {
        quote! {
            fn record_id(&self) -> ::core::option::Option<::std::borrow::Cow<'_, str>> {
                ::tabula::Record::field(self, #key)
                    .coerce()
                    .map(|c| ::std::borrow::Cow::Owned(c.into_owned()))
            }
        }
    });

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::tabula::Record for #struct_name #ty_generics #where_clause {
            fn field(&self, key: &str) -> ::tabula::Value<'_> {
                match key {
                    #(#field_matches)*
                    _ => ::tabula::Value::None,
                }
            }

            #record_id
        }
    };

    Ok(expanded)
}

/// Builds the value expression for one field. `by_ref` is set when `access`
/// is already a reference (the binding inside an `Option` match).
fn value_expr(kind: FieldKind, access: TokenStream, by_ref: bool) -> TokenStream {
    let borrowed = if by_ref {
        access.clone()
    } else {
        quote! { &#access }
    };
    let copied = if by_ref {
        quote! { *#access }
    } else {
        access
    };

    match kind {
        FieldKind::String => quote! {
            ::tabula::Value::String(::core::convert::AsRef::<str>::as_ref(#borrowed))
        },
        FieldKind::Number => quote! {
            ::tabula::Value::Number(::tabula::Number::from(#copied))
        },
        FieldKind::Bool => quote! {
            ::tabula::Value::Bool(#copied)
        },
        FieldKind::Enum => quote! {
            ::tabula::Value::String(::tabula::RecordLabel::record_label(#borrowed))
        },
        FieldKind::Text => quote! {
            ::tabula::Value::Text(::std::string::ToString::to_string(#borrowed))
        },
    }
}

/// `Option<_>` fields read as `Value::None` when empty.
fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| {
        seg.ident == "Option"
            && matches!(
                &seg.arguments,
                PathArguments::AngleBracketed(args)
                    if matches!(args.args.first(), Some(GenericArgument::Type(_)))
            )
    })
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
