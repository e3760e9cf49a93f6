//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::{is_accessible, FieldAttrs};

/// `Record` derive macro
///
/// Implements `envbind::Record`, which binds tagged fields in place.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[tag(env = "NAME")]`: Required variable
/// - `#[tag(env = "NAME,optional")]`: Leave the field unchanged if unset
/// - `#[tag(env = "NAME,default=value")]`: Use `value` if unset
/// - `#[tag(<key> = "...")]`: Annotation read by binders configured with `<key>`
/// - `#[tag(nested)]`: Bind a field whose type also implements `Record`
///
/// Private fields and fields without `#[tag]` are left untouched.
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(Record, attributes(tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // Struct name
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    struct_name,
                    "Record only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(struct_name, "Record only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut statements: Vec<TokenStream2> = Vec::new();
    let mut errors: Option<syn::Error> = None;

    for field in fields {
        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(e) => {
                match errors.as_mut() {
                    Some(errors) => errors.combine(e),
                    None => errors = Some(e),
                }
                continue;
            }
        };

        if !attrs.is_bound() || !is_accessible(field) {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.unraw().to_string();

        if attrs.nested {
            statements.push(quote! {
                __binder.bind_nested(&mut self.#ident, #field_name)?;
            });
            continue;
        }

        let keys = attrs.tags.iter().map(|(key, _)| key);
        let annotations = attrs.tags.iter().map(|(_, annotation)| annotation);
        statements.push(quote! {
            {
                const TAGS: ::envbind::FieldTags = ::envbind::FieldTags::new(
                    #field_name,
                    &[#((#keys, #annotations)),*],
                );
                __binder.bind_field(&mut self.#ident, &TAGS)?;
            }
        });
    }

    if let Some(errors) = errors {
        return errors.to_compile_error().into();
    }

    let expanded = quote! {
        impl #impl_generics ::envbind::Record for #struct_name #ty_generics #where_clause {
            fn bind_fields<__E: ::envbind::Environment>(
                &mut self,
                __binder: &::envbind::Binder<__E>,
            ) -> ::core::result::Result<(), ::envbind::BindError> {
                #(#statements)*
                ::core::result::Result::Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
