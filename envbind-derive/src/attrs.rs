//! Attribute parsing for `#[tag(...)]` annotations.
//!
//! This module extracts and validates tag attributes from struct fields
//! during macro expansion. The annotation strings themselves are kept
//! verbatim and validated by the binder at runtime.

use syn::ext::IdentExt;
use syn::{Field, LitStr, Visibility};

/// Parsed `#[tag(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Bind the field as a nested record instead of a leaf value.
    pub nested: bool,

    /// `(key, annotation)` pairs in declaration order, e.g. `("env", "PORT,optional")`.
    pub tags: Vec<(String, String)>,
}

impl FieldAttrs {
    /// Extract and parse `#[tag(...)]` attributes from a struct field.
    ///
    /// Attributes other than `tag` are ignored so other derives can use them.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("tag") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // nested
                if meta.path.is_ident("nested") && !meta.input.peek(syn::Token![=]) {
                    attrs.nested = true;
                    return Ok(());
                }

                // key = "annotation"
                if let Some(key) = meta.path.get_ident() {
                    if meta.input.peek(syn::Token![=]) {
                        let key = key.unraw().to_string();
                        let value: LitStr = meta.value()?.parse()?;
                        if attrs.tags.iter().any(|(k, _)| *k == key) {
                            return Err(meta.error(format!("duplicate tag key `{key}`")));
                        }
                        attrs.tags.push((key, value.value()));
                        return Ok(());
                    }
                }

                Err(meta.error("unsupported tag attribute, expected `nested` or `key = \"...\"`"))
            })?;
        }

        if attrs.nested && !attrs.tags.is_empty() {
            return Err(syn::Error::new_spanned(
                &field.ident,
                "nested fields cannot carry tag annotations",
            ));
        }

        Ok(attrs)
    }

    /// Whether this field needs any generated binding code
    pub fn is_bound(&self) -> bool {
        self.nested || !self.tags.is_empty()
    }
}

/// Private fields are never bound.
pub fn is_accessible(field: &Field) -> bool {
    !matches!(field.vis, Visibility::Inherited)
}
