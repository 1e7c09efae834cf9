//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates configuration attributes from structs
//! and their fields during macro expansion.

use syn::{DeriveInput, ExprPath, Field, Lit, LitBool, LitStr};

/// Parsed struct-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prepended to every field key.
    pub prefix: String,
}

impl StructAttrs {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &input.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.prefix = lit.value();
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed field-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Source key, without the struct prefix.
    ///
    /// If `None`, the field is never populated.
    pub key: Option<String>,

    /// Default literal, as the text that gets converted.
    pub default: Option<String>,

    /// Fail when the resolved value is empty.
    pub required: bool,

    /// Custom deserializer function path (e.g., `"serde_json::from_str"`).
    ///
    /// When specified, bypasses the built-in converters.
    pub deserializer: Option<ExprPath>,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // key = "..."
                if meta.path.is_ident("key") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new_spanned(lit, "`key` must not be empty"));
                    }
                    attrs.key = Some(lit.value());
                    return Ok(());
                }

                // default = "..." | 8080 | -1 | 0.5 | true
                if meta.path.is_ident("default") {
                    let lit: Lit = meta.value()?.parse()?;
                    attrs.default = Some(literal_text(&lit)?);
                    return Ok(());
                }

                // required or required = bool
                if meta.path.is_ident("required") {
                    attrs.required = if meta.input.peek(syn::Token![=]) {
                        let lit: LitBool = meta.value()?.parse()?;
                        lit.value
                    } else {
                        true
                    };
                    return Ok(());
                }

                // deserializer = "function::path"
                if meta.path.is_ident("deserializer") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.deserializer = Some(lit.parse()?);
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Text of a default literal, before conversion.
fn literal_text(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        _ => Err(syn::Error::new_spanned(
            lit,
            "`default` must be a string, integer, float or bool literal",
        )),
    }
}
