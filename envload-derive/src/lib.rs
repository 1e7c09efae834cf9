//! Derive macro implementation for envload

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Scalar types usable as fields, slice elements and map values.
const SCALARS: &[&str] = &[
    "String", "bool", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize",
];

/// Generic arguments of the last path segment, if the type is a plain path.
fn type_args(ty: &Type) -> Option<(&syn::Path, Vec<&Type>)> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let seg = type_path.path.segments.last()?;
    let args = match &seg.arguments {
        PathArguments::None => Vec::new(),
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .map(|arg| match arg {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?,
        PathArguments::Parenthesized(_) => return None,
    };
    Some((&type_path.path, args))
}

fn is_scalar(ty: &Type) -> bool {
    matches!(type_args(ty), Some((path, args))
        if args.is_empty()
            && path.segments.last().is_some_and(|seg| SCALARS.contains(&seg.ident.to_string().as_str())))
}

fn is_string(ty: &Type) -> bool {
    matches!(type_args(ty), Some((path, args))
        if args.is_empty() && path.segments.last().is_some_and(|seg| seg.ident == "String"))
}

/// Whether the built-in converters handle `ty`.
///
/// Classification is syntactic: `Duration` must be written as `Duration`,
/// `std::time::Duration` or `core::time::Duration`, the signed duration as
/// `TimeDelta`, `chrono::TimeDelta`, `chrono::Duration` or
/// `envload::TimeDelta`, and type aliases are not resolved.
fn is_supported(ty: &Type) -> bool {
    let Some((path, args)) = type_args(ty) else {
        return false;
    };
    let Some(last) = path.segments.last() else {
        return false;
    };

    match (last.ident.to_string().as_str(), args.as_slice()) {
        ("Duration" | "TimeDelta", []) => {
            let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
            let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
            matches!(
                segments.as_slice(),
                ["Duration"]
                    | ["std" | "core", "time", "Duration"]
                    | ["TimeDelta"]
                    | ["chrono" | "envload", "TimeDelta"]
                    | ["chrono", "Duration"]
            )
        }
        ("Vec", [element]) => is_scalar(element),
        ("HashMap" | "BTreeMap", [key, value]) => is_string(key) && is_scalar(value),
        (_, []) => is_scalar(ty),
        _ => false,
    }
}

/// `EnvLoad` derive macro
///
/// Implements `envload::EnvLoad` with a static field table and a slot
/// accessor for every named field.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to all keys
///
/// **Field-level**:
/// - `#[env(key = "NAME")]`: Key to read the field from (fields without one are skipped)
/// - `#[env(default = "value")]`: Literal used when the key is absent
///   (numbers, including negative ones like `-1`, and bools may be unquoted)
/// - `#[env(required)]`: Fail when the resolved value is empty
/// - `#[env(deserializer = "func")]`: Use custom deserializer function
///
/// # Example
///
/// See the `envload` crate documentation for usage examples.
#[proc_macro_derive(EnvLoad, attributes(env))]
pub fn derive_envload(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_input(input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "EnvLoad only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "EnvLoad can only be derived for structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut arms = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let field_type = &field.ty;
        let name = ident.unraw().to_string();
        let attrs = FieldAttrs::from_field(field)?;

        let Some(key) = attrs.key else {
            // Check for options that would silently do nothing
            if attrs.default.is_some() || attrs.required || attrs.deserializer.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "`default`, `required` and `deserializer` have no effect without `key`",
                ));
            }
            descriptors.push(quote! {
                ::envload::FieldDescriptor {
                    name: #name,
                    key: ::core::option::Option::None,
                    default: ::core::option::Option::None,
                    required: false,
                    ty: ::envload::FieldType::Unsupported,
                }
            });
            continue;
        };

        let key = format!("{}{}", struct_attrs.prefix, key);
        let default = match &attrs.default {
            Some(value) => quote!(::core::option::Option::Some(#value)),
            None => quote!(::core::option::Option::None),
        };
        let required = attrs.required;

        let ty = if let Some(func) = &attrs.deserializer {
            arms.push(quote! {
                #index => {
                    self.#ident = #func(raw)
                        .map_err(|e| ::envload::EnvLoadError::custom::<#field_type>(#name, e))?;
                    ::core::result::Result::Ok(())
                }
            });
            quote!(::envload::FieldType::Custom)
        } else if is_supported(field_type) {
            arms.push(quote! {
                #index => ::envload::de::assign(&mut self.#ident, raw, #name)
            });
            quote!(<#field_type as ::envload::de::FromRaw>::TYPE)
        } else {
            quote!(::envload::FieldType::Unsupported)
        };

        descriptors.push(quote! {
            ::envload::FieldDescriptor {
                name: #name,
                key: ::core::option::Option::Some(#key),
                default: #default,
                required: #required,
                ty: #ty,
            }
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::envload::EnvLoad for #struct_name #ty_generics #where_clause {
            const FIELDS: &'static [::envload::FieldDescriptor] = &[
                #(#descriptors),*
            ];

            #[allow(unused_variables, clippy::match_single_binding)]
            fn assign(
                &mut self,
                index: usize,
                raw: &str,
            ) -> ::core::result::Result<(), ::envload::EnvLoadError> {
                match index {
                    #(#arms,)*
                    _ => ::core::result::Result::Ok(()),
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_supported_scalars() {
        let types: [Type; 11] = [
            parse_quote!(String),
            parse_quote!(std::string::String),
            parse_quote!(u8),
            parse_quote!(i128),
            parse_quote!(f32),
            parse_quote!(bool),
            parse_quote!(Duration),
            parse_quote!(std::time::Duration),
            parse_quote!(TimeDelta),
            parse_quote!(chrono::TimeDelta),
            parse_quote!(chrono::Duration),
        ];
        for ty in &types {
            assert!(is_supported(ty), "{}", quote!(#ty));
        }
    }

    #[test]
    fn test_supported_collections() {
        let types: [Type; 4] = [
            parse_quote!(Vec<String>),
            parse_quote!(Vec<u16>),
            parse_quote!(HashMap<String, bool>),
            parse_quote!(std::collections::BTreeMap<String, f64>),
        ];
        for ty in &types {
            assert!(is_supported(ty), "{}", quote!(#ty));
        }
    }

    #[test]
    fn test_unsupported_types() {
        let types: [Type; 10] = [
            parse_quote!(Option<String>),
            parse_quote!(Box<u8>),
            parse_quote!(time::Duration),
            parse_quote!(Vec<Duration>),
            parse_quote!(Vec<Vec<u8>>),
            parse_quote!(HashMap<u32, String>),
            parse_quote!(HashMap<String, String, RandomState>),
            parse_quote!(&'static str),
            parse_quote!((u8, u8)),
            parse_quote!(Port),
        ];
        for ty in &types {
            assert!(!is_supported(ty), "{}", quote!(#ty));
        }
    }

    #[test]
    fn test_expand_rejects_enum() {
        let input: DeriveInput = parse_quote! {
            enum Mode { Fast, Slow }
        };
        let err = expand(&input).unwrap_err();
        assert_eq!(err.to_string(), "EnvLoad can only be derived for structs");
    }

    #[test]
    fn test_expand_rejects_tuple_struct() {
        let input: DeriveInput = parse_quote! {
            struct Port(u16);
        };
        let err = expand(&input).unwrap_err();
        assert_eq!(err.to_string(), "EnvLoad only supports structs with named fields");
    }

    #[test]
    fn test_expand_rejects_default_without_key() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[env(default = "x")]
                name: String,
            }
        };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_expand_applies_prefix() {
        let input: DeriveInput = parse_quote! {
            #[env(prefix = "APP_")]
            struct Config {
                #[env(key = "PORT")]
                port: u16,
            }
        };
        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("\"APP_PORT\""));
    }
}
