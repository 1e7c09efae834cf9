//! Field resolution: picks the raw string for every field and hands it to the
//! converters.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::EnvLoadError;
use crate::field::{EnvLoad, FieldDescriptor, FieldType};

/// Where a field's raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The key was present in the source mapping (possibly empty).
    Source,
    /// The key was absent and the declared default was used.
    Default,
    /// The key was absent and no default was declared.
    Unset,
    /// The field has no key and is never populated.
    Untracked,
}

/// Raw value chosen for one field during a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub field: &'a FieldDescriptor,
    pub raw: &'a str,
    pub origin: Origin,
}

impl FieldDescriptor {
    /// Pick the raw value for this field.
    ///
    /// Priority order:
    /// 1. Value mapped to `key` in `source`, even when empty
    /// 2. Declared default
    /// 3. Empty string
    pub fn resolve<'a>(&'a self, source: &'a HashMap<String, String>) -> Resolution<'a> {
        let (raw, origin) = match self.key {
            None => ("", Origin::Untracked),
            Some(key) => match (source.get(key), self.default) {
                (Some(value), _) => (value.as_str(), Origin::Source),
                (None, Some(default)) => (default, Origin::Default),
                (None, None) => ("", Origin::Unset),
            },
        };
        Resolution {
            field: self,
            raw,
            origin,
        }
    }
}

/// Populate `target` from `source`, field by field in declaration order.
///
/// Stops at the first error. Fields converted before the failing one keep
/// their new values.
///
/// # Errors
///
/// - A required field resolves to an empty value
/// - A value cannot be converted into its field's type
pub fn populate<T: EnvLoad>(
    source: &HashMap<String, String>,
    target: &mut T,
) -> Result<(), EnvLoadError> {
    for (index, field) in T::FIELDS.iter().enumerate() {
        let resolution = field.resolve(source);
        let Some(key) = field.key else {
            trace!(field = field.name, "no source key, leaving field untouched");
            continue;
        };

        if resolution.raw.is_empty() {
            if field.required {
                return Err(EnvLoadError::missing(field.name, key));
            }
            trace!(field = field.name, key, origin = ?resolution.origin, "empty value, keeping initial value");
            continue;
        }

        if field.ty == FieldType::Unsupported {
            trace!(field = field.name, key, "unsupported field type, skipping");
            continue;
        }

        debug!(field = field.name, key, origin = ?resolution.origin, "setting field");
        target.assign(index, resolution.raw)?;
    }

    Ok(())
}
