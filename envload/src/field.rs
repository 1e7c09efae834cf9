//! Static field tables and the `EnvLoad` trait.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::Context;

use crate::error::EnvLoadError;

/// Compile-time description of one struct field.
///
/// Built by `#[derive(EnvLoad)]`, or written out by hand when implementing
/// [`EnvLoad`] manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name, used in error messages.
    pub name: &'static str,
    /// Key looked up in the source mapping (struct prefix included).
    ///
    /// `None` means the field is never touched.
    pub key: Option<&'static str>,
    /// Literal used when the key is absent from the mapping.
    pub default: Option<&'static str>,
    /// Fail with [`EnvLoadError::MissingRequiredField`] when the resolved
    /// value is empty.
    pub required: bool,
    /// Semantic type selecting the converter.
    pub ty: FieldType,
}

/// Semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int { bits: u32 },
    Uint { bits: u32 },
    Float { bits: u32 },
    Bool,
    Duration,
    /// `Vec<T>` parsed from comma-separated elements.
    Slice(ElementType),
    /// `HashMap<String, T>` or `BTreeMap<String, T>` parsed from
    /// comma-separated `key:value` pairs.
    Map(ElementType),
    /// Converted by a user-supplied `deserializer` function.
    Custom,
    /// Not convertible; the field is skipped without error.
    Unsupported,
}

/// Element type of slice and map fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    String,
    Int { bits: u32 },
    Uint { bits: u32 },
    Float { bits: u32 },
    Bool,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int { .. } => "int",
            Self::Uint { .. } => "uint",
            Self::Float { .. } => "float",
            Self::Bool => "bool",
        })
    }
}

/// A struct that can be populated from a flat string mapping.
///
/// Usually derived:
///
/// ```rust
/// use envload::EnvLoad;
///
/// #[derive(Debug, Default, EnvLoad)]
/// struct Config {
///     #[env(key = "PORT", default = "8080")]
///     pub port: u16,
/// }
/// ```
///
/// Implementing it by hand registers the field table explicitly: `FIELDS`
/// lists every field in declaration order and `assign` converts `raw` into
/// the field at `index`.
pub trait EnvLoad {
    /// Field table in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Convert `raw` and store it in the field at `index` of [`Self::FIELDS`].
    ///
    /// Indices of unsupported fields are accepted and ignored.
    fn assign(&mut self, index: usize, raw: &str) -> Result<(), EnvLoadError>;

    /// Populate `self` in place from `source`.
    fn populate(&mut self, source: &HashMap<String, String>) -> Result<(), EnvLoadError>
    where
        Self: Sized,
    {
        crate::engine::populate(source, self)
    }

    /// Build a value starting from `Default::default()`.
    fn from_map(source: &HashMap<String, String>) -> Result<Self, EnvLoadError>
    where
        Self: Default,
    {
        let mut target = Self::default();
        target.populate(source)?;
        Ok(target)
    }

    /// Build a value from the current process environment.
    fn from_env() -> Result<Self, EnvLoadError>
    where
        Self: Default,
    {
        Self::from_map(&crate::source::process_env())
    }

    /// Build a value from a `.env` file.
    ///
    /// An unreadable file is logged and treated as empty, so only defaults
    /// apply.
    ///
    /// # Errors
    ///
    /// - Required fields resolve to empty values
    /// - Values cannot be converted into the field types
    fn from_env_file(path: impl AsRef<Path>) -> anyhow::Result<Self>
    where
        Self: Default,
    {
        let path = path.as_ref();
        let mut target = Self::default();
        crate::source::load_and_parse(path, &mut target)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        Ok(target)
    }
}
