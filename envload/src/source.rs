//! Source mappings: `.env` files and the process environment

use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::warn;

use crate::error::EnvLoadError;
use crate::field::EnvLoad;

/// Read a `.env` file into a flat key-value mapping.
///
/// The process environment is not modified.
pub fn read_env_file(path: impl AsRef<Path>) -> Result<HashMap<String, String>, dotenvy::Error> {
    dotenvy::from_path_iter(path.as_ref())?.collect()
}

/// Snapshot the process environment.
///
/// Variables whose name or value is not valid Unicode are left out.
pub fn process_env() -> HashMap<String, String> {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Read the `.env` file at `path` and populate `target` from it.
///
/// A file that cannot be read is logged and treated as empty, so every field
/// falls back to its default.
///
/// # Errors
///
/// Returns the first population error; see [`crate::populate`].
pub fn load_and_parse<T: EnvLoad>(path: impl AsRef<Path>, target: &mut T) -> Result<(), EnvLoadError> {
    let path = path.as_ref();
    let source = read_env_file(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "could not read env file, using defaults only");
        HashMap::new()
    });
    crate::engine::populate(&source, target)
}
