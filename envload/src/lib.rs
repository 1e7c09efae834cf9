//! Populate typed configuration structs from `.env` files
//!
//! `envload` maps the flat key-value pairs of a `.env` file (or the process
//! environment) onto the fields of a struct. Fields opt in with
//! `#[env(key = "...")]`, may declare a default and may be marked required.
//!
//! # Features
//!
//! - **Declarative**: Automatic implementation with `#[derive(EnvLoad)]`
//! - **Type-safe**: Integers are parsed at their declared width, so `256`
//!   never wraps into a `u8`
//! - **Collections**: Comma-separated `Vec<T>` and `key:value` maps
//! - **Durations**: `std::time::Duration` from literals like `1h30m`, and
//!   [`TimeDelta`] when negative values such as `-5s` must be accepted
//! - **Graceful**: A missing `.env` file degrades to defaults with a warning
//!
//! # Value Parsing
//!
//! - Strings: `APP_NAME=MyApp` (used verbatim)
//! - Numbers: `PORT=8080`, `RATIO=0.75`
//! - Booleans: `DEBUG=true` (`1`/`0`, `t`/`f`, `TRUE`/`FALSE` also accepted)
//! - Durations: `TIMEOUT=1h30m`, `POLL=250ms`
//! - Slices: `TAGS=web,api,service` (empty elements are skipped)
//! - Maps: `LIMITS=cpu:80,memory:512` (later duplicates win)
//!
//! Fields of any other type are left untouched.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! use envload::EnvLoad;
//!
//! #[derive(Debug, Default, EnvLoad)]
//! struct Config {
//!     #[env(key = "DATABASE_URL", required)]
//!     pub database_url: String,
//!
//!     #[env(key = "PORT", default = 8080)]
//!     pub port: u16,
//!
//!     #[env(key = "TIMEOUT", default = "30s")]
//!     pub timeout: Duration,
//!
//!     #[env(key = "TAGS", default = "web,api")]
//!     pub tags: Vec<String>,
//! }
//!
//! # fn main() -> Result<(), envload::EnvLoadError> {
//! let source = HashMap::from([
//!     ("DATABASE_URL".to_string(), "postgres://localhost/db".to_string()),
//!     ("TAGS".to_string(), "frontend,,backend".to_string()),
//! ]);
//! let config = Config::from_map(&source)?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.tags, ["frontend", "backend"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(key = "NAME")]`
//!
//! Key to read the field from. Fields without a key are never touched.
//!
//! ## `#[env(default = "value")]`
//!
//! Literal used when the key is absent. It is converted exactly like a value
//! read from the source. A key that is present but empty does **not** fall
//! back to the default.
//!
//! ## `#[env(required)]`
//!
//! Fail with [`EnvLoadError::MissingRequiredField`] when the field resolves to
//! an empty value. A non-empty default satisfies a required field.
//!
//! ## `#[env(deserializer = "function")]`
//!
//! Convert the raw value with a custom `fn(&str) -> Result<T, E>`:
//!
//! ```rust
//! # use envload::EnvLoad;
//! #[derive(Default, EnvLoad)]
//! struct Config {
//!     #[env(key = "ALLOWED", deserializer = "serde_json::from_str")]
//!     pub allowed: Vec<Vec<String>>,
//! }
//! ```
//!
//! ## `#[env(prefix = "APP_")]`
//!
//! Struct-level: prepend a prefix to every key.

#[doc(hidden)]
pub mod de;

mod duration;
mod engine;
mod error;
mod field;
mod source;

pub use chrono::TimeDelta;
pub use de::{parse_bool, ParseBoolError};
pub use duration::{parse_duration, DurationError};
pub use engine::{populate, Origin, Resolution};
pub use envload_derive::EnvLoad;
pub use error::{EnvLoadError, FloatError, ValueError};
pub use field::{ElementType, EnvLoad, FieldDescriptor, FieldType};
pub use source::{load_and_parse, process_env, read_env_file};
