//! Bind environment variables into struct fields
//!
//! `envbind` populates an existing struct in place from environment variables.
//! Each field names its variable in a tag annotation, `name[,optional][,default=value]`,
//! and the text is converted into the field's declared type.
//!
//! # Features
//!
//! - **Declarative**: field metadata is collected by `#[derive(Record)]`
//! - **In place**: binds into a value you own, leaving untagged fields alone
//! - **Strict tags**: malformed annotations and unknown options are errors
//! - **Nested records**: `#[tag(nested)]` binds sub-structs depth-first
//! - **Pluggable sources**: process environment or any `HashMap`/`BTreeMap`
//!
//! # Value Parsing
//!
//! - Strings: used verbatim, `APP_NAME=svc`
//! - Integers: base 10, checked against the field's width, `PORT=8080`
//! - Booleans: `1 t T TRUE true True` and `0 f F FALSE false False`
//! - Floats: `RATIO=0.75`
//! - Lists of strings or integers: split on `,` without trimming,
//!   `ALLOWED_HOSTS=localhost,example.com`. An empty value is an empty list.
//!
//! # Example
//!
//! ```rust
//! use envbind::Record;
//!
//! #[derive(Debug, Default, Record)]
//! struct Config {
//!     #[tag(env = "APP_NAME")]
//!     pub app_name: String,
//!
//!     #[tag(env = "PORT,default=8080")]
//!     pub port: u16,
//!
//!     #[tag(env = "ALLOWED_HOSTS,optional")]
//!     pub allowed_hosts: Vec<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("APP_NAME", "svc");
//! let mut config = Config::default();
//! envbind::bind(&mut config)?;
//! assert_eq!(config.app_name, "svc");
//! assert_eq!(config.port, 8080);
//! assert!(config.allowed_hosts.is_empty());
//! #     Ok(())
//! # }
//! ```
//!
//! # Annotations
//!
//! ## `#[tag(env = "NAME")]`
//!
//! Required: binding fails with [`BindError::MissingRequired`] when `NAME` is
//! not set. A variable set to the empty string counts as set.
//!
//! ## `#[tag(env = "NAME,optional")]`
//!
//! When `NAME` is not set the field keeps its current value.
//!
//! ## `#[tag(env = "NAME,default=value")]`
//!
//! When `NAME` is not set, `value` is converted instead. Default literals may
//! contain `=` but not `,`.
//!
//! ## `#[tag(nested)]`
//!
//! Bind the fields of a sub-struct that also derives `Record`. `Option<T>`
//! nested fields are skipped when `None`.
//!
//! ```rust
//! # use envbind::Record;
//! #[derive(Default, Record)]
//! pub struct Database {
//!     #[tag(env = "DATABASE_URL,default=postgres://localhost/app")]
//!     pub url: String,
//! }
//!
//! #[derive(Default, Record)]
//! pub struct Config {
//!     #[tag(nested)]
//!     pub database: Database,
//! }
//! ```
//!
//! Private fields are never bound, whether or not they carry a tag.
//!
//! # Tag keys
//!
//! A field may carry annotations under several keys. The binder reads `env`
//! unless configured otherwise with [`Binder::with_tag_key`].

mod annotation;
mod binder;
mod convert;
mod error;
mod record;
mod resolve;

pub use annotation::Annotation;
pub use binder::{Binder, FieldTags, DEFAULT_TAG_KEY};
pub use convert::{FromEnvValue, Kind, LIST_SEPARATOR};
pub use envbind_derive::Record;
pub use error::{AnnotationError, BindError, ConvertError};
pub use record::Record;
pub use resolve::{Environment, ProcessEnv};

/// Bind `record` from the process environment using `env` tags.
///
/// Shorthand for `Binder::new().bind(record)`.
pub fn bind<R: Record>(record: &mut R) -> Result<(), BindError> {
    Binder::new().bind(record)
}
