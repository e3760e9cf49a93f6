//! The binder: walks a record's fields and assigns resolved values

use crate::annotation::Annotation;
use crate::convert::FromEnvValue;
use crate::error::BindError;
use crate::record::Record;
use crate::resolve::{resolve, Environment, ProcessEnv, Resolved};
use tracing::{debug, trace};

/// Tag key read when none is configured
pub const DEFAULT_TAG_KEY: &str = "env";

/// Static description of one tagged field, emitted by `#[derive(Record)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTags {
    /// Rust name of the field
    pub name: &'static str,
    /// `(key, annotation)` pairs in declaration order
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldTags {
    pub const fn new(name: &'static str, tags: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, tags }
    }

    /// Annotation stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, annotation)| *annotation)
    }
}

/// Populates records from an environment source.
///
/// A binder holds no state between calls. The same binder can bind any number
/// of records.
///
/// ```rust
/// use envbind::{Binder, Record};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, Record)]
/// struct Config {
///     #[tag(env = "PORT,default=8080")]
///     pub port: u16,
/// }
///
/// # fn main() -> Result<(), envbind::BindError> {
/// let source = HashMap::from([("APP_PORT".to_string(), "9000".to_string())]);
/// let binder = Binder::new().with_prefix("APP_").with_source(source);
///
/// let mut config = Config::default();
/// binder.bind(&mut config)?;
/// assert_eq!(config.port, 9000);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Binder<E = ProcessEnv> {
    tag_key: String,
    prefix: String,
    source: E,
}

impl Binder {
    /// Binder reading `env` tags from the process environment
    pub fn new() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            prefix: String::new(),
            source: ProcessEnv,
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> Binder<E> {
    /// Read annotations stored under `key` instead of `env`
    pub fn with_tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = key.into();
        self
    }

    /// Prepend `prefix` to every variable name
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Read variables from `source` instead of the process environment
    pub fn with_source<S: Environment>(self, source: S) -> Binder<S> {
        Binder {
            tag_key: self.tag_key,
            prefix: self.prefix,
            source,
        }
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn source(&self) -> &E {
        &self.source
    }

    /// Bind every tagged field of `record`, recursing into nested records.
    ///
    /// Fields are processed in declaration order and the first error aborts
    /// the bind. Fields set before the error keep their new values.
    ///
    /// # Errors
    ///
    /// - The tag key is not a valid identifier
    /// - A tag is malformed
    /// - A required variable is not set
    /// - A value cannot be converted into its field's type
    pub fn bind<R: Record>(&self, record: &mut R) -> Result<(), BindError> {
        self.validate()?;
        record.bind_fields(self)
    }

    /// Resolve and assign a single field (used by macro-generated code)
    #[doc(hidden)]
    pub fn bind_field<T: FromEnvValue>(
        &self,
        slot: &mut T,
        field: &FieldTags,
    ) -> Result<(), BindError> {
        let Some(text) = field.get(&self.tag_key) else {
            trace!(field = field.name, tag_key = %self.tag_key, "no tag, skipping field");
            return Ok(());
        };

        let annotation =
            Annotation::parse(text).map_err(|source| BindError::MalformedAnnotation {
                field: field.name,
                source,
            })?;
        let variable = format!("{}{}", self.prefix, annotation.name);

        match resolve(&self.source, field.name, &variable, &annotation)? {
            Resolved::Value { text, source } => {
                *slot = T::from_env_value(&text)
                    .map_err(|e| BindError::conversion(field.name, &variable, e))?;
                debug!(field = field.name, variable = %variable, source = ?source, "bound field");
            }
            Resolved::Skip => {
                debug!(
                    field = field.name,
                    variable = %variable,
                    "optional variable not set, leaving field unchanged"
                );
            }
        }

        Ok(())
    }

    /// Bind a nested record field (used by macro-generated code)
    #[doc(hidden)]
    pub fn bind_nested<R: Record>(
        &self,
        record: &mut R,
        field: &'static str,
    ) -> Result<(), BindError> {
        trace!(field, "binding nested record");
        record.bind_fields(self)
    }

    fn validate(&self) -> Result<(), BindError> {
        let mut chars = self.tag_key.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };

        if valid {
            Ok(())
        } else {
            Err(BindError::InvalidInput {
                reason: format!("tag key {:?} is not an identifier", self.tag_key),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[derive(Debug, Default)]
    struct Manual {
        name: String,
        ports: Vec<u16>,
    }

    impl Record for Manual {
        fn bind_fields<E: Environment>(&mut self, binder: &Binder<E>) -> Result<(), BindError> {
            binder.bind_field(&mut self.name, &FieldTags::new("name", &[("env", "NAME")]))?;
            binder.bind_field(
                &mut self.ports,
                &FieldTags::new("ports", &[("env", "PORTS,optional"), ("alt", "ALT_PORTS")]),
            )?;
            Ok(())
        }
    }

    #[test]
    fn test_field_tags_lookup() {
        let tags = FieldTags::new("port", &[("env", "PORT"), ("json", "port")]);
        assert_eq!(tags.get("env"), Some("PORT"));
        assert_eq!(tags.get("json"), Some("port"));
        assert_eq!(tags.get("yaml"), None);
    }

    #[test]
    fn test_bind_manual_record() {
        let binder = Binder::new().with_source(source(&[("NAME", "svc"), ("PORTS", "80,443")]));
        let mut record = Manual::default();
        binder.bind(&mut record).unwrap();
        assert_eq!(record.name, "svc");
        assert_eq!(record.ports, vec![80, 443]);
    }

    #[test]
    fn test_prefix_applies_to_variable() {
        let binder = Binder::new()
            .with_prefix("APP_")
            .with_source(source(&[("APP_NAME", "svc"), ("NAME", "wrong")]));
        let mut record = Manual::default();
        binder.bind(&mut record).unwrap();
        assert_eq!(record.name, "svc");
        assert!(record.ports.is_empty());
    }

    #[test]
    fn test_alternate_tag_key() {
        let binder = Binder::new()
            .with_tag_key("alt")
            .with_source(source(&[("ALT_PORTS", "1,2")]));
        let mut record = Manual {
            name: "kept".to_string(),
            ports: Vec::new(),
        };
        binder.bind(&mut record).unwrap();
        // `name` has no `alt` tag
        assert_eq!(record.name, "kept");
        assert_eq!(record.ports, vec![1, 2]);
    }

    #[test]
    fn test_invalid_tag_key() {
        for key in ["", "1env", "env-tag", "env tag"] {
            let binder = Binder::new().with_tag_key(key).with_source(source(&[]));
            let err = binder.bind(&mut Manual::default()).unwrap_err();
            assert!(matches!(err, BindError::InvalidInput { .. }), "{key:?}");
        }
    }

    #[test]
    fn test_optional_skip_leaves_value() {
        let binder = Binder::new().with_source(source(&[]));
        let mut count = 7_i32;
        binder
            .bind_field(&mut count, &FieldTags::new("count", &[("env", "COUNT,optional")]))
            .unwrap();
        assert_eq!(count, 7);
    }

    #[test]
    fn test_conversion_error_context() {
        let binder = Binder::new().with_source(source(&[("PORTS", "8080,invalid,9000")]));
        let mut ports: Vec<i64> = vec![1];
        let err = binder
            .bind_field(&mut ports, &FieldTags::new("ports", &[("env", "PORTS")]))
            .unwrap_err();
        match &err {
            BindError::Conversion {
                field,
                variable,
                source,
            } => {
                assert_eq!(*field, "ports");
                assert_eq!(variable, "PORTS");
                assert!(source.to_string().contains("'invalid'"));
            }
            other => panic!("Expected Conversion, got {other:?}"),
        }
        assert_eq!(ports, vec![1]);
    }

    #[test]
    fn test_malformed_annotation_ignores_environment() {
        let binder = Binder::new().with_source(source(&[("APP_NAME", "svc")]));
        let mut name = String::new();
        let err = binder
            .bind_field(&mut name, &FieldTags::new("name", &[("env", "APP_NAME,default")]))
            .unwrap_err();
        assert!(matches!(
            err,
            BindError::MalformedAnnotation { field: "name", .. }
        ));
        assert!(name.is_empty());
    }

    #[test]
    fn test_unsupported_element_type() {
        let binder = Binder::new().with_source(source(&[("FLAGS", "true")]));
        let mut flags: Vec<bool> = Vec::new();
        let err = binder
            .bind_field(&mut flags, &FieldTags::new("flags", &[("env", "FLAGS")]))
            .unwrap_err();
        assert!(matches!(err, BindError::UnsupportedType { field: "flags", .. }));
    }
}
