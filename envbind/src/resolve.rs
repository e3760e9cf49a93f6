//! Environment sources and value resolution

use crate::annotation::Annotation;
use crate::error::BindError;
use std::collections::{BTreeMap, HashMap};
use std::env::{self, VarError};

/// A table of environment variables.
///
/// Lookups distinguish an unset variable (`Ok(None)`) from one set to the
/// empty string (`Ok(Some(""))`). A variable holding data that is not valid
/// unicode is reported as `VarError::NotUnicode`.
pub trait Environment {
    /// Look up a variable by exact, case-sensitive name
    fn lookup(&self, name: &str) -> Result<Option<String>, VarError>;
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    /// Names the OS cannot hold (empty, containing `=` or NUL) are unset.
    fn lookup(&self, name: &str) -> Result<Option<String>, VarError> {
        if name.is_empty() || name.contains(['=', '\0']) {
            return Ok(None);
        }
        match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Environment for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Result<Option<String>, VarError> {
        Ok(self.get(name).cloned())
    }
}

impl Environment for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Result<Option<String>, VarError> {
        Ok(self.get(name).cloned())
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Result<Option<String>, VarError> {
        (**self).lookup(name)
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Environment,
    Default,
}

/// Outcome of resolving one annotated field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Text to convert into the field
    Value { text: String, source: Source },
    /// Optional variable is absent and has no default; leave the field alone
    Skip,
}

/// Resolve the text for one field.
///
/// Priority order:
/// 1. The environment variable `variable`, even when set to an empty string
/// 2. The annotation's default literal
/// 3. Skip, if the annotation is optional
/// 4. `MissingRequired` error
pub fn resolve<E>(
    env: &E,
    field: &'static str,
    variable: &str,
    annotation: &Annotation,
) -> Result<Resolved, BindError>
where
    E: Environment + ?Sized,
{
    let found = match env.lookup(variable) {
        Ok(found) => found,
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => {
            return Err(BindError::NotUnicode {
                field,
                variable: variable.to_string(),
            })
        }
    };

    if let Some(text) = found {
        return Ok(Resolved::Value {
            text,
            source: Source::Environment,
        });
    }

    if let Some(default) = &annotation.default {
        return Ok(Resolved::Value {
            text: default.clone(),
            source: Source::Default,
        });
    }

    if annotation.optional {
        return Ok(Resolved::Skip);
    }

    Err(BindError::missing(field, variable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn annotation(text: &str) -> Annotation {
        Annotation::parse(text).unwrap()
    }

    #[test]
    fn test_environment_wins_over_default() {
        let env = env_of(&[("PORT", "9000")]);
        let resolved = resolve(&env, "port", "PORT", &annotation("PORT,default=80")).unwrap();
        assert_eq!(
            resolved,
            Resolved::Value {
                text: "9000".to_string(),
                source: Source::Environment
            }
        );
    }

    #[test]
    fn test_empty_value_is_not_absent() {
        let env = env_of(&[("PORT", "")]);
        let resolved = resolve(&env, "port", "PORT", &annotation("PORT,default=80")).unwrap();
        assert_eq!(
            resolved,
            Resolved::Value {
                text: String::new(),
                source: Source::Environment
            }
        );
    }

    #[test]
    fn test_default_when_absent() {
        let env = env_of(&[]);
        let resolved = resolve(&env, "port", "PORT", &annotation("PORT,default=80")).unwrap();
        assert_eq!(
            resolved,
            Resolved::Value {
                text: "80".to_string(),
                source: Source::Default
            }
        );
    }

    #[test]
    fn test_default_wins_over_optional() {
        let env = env_of(&[]);
        let resolved = resolve(
            &env,
            "port",
            "PORT",
            &annotation("PORT,optional,default=80"),
        )
        .unwrap();
        assert!(matches!(
            resolved,
            Resolved::Value {
                source: Source::Default,
                ..
            }
        ));
    }

    #[test]
    fn test_optional_absent_is_skipped() {
        let env = env_of(&[]);
        let resolved = resolve(&env, "extra", "EXTRA", &annotation("EXTRA,optional")).unwrap();
        assert_eq!(resolved, Resolved::Skip);
    }

    #[test]
    fn test_required_absent_fails() {
        let env = env_of(&[]);
        let err = resolve(&env, "name", "APP_NAME", &annotation("APP_NAME")).unwrap_err();
        match err {
            BindError::MissingRequired { field, variable } => {
                assert_eq!(field, "name");
                assert_eq!(variable, "APP_NAME");
            }
            other => panic!("Expected MissingRequired, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_process_env_lookup() {
        env::set_var("ENVBIND_TEST_LOOKUP", "");
        env::remove_var("ENVBIND_TEST_LOOKUP_MISSING");

        assert_eq!(
            ProcessEnv.lookup("ENVBIND_TEST_LOOKUP").unwrap(),
            Some(String::new())
        );
        assert_eq!(ProcessEnv.lookup("ENVBIND_TEST_LOOKUP_MISSING").unwrap(), None);
        assert_eq!(ProcessEnv.lookup("ENVBIND=TEST").unwrap(), None);
        assert_eq!(ProcessEnv.lookup("ENVBIND\0TEST").unwrap(), None);

        env::remove_var("ENVBIND_TEST_LOOKUP");
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_process_env_not_unicode() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        env::set_var("ENVBIND_TEST_BYTES", OsStr::from_bytes(&[0x66, 0x6f, 0x80]));

        assert!(matches!(
            ProcessEnv.lookup("ENVBIND_TEST_BYTES"),
            Err(VarError::NotUnicode(_))
        ));

        let err = resolve(
            &ProcessEnv,
            "token",
            "ENVBIND_TEST_BYTES",
            &annotation("ENVBIND_TEST_BYTES,default=x"),
        )
        .unwrap_err();
        match &err {
            BindError::NotUnicode { field, variable } => {
                assert_eq!(*field, "token");
                assert_eq!(variable, "ENVBIND_TEST_BYTES");
            }
            other => panic!("Expected NotUnicode, got {other:?}"),
        }
        assert!(err.to_string().contains("'token'"));

        env::remove_var("ENVBIND_TEST_BYTES");
    }
}
