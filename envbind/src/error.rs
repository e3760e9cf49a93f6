//! Error types for binding environment variables into records

/// Errors that can occur while binding a record.
///
/// Every variant aborts the bind that produced it. Fields assigned before the
/// failure keep their new values, so a record that failed to bind should be
/// discarded.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BindError {
    /// The binder cannot run with its current configuration.
    #[error("invalid bind input: {reason}")]
    InvalidInput {
        /// What is wrong with the input
        reason: String,
    },

    /// A field's tag text does not follow `name[,optional][,default=value]`.
    #[error("invalid tag format for field '{field}': {source}")]
    MalformedAnnotation {
        /// Rust name of the field carrying the tag
        field: &'static str,
        /// What the parser rejected
        source: AnnotationError,
    },

    /// Required environment variable is not set.
    ///
    /// Occurs when a field's variable is absent and its annotation has neither
    /// `optional` nor `default=...`.
    #[error("required environment variable '{variable}' not set (field '{field}')")]
    MissingRequired {
        /// Rust name of the field
        field: &'static str,
        /// Full name of the environment variable, prefix included
        variable: String,
    },

    /// The resolved text cannot be converted into the field's type.
    #[error("failed to set field '{field}' from '{variable}': {source}")]
    Conversion {
        /// Rust name of the field
        field: &'static str,
        /// Environment variable (or default) the text came from
        variable: String,
        /// Parser failure, including the offending text
        source: ConvertError,
    },

    /// The field's declared type has no conversion from text.
    #[error("failed to set field '{field}': {detail}")]
    UnsupportedType {
        /// Rust name of the field
        field: &'static str,
        /// Which part of the type was rejected
        detail: String,
    },

    /// The environment variable is set but holds non-UTF-8 data.
    #[error("environment variable '{variable}' is not valid unicode (field '{field}')")]
    NotUnicode {
        /// Rust name of the field
        field: &'static str,
        /// Full name of the environment variable
        variable: String,
    },
}

/// Reasons an annotation string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    #[error("annotation must not be empty")]
    Empty,

    #[error("annotation must have a name")]
    MissingName,

    #[error("default option must have a value")]
    DefaultWithoutValue,

    #[error("unknown tag option: {0}")]
    UnknownOption(String),
}

/// Failures converting resolved text into a field value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("cannot parse '{value}' as {type_name}: {message}")]
    Parse {
        /// The exact text that failed, a single element for list fields
        value: String,
        /// Fully qualified type name that parsing was attempted for
        type_name: &'static str,
        /// Error message from the underlying parser
        message: String,
    },

    /// List fields only accept string and integer elements.
    #[error("unsupported slice element type {type_name}")]
    UnsupportedElement {
        /// Fully qualified element type name
        type_name: &'static str,
    },
}

impl ConvertError {
    /// Create a parse error for a value of type `T`
    pub fn parse_error<T>(value: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            value: value.into(),
            type_name: std::any::type_name::<T>(),
            message: message.to_string(),
        }
    }

    /// Create an unsupported element error for element type `T`
    pub fn unsupported_element<T>() -> Self {
        Self::UnsupportedElement {
            type_name: std::any::type_name::<T>(),
        }
    }
}

impl BindError {
    /// Create a missing variable error
    pub(crate) fn missing(field: &'static str, variable: impl Into<String>) -> Self {
        Self::MissingRequired {
            field,
            variable: variable.into(),
        }
    }

    /// Attach field context to a conversion failure.
    ///
    /// Unsupported element types are reported as unsupported field types.
    pub(crate) fn conversion(
        field: &'static str,
        variable: impl Into<String>,
        source: ConvertError,
    ) -> Self {
        match source {
            source @ ConvertError::UnsupportedElement { .. } => Self::UnsupportedType {
                field,
                detail: source.to_string(),
            },
            source => Self::Conversion {
                field,
                variable: variable.into(),
                source,
            },
        }
    }
}
