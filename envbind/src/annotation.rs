//! Parsing of `name[,optional][,default=value]` field annotations.

use crate::error::AnnotationError;

const OPTIONAL: &str = "optional";
const DEFAULT: &str = "default";
const DEFAULT_PREFIX: &str = "default=";

/// A validated field annotation.
///
/// Built from the raw tag text every time a record is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Environment variable to read, without any binder prefix
    pub name: String,
    /// Leave the field untouched when the variable is absent
    pub optional: bool,
    /// Literal used when the variable is absent
    pub default: Option<String>,
}

impl Annotation {
    /// Parse annotation text.
    ///
    /// The text is split on every `,`, so default literals cannot contain
    /// commas. Unknown options are rejected.
    ///
    /// ```rust
    /// use envbind::Annotation;
    ///
    /// let a = Annotation::parse("PORT,default=8080").unwrap();
    /// assert_eq!(a.name, "PORT");
    /// assert_eq!(a.default.as_deref(), Some("8080"));
    /// assert!(!a.optional);
    ///
    /// assert!(Annotation::parse("PORT,default").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, AnnotationError> {
        if text.is_empty() {
            return Err(AnnotationError::Empty);
        }

        let mut parts = text.split(',');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(AnnotationError::MissingName);
        }

        let mut annotation = Self {
            name: name.to_string(),
            optional: false,
            default: None,
        };

        for part in parts {
            if part == OPTIONAL {
                annotation.optional = true;
            } else if part == DEFAULT {
                return Err(AnnotationError::DefaultWithoutValue);
            } else if let Some(literal) = part.strip_prefix(DEFAULT_PREFIX) {
                if literal.is_empty() {
                    return Err(AnnotationError::DefaultWithoutValue);
                }
                annotation.default = Some(literal.to_string());
            } else {
                return Err(AnnotationError::UnknownOption(part.to_string()));
            }
        }

        Ok(annotation)
    }
}
