//! The `Record` trait implemented by bindable structs

use crate::binder::Binder;
use crate::error::BindError;
use crate::resolve::Environment;

/// A struct whose fields can be populated from environment variables.
///
/// Usually implemented with `#[derive(Record)]`. Manual implementations call
/// [`Binder::bind_field`] for each leaf field and [`Binder::bind_nested`] for
/// each nested record, in declaration order.
pub trait Record {
    /// Bind every field of this record.
    ///
    /// Prefer [`Binder::bind`], which also validates the binder configuration.
    fn bind_fields<E: Environment>(&mut self, binder: &Binder<E>) -> Result<(), BindError>;

    /// Load a record from the process environment
    ///
    /// Starts from `Default::default()` so optional fields without a value keep
    /// their zero value.
    ///
    /// # Errors
    ///
    /// Any error returned by [`Binder::bind`].
    fn from_env() -> Result<Self, BindError>
    where
        Self: Default + Sized,
    {
        let mut record = Self::default();
        Binder::new().bind(&mut record)?;
        Ok(record)
    }
}

/// Absent nested records are skipped.
impl<R: Record> Record for Option<R> {
    fn bind_fields<E: Environment>(&mut self, binder: &Binder<E>) -> Result<(), BindError> {
        match self {
            Some(record) => record.bind_fields(binder),
            None => Ok(()),
        }
    }
}

impl<R: Record> Record for Box<R> {
    fn bind_fields<E: Environment>(&mut self, binder: &Binder<E>) -> Result<(), BindError> {
        (**self).bind_fields(binder)
    }
}
