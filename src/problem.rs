//! Continued support for the old lowercase `problem` entry point.
//!
//! The replacement type is supplied by the caller and only has to be constructible from the
//! arguments being forwarded. The substitute never produces a value of its own.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use crate::message::{Deprecation, Kind, DEFAULT_LIBRARY};
use crate::watchers::{TracingSink, Warning, WarningSink};
use crate::DeprecationError;

/// Stand-in for a renamed type `T`
///
/// Constructing through the substitute emits a warning and then builds a `T` from the same
/// arguments.
pub struct DeprecatedClass<T> {
    deprecation: Deprecation,
    library: String,
    sink: Arc<dyn WarningSink>,
    replacement: PhantomData<fn() -> T>,
}

impl<T> Clone for DeprecatedClass<T> {
    fn clone(&self) -> Self {
        Self {
            deprecation: self.deprecation.clone(),
            library: self.library.clone(),
            sink: Arc::clone(&self.sink),
            replacement: PhantomData,
        }
    }
}

impl<T> DeprecatedClass<T> {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            deprecation: Deprecation::new(Kind::Class, old_name, new_name),
            library: DEFAULT_LIBRARY.to_owned(),
            sink: Arc::new(TracingSink::default()),
            replacement: PhantomData,
        }
    }

    /// The substitute for `Problem` under its old name `problem`
    pub fn problem() -> Self {
        Self::new("problem", "Problem")
    }

    #[must_use]
    pub fn library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn deprecation(&self) -> &Deprecation {
        &self.deprecation
    }

    /// The warning message emitted on each construction
    pub fn message(&self) -> Result<String, DeprecationError> {
        self.deprecation.message_in(&self.library)
    }

    fn warn(&self) -> Result<(), DeprecationError> {
        self.sink.emit(Warning::future(self.message()?))?;
        trace!(
            old_name = self.deprecation.old_name.as_str(),
            new_name = self.deprecation.new_name.as_str(),
            "redirecting deprecated construction"
        );
        Ok(())
    }

    /// Warn, then construct the replacement from `args`
    pub fn construct<A>(&self, args: A) -> Result<T, DeprecationError>
    where
        T: From<A>,
    {
        self.warn()?;
        Ok(T::from(args))
    }

    /// Warn, then attempt to construct the replacement from `args`
    ///
    /// The outer error is the deprecation machinery's, the inner result is exactly what the
    /// replacement's `TryFrom` returned.
    pub fn try_construct<A>(&self, args: A) -> Result<Result<T, T::Error>, DeprecationError>
    where
        T: TryFrom<A>,
    {
        self.warn()?;
        Ok(T::try_from(args))
    }
}

/// Construct a `T` through the old `problem` name, warning via [`TracingSink`]
pub fn problem<T, A>(args: A) -> Result<T, DeprecationError>
where
    T: From<A>,
{
    DeprecatedClass::problem().construct(args)
}
