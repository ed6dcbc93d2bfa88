//! Wrapping deprecated functions and methods.
//!
//! A [`Decorator`] carries everything known about a deprecation before the deprecated callable is
//! seen: the replacement name, whether the callable is a method of some class, the library named
//! in the message and the sink warnings are emitted to. Decorating a callable fixes its old name
//! and produces a [`Deprecated`] wrapper which warns once per call before delegating.

use std::any::type_name;
use std::sync::Arc;

use tracing::trace;

use crate::message::{Deprecation, Kind, DEFAULT_LIBRARY};
use crate::watchers::{TracingSink, Warning, WarningSink};
use crate::DeprecationError;

/// What owns the decorated callable
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Owner {
    /// A free function
    #[default]
    Free,
    /// A method of the named class
    Class(String),
}

/// Start configuring a decorator for a callable replaced by `new_name`
pub fn deprecated_warning(new_name: impl Into<String>) -> Decorator {
    Decorator::new(new_name)
}

/// Configuration for wrapping a deprecated callable
#[derive(Clone)]
pub struct Decorator {
    new_name: String,
    owner: Owner,
    library: String,
    sink: Arc<dyn WarningSink>,
}

impl Decorator {
    pub fn new(new_name: impl Into<String>) -> Self {
        Self {
            new_name: new_name.into(),
            owner: Owner::Free,
            library: DEFAULT_LIBRARY.to_owned(),
            sink: Arc::new(TracingSink::default()),
        }
    }

    /// Mark the decorated callable as a method of `class_name`
    #[must_use]
    pub fn method_of(mut self, class_name: impl Into<String>) -> Self {
        self.owner = Owner::Class(class_name.into());
        self
    }

    #[must_use]
    pub fn library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }

    /// Emit warnings to `sink` instead of the default [`TracingSink`]
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Wrap `func`, taking the deprecated name from its declaration
    ///
    /// For a `fn` item, inherent method or trait method this is the item's own name. Closures
    /// have no name of their own and are rejected with [`DeprecationError::UnnamedCallable`],
    /// wrap them with [`Decorator::decorate_as`] instead.
    pub fn decorate<F>(self, func: F) -> Result<Deprecated<F>, DeprecationError> {
        let full = type_name::<F>();
        let old_name = declared_name(full)
            .ok_or_else(|| DeprecationError::UnnamedCallable(full.to_owned()))?;
        Ok(self.decorate_as(old_name, func))
    }

    /// Wrap `func` under an explicitly given deprecated name
    pub fn decorate_as<F>(self, old_name: impl Into<String>, func: F) -> Deprecated<F> {
        let deprecation = match self.owner {
            Owner::Free => Deprecation::new(Kind::Function, old_name, self.new_name),
            Owner::Class(class_name) => {
                Deprecation::new(Kind::Method, old_name, self.new_name).in_class(class_name)
            }
        };
        Deprecated {
            func,
            deprecation,
            library: self.library,
            sink: self.sink,
        }
    }
}

/// The last path segment of a type name once every `<...>` group is removed
///
/// `<S as Solve>::solve` gives `solve` and `Wrapper<u8>::get` gives `get`. Returns `None` when
/// the last segment is not an identifier, as for `{{closure}}`.
fn declared_name(full: &str) -> Option<String> {
    let mut path = String::with_capacity(full.len());
    let mut depth = 0usize;
    let mut prev = None;
    for c in full.chars() {
        match c {
            '<' => depth += 1,
            // `->` inside a generic argument such as `fn(u8) -> u8`
            '>' if prev == Some('-') => {}
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => path.push(c),
            _ => {}
        }
        prev = Some(c);
    }
    let name = path.rsplit("::").next()?;
    let is_identifier = name
        .chars()
        .next()
        .map_or(false, |c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_identifier.then(|| name.to_owned())
}

/// A deprecated callable
///
/// Arguments are forwarded as a single value: callables of several parameters take a tuple or
/// an argument struct. The callable's return value, including any `Result`, is handed back
/// untouched inside the `Ok` of the wrapper.
pub struct Deprecated<F> {
    func: F,
    deprecation: Deprecation,
    library: String,
    sink: Arc<dyn WarningSink>,
}

impl<F> Deprecated<F> {
    pub fn old_name(&self) -> &str {
        &self.deprecation.old_name
    }

    pub fn new_name(&self) -> &str {
        &self.deprecation.new_name
    }

    pub fn deprecation(&self) -> &Deprecation {
        &self.deprecation
    }

    /// The warning message emitted on each call
    pub fn message(&self) -> Result<String, DeprecationError> {
        self.deprecation.message_in(&self.library)
    }

    /// Unwrap the original callable
    pub fn into_inner(self) -> F {
        self.func
    }

    fn warn(&self) -> Result<(), DeprecationError> {
        let message = self.message()?;
        self.sink.emit(Warning::future(message))?;
        trace!(
            old_name = self.old_name(),
            new_name = self.new_name(),
            "delegating deprecated call"
        );
        Ok(())
    }

    /// Warn, then call the wrapped callable
    pub fn call<A, R>(&self, args: A) -> Result<R, DeprecationError>
    where
        F: Fn(A) -> R,
    {
        self.warn()?;
        Ok((self.func)(args))
    }

    /// Warn, then call the wrapped callable mutably
    pub fn call_mut<A, R>(&mut self, args: A) -> Result<R, DeprecationError>
    where
        F: FnMut(A) -> R,
    {
        self.warn()?;
        Ok((self.func)(args))
    }
}
