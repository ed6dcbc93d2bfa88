//! This module defines the error type shared by the message formatter, the wrappers and the
//! warning sinks.
//!
//! Errors raised by the wrapped callable or by the replacement type never pass through here. They
//! are handed back to the caller exactly as the delegate produced them.

use crate::watchers::Warning;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// An error raised by the deprecation machinery itself
pub enum DeprecationError {
    /// A `class_name` was supplied while describing a deprecated class
    #[error("Incorrect use of function arguments.")]
    IncorrectArguments,
    #[error("unknown kind of deprecated object: {0:?}, expected one of class, function or method")]
    UnknownKind(String),
    #[error("unknown warning filter action: {0:?}")]
    UnknownAction(String),
    #[error("unknown warning category: {0:?}")]
    UnknownCategory(String),
    /// The callable's type name does not end in an item name, as for closures
    #[error("no declared name in {0:?}, give the deprecated name explicitly")]
    UnnamedCallable(String),
    #[error("environment variable {0} is set but is not valid unicode")]
    NotUnicode(&'static str),
    /// The warning filter policy upgraded the warning to an error
    ///
    /// When this is returned from a wrapper the delegate was not invoked.
    #[error("{0}")]
    Raised(Warning),
}
