//! Deprecation shims for the renamed Ipopt problem interface.
//!
//! The interface entry point was renamed from `problem` to `Problem`. The wrappers in this crate
//! keep the old names working: each use emits a [`Category::Future`] warning through a
//! [`WarningSink`] and then delegates, unchanged, to the replacement.

mod config;
mod decorator;
mod message;
mod problem;
mod result;
mod watchers;

pub mod prelude;

pub use config::{ShimConfig, FILTERS_ENV};
pub use decorator::{deprecated_warning, Decorator, Deprecated, Owner};
pub use message::{generate_deprecation_warning_msg, Deprecation, Kind, DEFAULT_LIBRARY};
pub use problem::{problem, DeprecatedClass};
pub use result::DeprecationError;
pub use watchers::{
    Action, Broadcast, CapturingSink, Category, Filter, FilteredSink, TracingSink, Warning,
    WarningSink,
};

pub use tracing::Level;
