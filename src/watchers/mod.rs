//! Sinks receiving the warnings emitted by the deprecation wrappers.
//!
//! Nothing in this crate writes to process-wide warning state. Every wrapper holds a handle to a
//! [`WarningSink`], so callers decide where warnings go and tests can capture them.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::DeprecationError;

mod capture;
mod filter;
mod tracing;

pub use capture::CapturingSink;
pub use filter::{Action, Filter, FilteredSink};
pub use self::tracing::TracingSink;

/// Category of an emitted warning
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Behaviour will change or be removed in a future release
    ///
    /// This is the category used for every warning the wrappers emit, as it is aimed at the end
    /// users of the library rather than its developers.
    Future,
    Deprecation,
    PendingDeprecation,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Future => "future",
            Self::Deprecation => "deprecation",
            Self::PendingDeprecation => "pending-deprecation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DeprecationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "future" => Ok(Self::Future),
            "deprecation" => Ok(Self::Deprecation),
            "pending-deprecation" | "pending_deprecation" => Ok(Self::PendingDeprecation),
            _ => Err(DeprecationError::UnknownCategory(s.to_owned())),
        }
    }
}

/// A single warning
#[derive(Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Warning {
    pub category: Category,
    pub message: String,
}

impl Warning {
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn future(message: impl Into<String>) -> Self {
        Self::new(Category::Future, message)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} warning: {}", self.category, self.message)
    }
}

/// Receives warnings
///
/// A sink may return an error to signal the warning has been upgraded to a failure, in which
/// case the wrapper emitting it does not go on to call the deprecated object.
pub trait WarningSink: Send + Sync {
    fn emit(&self, warning: Warning) -> Result<(), DeprecationError>;
}

impl<W: WarningSink + ?Sized> WarningSink for Arc<W> {
    fn emit(&self, warning: Warning) -> Result<(), DeprecationError> {
        (**self).emit(warning)
    }
}

/// Fans warnings out to a set of attached sinks
///
/// Sinks are held weakly: dropping the last strong handle to a sink detaches it.
#[derive(Default)]
pub struct Broadcast(RwLock<Vec<Weak<dyn WarningSink>>>);

impl Broadcast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `sink`, pruning any previously attached sinks which have since been dropped
    pub fn attach(&self, sink: &Arc<dyn WarningSink>) {
        let mut sinks = self.0.write();
        sinks.retain(|s| s.strong_count() > 0);
        sinks.push(Arc::downgrade(sink));
    }

    pub fn detach(&self, sink: &Arc<dyn WarningSink>) {
        let sink = Arc::downgrade(sink);
        self.0.write().retain(|s| !s.ptr_eq(&sink));
    }

    /// Number of attached sinks which are still alive
    pub fn len(&self) -> usize {
        self.0.read().iter().filter(|s| s.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for Broadcast {
    /// Every live sink sees the warning, the first error returned by any of them is reported.
    fn emit(&self, warning: Warning) -> Result<(), DeprecationError> {
        let sinks: Vec<_> = self.0.read().iter().filter_map(Weak::upgrade).collect();
        let mut result = Ok(());
        for sink in sinks {
            let emitted = sink.emit(warning.clone());
            if result.is_ok() {
                result = emitted;
            }
        }
        result
    }
}
