//! Runtime configuration of the library name and the warning filter policy.

use std::env::{self, VarError};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::decorator::Decorator;
use crate::message::DEFAULT_LIBRARY;
use crate::problem::DeprecatedClass;
use crate::watchers::{Filter, FilteredSink, TracingSink, WarningSink};
use crate::DeprecationError;

/// Environment variable holding a comma separated list of filter specs
pub const FILTERS_ENV: &str = "IPOPT_DEPRECATION_WARNINGS";

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShimConfig {
    /// Library named in the warning messages
    pub library: String,
    /// Filter policy, first match wins
    pub filters: Vec<Filter>,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            library: DEFAULT_LIBRARY.to_owned(),
            filters: vec![],
        }
    }
}

impl ShimConfig {
    /// Read the filter policy from [`FILTERS_ENV`]
    ///
    /// An unset or empty variable gives the default configuration, a value which is not valid
    /// unicode is an error rather than being skipped.
    pub fn from_env() -> Result<Self, DeprecationError> {
        match env::var(FILTERS_ENV) {
            Ok(specs) => Self::default().with_filter_specs(&specs),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(DeprecationError::NotUnicode(FILTERS_ENV)),
        }
    }

    /// Append the filters in a comma separated list of specs
    ///
    /// Commas always separate specs, so a message prefix given here cannot contain one. Build the
    /// [`Filter`] directly for such prefixes.
    pub fn with_filter_specs(mut self, specs: &str) -> Result<Self, DeprecationError> {
        for spec in specs.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            self.filters.push(spec.parse()?);
        }
        Ok(self)
    }

    /// Configure the attached filters.
    #[must_use]
    pub fn configure<F: FnOnce(Vec<Filter>) -> Vec<Filter>>(mut self, configure: F) -> Self {
        self.filters = configure(self.filters);
        self
    }

    /// A [`TracingSink`] behind this configuration's filters
    pub fn sink(&self) -> Arc<dyn WarningSink> {
        Arc::new(FilteredSink::new(TracingSink::default()).with_filters(self.filters.clone()))
    }

    pub fn decorator(&self, new_name: impl Into<String>) -> Decorator {
        Decorator::new(new_name)
            .library(self.library.clone())
            .with_sink(self.sink())
    }

    pub fn class<T>(
        &self,
        old_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> DeprecatedClass<T> {
        DeprecatedClass::new(old_name, new_name)
            .library(self.library.clone())
            .with_sink(self.sink())
    }
}
