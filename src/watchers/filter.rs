//! Warning filter policies.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::watchers::{Category, Warning, WarningSink};
use crate::DeprecationError;

/// What to do with a warning matched by a [`Filter`]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Pass on every occurrence
    #[default]
    Always,
    /// Drop the warning
    Ignore,
    /// Pass on the first occurrence of each distinct warning only
    Once,
    /// Turn the warning into a [`DeprecationError::Raised`]
    Error,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Ignore => "ignore",
            Self::Once => "once",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DeprecationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "ignore" => Ok(Self::Ignore),
            "once" => Ok(Self::Once),
            "error" => Ok(Self::Error),
            _ => Err(DeprecationError::UnknownAction(s.to_owned())),
        }
    }
}

/// A single entry of a filter policy
///
/// A filter matches a warning when the category matches (or is unset) and the message starts
/// with `message` (or it is unset).
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Filter {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Filter {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            category: None,
            message: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn message(mut self, prefix: impl Into<String>) -> Self {
        self.message = Some(prefix.into());
        self
    }

    pub fn matches(&self, warning: &Warning) -> bool {
        self.category.map_or(true, |c| c == warning.category)
            && self
                .message
                .as_deref()
                .map_or(true, |prefix| warning.message.starts_with(prefix))
    }
}

/// Parses `action[:category[:message-prefix]]`, empty fields match anything
///
/// Every field is trimmed of surrounding whitespace, so a prefix given this way cannot begin or
/// end with a space. `"error:future"` raises every future warning, `"ignore::The method"` silences warnings about
/// methods of any category.
impl FromStr for Filter {
    type Err = DeprecationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.splitn(3, ':');
        let action = fields.next().unwrap_or_default().parse()?;
        let category = match fields.next().map(str::trim) {
            None | Some("") => None,
            Some(category) => Some(category.parse()?),
        };
        let message = fields
            .next()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_owned);
        Ok(Self {
            action,
            category,
            message,
        })
    }
}

/// Applies a filter policy before handing warnings to an inner sink
///
/// Filters are checked in order and the first match decides the [`Action`]. Warnings matching no
/// filter are always passed on.
pub struct FilteredSink {
    inner: Box<dyn WarningSink>,
    filters: RwLock<Vec<Filter>>,
    seen: Mutex<HashSet<Warning>>,
}

impl FilteredSink {
    pub fn new(inner: impl WarningSink + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            filters: RwLock::new(vec![]),
            seen: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn with_filters(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.write().extend(filters);
        self
    }

    /// Add a filter ahead of all existing ones
    pub fn insert(&self, filter: Filter) {
        self.filters.write().insert(0, filter);
    }

    /// Add a filter behind all existing ones
    pub fn append(&self, filter: Filter) {
        self.filters.write().push(filter);
    }

    pub fn filters(&self) -> Vec<Filter> {
        self.filters.read().clone()
    }

    /// Remove all filters and forget which warnings were already seen
    pub fn reset(&self) {
        self.filters.write().clear();
        self.seen.lock().clear();
    }

    fn action_for(&self, warning: &Warning) -> Action {
        self.filters
            .read()
            .iter()
            .find(|filter| filter.matches(warning))
            .map(|filter| filter.action)
            .unwrap_or_default()
    }
}

impl WarningSink for FilteredSink {
    fn emit(&self, warning: Warning) -> Result<(), DeprecationError> {
        match self.action_for(&warning) {
            Action::Always => self.inner.emit(warning),
            Action::Ignore => {
                debug!(category = warning.category.as_str(), "ignored warning");
                Ok(())
            }
            Action::Once => {
                if self.seen.lock().insert(warning.clone()) {
                    self.inner.emit(warning)
                } else {
                    debug!(category = warning.category.as_str(), "repeated warning");
                    Ok(())
                }
            }
            Action::Error => Err(DeprecationError::Raised(warning)),
        }
    }
}
