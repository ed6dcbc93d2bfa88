//! Formatting of the user facing deprecation messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DeprecationError;

/// The library named in every message unless a wrapper is configured otherwise
pub const DEFAULT_LIBRARY: &str = "CyIpopt";

/// The kind of object being deprecated
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Class,
    Function,
    Method,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::Method => "method",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = DeprecationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Self::Class),
            "function" => Ok(Self::Function),
            "method" => Ok(Self::Method),
            other => Err(DeprecationError::UnknownKind(other.to_owned())),
        }
    }
}

/// Describes a single deprecated name and the name replacing it
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Deprecation {
    /// What kind of object is deprecated
    pub what: Kind,
    /// The name being deprecated
    pub old_name: String,
    /// The name callers should use instead
    pub new_name: String,
    /// The class owning the deprecated object, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Deprecation {
    pub fn new(what: Kind, old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            what,
            old_name: old_name.into(),
            new_name: new_name.into(),
            class_name: None,
        }
    }

    #[must_use]
    pub fn in_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Format the message naming [`DEFAULT_LIBRARY`]
    pub fn message(&self) -> Result<String, DeprecationError> {
        self.message_in(DEFAULT_LIBRARY)
    }

    /// Format the message naming `library`
    ///
    /// A descriptor for a [`Kind::Class`] which also carries a `class_name` is rejected with
    /// [`DeprecationError::IncorrectArguments`]. Note this is the combination of a class owning a
    /// class, and not the `function` or `method` kinds, which may be owned by a class freely.
    pub fn message_in(&self, library: &str) -> Result<String, DeprecationError> {
        if self.what == Kind::Class && self.class_name.is_some() {
            return Err(DeprecationError::IncorrectArguments);
        }
        let class_name_msg = match &self.class_name {
            Some(class_name) => format!("in class '{class_name}' "),
            None => String::new(),
        };
        Ok(format!(
            "The {} named '{}' {}will soon be deprecated in {}. Please replace all uses and use '{}' going forward.",
            self.what, self.old_name, class_name_msg, library, self.new_name
        ))
    }
}

/// Create a user friendly deprecation message
///
/// The `class_name` clause is only included when a class name is given. Passing a class name
/// alongside [`Kind::Class`] fails with [`DeprecationError::IncorrectArguments`].
///
/// ```
/// use ipopt_deprecation::{generate_deprecation_warning_msg, Kind};
///
/// let msg = generate_deprecation_warning_msg(Kind::Function, "problem", "Problem", None).unwrap();
/// assert_eq!(
///     msg,
///     "The function named 'problem' will soon be deprecated in CyIpopt. \
///      Please replace all uses and use 'Problem' going forward."
/// );
/// ```
pub fn generate_deprecation_warning_msg(
    what: Kind,
    old_name: &str,
    new_name: &str,
    class_name: Option<&str>,
) -> Result<String, DeprecationError> {
    let mut deprecation = Deprecation::new(what, old_name, new_name);
    deprecation.class_name = class_name.map(str::to_owned);
    deprecation.message()
}
