use ::tracing::{debug, error, info, trace, warn, Level};

use crate::watchers::{Warning, WarningSink};
use crate::DeprecationError;

/// A sink using the [`tracing`](https://crates.io/crates/tracing) crate as backend.
///
/// This is the sink used by every wrapper unless another is supplied.
#[derive(Clone, Debug)]
pub struct TracingSink {
    level: Level,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self { level: Level::WARN }
    }
}

impl TracingSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl WarningSink for TracingSink {
    fn emit(&self, warning: Warning) -> Result<(), DeprecationError> {
        let category = warning.category.as_str();
        let message = warning.message.as_str();
        match self.level {
            Level::ERROR => error!(category, "{message}"),
            Level::WARN => warn!(category, "{message}"),
            Level::INFO => info!(category, "{message}"),
            Level::DEBUG => debug!(category, "{message}"),
            _ => trace!(category, "{message}"),
        };
        Ok(())
    }
}
