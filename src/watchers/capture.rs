use parking_lot::Mutex;

use crate::watchers::{Warning, WarningSink};
use crate::DeprecationError;

/// Records every warning it receives, in order.
#[derive(Debug, Default)]
pub struct CapturingSink {
    recorded: Mutex<Vec<Warning>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the warnings received so far
    pub fn warnings(&self) -> Vec<Warning> {
        self.recorded.lock().clone()
    }

    /// Messages of the warnings received so far
    pub fn messages(&self) -> Vec<String> {
        self.recorded
            .lock()
            .iter()
            .map(|w| w.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recorded.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.lock().is_empty()
    }

    /// Drain the recorded warnings
    pub fn clear(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.recorded.lock())
    }
}

impl WarningSink for CapturingSink {
    fn emit(&self, warning: Warning) -> Result<(), DeprecationError> {
        self.recorded.lock().push(warning);
        Ok(())
    }
}
