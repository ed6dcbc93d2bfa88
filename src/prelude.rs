pub use crate::deprecated_warning;
pub use crate::problem::problem;
pub use crate::CapturingSink;
pub use crate::DeprecatedClass;
pub use crate::DeprecationError;
pub use crate::Kind;
pub use crate::ShimConfig;
pub use crate::TracingSink;
pub use crate::Warning;
pub use crate::WarningSink;
