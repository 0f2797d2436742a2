//! Convenient re-exports for common allows usage.
//!
//! # Example
//!
//! ```
//! use allows::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mock = Mock::new();
//! allow(&mock).to(receive_method("process").with_effect(|_| Ok(Value::from(2 + 3)))?)?;
//! assert_eq!(mock.call_method("process", &call!())?, 5);
//! # Ok(())
//! # }
//! ```

// Grammar
pub use crate::{
    Allow, allow, be_called_with, have_effect, raise_, raise_exception, receive, receive_method,
    return_, return_value, returning,
};

// Building blocks
pub use crate::{Call, DispatchTable, Effect, ExtensionParts, Hook, MockExtension, Value, call};

// Mocks and configuration
pub use crate::config::{AllowsConfig, LoggingConfig};
pub use crate::mock::Mock;

// Error handling
pub use crate::error::{AllowsError, Raised, Result};
