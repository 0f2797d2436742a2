//! allows: fluent configuration of mock call behavior
//!
//! This crate lets a test say "when method M is called with these
//! arguments, do this" and installs that behavior on a [`Mock`]. The
//! behavior is one of: return a value, return a sequence of values, raise an
//! error, or run a custom function.
//!
//! # Features
//!
//! - **Fluent grammar**: `allow(&mock).to(receive_method("m").called_with(..)?.and_return(..)?)`
//! - **Exact dispatch** on positional and keyword arguments via [`DispatchTable`]
//! - **Merging**: configurations for the same method accumulate in one table
//! - **Write-once builders** that reject conflicting configuration at the offending call
//!
//! # Example
//!
//! ```
//! use allows::{AllowsError, Mock, Raised, allow, call, receive_method};
//!
//! # fn main() -> allows::Result<()> {
//! let mock = Mock::new();
//!
//! allow(&mock).to(receive_method("foo").and_return([1, 2, 3])?)?;
//! let seen: Vec<_> = (0..5).map(|_| mock.call_method("foo", &call!())).collect::<Result<_, _>>()?;
//! assert_eq!(seen, [1, 2, 3, 3, 3]);
//!
//! let bad_stuff = Raised::msg("Bad Stuff");
//! allow(&mock).to(
//!     receive_method("process")
//!         .called_with(call!("badstuff", thing = "yo"))?
//!         .and_raise(bad_stuff.clone())?,
//! )?;
//! let err = mock.call_method("process", &call!("badstuff", thing = "yo")).unwrap_err();
//! assert!(err.raised().is_some_and(|r| r.same_instance(&bad_stuff)));
//!
//! let err = mock.call_method("process", &call!("other")).unwrap_err();
//! assert!(matches!(err, AllowsError::UnmatchedCall { .. }));
//! # Ok(())
//! # }
//! ```

// Lets `call!` expand to `::allows::Call` inside this crate too.
extern crate self as allows;

pub use allows_macros::call;

mod allow;
mod call;
mod dispatch;
mod effect;
mod extension;
mod factory;

pub mod config;
pub mod error;
pub mod mock;
pub mod prelude;

pub use allow::{Allow, allow};
pub use call::{Call, Value};
pub use config::{AllowsConfig, LoggingConfig};
pub use dispatch::{DispatchTable, Entry, Hook};
pub use effect::Effect;
pub use error::{AllowsError, Field, Raised, Result};
pub use extension::{ExtensionParts, IntoExtension, MockExtension};
pub use factory::{
    be_called_with, have_effect, raise_, raise_exception, receive, receive_method, return_,
    return_value, returning,
};
pub use mock::Mock;
