//! Error types for allows.
//!
//! This module defines the configuration error returned for every contract
//! violation, plus [`Raised`], the shared error instance an effect fails
//! with when it was configured to raise.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::call::Call;

/// Which write-once field of a mock extension was set twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The target method name.
    MethodName,
    /// The call signature.
    CallArgs,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MethodName => f.write_str("method names"),
            Self::CallArgs => f.write_str("call args"),
        }
    }
}

/// An error instance raised by a configured effect.
///
/// Clones share the underlying error, so the instance handed to
/// [`and_raise`](crate::MockExtension::and_raise) is the one every matching
/// invocation fails with. Use [`Raised::same_instance`] to check identity
/// and [`Raised::downcast_ref`] to inspect the concrete type.
#[derive(Clone)]
pub struct Raised {
    inner: Arc<dyn std::error::Error + Send + Sync + 'static>,
}

impl Raised {
    /// Wrap an error so it can be raised by an effect.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Raise a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(RaisedMessage(message.into()))
    }

    /// Whether both handles refer to the same error instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrow the concrete error, if it is an `E`.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Borrow the wrapped error.
    #[must_use]
    pub fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<E> From<E> for Raised
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

/// Message-only error used by [`Raised::msg`].
#[derive(Debug, Error)]
#[error("{0}")]
struct RaisedMessage(String);

/// The main error type for allows operations.
#[derive(Debug, Error)]
pub enum AllowsError {
    /// A write-once builder field was set a second time.
    #[error("cannot set multiple {field} in one effect")]
    DuplicateField {
        /// The field that was already set.
        field: Field,
    },

    /// More than one effect was supplied to a single builder.
    #[error("cannot set multiple effects: only one of return values, raised error or custom effect can be provided")]
    MultipleEffects,

    /// A return-values effect was built from an empty sequence.
    #[error("at least one return value must be provided")]
    EmptyReturnValues,

    /// The target already carries a hook that this library did not install.
    #[error("cannot extend side effect of '{target}': existing hook was not created by allows")]
    ForeignHook {
        /// Name of the mock whose hook was foreign.
        target: String,
    },

    /// No registered call signature matched the invocation.
    #[error("no side effect configured on '{target}' for {call}")]
    UnmatchedCall {
        /// Name of the mock that was invoked.
        target: String,
        /// The call that had no match.
        call: Call,
    },

    /// A configured effect raised an error.
    #[error("{0}")]
    Raised(Raised),

    /// Invalid configuration input.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// An I/O error occurred while loading configuration.
    #[error("{context}: {source}")]
    Io {
        /// What operation was being performed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for allows operations.
pub type Result<T> = std::result::Result<T, AllowsError>;

impl AllowsError {
    /// Create a duplicate field error.
    #[must_use]
    pub const fn duplicate_field(field: Field) -> Self {
        Self::DuplicateField { field }
    }

    /// Create a foreign hook error.
    pub fn foreign_hook(target: impl Into<String>) -> Self {
        Self::ForeignHook {
            target: target.into(),
        }
    }

    /// Create an unmatched call error.
    pub fn unmatched_call(target: impl Into<String>, call: Call) -> Self {
        Self::UnmatchedCall {
            target: target.into(),
            call,
        }
    }

    /// Create a raised error from any error value.
    pub fn raise(error: impl Into<Raised>) -> Self {
        Self::Raised(error.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io_context(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if this error is a misuse of the configuration grammar.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateField { .. }
                | Self::MultipleEffects
                | Self::EmptyReturnValues
                | Self::ForeignHook { .. }
        )
    }

    /// Check if this is an unmatched call error.
    #[must_use]
    pub const fn is_unmatched(&self) -> bool {
        matches!(self, Self::UnmatchedCall { .. })
    }

    /// Get the raised error if a configured effect failed.
    #[must_use]
    pub const fn raised(&self) -> Option<&Raised> {
        match self {
            Self::Raised(raised) => Some(raised),
            _ => None,
        }
    }
}

impl From<Raised> for AllowsError {
    fn from(raised: Raised) -> Self {
        Self::Raised(raised)
    }
}
