//! Effects: what a matched call does.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::call::{Call, Value};
use crate::error::{AllowsError, Raised, Result};

type EffectFn = dyn Fn(&Call) -> Result<Value> + Send + Sync;

/// A callable unit of behavior, invoked with the arguments of the call it
/// was selected for.
///
/// Effects are cheap to clone; clones share state, so a sequence of return
/// values advances the same cursor no matter which clone is invoked.
#[derive(Clone)]
pub struct Effect {
    func: Arc<EffectFn>,
}

impl Effect {
    /// Effect that delegates to `func`.
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&Call) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Effect that always returns `value`.
    pub fn return_value(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::custom(move |_| Ok(value.clone()))
    }

    /// Effect that returns `values` in order, then repeats the last one.
    ///
    /// Fails with [`AllowsError::EmptyReturnValues`] if `values` is empty.
    pub fn returning<I, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(AllowsError::EmptyReturnValues);
        }

        let last = values.len() - 1;
        let cursor = AtomicUsize::new(0);
        Ok(Self::custom(move |_| {
            let index = cursor
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| {
                    Some((i + 1).min(last))
                })
                .unwrap_or(last);
            Ok(values[index].clone())
        }))
    }

    /// Effect that fails with `error` on every invocation.
    pub fn raising(error: impl Into<Raised>) -> Self {
        let raised = error.into();
        Self::custom(move |_| Err(AllowsError::Raised(raised.clone())))
    }

    /// The no-op effect, returning `Value::Null`.
    #[must_use]
    pub fn none() -> Self {
        Self::custom(|_| Ok(Value::Null))
    }

    /// Run the effect for `call`.
    pub fn invoke(&self, call: &Call) -> Result<Value> {
        (self.func)(call)
    }
}

impl Default for Effect {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect").finish_non_exhaustive()
    }
}
