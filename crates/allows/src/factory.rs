//! Factory functions that start a fluent chain.
//!
//! Each one is a fresh [`MockExtension`] with a single setter applied, so
//! `receive_method("foo")` is the same as
//! `MockExtension::new().on_method("foo")`.

use crate::call::{Call, Value};
use crate::effect::Effect;
use crate::error::{Raised, Result};
use crate::extension::MockExtension;

const fn with_effect(effect: Effect) -> MockExtension {
    MockExtension::from_fields(None, None, Some(effect))
}

/// Always return `value`.
#[must_use]
pub fn return_value(value: impl Into<Value>) -> MockExtension {
    with_effect(Effect::return_value(value))
}

/// Alias for [`return_value`].
#[must_use]
pub fn return_(value: impl Into<Value>) -> MockExtension {
    return_value(value)
}

/// Return `values` in order, then repeat the last one.
///
/// Fails with [`AllowsError::EmptyReturnValues`](crate::AllowsError::EmptyReturnValues)
/// when `values` is empty.
pub fn returning<I, V>(values: I) -> Result<MockExtension>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    MockExtension::new().and_return(values)
}

/// Fail every matching invocation with `error`.
#[must_use]
pub fn raise_exception(error: impl Into<Raised>) -> MockExtension {
    with_effect(Effect::raising(error))
}

/// Alias for [`raise_exception`].
#[must_use]
pub fn raise_(error: impl Into<Raised>) -> MockExtension {
    raise_exception(error)
}

/// Target the method at `name`.
#[must_use]
pub fn receive_method(name: impl Into<String>) -> MockExtension {
    MockExtension::from_fields(Some(name.into()), None, None)
}

/// Alias for [`receive_method`].
#[must_use]
pub fn receive(name: impl Into<String>) -> MockExtension {
    receive_method(name)
}

/// Only answer invocations whose arguments equal `call`.
#[must_use]
pub const fn be_called_with(call: Call) -> MockExtension {
    MockExtension::from_fields(None, Some(call), None)
}

/// Run `func` with the invocation's arguments.
#[must_use]
pub fn have_effect<F>(func: F) -> MockExtension
where
    F: Fn(&Call) -> Result<Value> + Send + Sync + 'static,
{
    with_effect(Effect::custom(func))
}
