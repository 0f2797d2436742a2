//! Stand-in mock objects.
//!
//! A [`Mock`] is a cheaply cloneable handle to shared state: a name,
//! auto-created child attributes, a return value, an optional [`Hook`] and
//! the list of calls it received. This is the surface [`allow`] configures;
//! it does no interception of real types.
//!
//! # Example
//!
//! ```
//! use allows::{Mock, Value, call};
//!
//! let mock = Mock::new();
//! assert_eq!(mock.call_method("client.fetch", &call!("id")).unwrap(), Value::Null);
//! assert_eq!(mock.resolve("client.fetch").call_count(), 1);
//! ```
//!
//! [`allow`]: crate::allow

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::call::{Call, Value};
use crate::config::AllowsConfig;
use crate::dispatch::{DispatchTable, Hook};
use crate::effect::Effect;
use crate::error::Result;

/// Default name of a root mock.
pub const DEFAULT_MOCK_NAME: &str = "mock";

/// Shared state for a mock.
#[derive(Debug)]
struct MockState {
    /// Dotted name, e.g. `mock.client.fetch`.
    name: String,
    /// Configuration, inherited by children.
    config: AllowsConfig,
    /// Child attributes, created on first access.
    children: BTreeMap<String, Mock>,
    /// Returned when no hook is installed.
    return_value: Value,
    /// Invocation hook.
    side_effect: Option<Hook>,
    /// Recorded calls.
    calls: Vec<Call>,
}

impl MockState {
    const fn new(name: String, config: AllowsConfig) -> Self {
        Self {
            name,
            config,
            children: BTreeMap::new(),
            return_value: Value::Null,
            side_effect: None,
            calls: Vec::new(),
        }
    }
}

/// A configurable stand-in object.
#[derive(Clone)]
pub struct Mock {
    state: Arc<Mutex<MockState>>,
}

impl Mock {
    /// Create a root mock with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::named(DEFAULT_MOCK_NAME)
    }

    /// Create a root mock with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::named_with_config(name, AllowsConfig::default())
    }

    /// Create a root mock with a configuration.
    #[must_use]
    pub fn with_config(config: AllowsConfig) -> Self {
        Self::named_with_config(DEFAULT_MOCK_NAME, config)
    }

    /// Create a root mock with a name and a configuration.
    #[must_use]
    pub fn named_with_config(name: impl Into<String>, config: AllowsConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::new(name.into(), config))),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The mock's dotted name.
    #[must_use]
    pub fn name(&self) -> String {
        self.state().name.clone()
    }

    /// The mock's configuration.
    #[must_use]
    pub fn config(&self) -> AllowsConfig {
        self.state().config.clone()
    }

    /// Get the child attribute `name`, creating it on first access.
    #[must_use]
    pub fn attr(&self, name: &str) -> Self {
        let mut state = self.state();
        if let Some(child) = state.children.get(name) {
            return child.clone();
        }
        let child = Self::named_with_config(
            format!("{}.{name}", state.name),
            state.config.clone(),
        );
        state.children.insert(name.to_string(), child.clone());
        child
    }

    /// Resolve a separator-delimited attribute path, one `attr` at a time.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Self {
        let separator = self.state().config.path_separator;
        path.split(separator)
            .fold(self.clone(), |target, segment| target.attr(segment))
    }

    /// Invoke the mock.
    ///
    /// The call is recorded first (when recording is enabled). With a hook
    /// installed the hook decides the outcome; otherwise the configured
    /// return value is returned.
    pub fn call(&self, call: &Call) -> Result<Value> {
        let (name, hook, return_value, trace) = {
            let mut state = self.state();
            if state.config.record_calls {
                state.calls.push(call.clone());
            }
            (
                state.name.clone(),
                state.side_effect.clone(),
                state.return_value.clone(),
                state.config.logging.trace_calls,
            )
        };

        if trace {
            tracing::trace!(mock = %name, %call, hooked = hook.is_some(), "mock called");
        }

        match hook {
            Some(hook) => hook.invoke(&name, call),
            None => Ok(return_value),
        }
    }

    /// Invoke the attribute at `path`.
    pub fn call_method(&self, path: &str, call: &Call) -> Result<Value> {
        self.resolve(path).call(call)
    }

    /// Set the value returned when no hook is installed.
    pub fn set_return_value(&self, value: impl Into<Value>) {
        self.state().return_value = value.into();
    }

    /// The value returned when no hook is installed.
    #[must_use]
    pub fn return_value(&self) -> Value {
        self.state().return_value.clone()
    }

    /// The installed hook, if any.
    #[must_use]
    pub fn side_effect(&self) -> Option<Hook> {
        self.state().side_effect.clone()
    }

    /// Replace the installed hook.
    pub fn set_side_effect(&self, hook: impl Into<Hook>) {
        self.state().side_effect = Some(hook.into());
    }

    /// Remove the installed hook.
    pub fn clear_side_effect(&self) {
        self.state().side_effect = None;
    }

    /// Register `effect` for `call` in this mock's dispatch table.
    ///
    /// Creates the table when no hook is installed and appends to it when
    /// one is. A hook not created by allows is left in place and the call
    /// fails with [`AllowsError::ForeignHook`](crate::AllowsError::ForeignHook).
    pub fn extend_side_effect(&self, call: Option<Call>, effect: Option<Effect>) -> Result<()> {
        let (name, entries, log) = {
            let mut state = self.state();
            let table =
                DispatchTable::from_base(&state.name, state.side_effect.as_ref(), call, effect)?;
            let entries = table.len();
            state.side_effect = Some(Hook::Dispatch(table));
            (state.name.clone(), entries, state.config.logging.log_installs)
        };

        if log {
            tracing::debug!(mock = %name, entries, "installed side effect");
        }
        Ok(())
    }

    /// Recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    /// Whether the mock was called at least once.
    #[must_use]
    pub fn called(&self) -> bool {
        self.call_count() > 0
    }

    /// The most recent call.
    #[must_use]
    pub fn last_call(&self) -> Option<Call> {
        self.state().calls.last().cloned()
    }

    /// Forget recorded calls. Hooks and return values are kept.
    pub fn reset_calls(&self) {
        self.state().calls.clear();
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Mock")
            .field("name", &state.name)
            .field("children", &state.children.len())
            .field("hooked", &state.side_effect.is_some())
            .field("calls", &state.calls.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_null_by_default() {
        let mock = Mock::new();
        assert_eq!(mock.call(&Call::new()).unwrap(), Value::Null);
    }

    #[test]
    fn returns_configured_value() {
        let mock = Mock::new();
        mock.set_return_value("bar");
        assert_eq!(mock.return_value(), json!("bar"));
        assert_eq!(mock.call(&Call::new().arg(1)).unwrap(), json!("bar"));
    }

    #[test]
    fn attr_is_stable() {
        let mock = Mock::new();
        let first = mock.attr("foo");
        first.set_return_value(1);
        assert_eq!(mock.attr("foo").return_value(), json!(1));
        assert_eq!(first.name(), "mock.foo");
    }

    #[test]
    fn resolve_walks_dotted_path() {
        let mock = Mock::named("subject");
        let nested = mock.resolve("a.b.c");
        assert_eq!(nested.name(), "subject.a.b.c");

        nested.set_return_value("deep");
        assert_eq!(mock.attr("a").attr("b").attr("c").return_value(), json!("deep"));
    }

    #[test]
    fn resolve_uses_configured_separator() {
        let mock = Mock::with_config(AllowsConfig::new().path_separator('/'));
        mock.resolve("a/b").set_return_value("slash");
        assert_eq!(mock.attr("a").attr("b").return_value(), json!("slash"));
        assert_eq!(mock.resolve("a.b").return_value(), Value::Null);
    }

    #[test]
    fn children_inherit_config() {
        let mock = Mock::with_config(AllowsConfig::new().record_calls(false));
        let child = mock.attr("foo");
        assert!(!child.config().record_calls);
        child.call(&Call::new()).unwrap();
        assert_eq!(child.call_count(), 0);
    }

    #[test]
    fn records_calls() {
        let mock = Mock::new();
        assert!(!mock.called());

        mock.call(&Call::new().arg(1)).unwrap();
        mock.call(&Call::new().kwarg("k", "v")).unwrap();

        assert!(mock.called());
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.last_call(), Some(Call::new().kwarg("k", "v")));
        assert_eq!(mock.calls()[0], Call::new().arg(1));

        mock.reset_calls();
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn function_hook_overrides_return_value() {
        let mock = Mock::new();
        mock.set_return_value("ignored");
        mock.set_side_effect(Hook::function(|_| Ok(json!("hooked"))));
        assert_eq!(mock.call(&Call::new()).unwrap(), json!("hooked"));

        mock.clear_side_effect();
        assert_eq!(mock.call(&Call::new()).unwrap(), json!("ignored"));
    }

    #[test]
    fn extend_side_effect_creates_then_appends() {
        let mock = Mock::new();
        mock.extend_side_effect(Some(Call::new().arg(1)), Some(Effect::return_value("one")))
            .unwrap();
        mock.extend_side_effect(Some(Call::new().arg(2)), Some(Effect::return_value("two")))
            .unwrap();

        let table_len = mock
            .side_effect()
            .and_then(|hook| hook.as_dispatch().map(DispatchTable::len));
        assert_eq!(table_len, Some(2));
        assert_eq!(mock.call(&Call::new().arg(1)).unwrap(), json!("one"));
        assert_eq!(mock.call(&Call::new().arg(2)).unwrap(), json!("two"));
    }

    #[test]
    fn extend_side_effect_keeps_foreign_hook() {
        let mock = Mock::new();
        mock.set_side_effect(Hook::function(|_| Ok(json!("foreign"))));

        let err = mock.extend_side_effect(None, None).unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(mock.call(&Call::new()).unwrap(), json!("foreign"));
    }

    #[test]
    fn effects_may_reenter_the_mock() {
        let mock = Mock::new();
        let inner = mock.clone();
        mock.set_side_effect(Hook::function(move |_| Ok(json!(inner.call_count()))));
        assert_eq!(mock.call(&Call::new()).unwrap(), json!(1));
    }

    #[test]
    fn debug_shows_summary() {
        let mock = Mock::named("svc");
        let _ = mock.attr("child");
        let debug = format!("{mock:?}");
        assert!(debug.contains("svc"));
        assert!(debug.contains("children: 1"));
    }
}
