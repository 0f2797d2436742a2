//! Call-signature dispatch.
//!
//! A [`DispatchTable`] is the hook allows installs on a mock method. It maps
//! exact call signatures to effects; lookups scan the entries in
//! registration order and the first equal signature wins.

use crate::call::{Call, Value};
use crate::effect::Effect;
use crate::error::{AllowsError, Result};

/// What a mock runs when it is invoked.
#[derive(Debug, Clone)]
pub enum Hook {
    /// A dispatch table installed by allows.
    Dispatch(DispatchTable),
    /// Any other function hook, set directly on the mock.
    Function(Effect),
}

impl Hook {
    /// Hook that runs `func` for every call.
    pub fn function<F>(func: F) -> Self
    where
        F: Fn(&Call) -> Result<Value> + Send + Sync + 'static,
    {
        Self::Function(Effect::custom(func))
    }

    /// Run the hook for `call` on the mock called `target`.
    pub fn invoke(&self, target: &str, call: &Call) -> Result<Value> {
        match self {
            Self::Dispatch(table) => table.dispatch(target, call),
            Self::Function(effect) => effect.invoke(call),
        }
    }

    /// The dispatch table, if allows installed this hook.
    #[must_use]
    pub const fn as_dispatch(&self) -> Option<&DispatchTable> {
        match self {
            Self::Dispatch(table) => Some(table),
            Self::Function(_) => None,
        }
    }
}

impl From<DispatchTable> for Hook {
    fn from(table: DispatchTable) -> Self {
        Self::Dispatch(table)
    }
}

/// A registered signature and the effect it selects.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The exact call this entry answers.
    pub call: Call,
    /// The effect to run on a match.
    pub effect: Effect,
}

/// Ordered call-signature to effect table.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    entries: Vec<Entry>,
}

impl DispatchTable {
    /// Create a table with a single entry.
    ///
    /// A missing call defaults to the zero-argument call; a missing effect
    /// defaults to [`Effect::none`].
    #[must_use]
    pub fn new(call: Option<Call>, effect: Option<Effect>) -> Self {
        Self {
            entries: vec![Entry {
                call: call.unwrap_or_default(),
                effect: effect.unwrap_or_default(),
            }],
        }
    }

    /// Build the table to install over `base`.
    ///
    /// With no existing hook this is a fresh table. An existing dispatch
    /// table is copied and the new entry appended. Any other hook fails with
    /// [`AllowsError::ForeignHook`]; `base` itself is never modified.
    pub fn from_base(
        target: &str,
        base: Option<&Hook>,
        call: Option<Call>,
        effect: Option<Effect>,
    ) -> Result<Self> {
        let fresh = Self::new(call, effect);
        match base {
            None => Ok(fresh),
            Some(Hook::Dispatch(existing)) => {
                let mut table = existing.clone();
                table.extend(fresh);
                Ok(table)
            }
            Some(Hook::Function(_)) => {
                tracing::warn!(target_mock = target, "refusing to extend a foreign hook");
                Err(AllowsError::foreign_hook(target))
            }
        }
    }

    /// Append the entries of `other`, which must be a dispatch table.
    pub fn merge(&mut self, target: &str, other: &Hook) -> Result<()> {
        match other {
            Hook::Dispatch(table) => {
                self.entries.extend(table.entries.iter().cloned());
                Ok(())
            }
            Hook::Function(_) => Err(AllowsError::foreign_hook(target)),
        }
    }

    fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// The effect registered for `call`, if any.
    #[must_use]
    pub fn lookup(&self, call: &Call) -> Option<&Effect> {
        self.entries
            .iter()
            .find(|entry| entry.call == *call)
            .map(|entry| &entry.effect)
    }

    /// Run the effect registered for `call`.
    ///
    /// Fails with [`AllowsError::UnmatchedCall`] when no signature matches.
    pub fn dispatch(&self, target: &str, call: &Call) -> Result<Value> {
        let Some(effect) = self.lookup(call) else {
            tracing::warn!(target_mock = target, %call, "no side effect matches call");
            return Err(AllowsError::unmatched_call(target, call.clone()));
        };
        tracing::trace!(target_mock = target, %call, "dispatching call");
        effect.invoke(call)
    }

    /// Registered entries, in order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Registered call signatures, in order.
    pub fn calls(&self) -> impl Iterator<Item = &Call> {
        self.entries.iter().map(|entry| &entry.call)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty. Tables built by allows never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(call: Call, value: &str) -> DispatchTable {
        DispatchTable::new(Some(call), Some(Effect::return_value(value)))
    }

    #[test]
    fn defaults_to_zero_argument_call_returning_null() {
        let table = DispatchTable::new(None, None);
        assert_eq!(table.dispatch("m", &Call::new()).unwrap(), Value::Null);
    }

    #[test]
    fn default_signature_does_not_match_arguments() {
        let table = DispatchTable::new(None, None);
        let err = table.dispatch("m", &Call::new().arg(1)).unwrap_err();
        assert!(err.is_unmatched());
    }

    #[test]
    fn dispatches_exact_signature() {
        let table = table(Call::new().arg("stuff").kwarg("thing", "hi"), "things");
        let hit = Call::new().arg("stuff").kwarg("thing", "hi");
        assert_eq!(table.dispatch("m", &hit).unwrap(), json!("things"));

        let miss = Call::new().arg("stuff").kwarg("thing", "yo");
        match table.dispatch("m", &miss) {
            Err(AllowsError::UnmatchedCall { target, call }) => {
                assert_eq!(target, "m");
                assert_eq!(call, miss);
            }
            other => panic!("expected unmatched call, got {other:?}"),
        }
    }

    #[test]
    fn from_base_without_hook_is_fresh() {
        let table = DispatchTable::from_base("m", None, None, None).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn from_base_appends_to_existing_table() {
        let base = Hook::from(table(Call::new().arg(1), "one"));
        let merged = DispatchTable::from_base(
            "m",
            Some(&base),
            Some(Call::new().arg(2)),
            Some(Effect::return_value("two")),
        )
        .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.dispatch("m", &Call::new().arg(1)).unwrap(), json!("one"));
        assert_eq!(merged.dispatch("m", &Call::new().arg(2)).unwrap(), json!("two"));
        // the base hook is left as it was
        assert_eq!(base.as_dispatch().map(DispatchTable::len), Some(1));
    }

    #[test]
    fn from_base_rejects_foreign_hook() {
        let base = Hook::function(|_| Ok(Value::Null));
        let err = DispatchTable::from_base("m", Some(&base), None, None).unwrap_err();
        assert!(matches!(err, AllowsError::ForeignHook { .. }));
    }

    #[test]
    fn merge_extends_entries() {
        let mut first = table(Call::new().arg("a"), "A");
        let second = Hook::from(table(Call::new().arg("b"), "B"));
        first.merge("m", &second).unwrap();

        let calls: Vec<&Call> = first.calls().collect();
        assert_eq!(calls, vec![&Call::new().arg("a"), &Call::new().arg("b")]);
    }

    #[test]
    fn merge_rejects_foreign_hook() {
        let mut first = table(Call::new(), "A");
        let foreign = Hook::function(|_| Ok(json!(1)));
        let err = first.merge("m", &foreign).unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn first_registered_signature_wins() {
        let mut first = table(Call::new().arg(1), "first");
        first
            .merge("m", &Hook::from(table(Call::new().arg(1), "second")))
            .unwrap();
        assert_eq!(first.dispatch("m", &Call::new().arg(1)).unwrap(), json!("first"));
    }

    #[test]
    fn function_hook_runs_for_every_call() {
        let hook = Hook::function(|call| Ok(json!(call.args().len())));
        assert_eq!(hook.invoke("m", &Call::new().arg(1).arg(2)).unwrap(), json!(2));
        assert!(hook.as_dispatch().is_none());
    }
}
