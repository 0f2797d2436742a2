//! Call signatures.
//!
//! A [`Call`] is the positional and keyword arguments of one invocation.
//! Dispatch tables use it as their lookup key, so equality is structural
//! and exact: no wildcards, no ignored keywords.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Dynamic value used for call arguments and return values.
pub use serde_json::Value;

/// The arguments of a single invocation.
///
/// Keyword arguments are kept sorted by name, so two calls built with the
/// same keywords in a different order compare equal. Numbers compare by
/// value: `1` matches `1.0`, including inside arrays and objects. Every
/// other value must match exactly; `true` is not `1`.
///
/// # Example
///
/// ```
/// use allows::{Call, call};
///
/// let built = Call::new().arg("stuff").kwarg("thing", "hi");
/// assert_eq!(built, call!("stuff", thing = "hi"));
/// assert_eq!(built.to_string(), r#"call("stuff", thing="hi")"#);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Call {
    #[serde(default)]
    args: Vec<Value>,
    #[serde(default)]
    kwargs: BTreeMap<String, Value>,
}

impl Call {
    /// Create a call with no arguments.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Create a call from positional and keyword parts.
    pub fn from_parts<A, K, S, V>(args: A, kwargs: K) -> Self
    where
        A: IntoIterator,
        A::Item: Into<Value>,
        K: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            kwargs: kwargs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Positional arguments, in order.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Keyword arguments, sorted by name.
    #[must_use]
    pub const fn kwargs(&self) -> &BTreeMap<String, Value> {
        &self.kwargs
    }

    /// Positional argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Keyword argument called `name`.
    #[must_use]
    pub fn kwarg_value(&self, name: &str) -> Option<&Value> {
        self.kwargs.get(name)
    }

    /// Whether the call carries no arguments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}

impl PartialEq for Call {
    fn eq(&self, other: &Self) -> bool {
        self.args.len() == other.args.len()
            && self.kwargs.len() == other.kwargs.len()
            && self
                .args
                .iter()
                .zip(&other.args)
                .all(|(a, b)| values_eq(a, b))
            && self
                .kwargs
                .iter()
                .zip(&other.kwargs)
                .all(|((ka, a), (kb, b))| ka == kb && values_eq(a, b))
    }
}

// serde_json numbers are never NaN, so equality stays reflexive.
impl Eq for Call {}

/// Structural equality with integers and floats compared numerically.
fn values_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => {
            x.as_f64() == y.as_f64()
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_eq(x, y)))
        }
        _ => a == b,
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("call(")?;
        let mut first = true;
        for value in &self.args {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{value}")?;
        }
        for (name, value) in &self.kwargs {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}
