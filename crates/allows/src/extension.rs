//! The fluent mock extension builder.
//!
//! A [`MockExtension`] collects at most one method name, at most one call
//! signature and at most one effect. Every field is write-once: setting it a
//! second time fails at that call instead of silently overwriting.

use crate::call::{Call, Value};
use crate::effect::Effect;
use crate::error::{AllowsError, Field, Raised, Result};
use crate::mock::Mock;

/// Builder describing one piece of configured mock behavior.
///
/// # Example
///
/// ```
/// use allows::{Mock, allow, call, receive_method};
///
/// # fn main() -> allows::Result<()> {
/// let mock = Mock::new();
/// let extension = receive_method("process")
///     .called_with(call!("stuff", thing = "hi"))?
///     .and_return_value("things")?;
/// allow(&mock).to(extension)?;
///
/// assert_eq!(mock.call_method("process", &call!("stuff", thing = "hi"))?, "things");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockExtension {
    method_name: Option<String>,
    call: Option<Call>,
    effect: Option<Effect>,
}

impl MockExtension {
    /// Create an empty extension.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn from_fields(
        method_name: Option<String>,
        call: Option<Call>,
        effect: Option<Effect>,
    ) -> Self {
        Self {
            method_name,
            call,
            effect,
        }
    }

    fn set_method_name(mut self, name: impl Into<String>) -> Result<Self> {
        if self.method_name().is_some() {
            return Err(AllowsError::duplicate_field(Field::MethodName));
        }
        self.method_name = Some(name.into());
        Ok(self)
    }

    fn set_call(mut self, call: Call) -> Result<Self> {
        if self.call.is_some() {
            return Err(AllowsError::duplicate_field(Field::CallArgs));
        }
        self.call = Some(call);
        Ok(self)
    }

    fn set_effect(mut self, effect: Effect) -> Result<Self> {
        self.ensure_no_effect()?;
        self.effect = Some(effect);
        Ok(self)
    }

    const fn ensure_no_effect(&self) -> Result<()> {
        if self.effect.is_some() {
            return Err(AllowsError::MultipleEffects);
        }
        Ok(())
    }

    /// Target the method at `name`, a separator-delimited attribute path.
    pub fn on_method(self, name: impl Into<String>) -> Result<Self> {
        self.set_method_name(name)
    }

    /// Alias for [`on_method`](Self::on_method).
    pub fn receive(self, name: impl Into<String>) -> Result<Self> {
        self.set_method_name(name)
    }

    /// Only answer invocations whose arguments equal `call`.
    pub fn called_with(self, call: Call) -> Result<Self> {
        self.set_call(call)
    }

    /// Alias for [`called_with`](Self::called_with).
    pub fn when_called_with(self, call: Call) -> Result<Self> {
        self.set_call(call)
    }

    /// Return `values` in order, then keep returning the last one.
    pub fn and_return<I, V>(self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.ensure_no_effect()?;
        let effect = Effect::returning(values)?;
        self.set_effect(effect)
    }

    /// Always return `value`.
    pub fn and_return_value(self, value: impl Into<Value>) -> Result<Self> {
        self.set_effect(Effect::return_value(value))
    }

    /// Fail every matching invocation with `error`.
    pub fn and_raise(self, error: impl Into<Raised>) -> Result<Self> {
        self.set_effect(Effect::raising(error))
    }

    /// Alias for [`and_raise`](Self::and_raise).
    pub fn and_raise_exception(self, error: impl Into<Raised>) -> Result<Self> {
        self.set_effect(Effect::raising(error))
    }

    /// Run `func` with the invocation's arguments.
    pub fn with_effect<F>(self, func: F) -> Result<Self>
    where
        F: Fn(&Call) -> Result<Value> + Send + Sync + 'static,
    {
        self.set_effect(Effect::custom(func))
    }

    /// The target method path, if set. An empty path counts as unset.
    #[must_use]
    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref().filter(|name| !name.is_empty())
    }

    /// The call signature, if set.
    #[must_use]
    pub const fn call_args(&self) -> Option<&Call> {
        self.call.as_ref()
    }

    /// Whether an effect has been set.
    #[must_use]
    pub const fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    /// Resolve the target on `subject` and install this behavior on it.
    ///
    /// Without a method name (or with an empty one) the subject itself is
    /// the target. Returns the subject for further chaining.
    pub fn apply(self, subject: &Mock) -> Result<&Mock> {
        let target = match self.method_name() {
            Some(path) => subject.resolve(path),
            None => subject.clone(),
        };
        target.extend_side_effect(self.call, self.effect)?;
        Ok(subject)
    }
}

/// Constructor-style description of an extension.
///
/// Converting into a [`MockExtension`] fails with
/// [`AllowsError::MultipleEffects`] when more than one of `return_values`,
/// `raised` and `effect` is given.
#[derive(Debug, Clone, Default)]
pub struct ExtensionParts {
    /// Target method path.
    pub method_name: Option<String>,
    /// Call signature to answer.
    pub call: Option<Call>,
    /// Values to return in order.
    pub return_values: Option<Vec<Value>>,
    /// Error to raise.
    pub raised: Option<Raised>,
    /// Custom effect.
    pub effect: Option<Effect>,
}

impl TryFrom<ExtensionParts> for MockExtension {
    type Error = AllowsError;

    fn try_from(parts: ExtensionParts) -> Result<Self> {
        let effects = [
            parts.return_values.is_some(),
            parts.raised.is_some(),
            parts.effect.is_some(),
        ];
        if effects.into_iter().filter(|set| *set).count() > 1 {
            return Err(AllowsError::MultipleEffects);
        }

        let effect = match (parts.return_values, parts.raised, parts.effect) {
            (Some(values), _, _) => Some(Effect::returning(values)?),
            (_, Some(raised), _) => Some(Effect::raising(raised)),
            (_, _, effect) => effect,
        };

        Ok(Self::from_fields(parts.method_name, parts.call, effect))
    }
}

/// Anything [`Allow::to`](crate::Allow::to) can apply.
///
/// Implemented for a built extension, for the `Result` of a fluent chain
/// (so a failed setter surfaces from `to`) and for [`ExtensionParts`].
pub trait IntoExtension {
    /// Produce the extension, or the error that stopped building it.
    fn into_extension(self) -> Result<MockExtension>;
}

impl IntoExtension for MockExtension {
    fn into_extension(self) -> Result<MockExtension> {
        Ok(self)
    }
}

impl IntoExtension for Result<MockExtension> {
    fn into_extension(self) -> Result<MockExtension> {
        self
    }
}

impl IntoExtension for ExtensionParts {
    fn into_extension(self) -> Result<MockExtension> {
        MockExtension::try_from(self)
    }
}
