//! Binding extensions to mock subjects.

use crate::error::Result;
use crate::extension::IntoExtension;
use crate::mock::Mock;

/// Pairs a mock subject with the extension applied to it.
///
/// Holds the subject only for one [`to`](Self::to) call.
#[derive(Debug, Clone, Copy)]
pub struct Allow<'a> {
    subject: &'a Mock,
}

impl<'a> Allow<'a> {
    /// Bind `subject`.
    #[must_use]
    pub const fn new(subject: &'a Mock) -> Self {
        Self { subject }
    }

    /// Apply `extension` to the subject and return the subject.
    ///
    /// Errors from building the extension are returned unchanged, before
    /// anything is installed.
    pub fn to(self, extension: impl IntoExtension) -> Result<&'a Mock> {
        extension.into_extension()?.apply(self.subject)
    }
}

/// Start configuring `subject`.
#[must_use]
pub const fn allow(subject: &Mock) -> Allow<'_> {
    Allow::new(subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{Call, Value};
    use crate::error::AllowsError;
    use crate::extension::MockExtension;
    use serde_json::json;

    #[test]
    fn to_returns_the_subject() {
        let mock = Mock::named("subject");
        let returned = allow(&mock)
            .to(MockExtension::new().on_method("foo"))
            .unwrap();
        assert_eq!(returned.name(), "subject");
    }

    #[test]
    fn to_surfaces_builder_errors() {
        let mock = Mock::new();
        let err = allow(&mock)
            .to(MockExtension::new()
                .on_method("foo")
                .and_then(|e| e.on_method("foo")))
            .unwrap_err();
        assert!(matches!(err, AllowsError::DuplicateField { .. }));
        assert!(mock.attr("foo").side_effect().is_none());
    }

    #[test]
    fn chained_configuration() {
        let mock = Mock::new();
        allow(&mock)
            .to(MockExtension::new().on_method("a"))
            .and_then(|mock| {
                allow(mock).to(MockExtension::new()
                    .on_method("b")
                    .and_then(|e| e.and_return_value(2)))
            })
            .unwrap();

        assert_eq!(mock.call_method("a", &Call::new()).unwrap(), Value::Null);
        assert_eq!(mock.call_method("b", &Call::new()).unwrap(), json!(2));
    }
}
