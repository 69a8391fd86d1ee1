//! DID parameter type.

use std::fmt;

use crate::chars::percent_decode;
use crate::constants::COLON;

/// A DID parameter, `name[=value]`, following the method-specific-id.
///
/// Names may be qualified by a method, as in `foo:bar`. A parameter written
/// as `name=` carries an empty value and displays the same as `name`.
/// Only the first `=` separates name from value, so `service==agent` has the
/// value `=agent`.
///
/// # Examples
///
/// ```
/// use did_syntax::Param;
///
/// let param = Param::new("service", "agent");
/// assert_eq!(param.to_string(), "service=agent");
///
/// let flag = Param::new("foo:bar", "");
/// assert_eq!(flag.to_string(), "foo:bar");
/// assert_eq!(flag.method_prefix(), Some("foo"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    name: String,
    value: String,
}

impl Param {
    /// Creates a parameter from a name and a (possibly empty) value.
    ///
    /// No validation is performed; see [`DidUrlBuilder::try_build`] for a
    /// checked construction path.
    ///
    /// [`DidUrlBuilder::try_build`]: crate::DidUrlBuilder::try_build
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the parameter name, percent-escapes intact.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter value, empty when none was given.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the parameter has a non-empty value.
    #[must_use]
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    /// Returns the method qualifier of a `method:name` parameter.
    #[must_use]
    pub fn method_prefix(&self) -> Option<&str> {
        self.name
            .split_once(char::from(COLON))
            .map(|(prefix, _)| prefix)
    }

    /// Returns true if the name has no method qualifier.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.method_prefix().is_none()
    }

    /// Returns the value with percent-escapes decoded.
    #[must_use]
    pub fn decoded_value(&self) -> Option<String> {
        percent_decode(&self.value)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}={}", self.name, self.value)
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Param {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_keeps_later_equals_signs() {
        let url = crate::DidUrl::parse("did:a:1;service==agent").unwrap();
        assert_eq!(url.params(), [Param::new("service", "=agent")]);
        assert_eq!(url.to_string(), "did:a:1;service==agent");
    }

    #[test]
    fn display_name_and_value() {
        assert_eq!(Param::new("service", "agent").to_string(), "service=agent");
    }

    #[test]
    fn display_name_only_when_value_empty() {
        assert_eq!(Param::new("service", "").to_string(), "service");
    }

    #[test]
    fn display_method_param() {
        assert_eq!(Param::new("foo:bar", "high").to_string(), "foo:bar=high");
    }

    #[test]
    fn method_prefix() {
        assert_eq!(Param::new("foo:bar", "").method_prefix(), Some("foo"));
        assert_eq!(Param::new("service", "agent").method_prefix(), None);
        assert!(Param::new("service", "agent").is_generic());
        assert!(!Param::new("foo:bar", "").is_generic());
    }

    #[test]
    fn decoded_value() {
        let param = Param::new("serv%20ice", "val%20ue");
        assert_eq!(param.decoded_value().as_deref(), Some("val ue"));
        assert_eq!(param.name(), "serv%20ice");
    }

    #[test]
    fn from_tuple() {
        let param: Param = ("a", "b").into();
        assert_eq!(param, Param::new("a", "b"));
        assert!(param.has_value());
    }
}
