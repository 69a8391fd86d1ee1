//! Bare DID type.

use std::fmt;
use std::str::FromStr;

use crate::constants::SCHEME;
use crate::did_url::DidUrl;
use crate::error::{ParseError, ParseErrorKind};
use crate::scanner;

/// A parsed DID without URL components.
///
/// # Structure
///
/// ```text
/// did:<method>:<method-specific-id>
/// ```
///
/// The method-specific-id is kept both whole ([`Did::id`]) and split on `:`
/// ([`Did::id_strings`]).
///
/// # Examples
///
/// ```
/// use did_syntax::Did;
///
/// let did = Did::parse("did:example:123:456").unwrap();
/// assert_eq!(did.method(), "example");
/// assert_eq!(did.id(), "123:456");
/// assert_eq!(did.id_strings(), ["123", "456"]);
/// assert_eq!(did.to_string(), "did:example:123:456");
///
/// // URL components belong to `DidUrl`
/// assert!(Did::parse("did:example:123#key-1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Did {
    method: String,
    id: String,
    id_strings: Vec<String>,
}

impl Did {
    /// Parses a bare DID from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input is not a valid DID, or if it is a
    /// valid DID URL carrying parameters, a path, a query or a fragment
    /// ([`ParseErrorKind::UnexpectedUrlComponent`]). Use [`DidUrl::parse`]
    /// to accept those.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let parts = scanner::scan(input)?;
        if let Some(delimiter) = input[parts.did_end..].chars().next() {
            let kind = ParseErrorKind::UnexpectedUrlComponent { delimiter };
            tracing::debug!(input, position = parts.did_end, kind = %kind, "rejected DID");
            return Err(ParseError::new(input, parts.did_end, kind));
        }
        Ok(Self::from_parts(parts.method, parts.id, &parts.id_strings))
    }

    pub(crate) fn from_parts(method: &str, id: &str, id_strings: &[&str]) -> Self {
        Self {
            method: method.to_string(),
            id: id.to_string(),
            id_strings: id_strings.iter().map(ToString::to_string).collect(),
        }
    }

    pub(crate) const fn from_raw(method: String, id: String, id_strings: Vec<String>) -> Self {
        Self {
            method,
            id,
            id_strings,
        }
    }

    /// Returns the DID method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the full method-specific-id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the colon-separated segments of the method-specific-id.
    #[must_use]
    pub fn id_strings(&self) -> &[String] {
        &self.id_strings
    }

    /// Converts this DID into a [`DidUrl`] with no URL components.
    #[must_use]
    pub fn into_url(self) -> DidUrl {
        DidUrl::from(self)
    }

    /// Writes `did:<method>:<id>`, joining the id segments when the whole
    /// id is empty.
    pub(crate) fn write_core(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_empty() {
            write!(f, "{SCHEME}:{}:{}", self.method, self.id_strings.join(":"))
        } else {
            write!(f, "{SCHEME}:{}:{}", self.method, self.id)
        }
    }

    /// Returns true if a method and an id (whole or segmented) are present.
    pub(crate) fn has_core(&self) -> bool {
        !self.method.is_empty() && (!self.id.is_empty() || !self.id_strings.is_empty())
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_core() {
            self.write_core(f)
        } else {
            Ok(())
        }
    }
}

impl FromStr for Did {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Did {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
