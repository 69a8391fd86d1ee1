//! DID URL type.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::chars::percent_decode;
use crate::did::Did;
use crate::error::ParseError;
use crate::param::Param;
use crate::scanner::{self, Parts};

/// A parsed DID URL: a [`Did`] plus optional parameters, path, query and
/// fragment.
///
/// # Structure
///
/// ```text
/// did:<method>:<method-specific-id>[;params][/path][?query][#fragment]
/// ```
///
/// `DidUrl` dereferences to its [`Did`], so the method and id accessors are
/// available directly.
///
/// # Examples
///
/// ```
/// use did_syntax::DidUrl;
///
/// let url = DidUrl::parse("did:a:123:456;service=agent/a/b?x=1#keys-1").unwrap();
/// assert_eq!(url.method(), "a");
/// assert_eq!(url.id_strings(), ["123", "456"]);
/// assert_eq!(url.params()[0].name(), "service");
/// assert_eq!(url.path_segments(), ["a", "b"]);
/// assert_eq!(url.query(), "x=1");
/// assert_eq!(url.fragment(), "keys-1");
/// assert!(url.is_url());
///
/// assert_eq!(url.to_string(), "did:a:123:456;service=agent/a/b?x=1#keys-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DidUrl {
    did: Did,
    params: Vec<Param>,
    path: String,
    path_segments: Vec<String>,
    query: String,
    fragment: String,
}

impl DidUrl {
    /// Parses a DID or DID URL from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` at the first grammar violation:
    /// - The input does not start with `did:`
    /// - The method is empty or not `[a-z0-9]+`
    /// - A method-specific-id segment is empty or has an invalid character
    /// - A parameter name is empty, or a parameter has an invalid character
    /// - The first path segment is empty, or the path has an invalid character
    /// - The query or fragment has an invalid character
    /// - A `%` is not followed by two hex digits
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        scanner::scan(input).map(Self::from_parts)
    }

    fn from_parts(parts: Parts<'_>) -> Self {
        Self {
            did: Did::from_parts(parts.method, parts.id, &parts.id_strings),
            params: parts
                .params
                .into_iter()
                .map(|(name, value)| Param::new(name, value))
                .collect(),
            path: parts.path.to_string(),
            path_segments: parts.path_segments.into_iter().map(str::to_string).collect(),
            query: parts.query.to_string(),
            fragment: parts.fragment.to_string(),
        }
    }

    pub(crate) const fn from_raw(
        did: Did,
        params: Vec<Param>,
        path: String,
        path_segments: Vec<String>,
        query: String,
        fragment: String,
    ) -> Self {
        Self {
            did,
            params,
            path,
            path_segments,
            query,
            fragment,
        }
    }

    /// Returns the DID this URL is relative to.
    #[must_use]
    pub const fn did(&self) -> &Did {
        &self.did
    }

    /// Discards the URL components and returns the DID.
    #[must_use]
    pub fn into_did(self) -> Did {
        self.did
    }

    /// Returns the parameters in input order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns the first parameter with the given name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name() == name)
    }

    /// Returns the `service` parameter value, if present.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.param("service").map(Param::value)
    }

    /// Returns the `versionId` parameter value, if present.
    #[must_use]
    pub fn version_id(&self) -> Option<&str> {
        self.param("versionId").map(Param::value)
    }

    /// Returns the path without its leading `/`, empty when absent.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the `/`-separated path segments. Interior and trailing empty
    /// segments are kept.
    #[must_use]
    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Returns the query without its leading `?`, empty when absent.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the fragment without its leading `#`, empty when absent.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Returns true if any URL component (params, path, query, fragment) is
    /// present.
    ///
    /// ```
    /// use did_syntax::DidUrl;
    ///
    /// assert!(!DidUrl::parse("did:example:123").unwrap().is_url());
    /// assert!(DidUrl::parse("did:example:123#00000").unwrap().is_url());
    /// ```
    #[must_use]
    pub fn is_url(&self) -> bool {
        !self.params.is_empty()
            || !self.path.is_empty()
            || !self.path_segments.is_empty()
            || !self.query.is_empty()
            || !self.fragment.is_empty()
    }

    /// Splits the query on `&` into decoded `name=value` pairs.
    ///
    /// Pieces without `=` yield an empty value; empty pieces are skipped.
    ///
    /// ```
    /// use did_syntax::DidUrl;
    ///
    /// let url = DidUrl::parse("did:a:1?versionTime=2021&hl=z%20q&flag").unwrap();
    /// let pairs = url.query_pairs();
    /// assert_eq!(pairs[1], ("hl".to_string(), "z q".to_string()));
    /// assert_eq!(pairs[2], ("flag".to_string(), String::new()));
    /// ```
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let decode = |s: &str| percent_decode(s).unwrap_or_else(|| s.to_string());
        self.query
            .split('&')
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                let (name, value) = piece.split_once('=').unwrap_or((piece, ""));
                (decode(name), decode(value))
            })
            .collect()
    }

    /// Returns a new DID URL with the given fragment.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the fragment contains invalid characters, or
    /// this value does not serialize to a valid DID URL.
    ///
    /// ```
    /// use did_syntax::DidUrl;
    ///
    /// let url = DidUrl::parse("did:example:123").unwrap();
    /// let key = url.with_fragment("key-1").unwrap();
    /// assert_eq!(key.to_string(), "did:example:123#key-1");
    /// ```
    pub fn with_fragment(&self, fragment: &str) -> Result<Self, ParseError> {
        let base = self.without_fragment();
        Self::parse(&format!("{base}#{fragment}"))
    }

    /// Returns a copy of this DID URL without a fragment.
    #[must_use]
    pub fn without_fragment(&self) -> Self {
        Self {
            fragment: String::new(),
            ..self.clone()
        }
    }

    fn is_serializable(&self) -> bool {
        self.did.has_core() && self.params.iter().all(|p| !p.name().is_empty())
    }
}

impl Deref for DidUrl {
    type Target = Did;

    fn deref(&self) -> &Self::Target {
        &self.did
    }
}

impl From<Did> for DidUrl {
    fn from(did: Did) -> Self {
        Self {
            did,
            ..Self::default()
        }
    }
}

impl fmt::Display for DidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_serializable() {
            return Ok(());
        }

        self.did.write_core(f)?;

        for param in &self.params {
            write!(f, ";{param}")?;
        }

        if !self.path.is_empty() {
            write!(f, "/{}", self.path)?;
        } else if !self.path_segments.is_empty() {
            write!(f, "/{}", self.path_segments.join("/"))?;
        }

        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }

        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }

        Ok(())
    }
}

impl FromStr for DidUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for DidUrl {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DidUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DidUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DidUrlBuilder;
    use crate::error::{Component, ParseErrorKind};

    fn example() -> DidUrlBuilder<crate::builder::Ready> {
        DidUrlBuilder::new().method("example").id("123")
    }

    fn assert_rejected(inputs: &[&str]) {
        for input in inputs {
            assert!(DidUrl::parse(input).is_err(), "accepted: {input}");
        }
    }

    mod is_url {
        use super::*;

        #[test]
        fn false_without_url_components() {
            assert!(!example().build().is_url());
        }

        #[test]
        fn true_with_params() {
            assert!(example().param(Param::new("foo", "bar")).build().is_url());
        }

        #[test]
        fn true_with_path() {
            assert!(example().path("a/b").build().is_url());
        }

        #[test]
        fn true_with_path_segments() {
            assert!(example().path_segments(["a", "b"]).build().is_url());
        }

        #[test]
        fn true_with_query() {
            assert!(example().query("abc").build().is_url());
        }

        #[test]
        fn true_with_fragment() {
            assert!(example().fragment("00000").build().is_url());
        }

        #[test]
        fn true_with_path_and_fragment() {
            assert!(example().path("a/b").fragment("00000").build().is_url());
        }
    }

    mod display {
        use super::*;

        #[test]
        fn assembles_a_did() {
            assert_eq!(example().build().to_string(), "did:example:123");
        }

        #[test]
        fn assembles_from_id_strings() {
            let url = DidUrlBuilder::new()
                .method("example")
                .id_strings(["123", "456"])
                .build();
            assert_eq!(url.to_string(), "did:example:123:456");
        }

        #[test]
        fn empty_without_method() {
            let url = DidUrlBuilder::new().method("").id("123").build();
            assert_eq!(url.to_string(), "");
        }

        #[test]
        fn empty_without_id() {
            let url = DidUrlBuilder::new().method("example").id("").build();
            assert_eq!(url.to_string(), "");
        }

        #[test]
        fn empty_if_param_name_missing() {
            let url = example().param(Param::new("", "agent")).build();
            assert_eq!(url.to_string(), "");
        }

        #[test]
        fn param_name_only_when_value_empty() {
            let url = example().param(Param::new("service", "")).build();
            assert_eq!(url.to_string(), "did:example:123;service");
        }

        #[test]
        fn generic_and_method_params() {
            let url = example()
                .param(Param::new("service", "agent"))
                .param(Param::new("foo:bar", "high"))
                .build();
            assert_eq!(url.to_string(), "did:example:123;service=agent;foo:bar=high");
        }

        #[test]
        fn path() {
            assert_eq!(example().path("a/b").build().to_string(), "did:example:123/a/b");
        }

        #[test]
        fn path_from_segments() {
            let url = example().path_segments(["a", "b"]).build();
            assert_eq!(url.to_string(), "did:example:123/a/b");
        }

        #[test]
        fn path_after_param() {
            let url = example()
                .param(Param::new("service", "agent"))
                .path("a/b")
                .build();
            assert_eq!(url.to_string(), "did:example:123;service=agent/a/b");
        }

        #[test]
        fn query_placement() {
            assert_eq!(example().query("abc").build().to_string(), "did:example:123?abc");
            assert_eq!(
                example()
                    .param(Param::new("service", "agent"))
                    .query("abc")
                    .build()
                    .to_string(),
                "did:example:123;service=agent?abc"
            );
            assert_eq!(
                example().path("x/y").query("abc").build().to_string(),
                "did:example:123/x/y?abc"
            );
            assert_eq!(
                example()
                    .param(Param::new("service", "agent"))
                    .path("x/y")
                    .query("abc")
                    .build()
                    .to_string(),
                "did:example:123;service=agent/x/y?abc"
            );
        }

        #[test]
        fn query_before_fragment() {
            let url = example().fragment("zyx").query("abc").build();
            assert_eq!(url.to_string(), "did:example:123?abc#zyx");
        }

        #[test]
        fn fragment() {
            let url = example().fragment("00000").build();
            assert_eq!(url.to_string(), "did:example:123#00000");
        }
    }

    mod parse {
        use super::*;

        #[test]
        fn rejects_short_or_schemeless_input() {
            assert_rejected(&["", "did:", "did:a", "did:a:", "did:aaaaaaaaaaa", "a:12345"]);
        }

        #[test]
        fn rejects_empty_method() {
            let err = DidUrl::parse("did::aaaaaaaaaaa").unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::EmptyMethod);
            assert_eq!(err.position, 4);
        }

        #[test]
        fn rejects_empty_idstring() {
            assert_rejected(&[
                "did:a::123:456",
                "did:a:123::456",
                "did:a:123:456:",
                "did:a:123:/abc",
                "did:a:123:#abc",
            ]);
        }

        #[test]
        fn rejects_method_outside_lowercase_alphanumeric() {
            assert_rejected(&["did:aA:1", "did:aa-aa:1"]);
        }

        #[test]
        fn extracts_method_and_id() {
            let url = DidUrl::parse("did:a:1").unwrap();
            assert_eq!(url.method(), "a");
            assert_eq!(url.id(), "1");

            let url = DidUrl::parse("did:abcdef:11111").unwrap();
            assert_eq!(url.method(), "abcdef");
        }

        #[test]
        fn extracts_id_parts() {
            let url = DidUrl::parse("did:a:123:456").unwrap();
            assert_eq!(url.id_strings(), ["123", "456"]);
        }

        #[test]
        fn rejects_invalid_id_char() {
            let err = DidUrl::parse("did:a:1^111").unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::InvalidIdentifierChar { char: '^' });
        }

        #[test]
        fn rejects_bad_params() {
            assert_rejected(&[
                "did:a:123:456;",
                "did:a:123:456;serv^ce",
                "did:a:123:456;service=ag^nt",
                "did:a:123:456;ser%2ge",
                "did:a:123:456;=value",
            ]);
        }

        #[test]
        fn generic_param_with_name_and_value() {
            let url = DidUrl::parse("did:a:123:456;service=agent").unwrap();
            assert_eq!(url.params(), [Param::new("service", "agent")]);
            assert_eq!(url.params()[0].to_string(), "service=agent");
        }

        #[test]
        fn generic_param_with_name_only() {
            let url = DidUrl::parse("did:a:123:456;service").unwrap();
            assert_eq!(url.params(), [Param::new("service", "")]);
            assert_eq!(url.params()[0].to_string(), "service");
        }

        #[test]
        fn generic_param_with_empty_value() {
            let url = DidUrl::parse("did:a:123:456;service=").unwrap();
            assert_eq!(url.params(), [Param::new("service", "")]);
            assert_eq!(url.to_string(), "did:a:123:456;service");
        }

        #[test]
        fn method_param() {
            let url = DidUrl::parse("did:a:123:456;foo:bar=baz").unwrap();
            assert_eq!(url.params()[0].to_string(), "foo:bar=baz");
            assert_eq!(url.params()[0].method_prefix(), Some("foo"));

            let url = DidUrl::parse("did:a:123:456;foo:bar").unwrap();
            assert_eq!(url.params(), [Param::new("foo:bar", "")]);
        }

        #[test]
        fn percent_encoded_param() {
            let url = DidUrl::parse("did:a:123:456;serv%20ice=val%20ue").unwrap();
            assert_eq!(url.params(), [Param::new("serv%20ice", "val%20ue")]);
            assert_eq!(url.params()[0].to_string(), "serv%20ice=val%20ue");
        }

        #[test]
        fn multiple_params() {
            let url = DidUrl::parse("did:a:123:456;foo;bar").unwrap();
            assert_eq!(url.params(), [Param::new("foo", ""), Param::new("bar", "")]);

            let url = DidUrl::parse("did:a:123:456;service=agent;foo:bar=baz").unwrap();
            assert_eq!(
                url.params(),
                [Param::new("service", "agent"), Param::new("foo:bar", "baz")]
            );
            assert_eq!(url.service(), Some("agent"));
            assert_eq!(url.param("foo:bar").map(Param::value), Some("baz"));
        }

        #[test]
        fn path_after_param() {
            let url = DidUrl::parse("did:a:123:456;service=value/a/b").unwrap();
            assert_eq!(url.params(), [Param::new("service", "value")]);
            assert_eq!(url.path_segments(), ["a", "b"]);

            let url = DidUrl::parse("did:a:123:456;service=/a/b").unwrap();
            assert_eq!(url.params(), [Param::new("service", "")]);
            assert_eq!(url.path_segments(), ["a", "b"]);
        }

        #[test]
        fn query_and_fragment_after_param() {
            let url = DidUrl::parse("did:a:123:456;service=value?abc").unwrap();
            assert_eq!(url.service(), Some("value"));
            assert_eq!(url.query(), "abc");

            let url = DidUrl::parse("did:a:123:456;service=value#xyz").unwrap();
            assert_eq!(url.fragment(), "xyz");
        }

        #[test]
        fn path() {
            let url = DidUrl::parse("did:a:123:456/someService").unwrap();
            assert_eq!(url.path(), "someService");

            let url = DidUrl::parse("did:a:123:456/a/b").unwrap();
            assert_eq!(url.path_segments(), ["a", "b"]);

            let url = DidUrl::parse("did:a:123:456/a/%20a").unwrap();
            assert_eq!(url.path(), "a/%20a");
        }

        #[test]
        fn rejects_malformed_path_escapes() {
            assert_rejected(&[
                "did:a:123:456/%",
                "did:a:123:456/%a",
                "did:a:123:456/%!*",
                "did:a:123:456/%A!",
                "did:xyz:pqr#%A!",
                "did:a:123:456/%A%",
            ]);
        }

        #[test]
        fn path_segment_rules() {
            assert_rejected(&["did:a:123:456/", "did:a:123:456//abc", "did:a:123:456/ssss^sss"]);
            assert!(DidUrl::parse("did:a:123:456/abc//pqr").is_ok());
            assert!(DidUrl::parse("did:a:123:456/a/b/").is_ok());
        }

        #[test]
        fn query() {
            let url = DidUrl::parse("did:a:123?abc").unwrap();
            assert_eq!(url.method(), "a");
            assert_eq!(url.id(), "123");
            assert_eq!(url.query(), "abc");

            let url = DidUrl::parse("did:a:123/a/b/c?abc").unwrap();
            assert_eq!(url.path(), "a/b/c");
            assert_eq!(url.query(), "abc");

            let url = DidUrl::parse("did:a:123?ab%20c").unwrap();
            assert_eq!(url.query(), "ab%20c");
        }

        #[test]
        fn rejects_malformed_query() {
            assert_rejected(&[
                "did:a:123:456?%",
                "did:a:123:456?%a",
                "did:a:123:456?%!*",
                "did:a:123:456?%A!",
                "did:xyz:pqr?%A!",
                "did:a:123:456?%A%",
                "did:a:123:456?ssss^sss",
            ]);
        }

        #[test]
        fn fragment() {
            let url = DidUrl::parse("did:a:123?abc#xyz").unwrap();
            assert_eq!(url.query(), "abc");
            assert_eq!(url.fragment(), "xyz");

            let url = DidUrl::parse("did:a:123:456#keys-1").unwrap();
            assert_eq!(url.fragment(), "keys-1");

            let url = DidUrl::parse("did:a:123:456#aaaaaa%20a").unwrap();
            assert_eq!(url.fragment(), "aaaaaa%20a");
        }

        #[test]
        fn rejects_malformed_fragment() {
            assert_rejected(&[
                "did:xyz:pqr#%",
                "did:xyz:pqr#%a",
                "did:xyz:pqr#%!*",
                "did:xyz:pqr#%!A",
                "did:xyz:pqr#%A!",
                "did:xyz:pqr#%A%",
                "did:a:123:456#ssss^sss",
            ]);
        }

        #[test]
        fn escape_error_names_component() {
            let err = DidUrl::parse("did:xyz:pqr#%A!").unwrap_err();
            assert_eq!(err.position, 12);
            assert_eq!(
                err.kind,
                ParseErrorKind::MalformedPercentEscape {
                    component: Component::Fragment
                }
            );
        }
    }

    #[test]
    fn roundtrip() {
        for input in [
            "did:example:123",
            "did:a:123:456;service=agent/a/b",
            "did:a:123:456;foo:bar=baz;flag?q=1&r#frag",
            "did:a:123:456/abc//pqr",
            "did:a:123:456/a/b/",
            "did:web:example.com%3A8443/path/%20x#key-1",
        ] {
            let url = DidUrl::parse(input).unwrap();
            assert_eq!(url.to_string(), input);
            assert_eq!(DidUrl::parse(&url.to_string()).unwrap(), url);
        }
    }

    #[test]
    fn empty_query_is_dropped_on_display() {
        let url = DidUrl::parse("did:a:1?").unwrap();
        assert!(!url.is_url());
        assert_eq!(url.to_string(), "did:a:1");
    }

    #[test]
    fn empty_fragment_is_dropped_on_display() {
        let url = DidUrl::parse("did:a:1#").unwrap();
        assert_eq!(url.fragment(), "");
        assert!(!url.is_url());
        assert_eq!(url.to_string(), "did:a:1");
    }

    #[test]
    fn deref_to_did() {
        let url = DidUrl::parse("did:a:1/x").unwrap();
        let did: &Did = &url;
        assert_eq!(did.to_string(), "did:a:1");
        assert_eq!(url.into_did(), Did::parse("did:a:1").unwrap());
    }

    #[test]
    fn query_pairs_decodes() {
        let url = DidUrl::parse("did:a:1?a=1&&b=%41%42&c").unwrap();
        assert_eq!(
            url.query_pairs(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "AB".to_string()),
                ("c".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn with_and_without_fragment() {
        let url = DidUrl::parse("did:a:1;service=agent#old").unwrap();
        let updated = url.with_fragment("new").unwrap();
        assert_eq!(updated.to_string(), "did:a:1;service=agent#new");
        assert!(url.with_fragment("bad^").is_err());
        assert_eq!(url.without_fragment().to_string(), "did:a:1;service=agent");
    }

    #[test]
    fn version_id_helper() {
        let url = DidUrl::parse("did:a:1;versionId=4").unwrap();
        assert_eq!(url.version_id(), Some("4"));
        assert_eq!(url.service(), None);
    }
}
