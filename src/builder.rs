//! Typestate builder for constructing [`DidUrl`] instances.
//!
//! This module provides a builder that uses phantom types to enforce
//! at compile-time that the method is set before the method-specific-id.

use std::marker::PhantomData;

use crate::did::Did;
use crate::did_url::DidUrl;
use crate::error::{BuilderError, Component};
use crate::param::Param;

/// Marker: No components set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: Method has been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasMethod;

/// Marker: Method and method-specific-id are set, ready to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

/// A typestate builder for constructing [`DidUrl`] instances.
///
/// The method must be set first, then the method-specific-id (whole or as
/// segments). Parameters, path, query and fragment are optional and can be
/// added at any point.
///
/// [`build`](DidUrlBuilder::build) assembles the parts as given, so a value
/// with an empty method or id serializes to the empty string.
/// [`try_build`](DidUrlBuilder::try_build) checks the result against the
/// grammar.
///
/// # Examples
///
/// ```
/// use did_syntax::{DidUrlBuilder, Param};
///
/// let url = DidUrlBuilder::new()
///     .method("example")
///     .id_strings(["123", "456"])
///     .param(Param::new("service", "agent"))
///     .path("a/b")
///     .try_build()
///     .unwrap();
///
/// assert_eq!(url.to_string(), "did:example:123:456;service=agent/a/b");
/// assert_eq!(url.id(), "123:456");
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use did_syntax::DidUrlBuilder;
///
/// // Error: cannot set the id before the method
/// let builder = DidUrlBuilder::new().id("123");
/// ```
///
/// ```compile_fail
/// use did_syntax::DidUrlBuilder;
///
/// // Error: cannot build without a method-specific-id
/// let url = DidUrlBuilder::new().method("example").build();
/// ```
#[derive(Debug, Clone)]
pub struct DidUrlBuilder<State = Empty> {
    method: String,
    id: String,
    id_strings: Vec<String>,
    params: Vec<Param>,
    path: String,
    path_segments: Vec<String>,
    query: String,
    fragment: String,
    _state: PhantomData<State>,
}

impl<State> DidUrlBuilder<State> {
    fn transition<Next>(self) -> DidUrlBuilder<Next> {
        DidUrlBuilder {
            method: self.method,
            id: self.id,
            id_strings: self.id_strings,
            params: self.params,
            path: self.path,
            path_segments: self.path_segments,
            query: self.query,
            fragment: self.fragment,
            _state: PhantomData,
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Appends several parameters.
    #[must_use]
    pub fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = Param>,
    {
        self.params.extend(params);
        self
    }

    /// Sets the path (without its leading `/`).
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the path segments; used when no whole path is set.
    #[must_use]
    pub fn path_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the query (without its leading `?`).
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the fragment (without its leading `#`).
    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = fragment.into();
        self
    }
}

impl DidUrlBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: String::new(),
            id: String::new(),
            id_strings: Vec::new(),
            params: Vec::new(),
            path: String::new(),
            path_segments: Vec::new(),
            query: String::new(),
            fragment: String::new(),
            _state: PhantomData,
        }
    }

    /// Sets the method and advances to the [`HasMethod`] state.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> DidUrlBuilder<HasMethod> {
        self.method = method.into();
        self.transition()
    }
}

impl Default for DidUrlBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl DidUrlBuilder<HasMethod> {
    /// Sets the whole method-specific-id and advances to the [`Ready`] state.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> DidUrlBuilder<Ready> {
        self.id = id.into();
        self.transition()
    }

    /// Sets the method-specific-id as `:`-separated segments and advances to
    /// the [`Ready`] state.
    #[must_use]
    pub fn id_strings<I, S>(mut self, segments: I) -> DidUrlBuilder<Ready>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_strings = segments.into_iter().map(Into::into).collect();
        self.transition()
    }
}

impl DidUrlBuilder<Ready> {
    /// Assembles the [`DidUrl`] without validation.
    #[must_use]
    pub fn build(self) -> DidUrl {
        DidUrl::from_raw(
            Did::from_raw(self.method, self.id, self.id_strings),
            self.params,
            self.path,
            self.path_segments,
            self.query,
            self.fragment,
        )
    }

    /// Assembles the [`DidUrl`] and checks it against the grammar.
    ///
    /// The assembled string is parsed back and every component must come out
    /// as it went in, so a delimiter smuggled into a component (a `/` in a
    /// param value, a `#` in the query) is an error. The returned value is
    /// the parse, so `id` and `id_strings` (and `path` and `path_segments`)
    /// are both filled in.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if the method, the id or a parameter name is
    /// empty, if the assembled string is not a valid DID URL, or if it parses
    /// back with a different structure.
    pub fn try_build(self) -> Result<DidUrl, BuilderError> {
        if self.method.is_empty() {
            return Err(BuilderError::MissingMethod);
        }
        if self.id.is_empty() && self.id_strings.is_empty() {
            return Err(BuilderError::MissingIdentifier);
        }
        if let Some(index) = self.params.iter().position(|p| p.name().is_empty()) {
            return Err(BuilderError::EmptyParamName { index });
        }

        let assembled = self.build();
        let parsed = DidUrl::parse(&assembled.to_string())?;
        match first_mismatch(&assembled, &parsed) {
            Some(component) => Err(BuilderError::Restructured { component }),
            None => Ok(parsed),
        }
    }
}

/// Returns the first component of `assembled` that `parsed` does not
/// reproduce.
fn first_mismatch(assembled: &DidUrl, parsed: &DidUrl) -> Option<Component> {
    let id_matches = if assembled.id().is_empty() {
        assembled.id_strings() == parsed.id_strings()
    } else {
        assembled.id() == parsed.id()
    };
    let path_matches = if assembled.path().is_empty() {
        assembled.path_segments() == parsed.path_segments()
    } else {
        assembled.path() == parsed.path()
    };

    if assembled.method() != parsed.method() {
        Some(Component::Method)
    } else if !id_matches {
        Some(Component::Identifier)
    } else if assembled.params() != parsed.params() {
        Some(Component::Param)
    } else if !path_matches {
        Some(Component::Path)
    } else if assembled.query() != parsed.query() {
        Some(Component::Query)
    } else if assembled.fragment() != parsed.fragment() {
        Some(Component::Fragment)
    } else {
        None
    }
}
