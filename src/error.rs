//! Error types for DID parsing.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when parsing a DID or DID URL.
///
/// The scanner stops at the first violation, so an error always describes
/// exactly one problem at one byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse DID '{input}' at offset {position}: {kind}")]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// Byte offset at which the violation was detected
    pub position: usize,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: &str, position: usize, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            position,
            kind,
        }
    }

    /// Renders the error together with the input and a caret under the
    /// offending byte.
    ///
    /// ```
    /// use did_syntax::DidUrl;
    ///
    /// let err = DidUrl::parse("did:a:1&^1").unwrap_err();
    /// assert_eq!(
    ///     err.full_message(),
    ///     "offset 8: invalid character '^' in method-specific-id\ndid:a:1&^1\n        ^"
    /// );
    /// ```
    #[must_use]
    pub fn full_message(&self) -> String {
        let column = self
            .input
            .get(..self.position)
            .map_or(self.position, |prefix| prefix.chars().count());
        let caret = " ".repeat(column) + "^";
        format!(
            "offset {}: {}\n{}\n{caret}",
            self.position, self.kind, self.input
        )
    }
}

/// Specific parsing error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Input does not begin with `did:`
    #[error("invalid did, does not begin with scheme 'did:'")]
    InvalidScheme,
    /// Method has zero length
    #[error("method is empty")]
    EmptyMethod,
    /// Method contains a byte outside `[a-z0-9]`
    #[error("invalid character '{char}' in method; only 'a-z' and '0-9' allowed")]
    InvalidMethodChar {
        /// The invalid character
        char: char,
    },
    /// A method-specific-id segment is empty or missing
    #[error("method-specific-id segment is empty")]
    EmptyIdentifierSegment,
    /// A method-specific-id segment contains a disallowed byte
    #[error("invalid character '{char}' in method-specific-id")]
    InvalidIdentifierChar {
        /// The invalid character
        char: char,
    },
    /// A parameter has no name
    #[error("param name is empty")]
    EmptyParamName,
    /// A parameter name or value contains a disallowed byte
    #[error("invalid character '{char}' in param")]
    InvalidParamChar {
        /// The invalid character
        char: char,
    },
    /// The first path segment is empty
    #[error("first path segment is empty")]
    EmptyPathSegment,
    /// A path segment contains a disallowed byte
    #[error("invalid character '{char}' in path")]
    InvalidPathChar {
        /// The invalid character
        char: char,
    },
    /// The query contains a disallowed byte
    #[error("invalid character '{char}' in query")]
    InvalidQueryChar {
        /// The invalid character
        char: char,
    },
    /// The fragment contains a disallowed byte
    #[error("invalid character '{char}' in fragment")]
    InvalidFragmentChar {
        /// The invalid character
        char: char,
    },
    /// `%` not followed by two hex digits
    #[error("'%' in {component} is not followed by two hex digits")]
    MalformedPercentEscape {
        /// Component in which the escape occurred
        component: Component,
    },
    /// A bare DID was expected but the input carries URL components
    #[error("unexpected '{delimiter}' in a bare DID")]
    UnexpectedUrlComponent {
        /// The delimiter that introduced the URL component
        delimiter: char,
    },
}

/// The grammar component in which an error was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// The method name
    Method,
    /// The method-specific-id
    Identifier,
    /// A parameter name or value
    Param,
    /// The path
    Path,
    /// The query
    Query,
    /// The fragment
    Fragment,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Method => "method",
            Self::Identifier => "method-specific-id",
            Self::Param => "param",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when validating a [`DidUrl`](crate::DidUrl) assembled
/// by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// The method is empty
    #[error("cannot build a DID without a method")]
    MissingMethod,
    /// Both the id and the id segments are empty
    #[error("cannot build a DID without a method-specific-id")]
    MissingIdentifier,
    /// A parameter has an empty name
    #[error("param at index {index} has an empty name")]
    EmptyParamName {
        /// Index of the offending parameter
        index: usize,
    },
    /// A component holds a delimiter, so the assembled string parses back
    /// with a different structure
    #[error("{component} contains a delimiter and does not survive assembly")]
    Restructured {
        /// The first component that differs after reparsing
        component: Component,
    },
    /// The assembled string is not a valid DID URL
    #[error("assembled DID URL is invalid: {0}")]
    Invalid(#[from] ParseError),
}
