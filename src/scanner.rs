//! Single-pass scanner for the generic DID URL grammar.
//!
//! The scanner walks the input left to right exactly once. Each grammar
//! state is a method that consumes its component and advances the cursor;
//! the first violation aborts the scan with the offset of the offending byte.

use crate::chars::{
    is_not_hex_digit, is_not_valid_id_char, is_not_valid_method_char, is_not_valid_param_char,
    is_not_valid_path_char, is_not_valid_query_or_fragment_char,
};
use crate::constants::{
    COLON, FRAGMENT_DELIMITER, PARAM_DELIMITER, PARAM_VALUE_DELIMITER, PATH_DELIMITER, PERCENT,
    QUERY_DELIMITER, SCHEME,
};
use crate::error::{Component, ParseError, ParseErrorKind};

/// Scans `input`, logging the outcome.
pub(crate) fn scan(input: &str) -> Result<Parts<'_>, ParseError> {
    match Scanner::new(input).scan() {
        Ok(parts) => {
            tracing::trace!(method = parts.method, id = parts.id, "scanned DID URL");
            Ok(parts)
        }
        Err(fault) => {
            tracing::debug!(input, position = fault.position, kind = %fault.kind, "rejected DID");
            Err(fault.into_error(input))
        }
    }
}

/// A grammar violation at a byte offset, before the input is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fault {
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl Fault {
    pub(crate) fn into_error(self, input: &str) -> ParseError {
        ParseError::new(input, self.position, self.kind)
    }
}

type ScanResult<T> = Result<T, Fault>;

/// Components of a DID URL, borrowed from the scanned input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Parts<'a> {
    /// Offset one past the method-specific-id
    pub did_end: usize,
    pub method: &'a str,
    pub id: &'a str,
    pub id_strings: Vec<&'a str>,
    pub params: Vec<(&'a str, &'a str)>,
    pub path: &'a str,
    pub path_segments: Vec<&'a str>,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Cursor over the input being scanned.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Runs every grammar state in order and returns the scanned parts.
    pub(crate) fn scan(mut self) -> ScanResult<Parts<'a>> {
        self.scheme()?;
        let method = self.method()?;
        let (id, id_strings) = self.identifier()?;
        let did_end = self.pos;
        let params = self.params()?;
        let (path, path_segments) = self.path()?;
        let query = self.query()?;
        let fragment = self.fragment()?;
        debug_assert_eq!(self.pos, self.input.len(), "scanner left trailing input");

        Ok(Parts {
            did_end,
            method,
            id,
            id_strings,
            params,
            path,
            path_segments,
            query,
            fragment,
        })
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Consumes `byte` if it is next in the input.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// The character starting at the cursor, for error reporting.
    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    const fn fault(&self, kind: ParseErrorKind) -> Fault {
        Fault {
            position: self.pos,
            kind,
        }
    }

    fn scheme(&mut self) -> ScanResult<()> {
        let prefix = SCHEME.len();
        let has_scheme = self.input.starts_with(SCHEME)
            && self.input.as_bytes().get(prefix) == Some(&COLON);
        if !has_scheme {
            return Err(self.fault(ParseErrorKind::InvalidScheme));
        }
        self.pos = prefix + 1;
        Ok(())
    }

    fn method(&mut self) -> ScanResult<&'a str> {
        let start = self.pos;
        loop {
            match self.peek() {
                None if self.pos == start => return Err(self.fault(ParseErrorKind::EmptyMethod)),
                // `did:<method>` with nothing after the method
                None => return Err(self.fault(ParseErrorKind::EmptyIdentifierSegment)),
                Some(COLON) if self.pos == start => {
                    return Err(self.fault(ParseErrorKind::EmptyMethod));
                }
                Some(COLON) => {
                    let method = &self.input[start..self.pos];
                    self.pos += 1;
                    return Ok(method);
                }
                Some(c) if is_not_valid_method_char(c) => {
                    return Err(self.fault(ParseErrorKind::InvalidMethodChar {
                        char: self.current_char(),
                    }));
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn identifier(&mut self) -> ScanResult<(&'a str, Vec<&'a str>)> {
        let start = self.pos;
        let mut segments = Vec::new();
        loop {
            let segment = self.component(Component::Identifier, is_not_valid_id_char, |c| {
                matches!(
                    c,
                    COLON | PARAM_DELIMITER | PATH_DELIMITER | QUERY_DELIMITER | FRAGMENT_DELIMITER
                )
            })?;
            if segment.is_empty() {
                return Err(self.fault(ParseErrorKind::EmptyIdentifierSegment));
            }
            segments.push(segment);
            if !self.eat(COLON) {
                break;
            }
        }
        Ok((&self.input[start..self.pos], segments))
    }

    fn params(&mut self) -> ScanResult<Vec<(&'a str, &'a str)>> {
        let mut params = Vec::new();
        while self.eat(PARAM_DELIMITER) {
            let name = self.component(Component::Param, is_not_valid_param_char, |c| {
                matches!(
                    c,
                    PARAM_VALUE_DELIMITER
                        | PARAM_DELIMITER
                        | PATH_DELIMITER
                        | QUERY_DELIMITER
                        | FRAGMENT_DELIMITER
                )
            })?;
            if name.is_empty() {
                return Err(self.fault(ParseErrorKind::EmptyParamName));
            }
            let value = if self.eat(PARAM_VALUE_DELIMITER) {
                self.component(Component::Param, is_not_valid_param_char, |c| {
                    matches!(
                        c,
                        PARAM_DELIMITER | PATH_DELIMITER | QUERY_DELIMITER | FRAGMENT_DELIMITER
                    )
                })?
            } else {
                ""
            };
            params.push((name, value));
        }
        Ok(params)
    }

    fn path(&mut self) -> ScanResult<(&'a str, Vec<&'a str>)> {
        if !self.eat(PATH_DELIMITER) {
            return Ok(("", Vec::new()));
        }
        let start = self.pos;
        let mut segments = Vec::new();
        loop {
            let segment = self.component(Component::Path, is_not_valid_path_char, |c| {
                matches!(c, PATH_DELIMITER | QUERY_DELIMITER | FRAGMENT_DELIMITER)
            })?;
            // Only the first segment must be non-empty; `a//b` and `a/b/` are kept.
            if segments.is_empty() && segment.is_empty() {
                return Err(self.fault(ParseErrorKind::EmptyPathSegment));
            }
            segments.push(segment);
            if !self.eat(PATH_DELIMITER) {
                break;
            }
        }
        Ok((&self.input[start..self.pos], segments))
    }

    fn query(&mut self) -> ScanResult<&'a str> {
        if !self.eat(QUERY_DELIMITER) {
            return Ok("");
        }
        self.component(
            Component::Query,
            is_not_valid_query_or_fragment_char,
            |c| c == FRAGMENT_DELIMITER,
        )
    }

    fn fragment(&mut self) -> ScanResult<&'a str> {
        if !self.eat(FRAGMENT_DELIMITER) {
            return Ok("");
        }
        self.component(
            Component::Fragment,
            is_not_valid_query_or_fragment_char,
            |_| false,
        )
    }

    /// Consumes bytes of one component until `stop` matches or the input
    /// ends. Bytes rejected by `invalid` fail the scan unless they start a
    /// well-formed percent-escape.
    fn component(
        &mut self,
        component: Component,
        invalid: fn(u8) -> bool,
        stop: fn(u8) -> bool,
    ) -> ScanResult<&'a str> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if stop(c) {
                break;
            }
            if c == PERCENT {
                self.percent_escape(component)?;
            } else if invalid(c) {
                return Err(self.fault(invalid_char(component, self.current_char())));
            } else {
                self.pos += 1;
            }
        }
        Ok(&self.input[start..self.pos])
    }

    fn percent_escape(&mut self, component: Component) -> ScanResult<()> {
        let bytes = self.input.as_bytes();
        let well_formed = matches!(
            (bytes.get(self.pos + 1), bytes.get(self.pos + 2)),
            (Some(&hi), Some(&lo)) if !is_not_hex_digit(hi) && !is_not_hex_digit(lo)
        );
        if !well_formed {
            return Err(self.fault(ParseErrorKind::MalformedPercentEscape { component }));
        }
        self.pos += 3;
        Ok(())
    }
}

const fn invalid_char(component: Component, c: char) -> ParseErrorKind {
    match component {
        Component::Method => ParseErrorKind::InvalidMethodChar { char: c },
        Component::Identifier => ParseErrorKind::InvalidIdentifierChar { char: c },
        Component::Param => ParseErrorKind::InvalidParamChar { char: c },
        Component::Path => ParseErrorKind::InvalidPathChar { char: c },
        Component::Query => ParseErrorKind::InvalidQueryChar { char: c },
        Component::Fragment => ParseErrorKind::InvalidFragmentChar { char: c },
    }
}
