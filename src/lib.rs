//! Parser and serializer for Decentralized Identifiers (DIDs) and DID URLs.
//!
//! This crate implements position-aware parsing, validation and
//! serialization of the generic DID syntax.
//!
//! # Overview
//!
//! A DID URL has the structure:
//!
//! ```text
//! did:<method>:<method-specific-id>[;params][/path][?query][#fragment]
//! ```
//!
//! Parsing is a single left-to-right scan that stops at the first grammar
//! violation and reports its byte offset.
//!
//! # Quick Start
//!
//! ```rust
//! use did_syntax::{parse, Did};
//!
//! let url = parse("did:example:123:456;service=agent/a/b").unwrap();
//! assert_eq!(url.method(), "example");
//! assert_eq!(url.id_strings(), ["123", "456"]);
//! assert_eq!(url.service(), Some("agent"));
//! assert_eq!(url.path_segments(), ["a", "b"]);
//! assert_eq!(url.to_string(), "did:example:123:456;service=agent/a/b");
//!
//! // Bare DIDs only
//! let did = Did::parse("did:example:123").unwrap();
//! assert_eq!(did.to_string(), "did:example:123");
//!
//! let err = parse("did:example:123/%4").unwrap_err();
//! assert_eq!(err.position, 16);
//! ```
//!
//! # Character Classes
//!
//! | Component | Allowed bytes (plus `%XX` escapes) |
//! |-----------|------------------------------------|
//! | Method | `a-z 0-9` |
//! | Method-specific-id | unreserved, sub-delims, `:`; no `_` |
//! | Param name / value | unreserved, sub-delims, `:` |
//! | Path segment | unreserved, sub-delims, `:`, `@` |
//! | Query / fragment | unreserved, sub-delims, `:`, `@`, `/`, `?` |
//!
//! # Grammar Specification
//!
//! The accepted language is written out as ABNF in `grammar.abnf` at the
//! crate root.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
pub mod chars;
mod constants;
mod did;
mod did_url;
mod error;
#[cfg(kani)]
mod kani_impls;
mod param;
pub mod prelude;
mod scanner;

pub use builder::{DidUrlBuilder, Empty, HasMethod, Ready};
pub use constants::SCHEME;
pub use did::Did;
pub use did_url::DidUrl;
pub use error::{BuilderError, Component, ParseError, ParseErrorKind};
pub use param::Param;

/// Parses a DID or DID URL.
///
/// Equivalent to [`DidUrl::parse`].
///
/// # Errors
///
/// Returns `ParseError` at the first grammar violation.
pub fn parse(input: &str) -> Result<DidUrl, ParseError> {
    DidUrl::parse(input)
}
