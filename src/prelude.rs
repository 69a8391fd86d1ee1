//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use did_syntax::prelude::*;
//!
//! let url = DidUrl::parse("did:example:123#key-1").unwrap();
//! assert_eq!(url.fragment(), "key-1");
//! ```
//!
//! Builder state markers (`Empty`, `HasMethod`, `Ready`) are left out.

pub use crate::{
    // Core types
    Did, DidUrl, Param,
    // Builder
    DidUrlBuilder,
    // Errors
    BuilderError, Component, ParseError, ParseErrorKind,
    // Functions and constants
    parse, SCHEME,
};
