//! Constants for DID syntax.

/// The DID URI scheme.
pub const SCHEME: &str = "did";

/// Separates the scheme, the method and the method-specific-id segments.
pub const COLON: u8 = b':';

/// Introduces a DID parameter.
pub const PARAM_DELIMITER: u8 = b';';

/// Separates a parameter name from its value.
pub const PARAM_VALUE_DELIMITER: u8 = b'=';

/// Introduces the path, and separates path segments.
pub const PATH_DELIMITER: u8 = b'/';

/// Introduces the query.
pub const QUERY_DELIMITER: u8 = b'?';

/// Introduces the fragment.
pub const FRAGMENT_DELIMITER: u8 = b'#';

/// Introduces a percent-escape.
pub const PERCENT: u8 = b'%';
