//! Byte classifiers for the DID grammar.
//!
//! Every predicate answers "is this byte *not* allowed here?", so a scanner
//! can stop at the first byte for which it returns `true`. None of the
//! classes contain `%`; percent-escapes are validated by the scanner.
//!
//! ```
//! use did_syntax::chars;
//!
//! assert!(!chars::is_not_valid_id_char(b'-'));
//! assert!(chars::is_not_valid_id_char(b'_'));
//! assert!(!chars::is_not_valid_param_char(b'_'));
//! ```

/// Returns true unless `c` is `0-9`.
#[must_use]
pub const fn is_not_digit(c: u8) -> bool {
    !c.is_ascii_digit()
}

/// Returns true unless `c` is `A-Za-z`.
#[must_use]
pub const fn is_not_alpha(c: u8) -> bool {
    is_not_big_letter(c) && is_not_small_letter(c)
}

/// Returns true unless `c` is `A-Z`.
#[must_use]
pub const fn is_not_big_letter(c: u8) -> bool {
    !c.is_ascii_uppercase()
}

/// Returns true unless `c` is `a-z`.
#[must_use]
pub const fn is_not_small_letter(c: u8) -> bool {
    !c.is_ascii_lowercase()
}

/// Returns true unless `c` is `0-9A-Fa-f`.
#[must_use]
pub const fn is_not_hex_digit(c: u8) -> bool {
    !c.is_ascii_hexdigit()
}

/// Returns true unless `c` is an RFC 3986 `unreserved` or `sub-delims` byte.
#[must_use]
pub const fn is_not_unreserved_or_subdelim(c: u8) -> bool {
    is_not_alpha(c)
        && is_not_digit(c)
        && !matches!(
            c,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
        )
}

/// Returns true unless `c` may appear in a method name (`a-z0-9`).
#[must_use]
pub const fn is_not_valid_method_char(c: u8) -> bool {
    is_not_small_letter(c) && is_not_digit(c)
}

/// Returns true unless `c` may appear in a method-specific-id.
///
/// The class is `unreserved / sub-delims / ":"` without `_`.
#[must_use]
pub const fn is_not_valid_id_char(c: u8) -> bool {
    c == b'_' || (is_not_unreserved_or_subdelim(c) && c != b':')
}

/// Returns true unless `c` may appear in a parameter name or value.
#[must_use]
pub const fn is_not_valid_param_char(c: u8) -> bool {
    is_not_unreserved_or_subdelim(c) && c != b':'
}

/// Returns true unless `c` may appear in a path segment.
#[must_use]
pub const fn is_not_valid_path_char(c: u8) -> bool {
    is_not_unreserved_or_subdelim(c) && !matches!(c, b':' | b'@')
}

/// Returns true unless `c` may appear in a query or a fragment.
#[must_use]
pub const fn is_not_valid_query_or_fragment_char(c: u8) -> bool {
    is_not_valid_path_char(c) && !matches!(c, b'/' | b'?')
}

/// Decodes the percent-escapes of an already validated component.
///
/// Returns `None` when an escape is malformed or the decoded bytes are not
/// UTF-8.
///
/// ```
/// use did_syntax::chars::percent_decode;
///
/// assert_eq!(percent_decode("val%20ue").as_deref(), Some("val ue"));
/// assert_eq!(percent_decode("%G0"), None);
/// ```
#[must_use]
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input.get(i + 1..i + 3)?;
            if hex.bytes().any(is_not_hex_digit) {
                return None;
            }
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).ok()
}
