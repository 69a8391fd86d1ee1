//! Kani proof harnesses for the byte classifiers and the scanner.
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::chars::{
    is_not_unreserved_or_subdelim, is_not_valid_id_char, is_not_valid_method_char,
    is_not_valid_param_char, is_not_valid_path_char, is_not_valid_query_or_fragment_char,
};
use crate::{DidUrl, Param};

/// Characters that are valid in every identifier segment.
const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789.-";

fn arbitrary_id_char() -> char {
    let idx: usize = kani::any();
    ID_CHARS[idx % ID_CHARS.len()] as char
}

impl kani::Arbitrary for Param {
    fn any() -> Self {
        let len: usize = kani::any();
        let len = 1 + (len % 4);
        let name: String = (0..len).map(|_| arbitrary_id_char()).collect();
        let value: String = if kani::any() {
            (0..len).map(|_| arbitrary_id_char()).collect()
        } else {
            String::new()
        };
        Param::new(name, value)
    }
}

#[kani::proof]
fn classes_are_nested() {
    let c: u8 = kani::any();
    if !is_not_valid_method_char(c) {
        assert!(!is_not_valid_id_char(c));
    }
    if !is_not_valid_id_char(c) {
        assert!(!is_not_valid_param_char(c));
    }
    if !is_not_valid_param_char(c) {
        assert!(!is_not_valid_path_char(c));
    }
    if !is_not_valid_path_char(c) {
        assert!(!is_not_valid_query_or_fragment_char(c));
    }
}

#[kani::proof]
fn percent_and_hash_are_never_plain_chars() {
    for c in [b'%', b'#'] {
        assert!(is_not_unreserved_or_subdelim(c));
        assert!(is_not_valid_query_or_fragment_char(c));
    }
}

#[kani::proof]
#[kani::unwind(12)]
fn param_display_reparses() {
    let param: Param = kani::any();
    let input = format!("did:a:1;{param}");
    let url = DidUrl::parse(&input).expect("valid param by construction");
    assert_eq!(url.params(), [param]);
}
