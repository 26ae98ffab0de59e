//! Byte classes from RFC 5322 and RFC 5234.

/// `VCHAR`: visible (printing) US-ASCII, `!` through `~`.
pub const fn is_visible_char(byte: u8) -> bool {
    byte >= b'!' && byte <= b'~'
}

/// `WSP`: space or horizontal tab (RFC 5234 Appendix B).
pub const fn is_white_space(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// `qtext`: printable US-ASCII excluding backslash and double quote.
pub const fn is_quoted_text(byte: u8) -> bool {
    is_visible_char(byte) && byte != b'\\' && byte != b'"'
}
