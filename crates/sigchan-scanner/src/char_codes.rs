//! Character classification for Go source text.

#[inline]
pub const fn is_dec_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub const fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub const fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

#[inline]
pub const fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

/// Go letters: Unicode letters plus underscore.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_numeric()
}

/// Whitespace that never inserts a semicolon.
#[inline]
pub const fn is_horizontal_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_accept_unicode_letters() {
        assert!(is_identifier_start('_'));
        assert!(is_identifier_start('ñ'));
        assert!(!is_identifier_start('9'));
        assert!(is_identifier_part('9'));
        assert!(is_identifier_part('٣'));
    }

    #[test]
    fn digit_classes() {
        assert!(is_octal_digit(b'7'));
        assert!(!is_octal_digit(b'8'));
        assert!(is_binary_digit(b'1'));
        assert!(is_hex_digit(b'F'));
        assert!(!is_hex_digit(b'g'));
    }
}
