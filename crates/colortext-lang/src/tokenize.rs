//! Hand-written tokenizers for C-like languages.
//!
//! Each `*_end` helper inspects the beginning of its input and returns the exclusive end offset
//! of the token it recognizes, or `None`.

use crate::{PaletteIndex, Token};

/// Double-quoted string with `\"` escapes. Unterminated strings do not match.
pub fn string_end(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'"') {
        return None;
    }
    let mut p = 1;
    while p < input.len() {
        match input[p] {
            b'"' => return Some(p + 1),
            b'\\' if input.get(p + 1) == Some(&b'"') => p += 2,
            _ => p += 1,
        }
    }
    None
}

/// Single-quoted character literal, optionally escaped (`'a'`, `'\n'`).
pub fn char_literal_end(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'\'') {
        return None;
    }
    let mut p = 1;
    if input.get(p) == Some(&b'\\') {
        p += 1;
    }
    if p < input.len() {
        p += 1;
    }
    (input.get(p) == Some(&b'\'')).then_some(p + 1)
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
pub fn identifier_end(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = input
        .iter()
        .skip(1)
        .take_while(|c| c.is_ascii_alphanumeric() || **c == b'_')
        .count();
    Some(1 + len)
}

/// Integer, float, hex (`0x`) or binary (`0b`) literal with an optional sign and C suffixes.
pub fn number_end(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    let starts_with_digit = first.is_ascii_digit();
    if first != b'+' && first != b'-' && !starts_with_digit {
        return None;
    }

    let digits = |from: usize, pred: fn(&u8) -> bool| -> usize {
        from + input[from..].iter().take_while(|c| pred(c)).count()
    };

    let mut p = digits(1, u8::is_ascii_digit);
    if !starts_with_digit && p == 1 {
        return None;
    }

    let mut is_float = false;
    let mut is_hex = false;
    let mut is_binary = false;

    match input.get(p) {
        Some(b'.') => {
            is_float = true;
            p = digits(p + 1, u8::is_ascii_digit);
        }
        Some(b'x' | b'X') => {
            is_hex = true;
            p = digits(p + 1, u8::is_ascii_hexdigit);
        }
        Some(b'b' | b'B') => {
            is_binary = true;
            p = digits(p + 1, |c| matches!(*c, b'0' | b'1'));
        }
        _ => {}
    }

    if !is_hex && !is_binary {
        if matches!(input.get(p), Some(b'e' | b'E')) {
            is_float = true;
            p += 1;
            if matches!(input.get(p), Some(b'+' | b'-')) {
                p += 1;
            }
            let exp_end = digits(p, u8::is_ascii_digit);
            if exp_end == p {
                return None;
            }
            p = exp_end;
        }
        if input.get(p) == Some(&b'f') {
            p += 1;
        }
    }

    if !is_float {
        p = digits(p, |c| matches!(*c, b'u' | b'U' | b'l' | b'L'));
    }

    Some(p)
}

/// Single punctuation byte.
pub fn punctuation_end(input: &[u8]) -> Option<usize> {
    const PUNCTUATION: &[u8] = b"[]{}!%^&*()-+=~|<>?:/;,.";
    PUNCTUATION.contains(input.first()?).then_some(1)
}

/// Tokenizer shared by the C and C++ definitions.
///
/// Leading blanks are skipped; a blank-only remainder yields an empty default token at the end
/// of the input.
pub fn tokenize_c_style(input: &[u8]) -> Option<Token> {
    let start = input
        .iter()
        .take_while(|c| **c == b' ' || **c == b'\t')
        .count();
    let rest = &input[start..];
    if rest.is_empty() {
        return Some(Token {
            start,
            end: start,
            class: PaletteIndex::Default,
        });
    }

    let matchers: [(fn(&[u8]) -> Option<usize>, PaletteIndex); 5] = [
        (string_end, PaletteIndex::String),
        (char_literal_end, PaletteIndex::CharLiteral),
        (identifier_end, PaletteIndex::Identifier),
        (number_end, PaletteIndex::Number),
        (punctuation_end, PaletteIndex::Punctuation),
    ];

    matchers.iter().find_map(|(matcher, class)| {
        matcher(rest).map(|len| Token {
            start,
            end: start + len,
            class: *class,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(string_end(br#""a\"b" rest"#), Some(6));
        assert_eq!(string_end(br#""open"#), None);
        assert_eq!(string_end(b"x"), None);
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(char_literal_end(b"'a'"), Some(3));
        assert_eq!(char_literal_end(br"'\n'"), Some(4));
        assert_eq!(char_literal_end(b"'ab'"), None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(number_end(b"42;"), Some(2));
        assert_eq!(number_end(b"3.5f)"), Some(4));
        assert_eq!(number_end(b"0xFFu,"), Some(5));
        assert_eq!(number_end(b"0b101"), Some(5));
        assert_eq!(number_end(b"1e10"), Some(4));
        assert_eq!(number_end(b"1e+"), None);
        assert_eq!(number_end(b"-7UL"), Some(4));
        assert_eq!(number_end(b"-x"), None);
    }

    #[test]
    fn test_tokenize_skips_blanks() {
        let token = tokenize_c_style(b"  \tfoo").unwrap();
        assert_eq!(
            token,
            Token {
                start: 3,
                end: 6,
                class: PaletteIndex::Identifier
            }
        );

        let blank = tokenize_c_style(b"   ").unwrap();
        assert_eq!((blank.start, blank.end), (3, 3));
        assert_eq!(blank.class, PaletteIndex::Default);
    }

    #[test]
    fn test_tokenize_unknown_byte() {
        assert_eq!(tokenize_c_style(b"@x"), None);
        assert_eq!(tokenize_c_style(b";").map(|t| t.class), Some(PaletteIndex::Punctuation));
    }
}
