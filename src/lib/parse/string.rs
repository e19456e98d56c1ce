use super::span::Error;
use super::span::ErrorKind;
use super::span::ErrorMaker;
use super::span::Span;
use super::tokenize::COMMENT_START;

const ESCAPE_DIGITS: usize = 3;

/// Checks the payload of a `string@` literal. Escapes are `\` followed by exactly three decimal digits.
pub fn check_literal(em: &ErrorMaker<'_>, payload: Span<'_>) -> Result<(), Error> {
    let s = payload.0;
    let bytes = s.as_bytes();

    // Every byte we reject is ASCII, so slicing around it stays on char boundaries.
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b <= b' ' || b == COMMENT_START as u8 {
            return em.err1(ErrorKind::InvalidStringChar, Span(&s[i..i + 1]));
        } else if b == b'\\' {
            let digits = bytes[i + 1..]
                .iter()
                .take(ESCAPE_DIGITS)
                .take_while(|d| d.is_ascii_digit())
                .count();
            if digits != ESCAPE_DIGITS {
                return em.err1(ErrorKind::InvalidEscape, Span(&s[i..i + 1 + digits]));
            }
            i += 1 + ESCAPE_DIGITS;
        } else {
            i += 1;
        }
    }

    Ok(())
}
