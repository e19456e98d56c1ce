use lazy_static::lazy_static;
use regex::Regex;

use super::span::Span;

pub const COMMENT_START: char = '#';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// First lexeme starts a comment, so the whole line is one.
    Comment,
    Lexemes(Vec<Span<'a>>),
}

fn is_space(c: char) -> bool {
    // same set as (?-u:\s)
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

pub fn trim_line(line: &str) -> &str {
    line.trim_matches(is_space)
}

pub fn tokenize(line: &str) -> Line<'_> {
    lazy_static! {
        static ref SPACE_RE: Regex = Regex::new(r"(?-u:\s)+").unwrap();
    }

    let line = trim_line(line);
    if line.is_empty() {
        return Line::Blank;
    }

    let lexemes: Vec<_> = SPACE_RE.split(line).map(Span).collect();
    if lexemes[0].0.starts_with(COMMENT_START) {
        Line::Comment
    } else {
        Line::Lexemes(lexemes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words<'a>(line: &Line<'a>) -> Vec<&'a str> {
        match line {
            Line::Lexemes(v) => v.iter().map(|s| s.0).collect(),
            _ => panic!("expected lexemes, got {:?}", line),
        }
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(tokenize(""), Line::Blank);
        assert_eq!(tokenize(" \t \r\n"), Line::Blank);
        assert_eq!(tokenize("# whole line"), Line::Comment);
        assert_eq!(tokenize("   #x MOVE GF@a int@1"), Line::Comment);
    }

    #[test]
    fn test_split_on_runs() {
        let line = tokenize("  MOVE \t GF@x    int@5#note\n");
        assert_eq!(words(&line), vec!["MOVE", "GF@x", "int@5#note"]);
        assert_eq!(words(&tokenize("BREAK")), vec!["BREAK"]);
    }

    #[test]
    fn test_lexemes_point_into_line() {
        let src = "  JUMP L1";
        if let Line::Lexemes(v) = tokenize(src) {
            let off = v[1].0.as_ptr() as usize - src.as_ptr() as usize;
            assert_eq!(off, 7);
        } else {
            panic!();
        }
    }
}
