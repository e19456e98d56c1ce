use std::fmt;

use thiserror::Error as ThisError;

/// A slice of the source line currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a>(pub &'a str);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ErrorKind {
    #[error("Missing or invalid .IPPcode21 header")]
    MissingOrInvalidHeader,
    #[error("Unknown instruction")]
    UnknownInstruction,
    #[error("Too few arguments for instruction")]
    TooFewLexemes,
    #[error("Unexpected text after the last argument")]
    TrailingGarbage,
    #[error("Invalid variable")]
    InvalidVariable,
    #[error("Invalid symbol")]
    InvalidSymbol,
    #[error("Invalid integer literal")]
    InvalidInteger,
    #[error("Invalid label")]
    InvalidLabel,
    #[error("Invalid type name")]
    InvalidType,
    #[error("Invalid character in string literal")]
    InvalidStringChar,
    #[error("Invalid escape sequence in string literal")]
    InvalidEscape,
}
impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        use ErrorKind::*;
        match self {
            MissingOrInvalidHeader => 21,
            UnknownInstruction => 22,
            TooFewLexemes | TrailingGarbage | InvalidVariable | InvalidSymbol | InvalidInteger | InvalidLabel
            | InvalidType | InvalidStringChar | InvalidEscape => 23,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanBounds {
    start: usize,
    end: usize,
}
impl SpanBounds {
    fn new(span: Span, line: &str) -> Self {
        let start = span.0.as_ptr() as usize - line.as_ptr() as usize;
        assert!(start <= line.len());
        let end = start + span.0.len();
        assert!(end <= line.len());
        Self { start, end }
    }

    fn empty() -> Self {
        Self { start: 0, end: 0 }
    }
}

struct ErrorPrinter<'a> {
    fname: &'a str,
    source: &'a str,
}
impl<'a> ErrorPrinter<'a> {
    fn new(fname: &'a str, source: &'a str) -> Self {
        Self { fname, source }
    }

    fn print(&self, msg: &str, line_no: usize, span: SpanBounds) {
        const TABWIDTH: usize = 8;

        let Some(line) = line_no.checked_sub(1).and_then(|i| self.source.lines().nth(i)) else {
            eprintln!("{}:{} {}", self.fname, line_no, msg);
            return;
        };

        // convert byte positions to character positions
        let mut start_ci = None;
        let mut end_ci = None;
        let mut ci = 0;
        for (byte_offset, c) in line.char_indices() {
            if span.start == byte_offset {
                start_ci = Some(ci);
            }
            if span.end == byte_offset {
                end_ci = Some(ci);
            }
            ci += if c == '\t' { TABWIDTH } else { 1 };
        }
        let start_ci = start_ci.unwrap_or(ci);
        let end_ci = end_ci.unwrap_or(ci);

        let underline: String = (0..ci + 1)
            .map(|i| {
                if i == start_ci {
                    '^'
                } else if i > start_ci && i < end_ci {
                    '~'
                } else {
                    ' '
                }
            })
            .collect();

        fn trim(s: &str) -> &str {
            match s.char_indices().nth(115) {
                Some((i, _)) => &s[..i],
                None => s,
            }
        }

        eprintln!("{}:{}:{} {}", self.fname, line_no, start_ci + 1, msg);
        eprintln!("{}", trim(line));
        eprintln!("{}", trim(underline.trim_end()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    line_no: usize,
    bounds: SpanBounds,
}
impl Error {
    pub fn new(kind: ErrorKind, line_no: usize, line: &str, span: Span<'_>) -> Self {
        Self {
            kind,
            line_no,
            bounds: SpanBounds::new(span, line),
        }
    }

    /// Error not tied to any particular text, e.g. input that ended too early.
    pub fn at_end(kind: ErrorKind, line_no: usize) -> Self {
        Self {
            kind,
            line_no,
            bounds: SpanBounds::empty(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn display(&self, fname: &str, source: &str) {
        let printer = ErrorPrinter::new(fname, source);
        printer.print(&format!("Error: {}", self.kind), self.line_no, self.bounds);
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_no, self.kind)
    }
}
impl std::error::Error for Error {}

/// Builds errors pointing into the line currently being parsed.
#[derive(Clone, Copy)]
pub struct ErrorMaker<'a> {
    line: &'a str,
    line_no: usize,
}
impl<'a> ErrorMaker<'a> {
    pub fn new(line: &'a str, line_no: usize) -> Self {
        Self { line, line_no }
    }

    pub fn error1(&self, kind: ErrorKind, span: Span<'_>) -> Error {
        Error::new(kind, self.line_no, self.line, span)
    }

    pub fn err1<T>(&self, kind: ErrorKind, span: Span<'_>) -> Result<T, Error> {
        Err(self.error1(kind, span))
    }
}
