use lazy_static::lazy_static;
use regex::Regex;
use tracing::{event, Level};

use super::instruction::Instruction;
use super::instruction::InstructionBuilder;
use super::label::LabelResolver;
use super::opcodes;
use super::opcodes::Flow;
use super::shapes;
use super::span::Error;
use super::span::ErrorKind;
use super::span::ErrorMaker;
use super::span::Span;
use super::tokenize::tokenize;
use super::tokenize::trim_line;
use super::tokenize::Line;
use super::tokenize::COMMENT_START;

/// Counters collected over a whole program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub loc: usize,
    pub comments: usize,
    pub labels: usize,
    pub jumps: usize,
    pub forward_jumps_attempted: usize,
    pub backward_jumps: usize,
    pub returns: usize,
    pub bad_jumps: usize,
}
impl Statistics {
    /// Forward jumps whose target was eventually defined.
    pub fn forward_jumps(&self) -> usize {
        self.forward_jumps_attempted - self.bad_jumps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingHeader,
    Body,
}

/// Single-pass parser state. Feed it source lines in order, then call `finish`.
#[derive(Debug)]
pub struct Driver {
    state: State,
    line_no: usize,
    comments: usize,
    builder: InstructionBuilder,
    resolver: LabelResolver,
}
impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}
impl Driver {
    pub fn new() -> Self {
        Self {
            state: State::AwaitingHeader,
            line_no: 0,
            comments: 0,
            builder: InstructionBuilder::new(),
            resolver: LabelResolver::new(),
        }
    }

    /// Returns `None` for blank, comment, and header lines.
    pub fn parse(&mut self, line: &str) -> Result<Option<Instruction>, Error> {
        self.line_no += 1;
        let em = ErrorMaker::new(line, self.line_no);
        match self.state {
            State::AwaitingHeader => {
                self.header(&em, line)?;
                Ok(None)
            }
            State::Body => self.body(&em, line),
        }
    }

    fn header(&mut self, em: &ErrorMaker<'_>, line: &str) -> Result<(), Error> {
        lazy_static! {
            static ref HEADER_RE: Regex = Regex::new(r"(?i)\A\.IPPcode21(?:(?-u:\s)*#.*)?\z").unwrap();
        }

        let trimmed = trim_line(line);
        if trimmed.is_empty() {
            return Ok(());
        }
        if trimmed.starts_with(COMMENT_START) {
            self.comments += 1;
            return Ok(());
        }
        if !HEADER_RE.is_match(trimmed) {
            return em.err1(ErrorKind::MissingOrInvalidHeader, Span(trimmed));
        }

        if trimmed.contains(COMMENT_START) {
            self.comments += 1;
        }
        event!(Level::DEBUG, "found header on line {}", self.line_no);
        self.state = State::Body;
        Ok(())
    }

    fn body(&mut self, em: &ErrorMaker<'_>, line: &str) -> Result<Option<Instruction>, Error> {
        let lexemes = match tokenize(line) {
            Line::Blank => return Ok(None),
            Line::Comment => {
                self.comments += 1;
                return Ok(None);
            }
            Line::Lexemes(lexemes) => lexemes,
        };

        let classified = opcodes::classify(lexemes[0]).map_err(|kind| em.error1(kind, lexemes[0]))?;
        let handled = shapes::handle(em, classified, &lexemes, &mut self.builder)?;
        if handled.has_comment {
            self.comments += 1;
        }

        let instruction = handled.instruction;
        let target = instruction.args.first().map(|a| a.value.as_str());
        match (classified.opcode.flow, target) {
            (Flow::DefineLabel, Some(name)) => {
                event!(Level::TRACE, "line {}: label {}", self.line_no, name);
                self.resolver.define_label(name);
            }
            (Flow::Jump, Some(name)) => {
                let class = self.resolver.record_jump(name);
                event!(Level::TRACE, "line {}: {:?} jump to {}", self.line_no, class, name);
            }
            (Flow::Return, _) => self.resolver.record_return(),
            _ => {}
        }

        event!(
            Level::TRACE,
            "instruction {} {} with {} argument(s)",
            instruction.order,
            instruction.opcode,
            instruction.args.len()
        );
        Ok(Some(instruction))
    }

    /// Ends the parse. Fails if the input never contained a header.
    pub fn finish(self) -> Result<Statistics, Error> {
        if self.state == State::AwaitingHeader {
            return Err(Error::at_end(ErrorKind::MissingOrInvalidHeader, self.line_no));
        }

        event!(
            Level::DEBUG,
            "labels: {}",
            self.resolver.defined_labels().collect::<Vec<_>>().join(", ")
        );
        for (target, count) in self.resolver.unresolved_targets() {
            event!(Level::DEBUG, "label {} is never defined ({} jump(s))", target, count);
        }

        let r = &self.resolver;
        Ok(Statistics {
            loc: self.builder.count(),
            comments: self.comments,
            labels: r.labels,
            jumps: r.jumps,
            forward_jumps_attempted: r.forward_jumps_attempted,
            backward_jumps: r.backward_jumps,
            returns: r.returns,
            bad_jumps: r.bad_jumps(),
        })
    }
}
