use lazy_static::lazy_static;
use regex::Regex;

use super::instruction::ArgKind;
use super::instruction::Argument;
use super::opcodes::Operand;
use super::span::Error;
use super::span::ErrorKind;
use super::span::ErrorMaker;
use super::span::Span;
use super::string;
use super::tokenize::COMMENT_START;

lazy_static! {
    static ref VARIABLE_RE: Regex = Regex::new(r"\A(?:GF|TF|LF)@[A-Za-z_\-$&%*!?][A-Za-z0-9_\-$&%*!?]*\z").unwrap();
    static ref LABEL_RE: Regex = Regex::new(r"\A[A-Za-z_\-$&%*!?][A-Za-z0-9_\-$&%*!?]*\z").unwrap();
    static ref INT_RE: Regex = Regex::new(r"\A[+-]?[0-9]+\z").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub arg: Argument,
    /// A comment was glued to the end of the lexeme and stripped off.
    pub commented: bool,
}

pub fn strip_comment(lexeme: Span<'_>) -> (Span<'_>, bool) {
    match lexeme.0.find(COMMENT_START) {
        Some(pos) => (Span(&lexeme.0[..pos]), true),
        None => (lexeme, false),
    }
}

pub fn is_variable(s: &str) -> bool {
    VARIABLE_RE.is_match(s)
}

pub fn operand(em: &ErrorMaker<'_>, kind: Operand, lexeme: Span<'_>) -> Result<Validated, Error> {
    match kind {
        Operand::Var => variable(em, lexeme),
        Operand::Symb => symbol(em, lexeme),
        Operand::Label => label(em, lexeme),
        Operand::Type => type_name(em, lexeme),
    }
}

pub fn variable(em: &ErrorMaker<'_>, lexeme: Span<'_>) -> Result<Validated, Error> {
    let (value, commented) = strip_comment(lexeme);
    if !is_variable(value.0) {
        return em.err1(ErrorKind::InvalidVariable, value);
    }
    Ok(Validated {
        arg: Argument::new(ArgKind::Variable, value.0),
        commented,
    })
}

pub fn symbol(em: &ErrorMaker<'_>, lexeme: Span<'_>) -> Result<Validated, Error> {
    let (value, commented) = strip_comment(lexeme);
    let s = value.0;

    let arg = if is_variable(s) {
        Argument::new(ArgKind::Variable, s)
    } else if let Some(payload) = s.strip_prefix("int@") {
        if !INT_RE.is_match(payload) {
            return em.err1(ErrorKind::InvalidInteger, value);
        }
        Argument::new(ArgKind::Integer, payload)
    } else if s == "bool@true" || s == "bool@false" {
        Argument::new(ArgKind::Boolean, &s["bool@".len()..])
    } else if s == "nil@nil" {
        Argument::new(ArgKind::Nil, "nil")
    } else if let Some(payload) = s.strip_prefix("string@") {
        string::check_literal(em, Span(payload))?;
        Argument::new(ArgKind::String, payload)
    } else {
        return em.err1(ErrorKind::InvalidSymbol, value);
    };

    Ok(Validated { arg, commented })
}

pub fn label(em: &ErrorMaker<'_>, lexeme: Span<'_>) -> Result<Validated, Error> {
    let (value, commented) = strip_comment(lexeme);
    if !LABEL_RE.is_match(value.0) {
        return em.err1(ErrorKind::InvalidLabel, value);
    }
    Ok(Validated {
        arg: Argument::new(ArgKind::Label, value.0),
        commented,
    })
}

pub fn type_name(em: &ErrorMaker<'_>, lexeme: Span<'_>) -> Result<Validated, Error> {
    let (value, commented) = strip_comment(lexeme);
    match value.0 {
        "int" | "bool" | "string" => Ok(Validated {
            arg: Argument::new(ArgKind::Type, value.0),
            commented,
        }),
        _ => em.err1(ErrorKind::InvalidType, value),
    }
}
