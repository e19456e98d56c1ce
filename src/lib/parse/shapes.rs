use super::instruction::Instruction;
use super::instruction::InstructionBuilder;
use super::opcodes::ArgumentShape;
use super::opcodes::Classified;
use super::span::Error;
use super::span::ErrorKind;
use super::span::ErrorMaker;
use super::span::Span;
use super::tokenize::COMMENT_START;
use super::validate;

#[derive(Debug)]
pub struct Handled {
    pub instruction: Instruction,
    /// At most one comment is counted per instruction.
    pub has_comment: bool,
}

fn is_comment(lexeme: Span<'_>) -> bool {
    lexeme.0.starts_with(COMMENT_START)
}

/// Validates the lexemes following the opcode (`lexemes[0]`) against its shape and builds the instruction.
pub fn handle<'a>(
    em: &ErrorMaker<'a>,
    classified: Classified,
    lexemes: &[Span<'a>],
    builder: &mut InstructionBuilder,
) -> Result<Handled, Error> {
    let opcode = classified.opcode;
    match opcode.shape {
        ArgumentShape::Nullary => nullary(em, classified, lexemes, builder),
        ArgumentShape::Var
        | ArgumentShape::Symb
        | ArgumentShape::VarSymb
        | ArgumentShape::VarSymbSymb
        | ArgumentShape::Label
        | ArgumentShape::LabelSymbSymb
        | ArgumentShape::VarType => with_operands(em, classified, lexemes, builder),
    }
}

fn nullary<'a>(
    em: &ErrorMaker<'a>,
    classified: Classified,
    lexemes: &[Span<'a>],
    builder: &mut InstructionBuilder,
) -> Result<Handled, Error> {
    let extra = &lexemes[1..];
    if let Some(&first) = extra.first() {
        if !is_comment(first) {
            return em.err1(ErrorKind::TrailingGarbage, first);
        }
    }

    let mut instruction = builder.begin_instruction();
    instruction.set_opcode(classified.opcode.name);
    Ok(Handled {
        instruction,
        has_comment: classified.glued_comment || !extra.is_empty(),
    })
}

fn with_operands<'a>(
    em: &ErrorMaker<'a>,
    classified: Classified,
    lexemes: &[Span<'a>],
    builder: &mut InstructionBuilder,
) -> Result<Handled, Error> {
    let operands = classified.opcode.shape.operands();
    let opcode_span = lexemes[0];

    // A required argument may not be swallowed by a comment
    let supplied = lexemes[1..].iter().take_while(|&&l| !is_comment(l)).count();
    if supplied < operands.len() {
        let at = lexemes.get(1 + supplied).copied().unwrap_or(opcode_span);
        return em.err1(ErrorKind::TooFewLexemes, at);
    }

    let mut instruction = builder.begin_instruction();
    instruction.set_opcode(classified.opcode.name);

    let mut last_commented = false;
    for (i, (&kind, &lexeme)) in operands.iter().zip(&lexemes[1..]).enumerate() {
        let validated = validate::operand(em, kind, lexeme)?;
        if validated.commented && i + 1 < operands.len() {
            return em.err1(ErrorKind::TooFewLexemes, lexemes[i + 2]);
        }
        last_commented = validated.commented;
        instruction.push_argument(validated.arg);
    }

    let extra = &lexemes[1 + operands.len()..];
    if let Some(&first) = extra.first() {
        if !last_commented && !is_comment(first) {
            return em.err1(ErrorKind::TrailingGarbage, first);
        }
    }

    Ok(Handled {
        instruction,
        has_comment: last_commented || !extra.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::parse::instruction::ArgKind;
    use crate::lib::parse::opcodes::classify;
    use crate::lib::parse::tokenize::tokenize;
    use crate::lib::parse::tokenize::Line;

    fn run(line: &str) -> Result<Handled, ErrorKind> {
        let em = ErrorMaker::new(line, 1);
        let lexemes = match tokenize(line) {
            Line::Lexemes(v) => v,
            other => panic!("not an instruction line: {:?}", other),
        };
        let classified = classify(lexemes[0])?;
        let mut builder = InstructionBuilder::new();
        handle(&em, classified, &lexemes, &mut builder).map_err(|e| e.kind())
    }

    fn kinds(h: &Handled) -> Vec<ArgKind> {
        h.instruction.args.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_shapes() {
        let h = run("ADD LF@r GF@a int@2").unwrap();
        assert_eq!(h.instruction.opcode, "ADD");
        assert_eq!(kinds(&h), vec![ArgKind::Variable, ArgKind::Variable, ArgKind::Integer]);
        assert!(!h.has_comment);

        let h = run("read GF@in bool").unwrap();
        assert_eq!(h.instruction.opcode, "READ");
        assert_eq!(kinds(&h), vec![ArgKind::Variable, ArgKind::Type]);

        let h = run("JUMPIFNEQ done GF@a nil@nil").unwrap();
        assert_eq!(kinds(&h), vec![ArgKind::Label, ArgKind::Variable, ArgKind::Nil]);

        let h = run("WRITE string@hi").unwrap();
        assert_eq!(kinds(&h), vec![ArgKind::String]);
    }

    #[test]
    fn test_too_few() {
        assert_eq!(run("MOVE GF@x").unwrap_err(), ErrorKind::TooFewLexemes);
        assert_eq!(run("LABEL").unwrap_err(), ErrorKind::TooFewLexemes);
        assert_eq!(run("MOVE GF@x #int@1").unwrap_err(), ErrorKind::TooFewLexemes);
        assert_eq!(run("MOVE GF@x#c int@1").unwrap_err(), ErrorKind::TooFewLexemes);
    }

    #[test]
    fn test_trailing() {
        assert_eq!(run("DEFVAR GF@x GF@y").unwrap_err(), ErrorKind::TrailingGarbage);
        assert_eq!(run("BREAK now").unwrap_err(), ErrorKind::TrailingGarbage);
        assert_eq!(run("BREAK#a b").unwrap_err(), ErrorKind::TrailingGarbage);
    }

    #[test]
    fn test_comments_counted_once() {
        assert!(run("DEFVAR GF@x # a b c").unwrap().has_comment);
        assert!(run("DEFVAR GF@x#a b c").unwrap().has_comment);
        assert!(run("DEFVAR GF@x#a #b").unwrap().has_comment);
        assert!(run("CREATEFRAME #x").unwrap().has_comment);
        assert!(run("popframe#x").unwrap().has_comment);
        assert!(run("popframe#x #y").unwrap().has_comment);
        assert!(!run("PUSHFRAME").unwrap().has_comment);
    }

    #[test]
    fn test_argument_errors_propagate() {
        assert_eq!(run("DEFVAR GF@1x").unwrap_err(), ErrorKind::InvalidVariable);
        assert_eq!(run("JUMP 9lives").unwrap_err(), ErrorKind::InvalidLabel);
        assert_eq!(run("READ GF@x float").unwrap_err(), ErrorKind::InvalidType);
        assert_eq!(run("EXIT int@").unwrap_err(), ErrorKind::InvalidInteger);
    }
}
