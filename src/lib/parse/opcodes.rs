use super::span::ErrorKind;
use super::span::Span;
use super::tokenize::COMMENT_START;

/// Kind of lexeme an argument position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Var,
    Symb,
    Label,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    Nullary,
    Var,
    Symb,
    VarSymb,
    VarSymbSymb,
    Label,
    LabelSymbSymb,
    VarType,
}
impl ArgumentShape {
    pub fn operands(self) -> &'static [Operand] {
        use ArgumentShape::*;
        match self {
            Nullary => &[],
            Var => &[Operand::Var],
            Symb => &[Operand::Symb],
            VarSymb => &[Operand::Var, Operand::Symb],
            VarSymbSymb => &[Operand::Var, Operand::Symb, Operand::Symb],
            Label => &[Operand::Label],
            LabelSymbSymb => &[Operand::Label, Operand::Symb, Operand::Symb],
            VarType => &[Operand::Var, Operand::Type],
        }
    }
}

/// How an instruction feeds the label/jump statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Plain,
    DefineLabel,
    Jump,
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub name: &'static str,
    pub shape: ArgumentShape,
    pub flow: Flow,
}

const fn op(name: &'static str, shape: ArgumentShape, flow: Flow) -> Opcode {
    Opcode { name, shape, flow }
}

// Must stay sorted by name
static OPCODES: [Opcode; 35] = {
    use ArgumentShape::*;
    use Flow::*;
    [
        op("ADD", VarSymbSymb, Plain),
        op("AND", VarSymbSymb, Plain),
        op("BREAK", Nullary, Plain),
        op("CALL", Label, Jump),
        op("CONCAT", VarSymbSymb, Plain),
        op("CREATEFRAME", Nullary, Plain),
        op("DEFVAR", Var, Plain),
        op("DPRINT", Symb, Plain),
        op("EQ", VarSymbSymb, Plain),
        op("EXIT", Symb, Plain),
        op("GETCHAR", VarSymbSymb, Plain),
        op("GT", VarSymbSymb, Plain),
        op("IDIV", VarSymbSymb, Plain),
        op("INT2CHAR", VarSymb, Plain),
        op("JUMP", Label, Jump),
        op("JUMPIFEQ", LabelSymbSymb, Jump),
        op("JUMPIFNEQ", LabelSymbSymb, Jump),
        op("LABEL", Label, DefineLabel),
        op("LT", VarSymbSymb, Plain),
        op("MOVE", VarSymb, Plain),
        op("MUL", VarSymbSymb, Plain),
        op("NOT", VarSymb, Plain),
        op("OR", VarSymbSymb, Plain),
        op("POPFRAME", Nullary, Plain),
        op("POPS", Var, Plain),
        op("PUSHFRAME", Nullary, Plain),
        op("PUSHS", Symb, Plain),
        op("READ", VarType, Plain),
        op("RETURN", Nullary, Return),
        op("SETCHAR", VarSymbSymb, Plain),
        op("STRI2INT", VarSymbSymb, Plain),
        op("STRLEN", VarSymb, Plain),
        op("SUB", VarSymbSymb, Plain),
        op("TYPE", VarSymb, Plain),
        op("WRITE", Symb, Plain),
    ]
};

pub fn lookup(name: &str) -> Option<&'static Opcode> {
    let name = name.to_ascii_uppercase();
    let ind = OPCODES.binary_search_by_key(&name.as_str(), |o| o.name).ok()?;
    Some(&OPCODES[ind])
}

#[derive(Debug, Clone, Copy)]
pub struct Classified {
    pub opcode: &'static Opcode,
    /// A comment was glued straight onto the mnemonic (only allowed for nullary opcodes).
    pub glued_comment: bool,
}

pub fn classify(lexeme: Span<'_>) -> Result<Classified, ErrorKind> {
    if let Some(opcode) = lookup(lexeme.0) {
        return Ok(Classified {
            opcode,
            glued_comment: false,
        });
    }

    match lexeme.0.split_once(COMMENT_START) {
        Some((name, _)) => match lookup(name) {
            Some(opcode) if opcode.shape == ArgumentShape::Nullary => Ok(Classified {
                opcode,
                glued_comment: true,
            }),
            _ => Err(ErrorKind::UnknownInstruction),
        },
        None => Err(ErrorKind::UnknownInstruction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sorted() {
        for pair in OPCODES.windows(2) {
            assert!(pair[0].name < pair[1].name, "{} >= {}", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(lookup("move").map(|o| o.name), Some("MOVE"));
        assert_eq!(lookup("JumpIfNeq").map(|o| o.shape), Some(ArgumentShape::LabelSymbSymb));
        assert_eq!(lookup("read").map(|o| o.shape), Some(ArgumentShape::VarType));
        assert!(lookup("MOV").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_flow() {
        assert_eq!(lookup("label").unwrap().flow, Flow::DefineLabel);
        assert_eq!(lookup("call").unwrap().flow, Flow::Jump);
        assert_eq!(lookup("jumpifeq").unwrap().flow, Flow::Jump);
        assert_eq!(lookup("return").unwrap().flow, Flow::Return);
        assert_eq!(lookup("break").unwrap().flow, Flow::Plain);
    }

    #[test]
    fn test_classify_glued_comment() {
        let c = classify(Span("return#done")).unwrap();
        assert_eq!(c.opcode.name, "RETURN");
        assert!(c.glued_comment);

        let c = classify(Span("createFrame")).unwrap();
        assert!(!c.glued_comment);

        // only nullary opcodes may carry a comment on the mnemonic
        assert_eq!(classify(Span("MOVE#x")).unwrap_err(), ErrorKind::UnknownInstruction);
        assert_eq!(classify(Span("HALT")).unwrap_err(), ErrorKind::UnknownInstruction);
        assert_eq!(classify(Span(".IPPcode21")).unwrap_err(), ErrorKind::UnknownInstruction);
    }
}
