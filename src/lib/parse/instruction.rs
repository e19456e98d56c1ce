#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Variable,
    Integer,
    Boolean,
    Nil,
    String,
    Label,
    Type,
}

/// Argument value with any type prefix (`int@`, `string@`, ...) removed. Not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub kind: ArgKind,
    pub value: String,
}
impl Argument {
    pub fn new(kind: ArgKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub order: usize,
    pub opcode: String,
    pub args: Vec<Argument>,
}
impl Instruction {
    pub fn set_opcode(&mut self, name: &str) {
        debug_assert!(self.opcode.is_empty(), "opcode set twice");
        self.opcode = name.to_ascii_uppercase();
    }

    /// Returns the 1-based position of the new argument.
    pub fn push_argument(&mut self, arg: Argument) -> usize {
        self.args.push(arg);
        self.args.len()
    }
}

/// Hands out instructions with gapless, increasing order numbers starting at 1.
#[derive(Debug, Default)]
pub struct InstructionBuilder {
    last_order: usize,
}
impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_instruction(&mut self) -> Instruction {
        self.last_order += 1;
        Instruction {
            order: self.last_order,
            opcode: String::new(),
            args: Vec::with_capacity(3),
        }
    }

    pub fn count(&self) -> usize {
        self.last_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_gapless() {
        let mut b = InstructionBuilder::new();
        let orders: Vec<_> = (0..4).map(|_| b.begin_instruction().order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(b.count(), 4);
    }

    #[test]
    fn test_argument_positions() {
        let mut b = InstructionBuilder::new();
        let mut inst = b.begin_instruction();
        inst.set_opcode("jumpifeq");
        assert_eq!(inst.opcode, "JUMPIFEQ");
        assert_eq!(inst.push_argument(Argument::new(ArgKind::Label, "end")), 1);
        assert_eq!(inst.push_argument(Argument::new(ArgKind::Variable, "LF@a")), 2);
        assert_eq!(inst.push_argument(Argument::new(ArgKind::Nil, "nil")), 3);
        assert_eq!(inst.args[1].value, "LF@a");
    }
}
