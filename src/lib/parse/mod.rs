mod driver;
mod instruction;
mod label;
mod opcodes;
mod shapes;
mod span;
mod string;
mod tokenize;
mod validate;

pub use driver::Driver;
pub use driver::Statistics;
pub use instruction::ArgKind;
pub use instruction::Argument;
pub use instruction::Instruction;
pub use span::Error;
pub use span::ErrorKind;
