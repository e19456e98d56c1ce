mod output;
mod parse;

pub use output::stats::group as group_stats;
pub use output::stats::Metric;
pub use output::stats::StatsError;
pub use output::stats::StatsEvent;
pub use output::stats::StatsGroup;
pub use output::xml::XmlWriter;
pub use parse::ArgKind;
pub use parse::Argument;
pub use parse::Driver;
pub use parse::Error as ParseError;
pub use parse::ErrorKind;
pub use parse::Instruction;
pub use parse::Statistics;

/// Parses a whole source text, handing each instruction to `sink` in program order.
pub fn parse_program(
    source: &str,
    mut sink: impl FnMut(Instruction) -> std::io::Result<()>,
) -> Result<Statistics, ProgramError> {
    let mut driver = Driver::new();
    for line in source.lines() {
        if let Some(inst) = driver.parse(line)? {
            sink(inst)?;
        }
    }
    Ok(driver.finish()?)
}

#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to emit instruction: {0}")]
    Sink(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_program_to_xml() {
        let source = "\
.IPPcode21
DEFVAR GF@counter
MOVE GF@counter string@a\\032&b  # init
LABEL loop
JUMPIFEQ end GF@counter int@10
JUMP loop
LABEL end
";
        let mut xml = XmlWriter::new(Vec::new()).unwrap();
        let stats = parse_program(source, |inst| xml.instruction(&inst)).unwrap();
        let out = String::from_utf8(xml.finish().unwrap()).unwrap();

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<program language="IPPcode21">
  <instruction order="1" opcode="DEFVAR">
    <arg1 type="var">GF@counter</arg1>
  </instruction>
  <instruction order="2" opcode="MOVE">
    <arg1 type="var">GF@counter</arg1>
    <arg2 type="string">a\032&amp;b</arg2>
  </instruction>
  <instruction order="3" opcode="LABEL">
    <arg1 type="label">loop</arg1>
  </instruction>
  <instruction order="4" opcode="JUMPIFEQ">
    <arg1 type="label">end</arg1>
    <arg2 type="var">GF@counter</arg2>
    <arg3 type="int">10</arg3>
  </instruction>
  <instruction order="5" opcode="JUMP">
    <arg1 type="label">loop</arg1>
  </instruction>
  <instruction order="6" opcode="LABEL">
    <arg1 type="label">end</arg1>
  </instruction>
</program>
"#;
        assert_eq!(out, expected);
        assert_eq!(stats.loc, 6);
        assert_eq!(stats.comments, 1);
        assert_eq!(stats.labels, 2);
        assert_eq!(stats.jumps, 2);
        assert_eq!(stats.backward_jumps, 1);
        assert_eq!(stats.forward_jumps(), 1);
    }

    #[test]
    fn test_parse_program_stops_at_first_error() {
        let mut seen = Vec::new();
        let err = parse_program(".IPPcode21\nBREAK\nPUSHS bool@maybe\nBREAK\n", |inst| {
            seen.push(inst.order);
            Ok(())
        })
        .unwrap_err();

        match err {
            ProgramError::Parse(e) => {
                assert_eq!(e.kind(), ErrorKind::InvalidSymbol);
                assert_eq!(e.line_no(), 3);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(seen, vec![1]);
    }
}
