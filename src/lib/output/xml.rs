use std::borrow::Cow;
use std::io::Result;
use std::io::Write;

use crate::lib::parse::ArgKind;
use crate::lib::parse::Instruction;

static INDENT: &str = "  ";

pub fn type_name(kind: ArgKind) -> &'static str {
    use ArgKind::*;
    match kind {
        Variable => "var",
        Integer => "int",
        Boolean => "bool",
        Nil => "nil",
        String => "string",
        Label => "label",
        Type => "type",
    }
}

pub fn escape(s: &str) -> Cow<str> {
    if !s.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Streams a `<program>` document. Instructions are written as they arrive.
pub struct XmlWriter<W: Write> {
    w: W,
    count: usize,
}
impl<W: Write> XmlWriter<W> {
    pub fn new(mut w: W) -> Result<Self> {
        writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        write!(w, r#"<program language="IPPcode21""#)?;
        Ok(Self { w, count: 0 })
    }

    pub fn instruction(&mut self, inst: &Instruction) -> Result<()> {
        if self.count == 0 {
            writeln!(self.w, ">")?;
        }
        self.count += 1;

        write!(
            self.w,
            r#"{}<instruction order="{}" opcode="{}""#,
            INDENT,
            inst.order,
            escape(&inst.opcode)
        )?;
        if inst.args.is_empty() {
            return writeln!(self.w, "/>");
        }
        writeln!(self.w, ">")?;

        for (i, arg) in inst.args.iter().enumerate() {
            let pos = i + 1;
            let ty = type_name(arg.kind);
            if arg.value.is_empty() {
                writeln!(self.w, r#"{0}{0}<arg{1} type="{2}"/>"#, INDENT, pos, ty)?;
            } else {
                writeln!(
                    self.w,
                    r#"{0}{0}<arg{1} type="{2}">{3}</arg{1}>"#,
                    INDENT,
                    pos,
                    ty,
                    escape(&arg.value)
                )?;
            }
        }
        writeln!(self.w, "{}</instruction>", INDENT)
    }

    pub fn finish(mut self) -> Result<W> {
        if self.count == 0 {
            writeln!(self.w, "/>")?;
        } else {
            writeln!(self.w, "</program>")?;
        }
        self.w.flush()?;
        Ok(self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::parse::Argument;
    use pretty_assertions::assert_eq;

    fn render(insts: &[Instruction]) -> String {
        let mut w = XmlWriter::new(Vec::new()).unwrap();
        for inst in insts {
            w.instruction(inst).unwrap();
        }
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(
            render(&[]),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<program language=\"IPPcode21\"/>\n"
        );
    }

    #[test]
    fn test_program() {
        let insts = vec![
            Instruction {
                order: 1,
                opcode: "MOVE".to_owned(),
                args: vec![
                    Argument::new(ArgKind::Variable, "GF@x"),
                    Argument::new(ArgKind::String, r"a<b>\032&"),
                ],
            },
            Instruction {
                order: 2,
                opcode: "BREAK".to_owned(),
                args: vec![],
            },
            Instruction {
                order: 3,
                opcode: "WRITE".to_owned(),
                args: vec![Argument::new(ArgKind::String, "")],
            },
        ];

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<program language="IPPcode21">
  <instruction order="1" opcode="MOVE">
    <arg1 type="var">GF@x</arg1>
    <arg2 type="string">a&lt;b&gt;\032&amp;</arg2>
  </instruction>
  <instruction order="2" opcode="BREAK"/>
  <instruction order="3" opcode="WRITE">
    <arg1 type="string"/>
  </instruction>
</program>
"#;
        assert_eq!(render(&insts), expected);
    }
}
