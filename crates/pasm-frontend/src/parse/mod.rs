
use log::{debug, trace};
use pasm_common::message::{File, Messages, Span};
use pasm_common::program::{Instruction, Opcode, Operand, Program, Slot, Value};
use pasm_common::register::Name;

use crate::lex::{lex, Token};

/// Parse a whole file of pseudo-assembly into the instruction store. Every
/// malformed line is reported, not just the first one.
pub fn parse(src: &str, file: File) -> Result<Program, Messages> {
    debug!("parsing");

    let mut parser = Parser::new(file);
    let mut offset = 0;

    for (ndx, raw) in src.split_inclusive('\n').enumerate() {
        let line = raw.trim_end_matches(|c: char| c == '\n' || c == '\r');
        parser.line(ndx + 1, line, offset);
        offset += raw.len();
    }

    trace!("done parsing {} instructions", parser.program.len());

    if parser.messages.is_empty() {
        Ok(parser.program)
    } else {
        Err(parser.messages)
    }
}

struct Parser {
    file: File,
    program: Program,
    messages: Messages,
}

impl Parser {
    fn new(file: File) -> Self {
        Self {
            file,
            program: Program::new(),
            messages: Messages::new(),
        }
    }

    fn line(&mut self, number: usize, line: &str, offset: usize) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            self.program.add_verbatim(line);
            return;
        }

        let span = Span::new(self.file, offset, offset + line.len());
        let tokens = lex(line, offset, self.file);

        if let Some(inst) = self.instruction(number, span, trimmed, tokens) {
            self.program.add(inst);
        }
    }

    fn instruction(
        &mut self,
        line: usize,
        span: Span,
        text: &str,
        mut tokens: Vec<(Token, Span)>,
    ) -> Option<Instruction> {
        let comment = match tokens.pop() {
            Some((Token::Comment(comment), _)) => Some(comment),
            Some(token) => {
                tokens.push(token);
                None
            }
            None => None,
        };

        let mut ok = true;
        for (_, at) in tokens.iter().filter(|(token, _)| token == &Token::Error) {
            self.messages.at(*at).parse_unknown_token();
            ok = false;
        }

        if !ok {
            return None;
        }

        let mut tokens = tokens.into_iter().peekable();

        let label = match tokens.peek() {
            Some((Token::Label(label), at)) => {
                let label = (label.clone(), *at);
                tokens.next();
                Some(label)
            }
            _ => None,
        };

        let (opcode, opcode_span) = match tokens.next() {
            None => {
                return Some(Instruction {
                    line,
                    span,
                    text: text.into(),
                    label,
                    opcode: None,
                    operands: Vec::new(),
                    comment,
                })
            }

            Some((Token::Name(mnemonic), at)) => match mnemonic.parse::<Opcode>() {
                Ok(opcode) => (opcode, at),
                Err(()) => {
                    self.messages.at(at).parse_unknown_mnemonic(&mnemonic);
                    return None;
                }
            },

            Some((_, at)) => {
                self.messages.at(at).parse_not_a_mnemonic();
                return None;
            }
        };

        let rest: Vec<_> = tokens.collect();

        if rest.len() != opcode.arity() {
            let at = rest
                .iter()
                .fold(opcode_span, |span, (_, operand)| span + *operand);
            self.messages
                .at(at)
                .parse_operand_count(&opcode.to_string(), opcode.arity(), rest.len());
            return None;
        }

        let mut operands = Vec::with_capacity(rest.len());
        for (slot, (token, at)) in opcode.shape().iter().zip(rest) {
            operands.push(Operand {
                value: self.operand(*slot, token, at)?,
                span: at,
            });
        }

        Some(Instruction {
            line,
            span,
            text: text.into(),
            label,
            opcode: Some(opcode),
            operands,
            comment,
        })
    }

    fn operand(&mut self, slot: Slot, token: Token, at: Span) -> Option<Value> {
        match (slot, token) {
            (Slot::Def | Slot::Use | Slot::Reg, Token::Name(name)) => {
                Some(Value::Register(Name::new(name)))
            }

            (Slot::Def | Slot::Use | Slot::Reg, _) => {
                self.messages.at(at).parse_not_a_register();
                None
            }

            (Slot::Imm, Token::Name(imm) | Token::Number(imm)) => Some(Value::Immediate(imm)),
            (Slot::Label, Token::Name(label)) => Some(Value::Label(label)),

            (Slot::Imm, _) => {
                self.messages.at(at).parse_not_an_immediate();
                None
            }

            (Slot::Label, _) => {
                self.messages.at(at).parse_not_a_label();
                None
            }
        }
    }
}
