use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::MessageAdder;

const UNKNOWN_TOKEN: &str = "EP00";
const UNKNOWN_MNEMONIC: &str = "EP01";
const OPERAND_COUNT: &str = "EP02";
const NOT_A_REGISTER: &str = "EP03";
const NOT_A_MNEMONIC: &str = "EP04";
const NOT_A_LABEL: &str = "EP05";
const NOT_AN_IMMEDIATE: &str = "EP06";

impl<'a> MessageAdder<'a> {
    pub fn parse_unknown_token(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(UNKNOWN_TOKEN)
                .with_message("unrecognized character")
                .with_labels(labels),
        );
    }

    pub fn parse_unknown_mnemonic(&mut self, mnemonic: &str) {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![String::from(
            "help: the instruction set is ADD SUB OR AND XOR SL SR MUL DIV MOD (and their `i` forms), LD ST IN READ OUT PRINT JMP JINF JEQU JSUP JNEQ JIEQ JSEQ CALL RET STOP",
        )];

        self.add(
            Diagnostic::error()
                .with_code(UNKNOWN_MNEMONIC)
                .with_message(format!("unknown mnemonic `{mnemonic}`"))
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_operand_count(&mut self, mnemonic: &str, expected: usize, actual: usize) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("expected {expected} operand(s), found {actual}"))];

        self.add(
            Diagnostic::error()
                .with_code(OPERAND_COUNT)
                .with_message(format!("wrong number of operands for `{mnemonic}`"))
                .with_labels(labels),
        );
    }

    pub fn parse_not_a_register(&mut self) {
        let labels =
            vec![Label::primary(self.at.file, self.at).with_message("expected a register name")];

        self.add(
            Diagnostic::error()
                .with_code(NOT_A_REGISTER)
                .with_message("expected a register")
                .with_labels(labels),
        );
    }

    pub fn parse_not_a_mnemonic(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![String::from(
            "note: a line is an optional `LABEL:` followed by a mnemonic and its operands",
        )];

        self.add(
            Diagnostic::error()
                .with_code(NOT_A_MNEMONIC)
                .with_message("expected a mnemonic")
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_not_a_label(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(NOT_A_LABEL)
                .with_message("expected a label")
                .with_labels(labels),
        );
    }

    pub fn parse_not_an_immediate(&mut self) {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.add(
            Diagnostic::error()
                .with_code(NOT_AN_IMMEDIATE)
                .with_message("expected an immediate value")
                .with_labels(labels),
        );
    }
}
