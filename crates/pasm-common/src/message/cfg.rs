use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::{MessageAdder, Span};

const UNRESOLVED_LABEL: &str = "EC00";
const DUPLICATE_LABEL: &str = "EC01";

impl<'a> MessageAdder<'a> {
    /// `line` is the 1-based line of the instruction referencing the label.
    pub fn cfg_unresolved_label(&mut self, label: &str, line: usize) {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("no instruction is labelled `{label}`"))];

        self.add(
            Diagnostic::error()
                .with_code(UNRESOLVED_LABEL)
                .with_message(format!(
                    "unresolved label `{label}` referenced on line {line}"
                ))
                .with_labels(labels),
        );
    }

    pub fn cfg_duplicate_label(&mut self, label: &str, prev: Span) {
        let labels = vec![
            Label::primary(self.at.file, self.at),
            Label::secondary(prev.file, prev).with_message("previous definition here"),
        ];

        self.add(
            Diagnostic::error()
                .with_code(DUPLICATE_LABEL)
                .with_message(format!("label `{label}` is defined more than once"))
                .with_labels(labels),
        );
    }
}
