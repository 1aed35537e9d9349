use codespan_reporting::diagnostic::Diagnostic;

use super::Messages;

const ALLOCATION_FAILED: &str = "EA00";

impl Messages {
    pub fn alloc_failed(&mut self, needed: usize, budget: usize, spilled: usize, iterations: usize) {
        let notes = vec![
            format!("note: {needed} colors were still needed after spilling {spilled} register(s) in {iterations} iteration(s)"),
            String::from("note: no code was emitted"),
        ];

        self.msgs.push(
            Diagnostic::error()
                .with_code(ALLOCATION_FAILED)
                .with_message(format!(
                    "allocation failed, more than {budget} registers required"
                ))
                .with_notes(notes),
        );
    }
}
