use pasm_common::message::Messages;
use pasm_common::register::{Name, Physical};
use pasm_common::{Constraints, Driver};
use pasm_frontend::parse;

use super::rewrite;
use crate::alloc::{allocate, liveness, Allocation, Coloring, Greedy, Interference, Spills};
use crate::cfg::control_flow;

struct Quiet;

impl Driver for Quiet {
    fn report(&mut self, _: Messages) {}
    fn report_spill(&mut self, _: &Name, _: usize) {}
    fn done_spilling(&mut self, _: usize, _: usize) {}
}

fn allocated(constraints: &Constraints, src: &str) -> String {
    let program = parse(src, 0).unwrap();
    let cfg = control_flow(&program).unwrap();
    let live = liveness(&program, &cfg);
    let allocation = allocate(&mut Quiet, constraints, &Greedy, &program, &live).unwrap();
    rewrite(constraints, &program, &live, &allocation)
}

/// Rewrite with a fixed register assignment, spilling `spilled` in order.
fn assigned(src: &str, registers: &[(&str, usize)], spilled: &[&str]) -> String {
    let constraints = Constraints::new();
    let program = parse(src, 0).unwrap();
    let cfg = control_flow(&program).unwrap();
    let live = liveness(&program, &cfg);

    let mut spills = Spills::new(constraints.spill_stride);
    for name in spilled {
        spills.add(Name::from(*name));
    }

    let allocation = Allocation {
        graph: Interference::new(),
        coloring: Coloring::default(),
        registers: registers
            .iter()
            .map(|(name, reg)| (Name::from(*name), Physical(*reg)))
            .collect(),
        spills,
        history: Vec::new(),
    };

    rewrite(&constraints, &program, &live, &allocation)
}

#[test]
fn substitute_without_spilling() {
    let src = "IN a\nIN b\nADD c a b\nOUT c\nSTOP\n";
    let expected = "IN R0\nIN R1\nADD R0 R0 R1\nOUT R0\nSTOP\n";
    assert_eq!(expected, allocated(&Constraints::new(), src));
}

#[test]
fn comments_and_blank_lines_are_kept() {
    let src = "# entry\n\nIN a\n  # between\nOUT a\n";
    let expected = "# entry\n\nIN R0\n  # between\nOUT R0\n";
    assert_eq!(expected, allocated(&Constraints::new(), src));
}

#[test]
fn stack_pointer_is_fixed() {
    let src = "SUBi SP SP 4\nST R30 SP\nSTOP\n";
    let expected = "SUBi R29 R29 4\nST R30 R29\nSTOP\n";
    assert_eq!(expected, allocated(&Constraints::new(), src));
}

#[test]
fn labels_are_never_substituted() {
    let src = "R1: IN R1\nJMP R1\n";
    let expected = "R1: IN R0\nJMP R1\n";
    assert_eq!(expected, allocated(&Constraints::new(), src));
}

#[test]
fn spill_loads_and_stores() {
    let constraints = Constraints {
        registers: 2,
        ..Constraints::new()
    };

    let src = "IN a\nIN b\nIN c\nADD d a b\nADD e d c\nOUT e\nSTOP\n";
    let expected = "\
# spilled: c@0
IN R0
IN R1
IN R30
ADDi R31 R29 0
ST R30 R31
ADD R0 R0 R1
ADDi R31 R29 0
LD R30 R31
ADD R0 R0 R30
OUT R0
STOP
";

    assert_eq!(expected, allocated(&constraints, src));
}

#[test]
fn read_and_written_spill_uses_the_value_register() {
    let expected = "\
# spilled: b@0 a@4
ADDi R31 R29 4
LD R30 R31
ADDi R31 R29 0
LD R31 R31
ADD R30 R30 R31
ADDi R31 R29 4
ST R30 R31
STOP
";

    assert_eq!(expected, assigned("ADD a a b\nSTOP\n", &[], &["b", "a"]));
}

#[test]
fn three_spilled_operands() {
    let expected = "\
# spilled: c@0 a@4 b@8
ADDi R31 R29 4
LD R30 R31
ADDi R31 R29 8
LD R31 R31
ADD R30 R30 R31
ADDi R31 R29 0
ST R30 R31
STOP
";

    assert_eq!(expected, assigned("ADD c a b\nSTOP\n", &[], &["c", "a", "b"]));
}

#[test]
fn store_of_a_spilled_value() {
    let expected = "\
# spilled: a@0
ADDi R31 R29 0
LD R30 R31
ST R30 R1
STOP
";

    assert_eq!(expected, assigned("ST a b\nSTOP\n", &[("b", 1)], &["a"]));
}

#[test]
fn ignored_shift_operand_is_not_loaded() {
    let expected = "# spilled: c@0\nSL R0 R1 R31\nSTOP\n";
    assert_eq!(
        expected,
        assigned("SL a b c\nSTOP\n", &[("a", 0), ("b", 1)], &["c"])
    );
}

#[test]
fn call_saves_live_caller_saved_registers() {
    let src = "IN a\nIN b\nIN c\nCALL f\nOUT a\nOUT c\nSTOP\nf: OUT b\nRET\n";
    let expected = "\
IN R3
IN R1
IN R20
SUBi R29 R29 4
ST R1 R29
SUBi R29 R29 4
ST R3 R29
CALL f
LD R3 R29
ADDi R29 R29 4
LD R1 R29
ADDi R29 R29 4
OUT R3
OUT R20
STOP
f: OUT R1
RET
";

    assert_eq!(
        expected,
        assigned(src, &[("a", 3), ("b", 1), ("c", 20)], &[])
    );
}

#[test]
fn labels_move_to_the_first_inserted_line() {
    let expected = "\
# spilled: a@0
top: ADDi R31 R29 0
LD R30 R31
OUT R30
JMP top
";

    assert_eq!(expected, assigned("top: OUT a\nJMP top\n", &[], &["a"]));
}

#[test]
fn labelled_call_moves_its_label_to_the_save() {
    let src = "IN a\nhere: CALL f\nOUT a\nSTOP\nf: RET\n";
    let expected = "\
IN R0
here: SUBi R29 R29 4
ST R0 R29
CALL f
LD R0 R29
ADDi R29 R29 4
OUT R0
STOP
f: RET
";

    assert_eq!(expected, assigned(src, &[("a", 0)], &[]));
}

#[test]
fn bare_labels_are_kept() {
    assert_eq!("end:\nSTOP\n", assigned("end:\nSTOP\n", &[], &[]));
}

#[test]
fn trailing_comments_follow_the_first_emitted_line() {
    let src = "IN a # read\ntop: OUT a # show\nJMP top\nend: # done\n";
    let expected = "\
# spilled: a@0
IN R30 # read
ADDi R31 R29 0
ST R30 R31
top: ADDi R31 R29 0 # show
LD R30 R31
OUT R30
JMP top
end: # done
";

    assert_eq!(expected, assigned(src, &[], &["a"]));
    assert_eq!("IN R2 # read\nOUT R2\n", assigned("IN a # read\nOUT a\n", &[("a", 2)], &[]));
}
