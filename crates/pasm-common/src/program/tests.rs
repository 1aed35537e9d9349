use super::*;
use crate::message::Span;

fn reg(name: &str) -> Operand {
    Operand {
        value: Value::Register(Name::from(name)),
        span: Span::new(0, 0, 0),
    }
}

fn imm(text: &str) -> Operand {
    Operand {
        value: Value::Immediate(text.into()),
        span: Span::new(0, 0, 0),
    }
}

fn inst(opcode: Opcode, operands: Vec<Operand>) -> Instruction {
    Instruction {
        line: 1,
        span: Span::new(0, 0, 0),
        text: String::new(),
        label: None,
        opcode: Some(opcode),
        operands,
        comment: None,
    }
}

#[test]
fn parse_mnemonics() {
    assert_eq!(Ok(Opcode::Alu(AluOp::Add)), "ADD".parse());
    assert_eq!(Ok(Opcode::AluImm(AluOp::Mod)), "MODi".parse());
    assert_eq!(Ok(Opcode::Branch(Condition::LessEqual)), "JIEQ".parse());
    assert_eq!(Ok(Opcode::Read), "READ".parse());
    assert_eq!(Err(()), "MOV".parse::<Opcode>());
    assert_eq!(Err(()), "add".parse::<Opcode>());
    assert_eq!(Err(()), "LDi".parse::<Opcode>());
}

#[test]
fn mnemonics_display_as_written() {
    for mnemonic in ["SUB", "XORi", "ST", "JNEQ", "CALL", "STOP"] {
        let opcode: Opcode = mnemonic.parse().unwrap();
        assert_eq!(mnemonic, opcode.to_string());
    }
}

#[test]
fn arithmetic_kills_destination_and_reads_sources() {
    let add = inst(Opcode::Alu(AluOp::Add), vec![reg("R1"), reg("R2"), reg("R3")]);

    assert_eq!(vec!["R1"], add.kills().map(Name::as_str).collect::<Vec<_>>());
    assert_eq!(
        vec!["R2", "R3"],
        add.gens().map(Name::as_str).collect::<Vec<_>>()
    );
}

#[test]
fn shifts_only_read_their_first_source() {
    let shift = inst(Opcode::Alu(AluOp::Sl), vec![reg("R1"), reg("R2"), reg("R3")]);

    assert_eq!(vec!["R2"], shift.gens().map(Name::as_str).collect::<Vec<_>>());
    assert_eq!(3, shift.registers().count());
}

#[test]
fn immediates_are_not_registers() {
    let addi = inst(Opcode::AluImm(AluOp::Add), vec![reg("R1"), reg("R1"), imm("4")]);

    assert_eq!(vec!["R1"], addi.kills().map(Name::as_str).collect::<Vec<_>>());
    assert_eq!(vec!["R1"], addi.gens().map(Name::as_str).collect::<Vec<_>>());
    assert_eq!(2, addi.registers().count());
}

#[test]
fn store_reads_both_operands() {
    let store = inst(Opcode::Store, vec![reg("R4"), reg("R5")]);

    assert_eq!(0, store.kills().count());
    assert_eq!(2, store.gens().count());
}

#[test]
fn program_keeps_verbatim_lines_in_order() {
    let mut program = Program::new();
    program.add_verbatim("# header");
    let first = program.add(inst(Opcode::Stop, vec![]));
    program.add_verbatim("");

    assert_eq!(InstId(0), first);
    assert_eq!(1, program.len());
    assert_eq!(None, program.next(first));
    assert_eq!(
        vec![
            Line::Verbatim("# header".into()),
            Line::Instruction(first),
            Line::Verbatim(String::new()),
        ],
        program.lines
    );
}
