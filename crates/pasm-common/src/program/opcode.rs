use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AluOp {
    Add,
    Sub,
    Or,
    And,
    Xor,
    Sl,
    Sr,
    Mul,
    Div,
    Mod,
}

impl AluOp {
    pub const ALL: [AluOp; 10] = [
        Self::Add,
        Self::Sub,
        Self::Or,
        Self::And,
        Self::Xor,
        Self::Sl,
        Self::Sr,
        Self::Mul,
        Self::Div,
        Self::Mod,
    ];

    pub fn is_shift(&self) -> bool {
        matches!(self, Self::Sl | Self::Sr)
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Or => "OR",
            Self::And => "AND",
            Self::Xor => "XOR",
            Self::Sl => "SL",
            Self::Sr => "SR",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
        }
    }
}

/// The comparison performed by a conditional jump.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Condition {
    Less,
    Equal,
    Greater,
    NotEqual,
    LessEqual,
    GreaterEqual,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Self::Less,
        Self::Equal,
        Self::Greater,
        Self::NotEqual,
        Self::LessEqual,
        Self::GreaterEqual,
    ];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Less => "JINF",
            Self::Equal => "JEQU",
            Self::Greater => "JSUP",
            Self::NotEqual => "JNEQ",
            Self::LessEqual => "JIEQ",
            Self::GreaterEqual => "JSEQ",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Opcode {
    /// `OP dst src1 src2`
    Alu(AluOp),
    /// `OPi dst src imm`
    AluImm(AluOp),

    /// `LD dst addr`
    Load,
    /// `ST value addr`
    Store,

    In,
    Read,
    Out,
    Print,

    Jump,
    /// `Jcc left right label`
    Branch(Condition),
    Call,
    Ret,
    Stop,
}

/// The role of one operand position of an instruction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Slot {
    /// A register written by the instruction.
    Def,
    /// A register read by the instruction.
    Use,
    /// A register which is neither read nor written.
    Reg,
    Imm,
    Label,
}

impl Opcode {
    pub fn shape(&self) -> &'static [Slot] {
        use Slot::*;

        match self {
            Self::Alu(op) if op.is_shift() => &[Def, Use, Reg],
            Self::Alu(_) => &[Def, Use, Use],
            Self::AluImm(_) => &[Def, Use, Imm],
            Self::Load => &[Def, Use],
            Self::Store => &[Use, Use],
            Self::In | Self::Read => &[Def],
            Self::Out | Self::Print => &[Use],
            Self::Jump | Self::Call => &[Label],
            Self::Branch(_) => &[Use, Use, Label],
            Self::Ret | Self::Stop => &[],
        }
    }

    pub fn arity(&self) -> usize {
        self.shape().len()
    }

    /// Returns `true` if control never continues to the next instruction.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ret | Self::Stop)
    }
}

impl FromStr for Opcode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let simple = match s {
            "LD" => Some(Self::Load),
            "ST" => Some(Self::Store),
            "IN" => Some(Self::In),
            "READ" => Some(Self::Read),
            "OUT" => Some(Self::Out),
            "PRINT" => Some(Self::Print),
            "JMP" => Some(Self::Jump),
            "CALL" => Some(Self::Call),
            "RET" => Some(Self::Ret),
            "STOP" => Some(Self::Stop),
            _ => None,
        };

        if let Some(opcode) = simple {
            return Ok(opcode);
        }

        if let Some(cond) = Condition::ALL.iter().find(|cond| cond.mnemonic() == s) {
            return Ok(Self::Branch(*cond));
        }

        if let Some(op) = AluOp::ALL.iter().find(|op| op.mnemonic() == s) {
            return Ok(Self::Alu(*op));
        }

        s.strip_suffix('i')
            .and_then(|base| AluOp::ALL.iter().find(|op| op.mnemonic() == base))
            .map(|op| Self::AluImm(*op))
            .ok_or(())
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alu(op) => write!(f, "{}", op.mnemonic()),
            Self::AluImm(op) => write!(f, "{}i", op.mnemonic()),
            Self::Load => write!(f, "LD"),
            Self::Store => write!(f, "ST"),
            Self::In => write!(f, "IN"),
            Self::Read => write!(f, "READ"),
            Self::Out => write!(f, "OUT"),
            Self::Print => write!(f, "PRINT"),
            Self::Jump => write!(f, "JMP"),
            Self::Branch(cond) => write!(f, "{}", cond.mnemonic()),
            Self::Call => write!(f, "CALL"),
            Self::Ret => write!(f, "RET"),
            Self::Stop => write!(f, "STOP"),
        }
    }
}
