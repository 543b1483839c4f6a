//! Opcodes and their static properties.
//!
//! Every per-opcode fact the pipeline needs lives in one table rather than in
//! scattered `match` arms. It records:
//! 1. **Identity:** Mnemonic and numeric code.
//! 2. **Routing:** Functional unit class, ROB class tag and memory kind.
//! 3. **Operands:** Which register feeds each issue-queue source slot, and
//!    whether the instruction writes `rd` and/or the condition-code alias.
//! 4. **Control Flow:** Whether dispatch must checkpoint the rename state.

use serde::{Deserialize, Serialize};

use crate::common::error::SimError;

/// Instruction opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 * rs2`
    Mul,
    /// `rd = rs1 / rs2`
    Div,
    /// `rd = rs1 & rs2`
    And,
    /// `rd = rs1 | rs2`
    Or,
    /// `rd = rs1 ^ rs2`
    Xor,
    /// `rd = imm`
    Movc,
    /// `rd = MEM[rs1 + imm]`
    Load,
    /// `MEM[rs2 + imm] = rs1`
    Store,
    /// Branch to `pc + imm` if the zero flag is set.
    Bz,
    /// Branch to `pc + imm` if the zero flag is clear.
    Bnz,
    /// Stop the simulation when retired.
    Halt,
    /// Branch to `pc + imm` if the positive flag is set.
    Bp,
    /// Branch to `pc + imm` if the condition code is negative.
    Bnp,
    /// Jump to the address held in `rs1`; resolved at dispatch.
    Ret,
    /// `rd = rs1 + imm`
    Addl,
    /// `rd = rs1 - imm`
    Subl,
    /// Jump to `rs1 + imm`.
    Jump,
    /// Set the condition code to the sign of `rs1 - rs2`.
    Cmp,
    /// `rd = pc + 4`, then jump to `rs1 + imm`.
    Jalr,
}

/// Functional unit an instruction issues to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FuClass {
    /// Single-cycle integer unit; also generates memory addresses.
    Int,
    /// Four-stage multiply/divide pipeline.
    MulDiv,
    /// Single-cycle branch unit.
    Branch,
}

impl FuClass {
    /// All classes, in issue-selection order.
    pub const ALL: [Self; 3] = [Self::Int, Self::MulDiv, Self::Branch];
}

/// Class tag recorded in the reorder buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InsnClass {
    /// Register-to-register and immediate arithmetic, `MOVC` and `HALT`.
    Integer,
    /// Multiply and divide.
    MulDiv,
    /// Branches, jumps, `CMP` and `RET`.
    Branch,
    /// Loads and stores.
    Memory,
}

/// Direction of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MemKind {
    /// Reads data memory into `rd`.
    Load,
    /// Writes `rs1` to data memory.
    Store,
}

/// Register feeding one issue-queue source slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Slot unused; always ready.
    None,
    /// The `rs1` field.
    Rs1,
    /// The `rs2` field.
    Rs2,
    /// The condition-code alias.
    Cc,
}

/// Static properties of one opcode.
#[derive(Clone, Copy, Debug)]
pub struct OpInfo {
    /// Assembly mnemonic.
    pub mnemonic: &'static str,
    /// Numeric encoding.
    pub code: u8,
    /// Unit the instruction issues to; `None` for instructions that never enter the IQ.
    pub fu: Option<FuClass>,
    /// Class tag recorded in the ROB.
    pub class: InsnClass,
    /// First issue-queue source.
    pub src1: Source,
    /// Second issue-queue source.
    pub src2: Source,
    /// Reads `rs1` as store data, tracked by the LSQ rather than the IQ.
    pub store_data: bool,
    /// Writes the `rd` register.
    pub writes_rd: bool,
    /// Writes the condition-code alias.
    pub writes_cc: bool,
    /// Memory access performed after address generation.
    pub mem: Option<MemKind>,
    /// Redirects control flow; at most one may be unresolved.
    pub control_flow: bool,
}

impl OpInfo {
    const fn base(mnemonic: &'static str, code: u8, fu: Option<FuClass>, class: InsnClass) -> Self {
        Self {
            mnemonic,
            code,
            fu,
            class,
            src1: Source::None,
            src2: Source::None,
            store_data: false,
            writes_rd: false,
            writes_cc: false,
            mem: None,
            control_flow: false,
        }
    }

    /// `rd = rs1 op rs2`, setting the condition code.
    const fn reg_reg(mnemonic: &'static str, code: u8, fu: FuClass, class: InsnClass) -> Self {
        let mut info = Self::base(mnemonic, code, Some(fu), class);
        info.src1 = Source::Rs1;
        info.src2 = Source::Rs2;
        info.writes_rd = true;
        info.writes_cc = true;
        info
    }

    /// `rd = rs1 op imm`, setting the condition code.
    const fn reg_imm(mnemonic: &'static str, code: u8) -> Self {
        let mut info = Self::base(mnemonic, code, Some(FuClass::Int), InsnClass::Integer);
        info.src1 = Source::Rs1;
        info.writes_rd = true;
        info.writes_cc = true;
        info
    }

    /// Conditional branch on the condition code.
    const fn cond_branch(mnemonic: &'static str, code: u8) -> Self {
        let mut info = Self::base(mnemonic, code, Some(FuClass::Branch), InsnClass::Branch);
        info.src1 = Source::Cc;
        info.control_flow = true;
        info
    }
}

/// Indexed by `Opcode as usize`.
const OP_TABLE: [OpInfo; 21] = {
    let mut movc = OpInfo::base("MOVC", 0x07, Some(FuClass::Int), InsnClass::Integer);
    movc.writes_rd = true;

    let mut load = OpInfo::base("LOAD", 0x08, Some(FuClass::Int), InsnClass::Memory);
    load.src1 = Source::Rs1;
    load.writes_rd = true;
    load.mem = Some(MemKind::Load);

    let mut store = OpInfo::base("STORE", 0x09, Some(FuClass::Int), InsnClass::Memory);
    store.src1 = Source::Rs2;
    store.store_data = true;
    store.mem = Some(MemKind::Store);

    let halt = OpInfo::base("HALT", 0x0c, None, InsnClass::Integer);

    let mut ret = OpInfo::base("RET", 0x0f, None, InsnClass::Branch);
    ret.src1 = Source::Rs1;
    ret.control_flow = true;

    let mut jump = OpInfo::base("JUMP", 0x13, Some(FuClass::Branch), InsnClass::Branch);
    jump.src1 = Source::Rs1;
    jump.control_flow = true;

    let mut cmp = OpInfo::base("CMP", 0x14, Some(FuClass::Branch), InsnClass::Branch);
    cmp.src1 = Source::Rs1;
    cmp.src2 = Source::Rs2;
    cmp.writes_cc = true;

    let mut jalr = OpInfo::base("JALR", 0x17, Some(FuClass::Branch), InsnClass::Branch);
    jalr.src1 = Source::Rs1;
    jalr.writes_rd = true;
    jalr.control_flow = true;

    [
        OpInfo::reg_reg("ADD", 0x00, FuClass::Int, InsnClass::Integer),
        OpInfo::reg_reg("SUB", 0x01, FuClass::Int, InsnClass::Integer),
        OpInfo::reg_reg("MUL", 0x02, FuClass::MulDiv, InsnClass::MulDiv),
        OpInfo::reg_reg("DIV", 0x03, FuClass::MulDiv, InsnClass::MulDiv),
        OpInfo::reg_reg("AND", 0x04, FuClass::Int, InsnClass::Integer),
        OpInfo::reg_reg("OR", 0x05, FuClass::Int, InsnClass::Integer),
        OpInfo::reg_reg("XOR", 0x06, FuClass::Int, InsnClass::Integer),
        movc,
        load,
        store,
        OpInfo::cond_branch("BZ", 0x0a),
        OpInfo::cond_branch("BNZ", 0x0b),
        halt,
        OpInfo::cond_branch("BP", 0x0d),
        OpInfo::cond_branch("BNP", 0x0e),
        ret,
        OpInfo::reg_imm("ADDL", 0x11),
        OpInfo::reg_imm("SUBL", 0x12),
        jump,
        cmp,
        jalr,
    ]
};

impl Opcode {
    /// Every opcode, in table order.
    pub const ALL: [Self; 21] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Movc,
        Self::Load,
        Self::Store,
        Self::Bz,
        Self::Bnz,
        Self::Halt,
        Self::Bp,
        Self::Bnp,
        Self::Ret,
        Self::Addl,
        Self::Subl,
        Self::Jump,
        Self::Cmp,
        Self::Jalr,
    ];

    /// Static properties of this opcode.
    #[inline]
    pub const fn info(self) -> &'static OpInfo {
        &OP_TABLE[self as usize]
    }

    /// Assembly mnemonic.
    #[inline]
    pub const fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    /// Looks up an opcode by mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(mnemonic: &str) -> Result<Self, SimError> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(mnemonic))
            .ok_or_else(|| SimError::UnknownMnemonic(mnemonic.to_owned()))
    }

    /// True for `BZ`, `BNZ`, `BP` and `BNP`.
    pub const fn is_conditional(self) -> bool {
        matches!(self, Self::Bz | Self::Bnz | Self::Bp | Self::Bnp)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = SimError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|op| op.info().code == code)
            .ok_or(SimError::UnknownOpcode(code))
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
