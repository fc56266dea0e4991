//! The instruction model: a tagged `enum` per opcode, exhaustively matched
//! rather than dispatched through a string-keyed table, plus the
//! label-resolution pre-pass that turns symbolic jump targets into absolute
//! program-counter indices.

use std::rc::Rc;

use crate::error::SimError;

/// A register-file index used by the opcodes (`not`, `read`, `write`,
/// `ready`, `memory_read`, `memory_write`) that address a separate
/// indexed register file rather than the named `a_lo`/`a_hi`/`b_lo`/`b_hi`
/// operand registers. See DESIGN.md for why this is modeled as its own
/// sparse store.
pub type Reg = usize;

/// A numeric port identifier, resolved at compile time from a symbolic port
/// name by the (out-of-scope) compiler front-end.
pub type PortId = u32;

/// Source-location metadata carried by the diagnostic opcodes.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceLoc {
    pub line: i32,
    pub file: Rc<str>,
}

/// One fully-resolved instruction. Control-flow targets are absolute
/// indices into the enclosing `Vec<Instruction>`.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    // --- stack / frame bookkeeping ---------------------------------------
    PushLiteral(i32),
    New(usize),
    Free(usize),
    Pop(usize),
    Push(usize),
    PopGlobal,
    PopALo,
    PopAHi,
    PopBLo,
    PopBHi,
    PushALo,
    PushAHi,
    PushBLo,
    PushBHi,

    // --- call frame management ---------------------------------------
    Prologue,
    Call(usize),
    Epilogue,
    Return,
    Local(i32),
    Global(i32),
    LocalToGlobal,

    // --- integer arithmetic (stack-based) --------------------------------
    Add,
    AddWithCarry,
    Subtract,
    SubtractWithCarry,
    Multiply,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftLeftWithCarry,
    ShiftRight,
    ShiftRightWithCarry,
    UnsignedShiftRight,
    Not { src: Reg, dest: Reg },

    // --- comparisons ------------------------------------------------------
    Greater,
    GreaterEqual,
    UnsignedGreater,
    UnsignedGreaterEqual,
    Equal,
    NotEqual,

    // --- conversions --------------------------------------------------
    IntToLong,
    IntToFloat,
    FloatToInt,
    LongToDouble,
    DoubleToLong,
    FloatToDouble,
    DoubleToFloat,

    // --- floating point -----------------------------------------------
    FloatAdd,
    FloatSubtract,
    FloatMultiply,
    FloatDivide,
    LongFloatAdd,
    LongFloatSubtract,
    LongFloatMultiply,
    LongFloatDivide,

    // --- control flow ---------------------------------------------------
    Goto(usize),
    JumpIfFalse(usize),
    JumpIfTrue(usize),

    // --- memory -----------------------------------------------------------
    MemoryRead { src: Reg, dest: Reg },
    MemoryWrite { src: Reg, srcb: Reg },

    // --- file I/O -----------------------------------------------------
    FileRead { file_name: Rc<str> },
    FileWrite { file_name: Rc<str> },
    UnsignedFileWrite { file_name: Rc<str> },
    FloatFileWrite { file_name: Rc<str> },
    LongFileWrite { file_name: Rc<str> },
    LongFloatFileWrite { file_name: Rc<str> },

    // --- diagnostics --------------------------------------------------
    Assert(SourceLoc),
    Report(SourceLoc),
    LongReport(SourceLoc),
    FloatReport(SourceLoc),
    LongFloatReport(SourceLoc),
    UnsignedReport(SourceLoc),
    LongUnsignedReport(SourceLoc),

    // --- termination --------------------------------------------------
    Stop,

    // --- port handshake -----------------------------------------------
    Read { port: PortId, dest: Reg },
    Write { port: PortId, srcb: Reg },
    Ready { port: PortId, dest: Reg },
}

/// An instruction or label pseudo-op as produced before label resolution.
/// Control-flow variants carry a symbolic label name rather than an index.
#[derive(Clone, Debug, PartialEq)]
pub enum RawInstruction {
    Label(String),
    Real(Instruction),
    Goto(String),
    JumpIfFalse(String),
    JumpIfTrue(String),
    Call(String),
}

/// Resolve symbolic labels into absolute program-counter indices.
///
/// One forward pass counts real instructions to build `name -> index`; a
/// second pass rewrites every label reference. An undefined label fails
/// with [`SimError::UnresolvedLabel`].
pub fn resolve_labels(raw: Vec<RawInstruction>) -> Result<Vec<Instruction>, SimError> {
    let mut labels = std::collections::HashMap::new();
    let mut location = 0usize;
    for instr in &raw {
        match instr {
            RawInstruction::Label(name) => {
                labels.insert(name.clone(), location);
            }
            _ => location += 1,
        }
    }

    let resolve = |name: &str| -> Result<usize, SimError> {
        labels
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UnresolvedLabel(name.to_string()))
    };

    let mut resolved = Vec::with_capacity(location);
    for instr in raw {
        let instruction = match instr {
            RawInstruction::Label(_) => continue,
            RawInstruction::Real(instruction) => instruction,
            RawInstruction::Goto(label) => Instruction::Goto(resolve(&label)?),
            RawInstruction::JumpIfFalse(label) => Instruction::JumpIfFalse(resolve(&label)?),
            RawInstruction::JumpIfTrue(label) => Instruction::JumpIfTrue(resolve(&label)?),
            RawInstruction::Call(label) => Instruction::Call(resolve(&label)?),
        };
        resolved.push(instruction);
    }
    Ok(resolved)
}
