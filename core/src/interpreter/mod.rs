//! Instruction dispatch: one `match` arm per opcode, delegating to a
//! family module grouped by opcode family (stack/frame, arithmetic,
//! comparison, conversion, float arithmetic, control flow, memory, file
//! I/O, diagnostics, handshake).

mod arithmetic;
mod comparison;
mod control_flow;
mod conversion;
mod diagnostics;
mod file_io;
mod float_arith;
mod frame;
mod handshake;
mod memory;
mod stack;

use crate::driver::{InputPorts, OutputPorts};
use crate::error::SimError;
use crate::instruction::Instruction;
use crate::machine::MachineState;

/// What the dispatched opcode wants done to `pc` once it returns: most
/// opcodes just fall through (`Advance`), control-flow opcodes redirect
/// (`Jump`), the re-entrant handshake opcodes ask to be re-dispatched
/// unchanged (`Retry`), and `stop` ends the run (`Stop`).
pub(crate) enum Flow {
    Advance,
    Jump(usize),
    Retry,
    Stop,
}

pub enum StepOutcome {
    Running,
    Stopped,
}

/// Fetch `instructions[state.pc]`, dispatch it, and apply the resulting
/// `pc` update. A whole call is atomic: no port or file I/O happens
/// outside of this function for the duration of one step.
pub(crate) fn step(
    instructions: &[Instruction],
    state: &mut MachineState,
    inputs: &mut InputPorts,
    outputs: &mut OutputPorts,
) -> Result<StepOutcome, SimError> {
    let this_pc = state.pc;
    let instruction = instructions
        .get(this_pc)
        .ok_or(SimError::UnknownOpcode(this_pc))?;

    let flow = dispatch(instruction, state, inputs, outputs, this_pc)?;

    match flow {
        Flow::Advance => {
            state.pc = this_pc + 1;
            Ok(StepOutcome::Running)
        }
        Flow::Jump(target) => {
            state.pc = target;
            Ok(StepOutcome::Running)
        }
        Flow::Retry => {
            state.pc = this_pc;
            Ok(StepOutcome::Running)
        }
        Flow::Stop => {
            diagnostics::stop(state);
            Ok(StepOutcome::Stopped)
        }
    }
}

fn dispatch(
    instruction: &Instruction,
    state: &mut MachineState,
    inputs: &mut InputPorts,
    outputs: &mut OutputPorts,
    this_pc: usize,
) -> Result<Flow, SimError> {
    use Instruction as I;

    match instruction {
        // stack / frame bookkeeping
        I::PushLiteral(n) => stack::push_literal(state, *n),
        I::New(n) => stack::new(state, *n),
        I::Free(n) => stack::free(state, *n),
        I::Pop(n) => stack::pop(state, *n),
        I::Push(n) => stack::push(state, *n),
        I::PopGlobal => stack::pop_global(state),
        I::PopALo => stack::pop_a_lo(state),
        I::PopAHi => stack::pop_a_hi(state),
        I::PopBLo => stack::pop_b_lo(state),
        I::PopBHi => stack::pop_b_hi(state),
        I::PushALo => stack::push_a_lo(state),
        I::PushAHi => stack::push_a_hi(state),
        I::PushBLo => stack::push_b_lo(state),
        I::PushBHi => stack::push_b_hi(state),

        // call frame management
        I::Prologue => frame::prologue(state),
        I::Call(target) => frame::call(state, *target, this_pc),
        I::Epilogue => frame::epilogue(state),
        I::Return => frame::return_(state),
        I::Local(n) => frame::local(state, *n),
        I::Global(n) => frame::global(state, *n),
        I::LocalToGlobal => frame::local_to_global(state),

        // integer arithmetic
        I::Add => arithmetic::add(state),
        I::AddWithCarry => arithmetic::add_with_carry(state),
        I::Subtract => arithmetic::subtract(state),
        I::SubtractWithCarry => arithmetic::subtract_with_carry(state),
        I::Multiply => arithmetic::multiply(state),
        I::And => arithmetic::and(state),
        I::Or => arithmetic::or(state),
        I::Xor => arithmetic::xor(state),
        I::ShiftLeft => arithmetic::shift_left(state),
        I::ShiftLeftWithCarry => arithmetic::shift_left_with_carry(state),
        I::ShiftRight => arithmetic::shift_right(state),
        I::ShiftRightWithCarry => arithmetic::shift_right_with_carry(state),
        I::UnsignedShiftRight => arithmetic::unsigned_shift_right(state),
        I::Not { src, dest } => arithmetic::not(state, *src, *dest),

        // comparisons
        I::Greater => comparison::greater(state),
        I::GreaterEqual => comparison::greater_equal(state),
        I::UnsignedGreater => comparison::unsigned_greater(state),
        I::UnsignedGreaterEqual => comparison::unsigned_greater_equal(state),
        I::Equal => comparison::equal(state),
        I::NotEqual => comparison::not_equal(state),

        // conversions
        I::IntToLong => conversion::int_to_long(state),
        I::IntToFloat => conversion::int_to_float(state),
        I::FloatToInt => conversion::float_to_int(state),
        I::LongToDouble => conversion::long_to_double(state),
        I::DoubleToLong => conversion::double_to_long(state),
        I::FloatToDouble => conversion::float_to_double(state),
        I::DoubleToFloat => conversion::double_to_float(state),

        // floating point
        I::FloatAdd => float_arith::float_add(state),
        I::FloatSubtract => float_arith::float_subtract(state),
        I::FloatMultiply => float_arith::float_multiply(state),
        I::FloatDivide => float_arith::float_divide(state),
        I::LongFloatAdd => float_arith::long_float_add(state),
        I::LongFloatSubtract => float_arith::long_float_subtract(state),
        I::LongFloatMultiply => float_arith::long_float_multiply(state),
        I::LongFloatDivide => float_arith::long_float_divide(state),

        // control flow
        I::Goto(target) => control_flow::goto(*target),
        I::JumpIfFalse(target) => control_flow::jmp_if_false(state, *target),
        I::JumpIfTrue(target) => control_flow::jmp_if_true(state, *target),

        // memory
        I::MemoryRead { src, dest } => memory::memory_read(state, *src, *dest),
        I::MemoryWrite { src, srcb } => memory::memory_write(state, *src, *srcb),

        // file I/O
        I::FileRead { file_name } => file_io::file_read(state, file_name),
        I::FileWrite { file_name } => file_io::file_write(state, file_name),
        I::UnsignedFileWrite { file_name } => file_io::unsigned_file_write(state, file_name),
        I::FloatFileWrite { file_name } => file_io::float_file_write(state, file_name),
        I::LongFileWrite { file_name } => file_io::long_file_write(state, file_name),
        I::LongFloatFileWrite { file_name } => file_io::long_float_file_write(state, file_name),

        // diagnostics
        I::Assert(loc) => diagnostics::assert(state, loc),
        I::Report(loc) => diagnostics::report(state, loc),
        I::LongReport(loc) => diagnostics::long_report(state, loc),
        I::FloatReport(loc) => diagnostics::float_report(state, loc),
        I::LongFloatReport(loc) => diagnostics::long_float_report(state, loc),
        I::UnsignedReport(loc) => diagnostics::unsigned_report(state, loc),
        I::LongUnsignedReport(loc) => diagnostics::long_unsigned_report(state, loc),

        // termination
        I::Stop => Ok(Flow::Stop),

        // port handshake
        I::Read { port, dest } => handshake::read(state, inputs, *port, *dest),
        I::Write { port, srcb } => handshake::write(state, outputs, *port, *srcb),
        I::Ready { port, dest } => handshake::ready(state, inputs, *port, *dest),
    }
}
