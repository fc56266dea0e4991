//! Stack/frame bookkeeping opcodes. All of these fall through to the
//! next instruction, so they share the trivial `Ok(Flow::Advance)` tail.

use crate::error::SimError;
use crate::machine::MachineState;

use super::Flow;

pub(super) fn push_literal(state: &mut MachineState, literal: i32) -> Result<Flow, SimError> {
    state.memory.write(state.tos, literal);
    state.tos += 1;
    Ok(Flow::Advance)
}

pub(super) fn new(state: &mut MachineState, n: usize) -> Result<Flow, SimError> {
    state.tos += n;
    Ok(Flow::Advance)
}

pub(super) fn free(state: &mut MachineState, n: usize) -> Result<Flow, SimError> {
    state.tos -= n;
    Ok(Flow::Advance)
}

/// Transfer `n` words from the stack to `[pointer, pointer+n)`, with the
/// stack's top landing at the highest address.
pub(super) fn pop(state: &mut MachineState, n: usize) -> Result<Flow, SimError> {
    for i in (0..n).rev() {
        state.tos -= 1;
        let value = state.memory.read(state.tos);
        state.memory.write(state.pointer + i, value);
    }
    Ok(Flow::Advance)
}

/// Inverse of `pop`: the highest-addressed item ends up on top of stack.
pub(super) fn push(state: &mut MachineState, n: usize) -> Result<Flow, SimError> {
    for i in 0..n {
        let value = state.memory.read(state.pointer + i);
        state.memory.write(state.tos, value);
        state.tos += 1;
    }
    Ok(Flow::Advance)
}

pub(super) fn pop_global(state: &mut MachineState) -> Result<Flow, SimError> {
    state.tos -= 1;
    state.pointer = state.memory.read(state.tos) as usize;
    Ok(Flow::Advance)
}

pub(super) fn pop_a_lo(state: &mut MachineState) -> Result<Flow, SimError> {
    state.tos -= 1;
    state.a_lo = state.memory.read(state.tos);
    Ok(Flow::Advance)
}

pub(super) fn pop_a_hi(state: &mut MachineState) -> Result<Flow, SimError> {
    state.tos -= 1;
    state.a_hi = state.memory.read(state.tos);
    Ok(Flow::Advance)
}

pub(super) fn pop_b_lo(state: &mut MachineState) -> Result<Flow, SimError> {
    state.tos -= 1;
    state.b_lo = state.memory.read(state.tos);
    Ok(Flow::Advance)
}

pub(super) fn pop_b_hi(state: &mut MachineState) -> Result<Flow, SimError> {
    state.tos -= 1;
    state.b_hi = state.memory.read(state.tos);
    Ok(Flow::Advance)
}

pub(super) fn push_a_lo(state: &mut MachineState) -> Result<Flow, SimError> {
    state.memory.write(state.tos, state.a_lo);
    state.tos += 1;
    Ok(Flow::Advance)
}

pub(super) fn push_a_hi(state: &mut MachineState) -> Result<Flow, SimError> {
    state.memory.write(state.tos, state.a_hi);
    state.tos += 1;
    Ok(Flow::Advance)
}

pub(super) fn push_b_lo(state: &mut MachineState) -> Result<Flow, SimError> {
    state.memory.write(state.tos, state.b_lo);
    state.tos += 1;
    Ok(Flow::Advance)
}

pub(super) fn push_b_hi(state: &mut MachineState) -> Result<Flow, SimError> {
    state.memory.write(state.tos, state.b_hi);
    state.tos += 1;
    Ok(Flow::Advance)
}
