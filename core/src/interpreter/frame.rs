//! Call-frame management opcodes: `prologue`/`call`/`epilogue`/`return`
//! and the local/global address helpers.

use crate::error::SimError;
use crate::machine::MachineState;

use super::Flow;

/// Push `new_frame`, `return_frame`, `return_address` (in that order) and
/// mark where the callee's locals will begin.
pub(super) fn prologue(state: &mut MachineState) -> Result<Flow, SimError> {
    state.memory.write(state.tos, state.new_frame as i32);
    state.tos += 1;
    state.memory.write(state.tos, state.return_frame as i32);
    state.tos += 1;
    state.memory.write(state.tos, state.return_address as i32);
    state.tos += 1;
    state.new_frame = state.tos;
    Ok(Flow::Advance)
}

/// Save the calling frame/return address and transfer control to `target`.
/// `this_pc + 1` is the resume point: the instruction right after this
/// `call`, not `call`'s own index.
pub(super) fn call(state: &mut MachineState, target: usize, this_pc: usize) -> Result<Flow, SimError> {
    state.return_frame = state.frame;
    state.return_address = this_pc + 1;
    state.frame = state.new_frame;
    Ok(Flow::Jump(target))
}

/// Pop the three slots `prologue` pushed, in reverse order.
pub(super) fn epilogue(state: &mut MachineState) -> Result<Flow, SimError> {
    state.tos -= 1;
    state.return_address = state.memory.read(state.tos) as usize;
    state.tos -= 1;
    state.return_frame = state.memory.read(state.tos) as usize;
    state.tos -= 1;
    state.new_frame = state.memory.read(state.tos) as usize;
    Ok(Flow::Advance)
}

pub(super) fn return_(state: &mut MachineState) -> Result<Flow, SimError> {
    state.tos = state.frame;
    state.frame = state.return_frame;
    Ok(Flow::Jump(state.return_address))
}

/// Local address `literal` in the current frame, turned into a global
/// address by adding `frame`.
pub(super) fn local(state: &mut MachineState, literal: i32) -> Result<Flow, SimError> {
    state.pointer = (literal as i64 + state.frame as i64) as usize;
    Ok(Flow::Advance)
}

pub(super) fn global(state: &mut MachineState, literal: i32) -> Result<Flow, SimError> {
    state.pointer = literal as usize;
    Ok(Flow::Advance)
}

/// Add `frame` to the top-of-stack value in place, converting a local
/// address into a global one.
pub(super) fn local_to_global(state: &mut MachineState) -> Result<Flow, SimError> {
    state.tos -= 1;
    let local_addr = state.memory.read(state.tos);
    state.memory.write(state.tos, local_addr + state.frame as i32);
    state.tos += 1;
    Ok(Flow::Advance)
}
