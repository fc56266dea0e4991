//! The two-phase strobe/ack port handshake. `read` and `write` are
//! re-entrant: each call either completes a phase transition or asks to
//! be retried unchanged next `step()`, so a full transfer takes multiple
//! calls with the same `pc`. A port id with no peer attached is a no-op
//! that completes in a single call.

use crate::driver::{InputPorts, OutputPorts};
use crate::error::SimError;
use crate::instruction::{PortId, Reg};
use crate::machine::{MachineState, ReadState, WriteState};

use super::Flow;

pub(super) fn read(
    state: &mut MachineState,
    inputs: &mut InputPorts,
    port: PortId,
    dest: Reg,
) -> Result<Flow, SimError> {
    let Some(input) = inputs.get_mut(&port) else {
        state.registers.write(dest, 0);
        return Ok(Flow::Advance);
    };

    match state.read_state {
        ReadState::WaitStb => {
            if input.stb() {
                input.set_ack(true);
                state.read_state = ReadState::WaitNstb;
                state.registers.write(dest, input.data());
            }
            Ok(Flow::Retry)
        }
        ReadState::WaitNstb => {
            if !input.stb() {
                input.set_ack(false);
                state.read_state = ReadState::WaitStb;
                Ok(Flow::Advance)
            } else {
                Ok(Flow::Retry)
            }
        }
    }
}

pub(super) fn ready(
    state: &mut MachineState,
    inputs: &mut InputPorts,
    port: PortId,
    dest: Reg,
) -> Result<Flow, SimError> {
    let value = match inputs.get(&port) {
        Some(input) => input.stb() as i32,
        None => 0,
    };
    state.registers.write(dest, value);
    Ok(Flow::Advance)
}

pub(super) fn write(
    state: &mut MachineState,
    outputs: &mut OutputPorts,
    port: PortId,
    srcb: Reg,
) -> Result<Flow, SimError> {
    let Some(output) = outputs.get_mut(&port) else {
        return Ok(Flow::Advance);
    };

    output.set_data(state.registers.read(srcb));

    match state.write_state {
        WriteState::WaitAck => {
            output.set_stb(true);
            if output.ack() {
                output.set_stb(false);
                state.write_state = WriteState::WaitNack;
            }
            Ok(Flow::Retry)
        }
        WriteState::WaitNack => {
            if !output.ack() {
                state.write_state = WriteState::WaitAck;
                Ok(Flow::Advance)
            } else {
                Ok(Flow::Retry)
            }
        }
    }
}
