//! Random-access memory opcodes, indexed indirectly through the register
//! file rather than a literal address.

use crate::error::SimError;
use crate::instruction::Reg;
use crate::machine::MachineState;

use super::Flow;

pub(super) fn memory_read(state: &mut MachineState, src: Reg, dest: Reg) -> Result<Flow, SimError> {
    let address = state.registers.read(src) as usize;
    let value = state.memory.read(address);
    state.registers.write(dest, value);
    Ok(Flow::Advance)
}

pub(super) fn memory_write(state: &mut MachineState, src: Reg, srcb: Reg) -> Result<Flow, SimError> {
    let address = state.registers.read(src) as usize;
    let value = state.registers.read(srcb);
    state.memory.write(address, value);
    Ok(Flow::Advance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_write_then_read_round_trips() {
        let mut state = MachineState::new(Default::default());
        state.registers.write(0, 100); // address register
        state.registers.write(1, 7); // value register
        memory_write(&mut state, 0, 1).unwrap();

        state.registers.write(2, 0); // dest register
        memory_read(&mut state, 0, 2).unwrap();
        assert_eq!(state.registers.read(2), 7);
    }

    #[test]
    fn unwritten_address_reads_as_zero() {
        let mut state = MachineState::new(Default::default());
        state.registers.write(0, 999);
        memory_read(&mut state, 0, 1).unwrap();
        assert_eq!(state.registers.read(1), 0);
    }
}
