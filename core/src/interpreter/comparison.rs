//! Stack-based comparison opcodes. Each pops `b` then `a` and pushes `1`
//! for true, `0` for false — the boolean convention `jmp_if_false`/
//! `jmp_if_true` read back in `control_flow`.

use crate::error::SimError;
use crate::machine::MachineState;

use super::Flow;

fn pop2(state: &mut MachineState) -> (i32, i32) {
    state.tos -= 1;
    let b = state.memory.read(state.tos);
    state.tos -= 1;
    let a = state.memory.read(state.tos);
    (a, b)
}

fn push_bool(state: &mut MachineState, value: bool) {
    state.memory.write(state.tos, value as i32);
    state.tos += 1;
}

pub(super) fn greater(state: &mut MachineState) -> Result<Flow, SimError> {
    let (a, b) = pop2(state);
    push_bool(state, a > b);
    Ok(Flow::Advance)
}

pub(super) fn greater_equal(state: &mut MachineState) -> Result<Flow, SimError> {
    let (a, b) = pop2(state);
    push_bool(state, a >= b);
    Ok(Flow::Advance)
}

pub(super) fn unsigned_greater(state: &mut MachineState) -> Result<Flow, SimError> {
    let (a, b) = pop2(state);
    push_bool(state, (a as u32) > (b as u32));
    Ok(Flow::Advance)
}

pub(super) fn unsigned_greater_equal(state: &mut MachineState) -> Result<Flow, SimError> {
    let (a, b) = pop2(state);
    push_bool(state, (a as u32) >= (b as u32));
    Ok(Flow::Advance)
}

pub(super) fn equal(state: &mut MachineState) -> Result<Flow, SimError> {
    let (a, b) = pop2(state);
    push_bool(state, a == b);
    Ok(Flow::Advance)
}

pub(super) fn not_equal(state: &mut MachineState) -> Result<Flow, SimError> {
    let (a, b) = pop2(state);
    push_bool(state, a != b);
    Ok(Flow::Advance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_stack(values: &[i32]) -> MachineState {
        let mut state = MachineState::new(Default::default());
        for (i, v) in values.iter().enumerate() {
            state.memory.write(i, *v);
        }
        state.tos = values.len();
        state
    }

    #[test]
    fn signed_greater_treats_negative_as_less() {
        let mut state = with_stack(&[-1, 1]);
        greater(&mut state).unwrap();
        assert_eq!(state.memory.read(0), 0);
    }

    #[test]
    fn unsigned_greater_treats_negative_as_large() {
        let mut state = with_stack(&[-1, 1]);
        unsigned_greater(&mut state).unwrap();
        assert_eq!(state.memory.read(0), 1);
    }

    #[test]
    fn equal_and_not_equal_are_complementary() {
        let mut state = with_stack(&[5, 5]);
        equal(&mut state).unwrap();
        assert_eq!(state.memory.read(0), 1);

        let mut state = with_stack(&[5, 5]);
        not_equal(&mut state).unwrap();
        assert_eq!(state.memory.read(0), 0);
    }
}
