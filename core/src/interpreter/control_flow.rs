//! Branch opcodes. Targets are already absolute indices —
//! [`crate::instruction::resolve_labels`] did the symbolic-to-numeric work
//! ahead of time, so these are pure stack/condition checks.

use crate::error::SimError;
use crate::machine::MachineState;

use super::Flow;

pub(super) fn goto(target: usize) -> Result<Flow, SimError> {
    Ok(Flow::Jump(target))
}

pub(super) fn jmp_if_false(state: &mut MachineState, target: usize) -> Result<Flow, SimError> {
    state.tos -= 1;
    let condition = state.memory.read(state.tos);
    if condition == 0 {
        Ok(Flow::Jump(target))
    } else {
        Ok(Flow::Advance)
    }
}

pub(super) fn jmp_if_true(state: &mut MachineState, target: usize) -> Result<Flow, SimError> {
    state.tos -= 1;
    let condition = state.memory.read(state.tos);
    if condition != 0 {
        Ok(Flow::Jump(target))
    } else {
        Ok(Flow::Advance)
    }
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
    fn jmp_if_false_branches_on_zero() {
        let mut state = with_stack(&[0]);
        let flow = jmp_if_false(&mut state, 42).unwrap();
        assert!(matches!(flow, Flow::Jump(42)));

        let mut state = with_stack(&[1]);
        let flow = jmp_if_false(&mut state, 42).unwrap();
        assert!(matches!(flow, Flow::Advance));
    }

    #[test]
    fn jmp_if_true_branches_on_nonzero() {
        let mut state = with_stack(&[7]);
        let flow = jmp_if_true(&mut state, 42).unwrap();
        assert!(matches!(flow, Flow::Jump(42)));

        let mut state = with_stack(&[0]);
        let flow = jmp_if_true(&mut state, 42).unwrap();
        assert!(matches!(flow, Flow::Advance));
    }
}
