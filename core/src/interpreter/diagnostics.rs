//! Diagnostic opcodes: `assert` is fatal, the `report` family emits a
//! structured `tracing` event, and `stop` closes open files.

use crate::codec::{bits_to_double, bits_to_float, join_words};
use crate::error::SimError;
use crate::instruction::SourceLoc;
use crate::machine::MachineState;

use super::Flow;

pub(super) fn assert(state: &mut MachineState, loc: &SourceLoc) -> Result<Flow, SimError> {
    if state.a_lo == 0 {
        tracing::error!(line = loc.line, file = %loc.file, "assertion failed");
        return Err(SimError::AssertionFailed {
            line: loc.line,
            file: loc.file.to_string(),
        });
    }
    Ok(Flow::Advance)
}

pub(super) fn report(state: &mut MachineState, loc: &SourceLoc) -> Result<Flow, SimError> {
    tracing::info!(kind = "int", value = state.a_lo, line = loc.line, file = %loc.file, "report");
    Ok(Flow::Advance)
}

pub(super) fn long_report(state: &mut MachineState, loc: &SourceLoc) -> Result<Flow, SimError> {
    let value = join_words(state.a_hi, state.a_lo);
    tracing::info!(kind = "long", value, line = loc.line, file = %loc.file, "report");
    Ok(Flow::Advance)
}

pub(super) fn float_report(state: &mut MachineState, loc: &SourceLoc) -> Result<Flow, SimError> {
    let value = bits_to_float(state.a_lo);
    tracing::info!(kind = "float", value, line = loc.line, file = %loc.file, "report");
    Ok(Flow::Advance)
}

pub(super) fn long_float_report(state: &mut MachineState, loc: &SourceLoc) -> Result<Flow, SimError> {
    let value = bits_to_double(join_words(state.a_hi, state.a_lo) as u64);
    tracing::info!(kind = "double", value, line = loc.line, file = %loc.file, "report");
    Ok(Flow::Advance)
}

pub(super) fn unsigned_report(state: &mut MachineState, loc: &SourceLoc) -> Result<Flow, SimError> {
    let value = state.a_lo as u32;
    tracing::info!(kind = "unsigned", value, line = loc.line, file = %loc.file, "report");
    Ok(Flow::Advance)
}

pub(super) fn long_unsigned_report(state: &mut MachineState, loc: &SourceLoc) -> Result<Flow, SimError> {
    let value = join_words(state.a_hi, state.a_lo) as u64;
    tracing::info!(kind = "unsigned long", value, line = loc.line, file = %loc.file, "report");
    Ok(Flow::Advance)
}

/// Flushes and drops every open file handle. The caller (`interpreter::step`)
/// has already decided to stop; this just performs the cleanup the
/// reference implementation does before raising `StopSim`.
pub(super) fn stop(state: &mut MachineState) {
    state.input_files.clear();
    state.output_files.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn loc() -> SourceLoc {
        SourceLoc {
            line: 10,
            file: Rc::from("test.src"),
        }
    }

    #[test]
    fn assert_zero_is_fatal() {
        let mut state = MachineState::new(Default::default());
        state.a_lo = 0;
        let err = assert(&mut state, &loc()).unwrap_err();
        assert!(matches!(err, SimError::AssertionFailed { line: 10, .. }));
    }

    #[test]
    fn assert_nonzero_advances() {
        let mut state = MachineState::new(Default::default());
        state.a_lo = 1;
        let flow = assert(&mut state, &loc()).unwrap();
        assert!(matches!(flow, Flow::Advance));
    }

    #[test]
    fn stop_clears_open_files() {
        let mut state = MachineState::new(Default::default());
        stop(&mut state);
        assert!(state.input_files.is_empty());
        assert!(state.output_files.is_empty());
    }
}
