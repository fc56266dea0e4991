//! File-backed I/O opcodes. Input files are read one whitespace-delimited
//! integer record per line; output files are written as one formatted
//! line per call, `"%d\n"`/`"%f\n"` C-style.

use std::io::{BufRead, Write};

use crate::codec::{bits_to_double, bits_to_float, join_words};
use crate::error::SimError;
use crate::machine::MachineState;

use super::Flow;

fn next_record(state: &mut MachineState, file_name: &str) -> Result<i32, SimError> {
    let reader = state
        .input_files
        .get_mut(file_name)
        .ok_or_else(|| SimError::FileNotOpen(file_name.to_string()))?;

    let mut line = String::new();
    let bytes = reader.read_line(&mut line).map_err(|source| SimError::Io {
        path: file_name.to_string(),
        source,
    })?;
    if bytes == 0 {
        return Err(SimError::EndOfFile {
            path: file_name.to_string(),
        });
    }
    line.trim().parse::<i32>().map_err(|_| SimError::InvalidFileRecord {
        path: file_name.to_string(),
        line: line.trim().to_string(),
    })
}

fn write_line(state: &mut MachineState, file_name: &str, line: &str) -> Result<(), SimError> {
    let writer = state
        .output_files
        .get_mut(file_name)
        .ok_or_else(|| SimError::FileNotOpen(file_name.to_string()))?;
    writer
        .write_all(line.as_bytes())
        .map_err(|source| SimError::Io {
            path: file_name.to_string(),
            source,
        })
}

pub(super) fn file_read(state: &mut MachineState, file_name: &str) -> Result<Flow, SimError> {
    let value = next_record(state, file_name)?;
    state.memory.write(state.tos, value);
    state.tos += 1;
    Ok(Flow::Advance)
}

pub(super) fn file_write(state: &mut MachineState, file_name: &str) -> Result<Flow, SimError> {
    state.tos -= 1;
    let value = state.memory.read(state.tos);
    write_line(state, file_name, &format!("{value}\n"))?;
    Ok(Flow::Advance)
}

pub(super) fn unsigned_file_write(state: &mut MachineState, file_name: &str) -> Result<Flow, SimError> {
    state.tos -= 1;
    let value = state.memory.read(state.tos) as u32;
    write_line(state, file_name, &format!("{value}\n"))?;
    Ok(Flow::Advance)
}

pub(super) fn float_file_write(state: &mut MachineState, file_name: &str) -> Result<Flow, SimError> {
    state.tos -= 1;
    let value = bits_to_float(state.memory.read(state.tos));
    write_line(state, file_name, &format!("{value:.6}\n"))?;
    Ok(Flow::Advance)
}

/// Unlike `long_float_file_write`, the source's `long_file_write` writes
/// the raw `a_hi:a_lo` word through `"%f\n"` without reinterpreting it as
/// IEEE-754 bits first — the joined integer's numeric value, not its bit
/// pattern, is what gets formatted as a float.
pub(super) fn long_file_write(state: &mut MachineState, file_name: &str) -> Result<Flow, SimError> {
    let value = join_words(state.a_hi, state.a_lo) as f64;
    write_line(state, file_name, &format!("{value:.6}\n"))?;
    Ok(Flow::Advance)
}

pub(super) fn long_float_file_write(state: &mut MachineState, file_name: &str) -> Result<Flow, SimError> {
    let value = bits_to_double(join_words(state.a_hi, state.a_lo) as u64);
    write_line(state, file_name, &format!("{value:.6}\n"))?;
    Ok(Flow::Advance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_read_on_unopened_file_fails_cleanly() {
        let mut state = MachineState::new(Default::default());
        let err = file_read(&mut state, "missing.txt").unwrap_err();
        assert!(matches!(err, SimError::FileNotOpen(_)));
    }

    #[test]
    fn file_write_on_unopened_file_fails_cleanly() {
        let mut state = MachineState::new(Default::default());
        state.memory.write(0, 5);
        state.tos = 1;
        let err = file_write(&mut state, "missing.txt").unwrap_err();
        assert!(matches!(err, SimError::FileNotOpen(_)));
    }
}
