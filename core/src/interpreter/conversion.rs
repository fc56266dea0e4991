//! Numeric representation conversions. The `int_to_long` widening works
//! on the stack; everything else reads/writes the `a_lo`/`a_hi` register
//! pair.

use crate::codec::{bits_to_double, bits_to_float, double_to_bits, float_to_bits, join_words, split_word};
use crate::error::SimError;
use crate::machine::MachineState;

use super::Flow;

/// Sign-extend the word on top of stack into a 64-bit long: the low word
/// stays where it is, and a new high word (`0` or `0xffffffff`) is pushed
/// above it.
pub(super) fn int_to_long(state: &mut MachineState) -> Result<Flow, SimError> {
    let low = state.memory.read(state.tos - 1);
    let extension = if (low as u32) & 0x8000_0000 != 0 {
        0xffffffffu32 as i32
    } else {
        0
    };
    state.memory.write(state.tos, extension);
    state.tos += 1;
    Ok(Flow::Advance)
}

pub(super) fn int_to_float(state: &mut MachineState) -> Result<Flow, SimError> {
    state.a_lo = float_to_bits(state.a_lo as f32);
    Ok(Flow::Advance)
}

pub(super) fn float_to_int(state: &mut MachineState) -> Result<Flow, SimError> {
    let value = bits_to_float(state.a_lo);
    state.a_lo = value as i32;
    Ok(Flow::Advance)
}

pub(super) fn long_to_double(state: &mut MachineState) -> Result<Flow, SimError> {
    let long = join_words(state.a_hi, state.a_lo);
    let bits = double_to_bits(long as f64);
    let (hi, lo) = split_word(bits as i64);
    state.a_hi = hi;
    state.a_lo = lo;
    Ok(Flow::Advance)
}

pub(super) fn double_to_long(state: &mut MachineState) -> Result<Flow, SimError> {
    let double = bits_to_double(join_words(state.a_hi, state.a_lo) as u64);
    let (hi, lo) = split_word(double as i64);
    state.a_hi = hi;
    state.a_lo = lo;
    Ok(Flow::Advance)
}

pub(super) fn float_to_double(state: &mut MachineState) -> Result<Flow, SimError> {
    let f = bits_to_float(state.a_lo);
    let bits = double_to_bits(f as f64);
    let (hi, lo) = split_word(bits as i64);
    state.a_hi = hi;
    state.a_lo = lo;
    Ok(Flow::Advance)
}

pub(super) fn double_to_float(state: &mut MachineState) -> Result<Flow, SimError> {
    let d = bits_to_double(join_words(state.a_hi, state.a_lo) as u64);
    state.a_lo = float_to_bits(d as f32);
    Ok(Flow::Advance)
}
