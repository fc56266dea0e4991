//! Floating-point arithmetic. The single-precision family operates on
//! `a_lo`/`b_lo`; the double-precision family joins `a_hi:a_lo` and
//! `b_hi:b_lo`. See DESIGN.md for why `long_float_add` joins `b_lo`
//! (not `a_lo` twice) for its second operand.

use crate::codec::{bits_to_double, bits_to_float, double_to_bits, float_to_bits, join_words, split_word};
use crate::error::SimError;
use crate::machine::MachineState;

use super::Flow;

pub(super) fn float_add(state: &mut MachineState) -> Result<Flow, SimError> {
    let result = bits_to_float(state.a_lo) + bits_to_float(state.b_lo);
    state.a_lo = float_to_bits(result);
    Ok(Flow::Advance)
}

pub(super) fn float_subtract(state: &mut MachineState) -> Result<Flow, SimError> {
    let result = bits_to_float(state.a_lo) - bits_to_float(state.b_lo);
    state.a_lo = float_to_bits(result);
    Ok(Flow::Advance)
}

pub(super) fn float_multiply(state: &mut MachineState) -> Result<Flow, SimError> {
    let result = bits_to_float(state.a_lo) * bits_to_float(state.b_lo);
    state.a_lo = float_to_bits(result);
    Ok(Flow::Advance)
}

pub(super) fn float_divide(state: &mut MachineState) -> Result<Flow, SimError> {
    let result = bits_to_float(state.a_lo) / bits_to_float(state.b_lo);
    state.a_lo = float_to_bits(result);
    Ok(Flow::Advance)
}

fn double_a(state: &MachineState) -> f64 {
    bits_to_double(join_words(state.a_hi, state.a_lo) as u64)
}

fn double_b(state: &MachineState) -> f64 {
    bits_to_double(join_words(state.b_hi, state.b_lo) as u64)
}

fn store_double(state: &mut MachineState, value: f64) {
    let (hi, lo) = split_word(double_to_bits(value) as i64);
    state.a_hi = hi;
    state.a_lo = lo;
}

pub(super) fn long_float_add(state: &mut MachineState) -> Result<Flow, SimError> {
    let result = double_a(state) + double_b(state);
    store_double(state, result);
    Ok(Flow::Advance)
}

pub(super) fn long_float_subtract(state: &mut MachineState) -> Result<Flow, SimError> {
    let result = double_a(state) - double_b(state);
    store_double(state, result);
    Ok(Flow::Advance)
}

pub(super) fn long_float_multiply(state: &mut MachineState) -> Result<Flow, SimError> {
    let result = double_a(state) * double_b(state);
    store_double(state, result);
    Ok(Flow::Advance)
}

pub(super) fn long_float_divide(state: &mut MachineState) -> Result<Flow, SimError> {
    let result = double_a(state) / double_b(state);
    store_double(state, result);
    Ok(Flow::Advance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_add_combines_a_and_b() {
        let mut state = MachineState::new(Default::default());
        state.a_lo = float_to_bits(1.5);
        state.b_lo = float_to_bits(2.25);
        float_add(&mut state).unwrap();
        assert_eq!(bits_to_float(state.a_lo), 3.75);
    }

    #[test]
    fn long_float_add_uses_b_lo_not_a_lo() {
        let mut state = MachineState::new(Default::default());
        let (a_hi, a_lo) = split_word(double_to_bits(1.0) as i64);
        let (b_hi, b_lo) = split_word(double_to_bits(2.0) as i64);
        state.a_hi = a_hi;
        state.a_lo = a_lo;
        state.b_hi = b_hi;
        state.b_lo = b_lo;
        long_float_add(&mut state).unwrap();
        let result = bits_to_double(join_words(state.a_hi, state.a_lo) as u64);
        assert_eq!(result, 3.0);
    }

    #[test]
    fn long_float_divide_by_zero_produces_infinity() {
        let mut state = MachineState::new(Default::default());
        let (a_hi, a_lo) = split_word(double_to_bits(1.0) as i64);
        state.a_hi = a_hi;
        state.a_lo = a_lo;
        let (b_hi, b_lo) = split_word(double_to_bits(0.0) as i64);
        state.b_hi = b_hi;
        state.b_lo = b_lo;
        long_float_divide(&mut state).unwrap();
        let result = bits_to_double(join_words(state.a_hi, state.a_lo) as u64);
        assert!(result.is_infinite());
    }
}
