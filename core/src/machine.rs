//! Machine state: registers, stack/frame pointers, sparse memory, open
//! files, and the handshake sub-state machines. Owned exclusively by the
//! driver, created by `reset`, mutated only by `step`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::rc::Rc;

/// A sparse address space: absent addresses read as 0, writes create
/// entries. A `HashMap` keyed by address is the simplest implementation
/// that satisfies this contract; a dense array sized to the program's
/// high-water mark would be equally valid.
#[derive(Default, Clone, Debug)]
pub struct Memory {
    words: HashMap<usize, i32>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_image(image: HashMap<usize, i32>) -> Self {
        Self { words: image }
    }

    pub fn read(&self, addr: usize) -> i32 {
        self.words.get(&addr).copied().unwrap_or(0)
    }

    pub fn write(&mut self, addr: usize, value: i32) {
        self.words.insert(addr, value);
    }
}

/// Sub-state of the `read` opcode's two-phase handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReadState {
    #[default]
    WaitStb,
    WaitNstb,
}

/// Sub-state of the `write` opcode's two-phase handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WriteState {
    #[default]
    WaitAck,
    WaitNack,
}

/// Every piece of state a running program can observe or mutate, minus the
/// instruction list itself (immutable after label resolution) and the port
/// peers (shared, external, owned by the driver alongside this state).
pub struct MachineState {
    pub pc: usize,

    pub a_lo: i32,
    pub a_hi: i32,
    pub b_lo: i32,
    pub b_hi: i32,

    /// High half of the last `multiply` result.
    pub register_hi: i32,
    /// Reserved for a second wide-multiply high half; no opcode writes it
    /// yet, but it shares the lifecycle of `register_hi` so it lives
    /// alongside it rather than being bolted on separately later.
    pub register_hib: i32,

    pub carry: bool,

    pub tos: usize,
    pub frame: usize,
    pub new_frame: usize,
    pub return_frame: usize,
    pub return_address: usize,
    pub pointer: usize,

    pub memory: Memory,

    /// Backing store for the `src`/`dest`/`srcb` register file referenced
    /// by `not`, `not_equal`, `read`, `write`, `ready`, `memory_read` and
    /// `memory_write`. See DESIGN.md for why this is modeled as its own
    /// sparse map rather than folded into `a_lo`/`a_hi`/`b_lo`/`b_hi`.
    pub registers: Memory,

    pub read_state: ReadState,
    pub write_state: WriteState,

    pub input_files: HashMap<Rc<str>, BufReader<File>>,
    pub output_files: HashMap<Rc<str>, BufWriter<File>>,
}

impl MachineState {
    pub fn new(memory_image: HashMap<usize, i32>) -> Self {
        Self {
            pc: 0,
            a_lo: 0,
            a_hi: 0,
            b_lo: 0,
            b_hi: 0,
            register_hi: 0,
            register_hib: 0,
            carry: false,
            tos: 0,
            frame: 0,
            new_frame: 0,
            return_frame: 0,
            return_address: 0,
            pointer: 0,
            memory: Memory::from_image(memory_image),
            registers: Memory::new(),
            read_state: ReadState::default(),
            write_state: WriteState::default(),
            input_files: HashMap::new(),
            output_files: HashMap::new(),
        }
    }
}
