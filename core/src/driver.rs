//! The simulator driver: owns the resolved program, the machine state, and
//! the port peers, and exposes the `reset`/`step` surface. A thin owner
//! that wires peripherals to the interpreter and exposes `reset`/
//! per-instruction stepping.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::rc::Rc;

use crate::error::SimError;
use crate::instruction::{Instruction, PortId};
use crate::interpreter::{self, StepOutcome};
use crate::machine::MachineState;
use crate::port::{InputPort, OutputPort};

pub type InputPorts = HashMap<PortId, Box<dyn InputPort>>;
pub type OutputPorts = HashMap<PortId, Box<dyn OutputPort>>;

/// The compiler-resolved `port_number -> port_name` mapping spec.md §6
/// calls the "allocator": it is how a named peer (`"uart_rx"`, say) ends
/// up reachable at the numeric port id the instruction stream's `read`/
/// `write`/`ready` opcodes actually carry.
#[derive(Default, Clone, Debug)]
pub struct PortAllocator {
    pub input_names: HashMap<PortId, String>,
    pub output_names: HashMap<PortId, String>,
}

/// Resolve named port peers into the numeric-keyed maps the interpreter
/// dispatches on, via `allocator`. Mirrors
/// `original_source/chips/compiler/python_model.py`'s
/// `generate_python_model`, which walks `allocator.input_names`/
/// `output_names` and pulls the matching peer out of the caller's
/// `inputs`/`outputs` name maps for each number that has one. A name the
/// allocator lists but the caller never supplied is simply absent from
/// the result — the same "unknown port id" case the interpreter already
/// treats as a no-op/zero-read at `read`/`write`/`ready`.
pub fn resolve_ports(
    allocator: &PortAllocator,
    mut named_inputs: HashMap<String, Box<dyn InputPort>>,
    mut named_outputs: HashMap<String, Box<dyn OutputPort>>,
) -> (InputPorts, OutputPorts) {
    let mut inputs = InputPorts::new();
    for (&number, name) in &allocator.input_names {
        if let Some(peer) = named_inputs.remove(name) {
            inputs.insert(number, peer);
        }
    }

    let mut outputs = OutputPorts::new();
    for (&number, name) in &allocator.output_names {
        if let Some(peer) = named_outputs.remove(name) {
            outputs.insert(number, peer);
        }
    }

    (inputs, outputs)
}

/// Constructor inputs: a pre-resolved instruction list, the initial
/// memory image, and the port peers keyed by the integer ids the
/// instruction stream carries. Named peers go through [`resolve_ports`]
/// first; `inputs`/`outputs` here are always already numeric-keyed.
pub struct SimulatorConfig {
    pub instructions: Vec<Instruction>,
    pub memory_image: HashMap<usize, i32>,
    pub inputs: InputPorts,
    pub outputs: OutputPorts,
}

pub struct Simulator {
    instructions: Vec<Instruction>,
    state: MachineState,
    inputs: InputPorts,
    outputs: OutputPorts,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            instructions: config.instructions,
            state: MachineState::new(config.memory_image),
            inputs: config.inputs,
            outputs: config.outputs,
        }
    }

    /// Open every file the program's `file_read`/`*_file_write` opcodes
    /// name, using the opcode's `file_name` directly as a filesystem path
    /// relative to the process's current directory. Idempotent: re-running
    /// `reset` re-opens from scratch, discarding prior read position.
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.state.input_files.clear();
        self.state.output_files.clear();

        for file_name in self.referenced_input_files() {
            let file = File::open(file_name.as_ref()).map_err(|source| SimError::FileOpen {
                path: file_name.to_string(),
                source,
            })?;
            self.state.input_files.insert(file_name, BufReader::new(file));
        }

        for file_name in self.referenced_output_files() {
            let file = File::create(file_name.as_ref()).map_err(|source| SimError::FileOpen {
                path: file_name.to_string(),
                source,
            })?;
            self.state
                .output_files
                .insert(file_name, BufWriter::new(file));
        }

        Ok(())
    }

    fn referenced_input_files(&self) -> Vec<Rc<str>> {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::FileRead { file_name } => Some(file_name.clone()),
                _ => None,
            })
            .collect()
    }

    fn referenced_output_files(&self) -> Vec<Rc<str>> {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::FileWrite { file_name }
                | Instruction::UnsignedFileWrite { file_name }
                | Instruction::FloatFileWrite { file_name }
                | Instruction::LongFileWrite { file_name }
                | Instruction::LongFloatFileWrite { file_name } => Some(file_name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Execute exactly one instruction. See `interpreter::step` for the
    /// atomicity and re-entrancy guarantees.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        interpreter::step(&self.instructions, &mut self.state, &mut self.inputs, &mut self.outputs)
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction as I;

    #[test]
    fn reset_with_no_file_opcodes_is_a_no_op() {
        let mut sim = Simulator::new(SimulatorConfig {
            instructions: vec![I::PushLiteral(1), I::Stop],
            memory_image: HashMap::new(),
            inputs: HashMap::new(),
            outputs: HashMap::new(),
        });
        sim.reset().unwrap();
        assert!(sim.state().input_files.is_empty());
    }

    #[test]
    fn reset_on_missing_input_file_fails() {
        let mut sim = Simulator::new(SimulatorConfig {
            instructions: vec![I::FileRead {
                file_name: Rc::from("definitely-does-not-exist.txt"),
            }],
            memory_image: HashMap::new(),
            inputs: HashMap::new(),
            outputs: HashMap::new(),
        });
        assert!(matches!(sim.reset(), Err(SimError::FileOpen { .. })));
    }

    #[test]
    fn run_to_stop_executes_and_halts() {
        let mut sim = Simulator::new(SimulatorConfig {
            instructions: vec![I::PushLiteral(1), I::PushLiteral(2), I::Add, I::Stop],
            memory_image: HashMap::new(),
            inputs: HashMap::new(),
            outputs: HashMap::new(),
        });
        sim.reset().unwrap();
        loop {
            match sim.step().unwrap() {
                StepOutcome::Running => continue,
                StepOutcome::Stopped => break,
            }
        }
        assert_eq!(sim.state().memory.read(0), 3);
    }

    struct StubInput;
    impl InputPort for StubInput {
        fn data(&self) -> i32 {
            0
        }
        fn stb(&self) -> bool {
            false
        }
        fn set_ack(&mut self, _ack: bool) {}
    }

    struct StubOutput;
    impl OutputPort for StubOutput {
        fn set_data(&mut self, _data: i32) {}
        fn set_stb(&mut self, _stb: bool) {}
        fn ack(&self) -> bool {
            false
        }
    }

    #[test]
    fn resolve_ports_maps_named_peers_through_the_allocator() {
        let mut allocator = PortAllocator::default();
        allocator.input_names.insert(3, "uart_rx".to_string());
        allocator.output_names.insert(7, "uart_tx".to_string());

        let mut named_inputs: HashMap<String, Box<dyn InputPort>> = HashMap::new();
        named_inputs.insert("uart_rx".to_string(), Box::new(StubInput));
        let mut named_outputs: HashMap<String, Box<dyn OutputPort>> = HashMap::new();
        named_outputs.insert("uart_tx".to_string(), Box::new(StubOutput));

        let (inputs, outputs) = resolve_ports(&allocator, named_inputs, named_outputs);
        assert!(inputs.contains_key(&3));
        assert!(outputs.contains_key(&7));
    }

    #[test]
    fn resolve_ports_drops_names_the_allocator_lists_but_the_caller_never_supplied() {
        let mut allocator = PortAllocator::default();
        allocator.input_names.insert(1, "never_supplied".to_string());

        let (inputs, outputs) = resolve_ports(&allocator, HashMap::new(), HashMap::new());
        assert!(inputs.is_empty());
        assert!(outputs.is_empty());
    }
}
