//! A cycle-accurate simulator for a stack-oriented virtual CPU: label
//! resolution, a sparse memory/register model, and an exhaustively-matched
//! opcode interpreter, driven by [`driver::Simulator`].

pub mod codec;
pub mod driver;
pub mod error;
pub mod instruction;
mod interpreter;
pub mod machine;
pub mod port;

pub mod prelude {
    pub use crate::driver::{
        InputPorts, OutputPorts, PortAllocator, Simulator, SimulatorConfig, resolve_ports,
    };
    pub use crate::error::SimError;
    pub use crate::instruction::{Instruction, RawInstruction, SourceLoc, resolve_labels};
    pub use crate::interpreter::StepOutcome;
    pub use crate::machine::MachineState;
    pub use crate::port::{InputPort, OutputPort};
}
