use std::cell::RefCell;
use std::rc::Rc;

use stackvm_core::prelude::{InputPort, OutputPort};

/// Shared state behind a scripted port peer: the test sets `stb`/`ack`/
/// `data` directly between `step()` calls, the way a real peer's own
/// clocked logic would, to drive the two-phase handshake end to end.
#[derive(Default)]
struct PeerState {
    data: i32,
    stb: bool,
    ack: bool,
}

/// A programmable input port: the test drives `stb`/`data`, the simulator
/// drives `ack` — a minimal stand-in for a real peripheral, shared with
/// the test via a handle.
pub struct ScriptedInputPort(Rc<RefCell<PeerState>>);

#[derive(Clone)]
pub struct ScriptedInputHandle(Rc<RefCell<PeerState>>);

impl ScriptedInputHandle {
    pub fn new() -> (Self, ScriptedInputPort) {
        let state = Rc::new(RefCell::new(PeerState::default()));
        (Self(state.clone()), ScriptedInputPort(state))
    }

    pub fn set_stb(&self, stb: bool) {
        self.0.borrow_mut().stb = stb;
    }

    pub fn set_data(&self, data: i32) {
        self.0.borrow_mut().data = data;
    }

    pub fn ack(&self) -> bool {
        self.0.borrow().ack
    }
}

impl InputPort for ScriptedInputPort {
    fn data(&self) -> i32 {
        self.0.borrow().data
    }
    fn stb(&self) -> bool {
        self.0.borrow().stb
    }
    fn set_ack(&mut self, ack: bool) {
        self.0.borrow_mut().ack = ack;
    }
}

/// A programmable output port: the simulator drives `data`/`stb`, the test
/// drives `ack`.
pub struct ScriptedOutputPort(Rc<RefCell<PeerState>>);

#[derive(Clone)]
pub struct ScriptedOutputHandle(Rc<RefCell<PeerState>>);

impl ScriptedOutputHandle {
    pub fn new() -> (Self, ScriptedOutputPort) {
        let state = Rc::new(RefCell::new(PeerState::default()));
        (Self(state.clone()), ScriptedOutputPort(state))
    }

    pub fn set_ack(&self, ack: bool) {
        self.0.borrow_mut().ack = ack;
    }

    pub fn data(&self) -> i32 {
        self.0.borrow().data
    }

    pub fn stb(&self) -> bool {
        self.0.borrow().stb
    }
}

impl OutputPort for ScriptedOutputPort {
    fn set_data(&mut self, data: i32) {
        self.0.borrow_mut().data = data;
    }
    fn set_stb(&mut self, stb: bool) {
        self.0.borrow_mut().stb = stb;
    }
    fn ack(&self) -> bool {
        self.0.borrow().ack
    }
}
