//! The strobe/ack handshake contract between the CPU and its port peers.
//!
//! An input port's `stb`/`data` are driven by the peer and observed by the
//! CPU; its `ack` is driven by the CPU and observed by the peer. An output
//! port is symmetric with roles swapped: the CPU drives `data`/`stb`, the
//! peer drives `ack`. Peers are external collaborators maintained by
//! whatever owns the other end of the wire — this module only defines the
//! two-sided trait contract the interpreter talks to.

/// CPU-facing view of an input port peer.
pub trait InputPort {
    /// The data word currently on the wire. Only meaningful while `stb()`.
    fn data(&self) -> i32;

    /// Asserted by the peer when `data()` is valid.
    fn stb(&self) -> bool;

    /// Driven by the CPU: true once it has latched `data()`.
    fn set_ack(&mut self, ack: bool);
}

/// CPU-facing view of an output port peer.
pub trait OutputPort {
    /// Driven by the CPU.
    fn set_data(&mut self, data: i32);

    /// Driven by the CPU: asserted while a write is in flight.
    fn set_stb(&mut self, stb: bool);

    /// Asserted by the peer once it has accepted `data()`.
    fn ack(&self) -> bool;
}
