//! Co-processor interfaces for the VexRiscv.
//!
//! Custom function units (CFU) and vector function units (VFU) both talk to
//! the core over a command channel and a response channel, each a plain
//! valid/ready handshake.

use crate::memory::AxiLite;

/// A valid/ready handshake carrying a payload.
///
/// The producer drives `valid` and `payload`, the consumer drives `ready`.
/// A transfer happens on every clock edge where both are high.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Channel<P> {
    pub valid:      bool,
    pub ready:      bool,
    pub payload:    P,
}

impl<P: Copy> Channel<P> {
    /// A channel with `valid` set and the given payload.
    pub fn offer(payload: P) -> Self {
        Self {
            valid:      true,
            ready:      false,
            payload:    payload,
        }
    }

    /// True when a transfer happens on the next edge.
    pub fn fire(&self) -> bool {
        self.valid && self.ready
    }

    /// The payload, if it transfers on the next edge.
    pub fn transfer(&self) -> Option<P> {
        if self.fire() {
            Some(self.payload)
        } else {
            None
        }
    }
}

/// Command and response channels between the core and a function unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommandBus<C, R> {
    pub cmd: Channel<C>,
    pub rsp: Channel<R>,
}

/// Custom function unit command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CfuCommand {
    /// 10 bits wide.
    pub function_id:    u16,
    pub inputs_0:       u32,
    pub inputs_1:       u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CfuResponse {
    pub outputs_0: u32,
}

/// Vector function unit command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VfuCommand {
    pub instruction:    u32,
    pub inputs_0:       u32,
    pub inputs_1:       u32,
    /// 3 bits wide.
    pub rounding:       u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VfuResponse {
    pub output: u32,
}

pub const CFU_FUNCTION_ID_MASK: u16 = 0x3FF;
pub const VFU_ROUNDING_MASK: u8 = 0x7;

/// A payload carried on a function unit channel.
pub trait Payload: Copy + Default {
    /// Truncate fields to their wire widths.
    fn masked(self) -> Self {
        self
    }
}

impl Payload for CfuCommand {
    fn masked(self) -> Self {
        Self {
            function_id: self.function_id & CFU_FUNCTION_ID_MASK,
            ..self
        }
    }
}

impl Payload for VfuCommand {
    fn masked(self) -> Self {
        Self {
            rounding: self.rounding & VFU_ROUNDING_MASK,
            ..self
        }
    }
}

impl Payload for CfuResponse {}
impl Payload for VfuResponse {}

/// Function unit interface.
/// The wrapper drives the unit through these methods once per clock.
///
/// Outputs must only depend on state latched at the previous edge.
pub trait FunctionUnit {
    type Command;
    type Response;

    /// Whether a command would be accepted this cycle.
    fn cmd_ready(&self) -> bool;

    /// The response presented this cycle, if any.
    fn response(&self) -> Option<Self::Response>;

    /// Clock edge. `cmd` holds the command that transferred on this edge,
    /// `rsp_taken` is set when the core consumed the presented response.
    fn clock(&mut self, cmd: Option<Self::Command>, rsp_taken: bool);

    /// Synchronous system reset.
    fn reset(&mut self) {}

    /// AXI-Lite master used by the unit to reach main memory.
    fn memory_bus(&mut self) -> Option<&mut AxiLite> {
        None
    }
}

pub type CfuImpl = Box<dyn FunctionUnit<Command = CfuCommand, Response = CfuResponse> + Send>;
pub type VfuImpl = Box<dyn FunctionUnit<Command = VfuCommand, Response = VfuResponse> + Send>;

/// A function unit slot on the core.
///
/// Holds the bus as seen this cycle and, when a model is attached, the unit
/// answering it. Without a model the unit never accepts a command.
pub struct UnitPort<C, R> {
    unit:   Option<Box<dyn FunctionUnit<Command = C, Response = R> + Send>>,
    bus:    CommandBus<C, R>,
}

impl<C: Payload, R: Payload> UnitPort<C, R> {
    pub fn new(unit: Option<Box<dyn FunctionUnit<Command = C, Response = R> + Send>>) -> Self {
        Self {
            unit:   unit,
            bus:    CommandBus::default(),
        }
    }

    pub fn bus(&self) -> &CommandBus<C, R> {
        &self.bus
    }

    pub fn memory_bus(&mut self) -> Option<&mut AxiLite> {
        self.unit.as_mut().and_then(|u| u.memory_bus())
    }

    /// Settle the bus for this cycle from the core side and the unit side.
    pub fn drive(&mut self, cmd: Channel<C>, rsp_ready: bool) {
        self.bus.cmd.valid = cmd.valid;
        self.bus.cmd.payload = cmd.payload.masked();
        self.bus.rsp.ready = rsp_ready;
        match &self.unit {
            Some(unit) => {
                self.bus.cmd.ready = unit.cmd_ready();
                let rsp = unit.response();
                self.bus.rsp.valid = rsp.is_some();
                self.bus.rsp.payload = rsp.unwrap_or_default().masked();
            },
            None => {
                self.bus.cmd.ready = false;
                self.bus.rsp.valid = false;
                self.bus.rsp.payload = R::default();
            },
        }
    }

    /// Clock the unit with the transfers settled by `drive`.
    pub fn clock(&mut self, sys_reset: bool) {
        let cmd = self.bus.cmd.transfer();
        let rsp_taken = self.bus.rsp.fire();
        if let Some(unit) = self.unit.as_mut() {
            if sys_reset {
                unit.reset();
            } else {
                unit.clock(cmd, rsp_taken);
            }
        }
    }
}
