//! Core traits and types for the VexRiscv instance.
//!
//! The core itself (pipeline, caches, ISA) is opaque. The wrapper only sees
//! its ports: two Wishbone masters, interrupts, the debug unit port and the
//! optional function unit buses.

use crate::coproc::{
    Channel, CommandBus, CfuCommand, CfuResponse, VfuCommand, VfuResponse
};
use crate::debug::{DebugCommand, DebugResponse};
use crate::memory::Wishbone;

/// Port values driven by the core for one cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoreOutputs {
    /// Instruction bus, master half.
    pub ibus:           Wishbone,
    /// Data bus, master half.
    pub dbus:           Wishbone,

    pub debug_rsp:      DebugResponse,
    /// The debug unit is holding the core in reset.
    pub reset_out:      bool,

    /// CFU command, `ready` unused.
    pub cfu_cmd:        Channel<CfuCommand>,
    pub cfu_rsp_ready:  bool,
    /// VFU command, `ready` unused.
    pub vfu_cmd:        Channel<VfuCommand>,
    pub vfu_rsp_ready:  bool,
}

/// Port values seen by the core for one cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoreInputs {
    /// Effective reset.
    pub reset:                  bool,
    /// System reset only, for the debug unit.
    pub debug_reset:            bool,
    pub reset_vector:           u32,

    pub external_interrupts:    u32,
    pub timer_interrupt:        bool,
    pub software_interrupt:     bool,

    /// Instruction bus with the slave half filled in, error injection applied.
    pub ibus:                   Wishbone,
    /// Data bus with the slave half filled in, error injection applied.
    pub dbus:                   Wishbone,

    pub debug_cmd:              DebugCommand,

    pub cfu:                    CommandBus<CfuCommand, CfuResponse>,
    pub vfu:                    CommandBus<VfuCommand, VfuResponse>,
}

/// A cycle model of the core.
///
/// Outputs must be a function of the state latched at the previous edge;
/// the wrapper samples them before clocking anything.
pub trait CoreModel {
    /// Ports driven by the core this cycle.
    fn outputs(&self) -> CoreOutputs;

    /// Rising clock edge.
    fn clock(&mut self, inputs: &CoreInputs);
}
