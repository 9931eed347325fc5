/// Debug access bridge.
///
/// Sits between a Wishbone slave port, reached by an external debug master,
/// and the valid/ready command port of the core's debug unit. Also watches
/// the core's reset-out to terminate bus cycles caught by a core reset.
mod bridge;
mod reset;

pub use bridge::{
    BridgeState, BusBridge, DebugCommand, DebugResponse, debug_address
};
pub use reset::ResetErrorInjector;

use crate::memory::Wishbone;

/// Signals sampled by the debug bridge on each clock edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct BridgeInputs {
    /// Debug bus as driven by the external master.
    pub debug_bus:      Wishbone,
    /// Debug unit response port.
    pub rsp:            DebugResponse,
    /// Core reset-out.
    pub reset_out:      bool,
    /// `cyc & stb` on the core's instruction bus.
    pub ibus_active:    bool,
    /// `cyc & stb` on the core's data bus.
    pub dbus_active:    bool,
    pub sys_reset:      bool,
}

/// Debug bridge with reset-time bus error injection.
#[derive(Clone, Debug, Default)]
pub struct DebugBridge {
    bus:    BusBridge,
    reset:  ResetErrorInjector,
}

impl DebugBridge {
    pub fn new() -> Self {
        Self {
            bus:    BusBridge::new(),
            reset:  ResetErrorInjector::new(),
        }
    }

    pub fn state(&self) -> BridgeState {
        self.bus.state()
    }

    /// Command presented to the debug unit this cycle.
    pub fn command(&self) -> DebugCommand {
        self.bus.command()
    }

    /// Debug bus `ack` this cycle.
    pub fn ack(&self) -> bool {
        self.bus.ack()
    }

    /// Debug bus `dat_r` this cycle.
    pub fn read_data(&self) -> u32 {
        self.bus.read_data()
    }

    /// Error to OR into the instruction bus error line.
    pub fn ibus_err(&self) -> bool {
        self.reset.ibus_err()
    }

    /// Error to OR into the data bus error line.
    pub fn dbus_err(&self) -> bool {
        self.reset.dbus_err()
    }

    pub fn reset_active(&self) -> bool {
        self.reset.reset_active()
    }

    /// Reset to OR into the core's reset line.
    pub fn debug_reset(&self) -> bool {
        self.reset.debug_reset()
    }

    /// Fill in the slave half of the debug bus from the bridge registers.
    pub fn respond(&self, bus: &mut Wishbone) {
        bus.ack = self.bus.ack();
        bus.dat_r = self.bus.read_data();
        bus.err = false;
    }

    /// Rising clock edge.
    pub fn clock(&mut self, inputs: &BridgeInputs) {
        if inputs.sys_reset {
            self.bus.reset();
        } else {
            self.bus.clock(&inputs.debug_bus, &inputs.rsp);
        }
        self.reset.clock(inputs.reset_out, inputs.ibus_active, inputs.dbus_active, inputs.sys_reset);
    }
}
