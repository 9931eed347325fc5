//! Wishbone to debug-unit command bridge.

use log::{debug, trace};

use crate::common::bits;
use crate::memory::Wishbone;

/// Bits of the Wishbone word address reaching the debug unit.
const DEBUG_ADR_MASK: u32 = bits(0, 5);

/// Command port into the core's debug unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugCommand {
    pub valid:      bool,
    pub wr:         bool,
    pub address:    u8,
    pub data:       u32,
}

/// Response port of the core's debug unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugResponse {
    /// Command accepted.
    pub ready:  bool,
    /// Read result.
    pub data:   u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeState {
    Idle,
    /// Command is being offered to the debug unit.
    InProgress,
    /// Debug unit accepted the command.
    Complete,
    /// Ack has been given, waiting for the master to drop its request.
    WaitForAck,
}

impl Default for BridgeState {
    fn default() -> Self {
        BridgeState::Idle
    }
}

/// Translate a Wishbone word address into a debug register address.
/// Only the low 6 bits are decoded; the register file is smaller than the window.
pub const fn debug_address(adr: u32) -> u8 {
    ((adr & DEBUG_ADR_MASK) << 2) as u8
}

/// Serves one Wishbone transaction at a time by issuing one debug command.
///
/// All fields are registers, updated only by `clock`.
#[derive(Clone, Debug, Default)]
pub struct BusBridge {
    state:  BridgeState,
    cmd:    DebugCommand,
    ack:    bool,
    dat_r:  u32,
}

impl BusBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Command presented to the debug unit this cycle.
    pub fn command(&self) -> DebugCommand {
        self.cmd
    }

    pub fn ack(&self) -> bool {
        self.ack
    }

    pub fn read_data(&self) -> u32 {
        self.dat_r
    }

    /// Return every register to its reset value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rising clock edge.
    ///
    /// `bus` is the debug bus as driven by the master this cycle, `rsp` the
    /// debug unit's response port this cycle.
    pub fn clock(&mut self, bus: &Wishbone, rsp: &DebugResponse) {
        let request = bus.is_active();
        self.dat_r = rsp.data;

        use BridgeState::*;
        let next = match self.state {
            Idle if request => {
                self.cmd = DebugCommand {
                    valid:      true,
                    wr:         bus.we,
                    address:    debug_address(bus.adr),
                    data:       bus.dat_w,
                };
                self.ack = false;
                debug!("debug bus: {} at {:#04x} ({:#010x})",
                    if bus.we { "write" } else { "read" }, self.cmd.address, bus.dat_w);
                InProgress
            },
            Idle => Idle,
            InProgress if rsp.ready => {
                self.cmd.valid = false;
                self.cmd.wr = false;
                Complete
            },
            // No timeout: a silent debug unit stalls the bridge here.
            InProgress => InProgress,
            Complete => {
                self.ack = true;
                debug!("debug bus: ack, data {:#010x}", self.dat_r);
                WaitForAck
            },
            WaitForAck => {
                self.ack = false;
                if request {
                    WaitForAck
                } else {
                    Idle
                }
            },
        };

        if next != self.state {
            trace!("debug bridge: {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}
