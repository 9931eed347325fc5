/// Debugger interface

use crate::debug::{BridgeState, DebugCommand};

pub struct CPUState {
    pub cycles: u64,

    /// `None` when the variant has no debug bridge.
    pub bridge: Option<BridgeState>,
    pub debug_cmd: DebugCommand,
    pub ibus_err: bool,
    pub dbus_err: bool,
    pub reset_active: bool,
    pub debug_reset: bool,

    pub timer_interrupt: bool,
}

pub trait Debugger {
    fn inspect_state(&mut self) -> CPUState;
}
