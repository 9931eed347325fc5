//! Bus error injection while the core resets itself.
//!
//! When the debug unit resets the core, any cycle in flight on the
//! instruction or data bus would otherwise be left hanging. Each bus gets
//! its own error latch, OR'd into the error line the core sees.

use log::warn;

#[derive(Clone, Debug, Default)]
pub struct ResetErrorInjector {
    ibus_err:       bool,
    dbus_err:       bool,
    /// Registered copy of the core's reset-out.
    reset_active:   bool,
    /// Reset fed back into the core.
    debug_reset:    bool,
}

impl ResetErrorInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forced error on the instruction bus.
    pub fn ibus_err(&self) -> bool {
        self.ibus_err
    }

    /// Forced error on the data bus.
    pub fn dbus_err(&self) -> bool {
        self.dbus_err
    }

    pub fn reset_active(&self) -> bool {
        self.reset_active
    }

    pub fn debug_reset(&self) -> bool {
        self.debug_reset
    }

    /// Rising clock edge.
    ///
    /// While `reset_out` is high each latch follows whether its bus has a
    /// cycle in flight; a master seeing the error drops `stb` on the next
    /// edge, which clears the latch while the reset is still running.
    /// Once `reset_out` falls both latches clear on the following edge.
    pub fn clock(&mut self, reset_out: bool, ibus_active: bool, dbus_active: bool, sys_reset: bool) {
        let debug_reset = self.reset_active || sys_reset;

        if sys_reset {
            *self = Self::default();
        } else if reset_out {
            if ibus_active && !self.ibus_err {
                warn!("ibus access during core reset, forcing bus error");
            }
            if dbus_active && !self.dbus_err {
                warn!("dbus access during core reset, forcing bus error");
            }
            self.ibus_err = ibus_active;
            self.dbus_err = dbus_active;
            self.reset_active = true;
        } else {
            self.ibus_err = false;
            self.dbus_err = false;
            self.reset_active = false;
        }

        self.debug_reset = debug_reset;
    }
}
