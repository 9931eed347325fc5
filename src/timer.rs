//! VexRiscv machine timer.
//!
//! A free-running 64-bit counter compared against a 64-bit compare register.
//! Software writes the compare value, then pulses `latch`: on that edge the
//! compare register is loaded and the counter is snapshotted into `time`.
//!
//! Registers are reached over a 32-bit CSR bus; each 64-bit register spans
//! two words, most significant word first.

use crate::common::{hi_64, lo_64, make_64};

/// CSR word offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerReg {
    Latch       = 0,
    TimeHi      = 1,
    TimeLo      = 2,
    TimeCmpHi   = 3,
    TimeCmpLo   = 4,
}

impl TryFrom<u32> for TimerReg {
    type Error = u32;

    fn try_from(offset: u32) -> Result<Self, Self::Error> {
        use TimerReg::*;
        match offset {
            0 => Ok(Latch),
            1 => Ok(TimeHi),
            2 => Ok(TimeLo),
            3 => Ok(TimeCmpHi),
            4 => Ok(TimeCmpLo),
            _ => Err(offset),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Timer {
    time:           u64,
    /// `time` CSR, loaded on latch.
    time_status:    u64,
    /// `time_cmp` CSR as written by software.
    time_cmp_store: u64,
    /// Compare value in effect.
    time_cmp:       u64,
    latch_pending:  bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            time:           0,
            time_status:    0,
            time_cmp_store: u64::MAX,
            time_cmp:       u64::MAX,
            latch_pending:  false,
        }
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer interrupt line.
    pub fn interrupt(&self) -> bool {
        self.time >= self.time_cmp
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn time_cmp(&self) -> u64 {
        self.time_cmp
    }

    pub fn read_csr(&self, reg: TimerReg) -> u32 {
        use TimerReg::*;
        match reg {
            Latch       => 0,
            TimeHi      => hi_64(self.time_status),
            TimeLo      => lo_64(self.time_status),
            TimeCmpHi   => hi_64(self.time_cmp_store),
            TimeCmpLo   => lo_64(self.time_cmp_store),
        }
    }

    /// CSR write. Takes effect on the next clock edge, like the write strobe it models.
    pub fn write_csr(&mut self, reg: TimerReg, data: u32) {
        use TimerReg::*;
        match reg {
            Latch       => self.latch_pending = true,
            TimeHi | TimeLo => {},
            TimeCmpHi   => self.time_cmp_store = make_64(data, lo_64(self.time_cmp_store)),
            TimeCmpLo   => self.time_cmp_store = make_64(hi_64(self.time_cmp_store), data),
        }
    }

    /// Rising clock edge.
    pub fn clock(&mut self, sys_reset: bool) {
        if sys_reset {
            *self = Self::default();
            return;
        }
        if self.latch_pending {
            self.time_status = self.time;
            self.time_cmp = self.time_cmp_store;
            self.latch_pending = false;
        }
        self.time = self.time.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(timer: &mut Timer, cycles: usize) {
        for _ in 0..cycles {
            timer.clock(false);
        }
    }

    #[test]
    fn test_no_interrupt_after_reset() {
        let mut timer = Timer::new();
        run(&mut timer, 100);
        assert!(!timer.interrupt());
        assert_eq!(timer.time(), 100);
    }

    #[test]
    fn test_compare_needs_latch() {
        let mut timer = Timer::new();
        timer.write_csr(TimerReg::TimeCmpHi, 0);
        timer.write_csr(TimerReg::TimeCmpLo, 10);
        assert_eq!(timer.read_csr(TimerReg::TimeCmpLo), 10);
        run(&mut timer, 20);
        assert!(!timer.interrupt());

        timer.write_csr(TimerReg::Latch, 1);
        timer.clock(false);
        assert_eq!(timer.time_cmp(), 10);
        assert!(timer.interrupt());
    }

    #[test]
    fn test_interrupt_at_compare() {
        let mut timer = Timer::new();
        timer.write_csr(TimerReg::TimeCmpHi, 0);
        timer.write_csr(TimerReg::TimeCmpLo, 5);
        timer.write_csr(TimerReg::Latch, 1);
        timer.clock(false);
        // time is now 1
        run(&mut timer, 3);
        assert!(!timer.interrupt());
        timer.clock(false);
        assert_eq!(timer.time(), 5);
        assert!(timer.interrupt());
    }

    #[test]
    fn test_time_snapshot() {
        let mut timer = Timer::new();
        run(&mut timer, 7);
        timer.write_csr(TimerReg::Latch, 1);
        timer.clock(false);
        assert_eq!(timer.read_csr(TimerReg::TimeHi), 0);
        assert_eq!(timer.read_csr(TimerReg::TimeLo), 7);
        run(&mut timer, 3);
        assert_eq!(timer.read_csr(TimerReg::TimeLo), 7);
    }

    #[test]
    fn test_csr_offsets() {
        assert_eq!(TimerReg::try_from(3), Ok(TimerReg::TimeCmpHi));
        assert_eq!(TimerReg::try_from(5), Err(5));
    }

    #[test]
    fn test_reset() {
        let mut timer = Timer::new();
        timer.write_csr(TimerReg::TimeCmpLo, 0);
        timer.write_csr(TimerReg::TimeCmpHi, 0);
        timer.write_csr(TimerReg::Latch, 1);
        run(&mut timer, 4);
        assert!(timer.interrupt());
        timer.clock(true);
        assert!(!timer.interrupt());
        assert_eq!(timer.time(), 0);
    }
}
