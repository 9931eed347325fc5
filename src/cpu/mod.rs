/// VexRiscv CPU wrapper.
mod platform;

pub use platform::{Platform, SocHost, SourceList, SocSummary};

use std::path::{Path, PathBuf};

use log::{info, trace};

use crate::coproc::{
    CommandBus, CfuCommand, CfuImpl, CfuResponse, UnitPort, VfuCommand, VfuImpl, VfuResponse
};
use crate::core::{CoreInputs, CoreModel};
use crate::debug::{BridgeInputs, DebugBridge, DebugCommand};
use crate::debugger::{CPUState, Debugger};
use crate::error::{Error, Result};
use crate::log_and_return;
use crate::memory::{AxiLite, Region, Wishbone, DEBUG_ORIGIN, DEBUG_REGION_SIZE};
use crate::timer::Timer;
use crate::variant::{Caches, Variant};

pub const FAMILY: &str = "riscv";
pub const NAME: &str = "vexriscv";
pub const DATA_WIDTH: usize = 32;
pub const ENDIANNESS: &str = "little";
pub const LINKER_OUTPUT_FORMAT: &str = "elf32-littleriscv";
pub const NOP: &str = "nop";

/// Toolchain triples able to target the core, in order of preference.
pub const GCC_TRIPLES: [&str; 8] = [
    "riscv64-unknown-elf",
    "riscv32-unknown-elf",
    "riscv-none-embed",
    "riscv64-linux",
    "riscv64-linux-gnu",
    "riscv-sifive-elf",
    "riscv64-none-elf",
    "riscv32-corev-elf",
];

type CfuPort = UnitPort<CfuCommand, CfuResponse>;
type VfuPort = UnitPort<VfuCommand, VfuResponse>;

/// Builder class for the VexRiscv.
///
/// Call `finalize` to finish building.
pub struct VexRiscvBuilder<'a, P: Platform> {
    platform:           &'a mut P,
    variant:            Variant,
    data_dir:           PathBuf,
    reset_address:      Option<u32>,
    external_variant:   bool,

    timer:              Option<Timer>,
    debug:              bool,
    cfu:                Option<CfuPort>,
    vfu:                Option<VfuPort>,
}

impl<'a, P: Platform> VexRiscvBuilder<'a, P> {
    /// Start building a core of the named variant.
    /// Variants with `debug` in their name get the debug bridge.
    pub fn new(platform: &'a mut P, variant: &str, with_timer: bool) -> Result<Self> {
        let variant = match Variant::from_name(variant) {
            Ok(v) => v,
            Err(e) => { log_and_return!(e); },
        };
        let builder = Self {
            platform:           platform,
            variant:            variant,
            data_dir:           PathBuf::from("."),
            reset_address:      None,
            external_variant:   false,

            timer:              None,
            debug:              false,
            cfu:                None,
            vfu:                None,
        };
        let builder = if with_timer { builder.add_timer() } else { builder };
        Ok(if variant.has_debug() { builder.add_debug() } else { builder })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Directory holding the generated core sources.
    pub fn set_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn set_reset_address(mut self, reset_address: u32) -> Self {
        self.reset_address = Some(reset_address);
        self
    }

    pub fn add_timer(mut self) -> Self {
        info!("{}: adding timer", self.variant.name());
        self.timer = Some(Timer::new());
        self
    }

    pub fn add_debug(mut self) -> Self {
        info!("{}: adding debug bridge", self.variant.name());
        self.debug = true;
        self
    }

    /// Add a custom function unit from its plugin source, optionally with a model to simulate it.
    pub fn add_cfu(mut self, plugin: impl AsRef<Path>, unit: Option<CfuImpl>) -> Result<Self> {
        let plugin = plugin.as_ref();
        if !plugin.exists() {
            log_and_return!(Error::PluginNotFound { kind: "CFU", path: plugin.to_path_buf() });
        }
        info!("{}: adding CFU {}", self.variant.name(), plugin.display());
        self.platform.add_source(plugin);
        self.cfu = Some(UnitPort::new(unit));
        Ok(self)
    }

    /// Add a vector function unit from its plugin source and RVV source tree.
    pub fn add_vfu(mut self, plugin: impl AsRef<Path>, rvv_source_dir: impl AsRef<Path>, unit: Option<VfuImpl>) -> Result<Self> {
        let plugin = plugin.as_ref();
        if !plugin.exists() {
            log_and_return!(Error::PluginNotFound { kind: "VFU", path: plugin.to_path_buf() });
        }
        info!("{}: adding VFU {}", self.variant.name(), plugin.display());
        let rvv_source_dir = rvv_source_dir.as_ref();
        self.platform.add_source(plugin);
        self.platform.add_verilog_include_path(rvv_source_dir);
        self.platform.add_verilog_include_path(&rvv_source_dir.join("vALU"));
        self.vfu = Some(UnitPort::new(unit));
        Ok(self)
    }

    /// Use a core generated outside of the variant table.
    pub fn use_external_variant(mut self, source: impl AsRef<Path>) -> Self {
        self.external_variant = true;
        self.platform.add_source(source.as_ref());
        self
    }

    /// Attach the debug bus and report caches to the SoC.
    pub fn add_soc_components<S: SocHost>(&self, soc: &mut S) {
        if self.debug {
            let origin = soc.mem_map_origin("vexriscv_debug").unwrap_or(DEBUG_ORIGIN);
            soc.add_slave("vexriscv_debug", Region {
                origin: origin,
                size:   DEBUG_REGION_SIZE,
                cached: false,
            });
        }

        let caches = self.variant.caches();
        if caches.contains(Caches::DCACHE) {
            soc.add_config("CPU_HAS_DCACHE");
        }
        if caches.contains(Caches::ICACHE) {
            soc.add_config("CPU_HAS_ICACHE");
        }
    }

    /// Add the generated core source for a variant.
    pub fn add_sources(platform: &mut P, variant: &Variant, data_dir: &Path) {
        platform.add_source(&data_dir.join(format!("{}.v", variant.core_name())));
    }

    /// Instantiate the core around a cycle model.
    pub fn finalize<C: CoreModel>(self, core: C) -> Result<VexRiscv<C>> {
        let reset_address = match self.reset_address {
            Some(addr) => addr,
            None => { log_and_return!(Error::ResetAddressUnset); },
        };
        if !self.external_variant {
            Self::add_sources(self.platform, &self.variant, &self.data_dir);
        }
        info!("{}: finalized, reset vector {:#010x}", self.variant.core_name(), reset_address);

        let mut cpu = VexRiscv {
            variant:        self.variant,
            reset_address:  reset_address,
            core:           core,

            ibus:           Wishbone::default(),
            dbus:           Wishbone::default(),
            interrupt:      0,
            reset:          false,

            timer:          self.timer,
            debug:          if self.debug { Some(DebugBridge::new()) } else { None },
            debug_bus:      Wishbone::default(),
            cfu:            self.cfu,
            vfu:            self.vfu,

            cycles:         0,
        };
        cpu.settle();
        Ok(cpu)
    }
}

/// VexRiscv instance.
///
/// One call to `step` is one rising edge of the system clock.
pub struct VexRiscv<C: CoreModel> {
    variant:        Variant,
    reset_address:  u32,
    core:           C,

    ibus:           Wishbone,
    dbus:           Wishbone,
    interrupt:      u32,
    /// External reset request.
    reset:          bool,

    timer:          Option<Timer>,
    debug:          Option<DebugBridge>,
    debug_bus:      Wishbone,
    cfu:            Option<CfuPort>,
    vfu:            Option<VfuPort>,

    cycles:         u64,
}

impl<C: CoreModel> VexRiscv<C> {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn human_name(&self) -> &'static str {
        self.variant.core_name()
    }

    pub fn gcc_flags(&self) -> Result<String> {
        self.variant.gcc_flags()
    }

    pub fn reset_address(&self) -> u32 {
        self.reset_address
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    /// Instruction bus. The master half shows the core's request this cycle.
    pub fn ibus(&self) -> &Wishbone {
        &self.ibus
    }

    /// Instruction bus, for the fabric to drive `ack`, `err` and `dat_r`.
    pub fn ibus_mut(&mut self) -> &mut Wishbone {
        &mut self.ibus
    }

    pub fn dbus(&self) -> &Wishbone {
        &self.dbus
    }

    pub fn dbus_mut(&mut self) -> &mut Wishbone {
        &mut self.dbus
    }

    /// Buses to connect to the main SoC bus.
    pub fn periph_buses(&self) -> [&Wishbone; 2] {
        [&self.ibus, &self.dbus]
    }

    /// Buses to connect directly to main memory.
    pub fn memory_buses(&mut self) -> Vec<&mut AxiLite> {
        self.vfu.as_mut()
            .and_then(|vfu| vfu.memory_bus())
            .into_iter()
            .collect()
    }

    pub fn set_interrupt(&mut self, interrupt: u32) {
        self.interrupt = interrupt;
    }

    /// Hold the core in reset, on top of the system reset.
    pub fn set_reset(&mut self, reset: bool) {
        self.reset = reset;
    }

    pub fn timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }

    pub fn timer_mut(&mut self) -> Option<&mut Timer> {
        self.timer.as_mut()
    }

    pub fn debug_bridge(&self) -> Option<&DebugBridge> {
        self.debug.as_ref()
    }

    /// Debug bus slave, present on debug variants.
    pub fn debug_bus(&self) -> Option<&Wishbone> {
        self.debug.as_ref().map(|_| &self.debug_bus)
    }

    /// Debug bus, for the external master to drive its request.
    pub fn debug_bus_mut(&mut self) -> Option<&mut Wishbone> {
        match self.debug {
            Some(_) => Some(&mut self.debug_bus),
            None => None,
        }
    }

    pub fn cfu_bus(&self) -> Option<&CommandBus<CfuCommand, CfuResponse>> {
        self.cfu.as_ref().map(|port| port.bus())
    }

    pub fn vfu_bus(&self) -> Option<&CommandBus<VfuCommand, VfuResponse>> {
        self.vfu.as_ref().map(|port| port.bus())
    }

    /// Advance one clock cycle.
    ///
    /// Every port is sampled from the values of the current cycle, then
    /// the core, the debug bridge, the timer and function units are all
    /// clocked together.
    pub fn step(&mut self, sys_reset: bool) {
        let out = self.core.outputs();
        self.ibus.drive_master(&out.ibus);
        self.dbus.drive_master(&out.dbus);

        let mut ibus = self.ibus;
        let mut dbus = self.dbus;
        let mut debug_reset = false;
        let mut debug_cmd = DebugCommand::default();
        if let Some(bridge) = &self.debug {
            ibus.err |= bridge.ibus_err();
            dbus.err |= bridge.dbus_err();
            debug_reset = bridge.debug_reset();
            debug_cmd = bridge.command();
        }

        if let Some(cfu) = &mut self.cfu {
            cfu.drive(out.cfu_cmd, out.cfu_rsp_ready);
        }
        if let Some(vfu) = &mut self.vfu {
            vfu.drive(out.vfu_cmd, out.vfu_rsp_ready);
        }

        let inputs = CoreInputs {
            reset:                  sys_reset || self.reset || debug_reset,
            debug_reset:            sys_reset,
            reset_vector:           self.reset_address,

            external_interrupts:    self.interrupt,
            timer_interrupt:        self.timer.as_ref().map_or(false, Timer::interrupt),
            software_interrupt:     false,

            ibus:                   ibus,
            dbus:                   dbus,
            debug_cmd:              debug_cmd,

            cfu:                    self.cfu.as_ref().map(|p| *p.bus()).unwrap_or_default(),
            vfu:                    self.vfu.as_ref().map(|p| *p.bus()).unwrap_or_default(),
        };

        // Rising edge.
        self.core.clock(&inputs);
        if let Some(bridge) = &mut self.debug {
            bridge.clock(&BridgeInputs {
                debug_bus:      self.debug_bus,
                rsp:            out.debug_rsp,
                reset_out:      out.reset_out,
                ibus_active:    self.ibus.is_active(),
                dbus_active:    self.dbus.is_active(),
                sys_reset:      sys_reset,
            });
        }
        if let Some(timer) = &mut self.timer {
            timer.clock(sys_reset);
        }
        if let Some(cfu) = &mut self.cfu {
            cfu.clock(sys_reset);
        }
        if let Some(vfu) = &mut self.vfu {
            vfu.clock(sys_reset);
        }
        self.cycles += 1;

        self.settle();
        trace!("cycle {}: reset {}", self.cycles, inputs.reset);
    }

    /// Present the registered outputs of the new cycle on the buses.
    fn settle(&mut self) {
        let out = self.core.outputs();
        self.ibus.drive_master(&out.ibus);
        self.dbus.drive_master(&out.dbus);
        if let Some(bridge) = &self.debug {
            bridge.respond(&mut self.debug_bus);
        }
    }
}

impl<C: CoreModel> Debugger for VexRiscv<C> {
    fn inspect_state(&mut self) -> CPUState {
        let bridge = self.debug.as_ref();
        CPUState {
            cycles:             self.cycles,
            bridge:             bridge.map(|b| b.state()),
            debug_cmd:          bridge.map(|b| b.command()).unwrap_or_default(),
            ibus_err:           bridge.map_or(false, |b| b.ibus_err()),
            dbus_err:           bridge.map_or(false, |b| b.dbus_err()),
            reset_active:       bridge.map_or(false, |b| b.reset_active()),
            debug_reset:        bridge.map_or(false, |b| b.debug_reset()),
            timer_interrupt:    self.timer.as_ref().map_or(false, Timer::interrupt),
        }
    }
}
