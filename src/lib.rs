mod core;
mod common;
mod cpu;
mod debug;
mod memory;
mod coproc;
mod timer;
mod variant;
mod debugger;
pub mod config;
pub mod error;

#[cfg(test)]
mod test_utils;

pub use crate::core::{
    CoreInputs, CoreModel, CoreOutputs
};

pub use crate::cpu::{
    VexRiscv, VexRiscvBuilder, Platform, SocHost, SourceList, SocSummary,
    FAMILY, NAME, DATA_WIDTH, ENDIANNESS, LINKER_OUTPUT_FORMAT, NOP, GCC_TRIPLES
};

pub use crate::debug::{
    BridgeInputs, BridgeState, BusBridge, DebugBridge, DebugCommand, DebugResponse,
    ResetErrorInjector, debug_address
};

pub use crate::memory::{
    AxiLite, AxiWrite, Region, Wishbone, MEM_MAP, IO_REGIONS, DEBUG_ORIGIN, DEBUG_REGION_SIZE,
    mem_map_origin, is_io
};

pub use crate::coproc::{
    Channel, CommandBus, CfuCommand, CfuResponse, VfuCommand, VfuResponse,
    FunctionUnit, CfuImpl, VfuImpl, Payload, UnitPort
};

pub use crate::timer::{
    Timer, TimerReg
};

pub use crate::variant::{
    Caches, Isa, Variant, human_name, DEFAULT_HUMAN_NAME
};

pub use crate::debugger::*;
