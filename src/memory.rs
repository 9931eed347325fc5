//! Memory interface for the VexRiscv.

use crate::coproc::Channel;

/// A Wishbone classic bus.
///
/// Both directions live in one bundle, as on the wire: the master drives
/// `adr`, `dat_w`, `sel`, `cyc`, `stb`, `we`, `cti` and `bte`; the slave
/// drives `dat_r`, `ack` and `err`. `adr` is a word address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wishbone {
    pub adr:    u32,
    pub dat_w:  u32,
    pub dat_r:  u32,
    pub sel:    u8,
    pub cyc:    bool,
    pub stb:    bool,
    pub we:     bool,
    pub cti:    u8,
    pub bte:    u8,
    pub ack:    bool,
    pub err:    bool,
}

impl Wishbone {
    /// A master owns the bus and is in a data phase.
    pub fn is_active(&self) -> bool {
        self.cyc && self.stb
    }

    /// Copy the master-driven half of `from`, leaving the slave half alone.
    pub fn drive_master(&mut self, from: &Wishbone) {
        self.adr = from.adr;
        self.dat_w = from.dat_w;
        self.sel = from.sel;
        self.cyc = from.cyc;
        self.stb = from.stb;
        self.we = from.we;
        self.cti = from.cti;
        self.bte = from.bte;
    }

    /// Single word read request.
    pub fn read(adr: u32) -> Self {
        Self {
            adr:    adr,
            sel:    0xF,
            cyc:    true,
            stb:    true,
            ..Default::default()
        }
    }

    /// Single word write request.
    pub fn write(adr: u32, data: u32) -> Self {
        Self {
            dat_w:  data,
            we:     true,
            ..Self::read(adr)
        }
    }
}

/// AXI-Lite write data beat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxiWrite {
    pub data: u32,
    pub strb: u8,
}

/// An AXI-Lite bus, 32-bit address and data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxiLite {
    /// Read address.
    pub ar: Channel<u32>,
    /// Read data.
    pub r:  Channel<u32>,
    /// Write address.
    pub aw: Channel<u32>,
    /// Write data.
    pub w:  Channel<AxiWrite>,
    /// Write response.
    pub b:  Channel<u8>,
}

/// Address region of a bus slave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub origin: u32,
    pub size:   u32,
    pub cached: bool,
}

impl Region {
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.origin && (addr - self.origin) < self.size
    }
}

/// Default origin of the debug bus window.
pub const DEBUG_ORIGIN: u32 = 0xF00F_0000;

/// Default memory map of a VexRiscv SoC.
pub const MEM_MAP: [(&str, u32); 5] = [
    ("rom",             0x0000_0000),
    ("sram",            0x1000_0000),
    ("main_ram",        0x4000_0000),
    ("csr",             0xF000_0000),
    ("vexriscv_debug",  DEBUG_ORIGIN),
];

/// Uncached IO regions, as (origin, length).
pub const IO_REGIONS: [(u32, u32); 1] = [(0x8000_0000, 0x8000_0000)];

/// Size of the debug bus window.
pub const DEBUG_REGION_SIZE: u32 = 0x100;

/// Look up a region origin in the default memory map.
pub fn mem_map_origin(name: &str) -> Option<u32> {
    MEM_MAP.iter()
        .find(|(n, _)| *n == name)
        .map(|(_, origin)| *origin)
}

/// Check if an address falls inside an IO region.
pub fn is_io(addr: u32) -> bool {
    IO_REGIONS.iter().any(|&(origin, length)| Region { origin, size: length, cached: false }.contains(addr))
}
