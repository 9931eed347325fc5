//! VexRiscv variants and their toolchain settings.

use bitflags::bitflags;

use crate::common::bit;
use crate::error::{Error, Result};

bitflags! {
    /// ISA extensions on top of the RV32I base.
    #[derive(Default)]
    pub struct Isa: u32 {
        /// Hardware multiply + divide.
        const M = bit(0);
        /// Atomics.
        const A = bit(1);
        /// Compressed.
        const C = bit(2);
        /// Single-precision floating point.
        const F = bit(3);
        /// Double-precision floating point.
        const D = bit(4);
        /// Vector.
        const V = bit(5);
    }
}

bitflags! {
    /// Caches present in the core, reported to software as SoC config.
    #[derive(Default)]
    pub struct Caches: u32 {
        const DCACHE = bit(0);
        const ICACHE = bit(1);
    }
}

impl Isa {
    /// Extension letters, in `-march` order.
    const LETTERS: [(Isa, char); 6] = [
        (Isa::M, 'm'),
        (Isa::A, 'a'),
        (Isa::C, 'c'),
        (Isa::F, 'f'),
        (Isa::D, 'd'),
        (Isa::V, 'v'),
    ];

    /// Render as the `-march` value, e.g. `rv32imac`.
    pub fn march(self) -> String {
        let mut out = String::from("rv32i");
        for (ext, letter) in Self::LETTERS.iter() {
            if self.contains(*ext) {
                out.push(*letter);
            }
        }
        out
    }
}

/// Core name used when the variant is not in the table.
pub const DEFAULT_HUMAN_NAME: &str = "VexRiscv";

/// Appended to the GCC flags of every variant.
const VEXRISCV_DEFINE: &str = "-D__vexriscv__";

const MABI: &str = "ilp32";

/// A named configuration of the VexRiscv core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Variant {
    name:   &'static str,
    core:   &'static str,
    /// `None` for variants without a toolchain entry.
    isa:    Option<Isa>,
}

const fn variant(name: &'static str, core: &'static str, isa: Option<Isa>) -> Variant {
    Variant { name, core, isa }
}

const RV32I: Option<Isa> = Some(Isa::empty());
const RV32IM: Option<Isa> = Some(Isa::M);
const RV32IMA: Option<Isa> = Some(Isa::from_bits_truncate(Isa::M.bits() | Isa::A.bits()));
const RV32IMAC: Option<Isa> = Some(Isa::from_bits_truncate(Isa::M.bits() | Isa::A.bits() | Isa::C.bits()));
const RV32IMV: Option<Isa> = Some(Isa::from_bits_truncate(Isa::M.bits() | Isa::V.bits()));

const VARIANTS: [Variant; 20] = [
    variant("minimal",              "VexRiscv_Min",             RV32I),
    variant("minimal+debug",        "VexRiscv_MinDebug",        RV32I),
    variant("minimal+debug+hwbp",   "VexRiscv_MinDebugHwBP",    None),
    variant("lite",                 "VexRiscv_Lite",            RV32IM),
    variant("lite+debug",           "VexRiscv_LiteDebug",       RV32IM),
    variant("lite+debug+hwbp",      "VexRiscv_LiteDebugHwBP",   None),
    variant("standard",             "VexRiscv",                 RV32IM),
    variant("standard+debug",       "VexRiscv_Debug",           RV32IM),
    variant("imac",                 "VexRiscv_IMAC",            RV32IMAC),
    variant("imac+debug",           "VexRiscv_IMACDebug",       RV32IMAC),
    variant("full",                 "VexRiscv_Full",            RV32IM),
    variant("full+cfu",             "VexRiscv_FullCfu",         RV32IM),
    variant("full+debug",           "VexRiscv_FullDebug",       RV32IM),
    variant("full+cfu+debug",       "VexRiscv_FullCfuDebug",    RV32IM),
    variant("linux",                "VexRiscv_Linux",           RV32IMA),
    variant("linux+debug",          "VexRiscv_LinuxDebug",      RV32IMA),
    variant("linux+no-dsp",         "VexRiscv_LinuxNoDspFmax",  RV32IMA),
    variant("secure",               "VexRiscv_Secure",          RV32IMA),
    variant("secure+debug",         "VexRiscv_SecureDebug",     RV32IMA),
    variant("rvvLite",              "VexRiscv_rvvLite",         RV32IMV),
];

impl Variant {
    /// Look up a variant by name.
    pub fn from_name(name: &str) -> Result<Self> {
        VARIANTS.iter()
            .find(|v| v.name == name)
            .copied()
            .ok_or_else(|| Error::UnknownVariant(name.to_string()))
    }

    /// All known variants, in table order.
    pub fn all() -> &'static [Variant] {
        &VARIANTS
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the generated core, which is also its source file stem.
    pub fn core_name(&self) -> &'static str {
        self.core
    }

    /// The part of the name before any `+` option.
    pub fn base(&self) -> &'static str {
        self.name.split('+').next().unwrap_or(self.name)
    }

    /// Variants with `debug` anywhere in their name carry the debug plugin.
    pub fn has_debug(&self) -> bool {
        self.name.contains("debug")
    }

    pub fn isa(&self) -> Option<Isa> {
        self.isa
    }

    /// Caches present on this variant.
    /// D-cache everywhere but `minimal` and `lite`, I-cache everywhere but `minimal`.
    pub fn caches(&self) -> Caches {
        match self.base() {
            "minimal" => Caches::empty(),
            "lite" => Caches::ICACHE,
            _ => Caches::DCACHE | Caches::ICACHE,
        }
    }

    /// Compiler flags for software running on this variant.
    pub fn gcc_flags(&self) -> Result<String> {
        let isa = self.isa.ok_or_else(|| Error::NoGccFlags(self.name.to_string()))?;
        Ok(format!("-march={} -mabi={} {}", isa.march(), MABI, VEXRISCV_DEFINE))
    }
}

/// Human readable core name for a variant, falling back to `VexRiscv`.
pub fn human_name(variant: &str) -> &'static str {
    Variant::from_name(variant)
        .map(|v| v.core_name())
        .unwrap_or(DEFAULT_HUMAN_NAME)
}
