//! Interfaces to the platform and SoC the CPU is built into.

use std::path::{Path, PathBuf};

use crate::memory::Region;

/// The build platform collecting HDL sources.
pub trait Platform {
    fn add_source(&mut self, path: &Path);
    fn add_verilog_include_path(&mut self, path: &Path);
}

/// The SoC the CPU is attached to.
pub trait SocHost {
    /// Origin of a named region in the SoC memory map, if it defines one.
    fn mem_map_origin(&self, name: &str) -> Option<u32>;

    /// Attach a bus slave at the given region.
    fn add_slave(&mut self, name: &str, region: Region);

    /// Export a configuration constant to software.
    fn add_config(&mut self, name: &str);
}

/// A platform that only records what was added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceList {
    pub sources:        Vec<PathBuf>,
    pub include_paths:  Vec<PathBuf>,
}

impl Platform for SourceList {
    fn add_source(&mut self, path: &Path) {
        self.sources.push(path.to_path_buf());
    }

    fn add_verilog_include_path(&mut self, path: &Path) {
        self.include_paths.push(path.to_path_buf());
    }
}

/// A SoC that only records what was attached, using the default memory map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SocSummary {
    pub slaves:     Vec<(String, Region)>,
    pub configs:    Vec<String>,
}

impl SocHost for SocSummary {
    fn mem_map_origin(&self, name: &str) -> Option<u32> {
        crate::memory::mem_map_origin(name)
    }

    fn add_slave(&mut self, name: &str, region: Region) {
        self.slaves.push((name.to_string(), region));
    }

    fn add_config(&mut self, name: &str) {
        self.configs.push(name.to_string());
    }
}
