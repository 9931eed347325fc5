//! CPU configuration files.
//!
//! A JSON description of a VexRiscv instance: the variant and the options
//! that would otherwise be set on the builder by hand.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::CoreModel;
use crate::cpu::{Platform, VexRiscv, VexRiscvBuilder};
use crate::error::{Error, Result};

/// Vector function unit sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VfuConfig {
    pub plugin:         PathBuf,
    pub rvv_source_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CpuConfig {
    pub variant:            String,
    pub with_timer:         bool,
    pub reset_address:      Option<u32>,
    /// Directory holding the generated core sources.
    pub data_dir:           PathBuf,
    pub cfu:                Option<PathBuf>,
    pub vfu:                Option<VfuConfig>,
    /// Core source to use instead of the variant's.
    pub external_variant:   Option<PathBuf>,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            variant:            "standard".to_string(),
            with_timer:         false,
            reset_address:      None,
            data_dir:           PathBuf::from("."),
            cfu:                None,
            vfu:                None,
            external_variant:   None,
        }
    }
}

impl CpuConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            source: source,
            path:   path.to_path_buf(),
        })?;
        let config: CpuConfig = serde_json::from_reader(BufReader::new(file))?;
        info!("Loaded CPU configuration from {}", path.display());
        Ok(config)
    }

    /// A builder with every option of this configuration applied.
    /// Function units are attached without a model.
    pub fn builder<'a, P: Platform>(&self, platform: &'a mut P) -> Result<VexRiscvBuilder<'a, P>> {
        let mut builder = VexRiscvBuilder::new(platform, &self.variant, self.with_timer)?
            .set_data_dir(&self.data_dir);
        if let Some(addr) = self.reset_address {
            builder = builder.set_reset_address(addr);
        }
        if let Some(plugin) = &self.cfu {
            builder = builder.add_cfu(plugin, None)?;
        }
        if let Some(vfu) = &self.vfu {
            builder = builder.add_vfu(&vfu.plugin, &vfu.rvv_source_dir, None)?;
        }
        if let Some(source) = &self.external_variant {
            builder = builder.use_external_variant(source);
        }
        Ok(builder)
    }

    /// Build and finalize a CPU around `core`.
    pub fn build<P: Platform, C: CoreModel>(&self, platform: &mut P, core: C) -> Result<VexRiscv<C>> {
        self.builder(platform)?.finalize(core)
    }
}
