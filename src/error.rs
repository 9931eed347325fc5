//! Module for error handling code.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error
{
    #[error("Unknown VexRiscv variant \"{0}\"")]
    UnknownVariant(String),

    #[error("No GCC flags are defined for VexRiscv variant \"{0}\"")]
    NoGccFlags(String),

    #[error("Unable to find VexRiscv {kind} plugin {}", path.display())]
    PluginNotFound
    {
        /// Which plugin was requested (`"CFU"` or `"VFU"`).
        kind: &'static str,
        path: PathBuf,
    },

    #[error("A reset address must be set before the CPU is finalized")]
    ResetAddressUnset,

    #[error("Invalid CPU configuration")]
    Config(#[from] serde_json::Error),

    #[error("Failed to read {}", path.display())]
    Io
    {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! log_and_return
{
    ($err:expr) => {
        let err = $err;
        log::error!("{}", err);
        return Err(err);
    }
}
