use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::error;

use vexriscv::config::CpuConfig;
use vexriscv::error::Result;
use vexriscv::{
    CoreInputs, CoreModel, CoreOutputs, Debugger, SocSummary, SourceList, Variant,
    GCC_TRIPLES, LINKER_OUTPUT_FORMAT, MEM_MAP
};

#[derive(Parser)]
#[command(version, about, arg_required_else_help(true))]
struct CliArguments
{
    #[command(subcommand)]
    subcommand: ToplevelCommands,
}

#[derive(Subcommand)]
enum ToplevelCommands
{
    /// List the known VexRiscv variants
    Variants,
    /// Print toolchain and SoC settings for a variant
    Info
    {
        variant: String,
    },
    /// Load a CPU configuration and build it against an empty platform
    Check
    {
        config: PathBuf,
        #[arg(long = "cycles", default_value_t = 0)]
        /// Clock the CPU held in reset for this many cycles
        cycles: u64,
    },
}

/// A core that never leaves reset and never touches its buses.
struct HaltedCore;

impl CoreModel for HaltedCore
{
    fn outputs(&self) -> CoreOutputs
    {
        CoreOutputs::default()
    }

    fn clock(&mut self, _inputs: &CoreInputs)
    {
    }
}

fn variants_command()
{
    for variant in Variant::all() {
        println!("{:<20} {}", variant.name(), variant.core_name());
    }
}

fn info_command(name: &str) -> Result<()>
{
    let variant = Variant::from_name(name)?;
    println!("Core:      {}", variant.core_name());
    match variant.gcc_flags() {
        Ok(flags) => println!("GCC flags: {}", flags),
        Err(_) => println!("GCC flags: none"),
    }
    println!("Triples:   {}", GCC_TRIPLES.join(", "));
    println!("Linker:    {}", LINKER_OUTPUT_FORMAT);
    println!("Debug:     {}", variant.has_debug());
    println!("Caches:    {:?}", variant.caches());
    println!("Memory map:");
    for (region, origin) in MEM_MAP.iter() {
        println!("  {:<16} {:#010x}", region, origin);
    }
    Ok(())
}

fn check_command(path: &Path, cycles: u64) -> Result<()>
{
    let config = CpuConfig::from_file(path)?;
    let mut platform = SourceList::default();
    let builder = config.builder(&mut platform)?;
    let mut soc = SocSummary::default();
    builder.add_soc_components(&mut soc);
    let mut cpu = builder.finalize(HaltedCore)?;

    for _ in 0..cycles {
        cpu.step(true);
    }

    println!("{} ({}), reset vector {:#010x}", cpu.human_name(), cpu.variant().name(), cpu.reset_address());
    for source in platform.sources.iter() {
        println!("source   {}", source.display());
    }
    for include in platform.include_paths.iter() {
        println!("include  {}", include.display());
    }
    for (name, region) in soc.slaves.iter() {
        println!("slave    {} at {:#010x} size {:#x}", name, region.origin, region.size);
    }
    for name in soc.configs.iter() {
        println!("config   {}", name);
    }
    if cycles > 0 {
        let state = cpu.inspect_state();
        println!("after {} cycles: bridge {:?}, debug reset {}", state.cycles, state.bridge, state.debug_reset);
    }
    Ok(())
}

fn main()
{
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli_args = CliArguments::parse();

    let res = match &cli_args.subcommand {
        ToplevelCommands::Variants => {
            variants_command();
            Ok(())
        },
        ToplevelCommands::Info { variant } => info_command(variant),
        ToplevelCommands::Check { config, cycles } => check_command(config, *cycles),
    };

    if let Err(e) = res {
        error!("{}", e);
        std::process::exit(1);
    }
}
