//! Command-line interface for finder.
//!
//! The session layer itself runs inside the host editor; the binary only
//! exposes packaging helpers: writing the keymap script, listing the
//! command table and printing the resolved configuration.

use crate::config::Config;
use crate::keybindings::{Command, KeybindingRegistry, render_keymap_script};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

/// finder - session layer of an editor-embedded file-tree browser
#[derive(Parser)]
#[command(name = "finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level written to the debug log (overrides FINDER_DEBUG_LEVEL)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the host keymap script
    Keymap {
        /// Destination file
        path: PathBuf,

        /// Emit only the <Plug> mappings, without default keys
        #[arg(long)]
        no_default_keys: bool,
    },
    /// List every command with its default keys
    Commands,
    /// Print the resolved configuration as YAML
    Config,
}

/// Parse the process arguments, set up logging and run the subcommand.
pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();
    crate::debug::init_log_bridge(cli.log_level.map(LogLevelArg::to_level_filter));
    run(cli)
}

/// Run an already parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Keymap {
            path,
            no_default_keys,
        } => write_keymap(&config, &path, !no_default_keys && config.default_keymaps),
        Commands::Commands => {
            print!("{}", command_table());
            Ok(())
        }
        Commands::Config => {
            let yaml = serde_yaml_ng::to_string(&config).context("serializing config")?;
            print!("{yaml}");
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Write the keymap script for `config` to `path`.
pub fn write_keymap(config: &Config, path: &Path, with_default_keys: bool) -> Result<()> {
    if with_default_keys {
        // Only valid key notation may reach the script.
        let registry = KeybindingRegistry::with_defaults(config.file_type.as_str());
        crate::debug_info!("CLI", "{} default bindings validated", registry.len());
    }
    let script = render_keymap_script(&config.file_type, with_default_keys);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, script).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Keymap written to {:?}", path);
    Ok(())
}

/// One line per command: host command name, `<Plug>` name, default keys.
pub fn command_table() -> String {
    let mut out = String::new();
    for command in Command::ALL {
        let keys = command.default_keys().join(" ");
        out.push_str(&format!(
            "{:<28} {:<36} {}\n",
            command.function_name(),
            format!("<Plug>({})", command.plug_name()),
            keys
        ));
    }
    out
}
