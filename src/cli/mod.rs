//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::net::Ipv4Addr;
use std::path::PathBuf;

use crate::datatype::{MacAddr, TapType};

#[derive(Parser, Debug)]
#[command(
    name = "flowmeta",
    version,
    about = "Resolve flow endpoints against a control-plane inventory",
    long_about = "flowmeta enriches flow observations with EPC membership, device identity, \
                  subnet, tag groups and L2/L3 end flags taken from an inventory snapshot. \
                  The command line tool is for inspecting snapshots and single flows."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/flowmeta/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve both endpoints of a single flow
    Resolve {
        /// Inventory snapshot (defaults to inventory.path from config)
        #[arg(short, long, value_name = "FILE")]
        inventory: Option<PathBuf>,

        /// Source MAC address
        #[arg(long, default_value = "00:00:00:00:00:00")]
        src_mac: MacAddr,

        /// Destination MAC address
        #[arg(long, default_value = "00:00:00:00:00:00")]
        dst_mac: MacAddr,

        /// Source IPv4 address
        #[arg(long)]
        src_ip: Ipv4Addr,

        /// Destination IPv4 address
        #[arg(long)]
        dst_ip: Ipv4Addr,

        /// TTL observed on the packet
        #[arg(long, default_value = "0")]
        ttl: u8,

        /// Capture point as a raw tap value (0 = any, 1 = isp, 2 = spine, 3 = tor)
        #[arg(long, default_value = "0", value_parser = parse_tap)]
        tap: TapType,

        /// Mark the source as an L2 end
        #[arg(long)]
        l2_end_src: bool,

        /// Mark the destination as an L2 end
        #[arg(long)]
        l2_end_dst: bool,

        /// Show result in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the entries of an inventory snapshot
    Inventory {
        /// Inventory snapshot (defaults to inventory.path from config)
        #[arg(short, long, value_name = "FILE")]
        inventory: Option<PathBuf>,
    },

    /// Decode a tag-group id
    Group {
        /// Raw group id
        id: u32,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the default configuration path
    Path,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_tap(s: &str) -> Result<TapType, String> {
    let raw: u8 = s.parse().map_err(|e| format!("{}: {}", s, e))?;
    TapType::try_from(raw).map_err(|e| e.to_string())
}
