use std::net::Ipv4Addr;
use std::path::PathBuf;

use flowmeta::cli::{Cli, Commands, ConfigAction};
use flowmeta::config::{expand_path, Config};
use flowmeta::datatype::{format_group_id, GroupId, LookupKey, MacAddr, TapType};
use flowmeta::error::{FlowmetaError, Result};
use flowmeta::inventory::Inventory;
use flowmeta::resolver::Resolver;

struct ResolveArgs {
    inventory: Option<PathBuf>,
    src_mac: MacAddr,
    dst_mac: MacAddr,
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    ttl: u8,
    tap: TapType,
    l2_end_src: bool,
    l2_end_dst: bool,
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let config = load_config(cli.config.clone());
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Resolve {
            inventory,
            src_mac,
            dst_mac,
            src_ip,
            dst_ip,
            ttl,
            tap,
            l2_end_src,
            l2_end_dst,
            json,
        } => {
            cmd_resolve(
                &config?,
                ResolveArgs {
                    inventory,
                    src_mac,
                    dst_mac,
                    src_ip,
                    dst_ip,
                    ttl,
                    tap,
                    l2_end_src,
                    l2_end_dst,
                    json,
                },
            )?;
        }
        Commands::Inventory { inventory } => {
            cmd_inventory(&config?, inventory)?;
        }
        Commands::Group { id } => {
            cmd_group(id);
        }
        Commands::Config { action } => {
            cmd_config(config, cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(config: &Result<Config>, verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_filter = match config {
        _ if verbose => "flowmeta=debug".to_string(),
        Ok(config) => config.logging.filter.clone(),
        Err(_) => "flowmeta=info".to_string(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_resolve(config: &Config, args: ResolveArgs) -> Result<()> {
    let inventory = load_inventory(config, args.inventory)?;

    let key = LookupKey {
        src_mac: args.src_mac,
        dst_mac: args.dst_mac,
        src_ip: args.src_ip,
        dst_ip: args.dst_ip,
        ttl: args.ttl,
        tap: args.tap,
        l2_end_0: args.l2_end_src,
        l2_end_1: args.l2_end_dst,
        ..Default::default()
    };

    let resolver = Resolver::new(&inventory, config.resolve);
    let data = resolver.resolve(&key);

    if args.json {
        let json = serde_json::to_string_pretty(&data).map_err(|e| FlowmetaError::Json {
            source: e,
            context: "Failed to serialize endpoint data".to_string(),
        })?;
        println!("{}", json);
    } else {
        println!("{}", data);
    }

    Ok(())
}

fn cmd_inventory(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let inventory = load_inventory(config, path)?;

    println!("PlatformData version: {}", inventory.version());
    if inventory.is_empty() {
        println!("interfaces: none");
        return Ok(());
    }
    println!("interfaces:");
    for line in inventory.dump()? {
        println!("{}", line);
    }
    println!("{} entries", inventory.len());

    Ok(())
}

fn cmd_group(id: u32) {
    let kind = match GroupId::from(id) {
        GroupId::Device(_) => "device",
        GroupId::Ip(_) => "ip",
    };
    println!("{}: {} group {}", id, kind, format_group_id(id));
}

fn cmd_config(
    config: Result<Config>,
    config_path: Option<PathBuf>,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&config?)?;
            println!("{}", content);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(file) => file,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = Config::default_path()?;

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| FlowmetaError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path()?.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    Config::load(&path)
}

fn load_inventory(config: &Config, path: Option<PathBuf>) -> Result<Inventory> {
    let path = path.unwrap_or_else(|| config.inventory.path.clone());
    let path = expand_path(&path)?;
    tracing::debug!("Loading inventory from {}", path.display());
    Inventory::load(&path)
}
