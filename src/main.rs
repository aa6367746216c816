use annodasm_core::assets;
use annodasm_core::config::AnnotatorConfig;
use annodasm_core::cpu::{Cpu, Mos6502Decoder};
use annodasm_core::profile::{Language, Platform, ProfileId};
use annodasm_core::resolver::ProfileRegistry;
use annodasm_core::scanner::{self, ListingScanner};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

const LONG_VERSION: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => env!("CARGO_PKG_VERSION"),
};

#[derive(Debug, Parser)]
#[command(name = "annodasm", version, long_version = LONG_VERSION, about)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More output on stderr; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Disassemble a binary and annotate memory operands
    Disasm(ScanArgs),
    /// Decode a Sidplayer voice
    Notation(ScanArgs),
    /// List platforms, their parent chains and regions
    Profiles(ProfileArgs),
}

#[derive(Debug, Args)]
struct ProfileArgs {
    #[arg(long)]
    platform: Option<Platform>,
}

#[derive(Debug, Args)]
struct ScanArgs {
    file: PathBuf,

    #[arg(short, long)]
    platform: Option<Platform>,

    #[arg(short, long)]
    language: Option<Language>,

    /// First byte offset in the file (hex with `$`/`0x`, or decimal)
    #[arg(long, value_parser = parse_number)]
    start: Option<usize>,

    /// Offset one past the last byte; below `--start` the scan wraps around
    #[arg(long, value_parser = parse_number)]
    end: Option<usize>,

    /// Address of the byte at offset 0 (hex)
    #[arg(long, value_parser = parse_address)]
    origin: Option<u16>,

    /// Take the load address from the first two bytes of the file
    #[arg(long)]
    prg: bool,

    /// Extra comment file layered over the platform tables
    #[arg(long)]
    comments: Option<PathBuf>,

    /// Toggle a region, e.g. `--region SID=off`
    #[arg(long = "region", value_parser = parse_region)]
    regions: Vec<(String, bool)>,
}

fn parse_number(s: &str) -> Result<usize, String> {
    let parsed = match s.strip_prefix('$').or_else(|| s.strip_prefix("0x")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", s, e))
}

fn parse_address(s: &str) -> Result<u16, String> {
    let hex = s
        .strip_prefix('$')
        .or_else(|| s.strip_prefix("0x"))
        .unwrap_or(s);
    u16::from_str_radix(hex, 16).map_err(|e| format!("invalid address '{}': {}", s, e))
}

fn parse_region(s: &str) -> Result<(String, bool), String> {
    let (name, state) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=on|off, got '{}'", s))?;
    let enabled = match state.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => true,
        "off" | "false" | "0" => false,
        _ => return Err(format!("region state must be on or off, got '{}'", state)),
    };
    Ok((name.trim().to_string(), enabled))
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<AnnotatorConfig> {
    match path {
        Some(path) => AnnotatorConfig::load_from(path),
        None => Ok(AnnotatorConfig::load()),
    }
}

/// Builds the registry for a scan and returns the profile to resolve from.
fn prepare_registry(
    config: &AnnotatorConfig,
    args: &ScanArgs,
    platform: Platform,
) -> Result<(ProfileRegistry, ProfileId)> {
    let mut registry = ProfileRegistry::bundled()?;
    config.apply(&mut registry);

    let id = ProfileId::from(platform);
    for (name, enabled) in &args.regions {
        if !registry.set_region(&id, name, *enabled) {
            log::warn!("{} has no region named {:?}", platform, name);
        }
    }

    let comments = args.comments.as_ref().or(config.user_comments.as_ref());
    let Some(path) = comments else {
        return Ok((registry, id));
    };
    let entries = assets::load_comments_file(path)?;
    log::info!("Loaded {} user comments from {:?}", entries.len(), path);
    let overlay = registry.add_overlay("user", id, &entries)?;
    Ok((registry, overlay))
}

fn run_scan(config: &AnnotatorConfig, args: &ScanArgs, notation: bool) -> Result<()> {
    let platform = args.platform.unwrap_or(config.platform);
    let language = args.language.unwrap_or(config.language);

    let data = std::fs::read(&args.file)
        .with_context(|| format!("Cannot read {:?}", args.file))?;
    let (load_address, buffer) = if args.prg {
        scanner::split_prg(&data)?
    } else {
        (0, data.as_slice())
    };
    let origin = args.origin.unwrap_or(load_address);
    let start = args.start.unwrap_or(0);
    let end = args.end.unwrap_or(buffer.len());
    let pc = origin.wrapping_add(start as u16);

    let lines = if notation {
        scanner::scan_notation(buffer, start, end, pc)
    } else {
        let (registry, id) = prepare_registry(config, args, platform)?;
        let decoder = match platform.cpu() {
            Cpu::Mos6502 => Mos6502Decoder::new(),
            cpu => bail!("No instruction decoder for the {} ({})", cpu, platform),
        };
        ListingScanner::new(&registry, id, language)
            .scan_instructions(&decoder, buffer, start, end, pc)?
    };

    print!("{}", scanner::render(&lines));
    Ok(())
}

fn list_profiles(config: &AnnotatorConfig, args: &ProfileArgs) -> Result<()> {
    let mut registry = ProfileRegistry::bundled()?;
    config.apply(&mut registry);

    let platforms: Vec<Platform> = match args.platform {
        Some(platform) => vec![platform],
        None => Platform::all().to_vec(),
    };
    for platform in platforms {
        let id = ProfileId::from(platform);
        let profile = registry
            .get(&id)
            .ok_or_else(|| anyhow!("Unknown profile {}", id))?;
        let chain: Vec<String> = registry.chain(&id).iter().map(|p| p.id.to_string()).collect();
        println!("{} [{}] ({})", platform, platform.slug(), profile.cpu);
        println!("  chain: {}", chain.join(" -> "));
        for region in &profile.regions {
            println!(
                "  {:<14} ${:04X}-${:04X} {}",
                region.name,
                region.range.start,
                region.range.end - 1,
                if region.enabled { "on" } else { "off" }
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let config = load_config(cli.config.as_ref())?;

    match &cli.command {
        Command::Disasm(args) => run_scan(&config, args, false),
        Command::Notation(args) => run_scan(&config, args, true),
        Command::Profiles(args) => list_profiles(&config, args),
    }
}
