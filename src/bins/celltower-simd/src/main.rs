//! CellTower Simulator (file mode)
//!
//! Loads a bulk admission source for one generation, applies optional user
//! removals (rewriting the source while keeping other generations' lines),
//! and reports spectrum occupancy, per-frequency users and network stats.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cell_admission::{
    AllocatorRegistry, BulkLoadReport, BulkSource, Generation, NetworkStats, SimulatorConfig,
    SlotStatus, SpectrumAllocator, UserListing,
};
use clap::Parser;
use serde::Serialize;

mod input;

/// CellTower Simulator - admission and spectrum allocation
#[derive(Parser, Debug)]
#[command(name = "celltower-simd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cell tower admission and spectrum allocation simulator", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, default_value = "celltower.yaml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short = 'e', long)]
    log_level: Option<String>,

    /// Disable color output
    #[arg(short = 'm', long)]
    no_color: bool,

    /// Generation code: 2=2G 3=3G 4=3.5G 5=4G 6=4G+ 7=5G
    #[arg(short = 'g', long, default_value = "2", value_parser = input::generation_code)]
    generation: u8,

    /// Bulk-load source; overrides the config file
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Ledger message budget; overrides the config file
    #[arg(long, value_parser = input::ledger_capacity)]
    capacity: Option<i64>,

    /// Remove a user by id after loading (repeatable, applied in order)
    #[arg(long = "remove", value_parser = input::user_id)]
    remove: Vec<u32>,

    /// List the users on a frequency in MHz (repeatable)
    #[arg(long = "frequency", value_parser = input::frequency_mhz)]
    frequency: Vec<u32>,

    /// Report how many users the ledger supports at nominal load
    #[arg(long)]
    simulate: bool,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct LoadSummary {
    path: PathBuf,
    admitted: usize,
    rejected: usize,
    other_generation: usize,
    malformed: usize,
}

impl LoadSummary {
    fn new(path: &Path, report: &BulkLoadReport) -> Self {
        Self {
            path: path.to_path_buf(),
            admitted: report.admitted,
            rejected: report.rejected.len(),
            other_generation: report.other_generation,
            malformed: report.malformed.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FrequencyReport {
    frequency_mhz: u32,
    valid: bool,
    users: Vec<UserListing>,
}

#[derive(Debug, Serialize)]
struct Report {
    generation: Generation,
    load: Option<LoadSummary>,
    removed: Vec<u32>,
    spectrum: Vec<SlotStatus>,
    frequencies: Vec<FrequencyReport>,
    stats: NetworkStats,
    supported_at_nominal_load: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args.config)?;
    init_logging(&args, &config)?;

    log::info!("CellTower simulator v{} starting...", env!("CARGO_PKG_VERSION"));

    let generation = Generation::from_code(args.generation)?;
    let capacity = args.capacity.unwrap_or(config.simulator.ledger_capacity);
    let input = args
        .input
        .clone()
        .unwrap_or_else(|| config.bulk_load.path.clone());

    let mut registry = AllocatorRegistry::new(capacity);
    let allocator = registry.get_or_create(generation);

    let mut source = read_source(&input)?;
    let load = match source.as_mut() {
        Some(source) => Some(LoadSummary::new(&input, &source.load_into(allocator))),
        None => None,
    };

    let mut removed = Vec::new();
    for &id in &args.remove {
        let done = match source.as_mut() {
            Some(source) => {
                let done = source.remove_user(allocator, id);
                if done {
                    write_source(&input, source)?;
                }
                done
            }
            None => allocator.remove_user(id).is_some(),
        };
        if done {
            removed.push(id);
        } else {
            log::warn!("No user U{id} to remove ({} users)", allocator.user_count());
        }
    }

    let report = build_report(allocator, load, removed, &args.frequency, args.simulate);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    log::info!("CellTower simulator done");
    Ok(())
}

/// Load the configuration file if it exists, defaults otherwise
fn load_config(path: &str) -> Result<SimulatorConfig> {
    if Path::new(path).exists() {
        SimulatorConfig::from_file(path).with_context(|| format!("Failed to load {path}"))
    } else {
        Ok(SimulatorConfig::default())
    }
}

/// Initialize logging based on command line arguments and configuration
fn init_logging(args: &Args, config: &SimulatorConfig) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    let level_name = args.log_level.as_deref().unwrap_or(&config.logger.level);
    let level = match level_name.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    builder.filter_level(level);
    builder.format_timestamp_millis();

    if args.no_color {
        builder.write_style(env_logger::WriteStyle::Never);
    }

    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}

/// Read the bulk source; a missing file means an empty session
fn read_source(path: &Path) -> Result<Option<BulkSource>> {
    if !path.exists() {
        log::info!("No bulk source at {}, starting empty", path.display());
        return Ok(None);
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(BulkSource::parse(&bytes)))
}

/// Replace the bulk source through a sibling temp file
fn write_source(path: &Path, source: &BulkSource) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, source.render())
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    log::info!("Bulk source {} updated", path.display());
    Ok(())
}

fn build_report(
    allocator: &SpectrumAllocator,
    load: Option<LoadSummary>,
    removed: Vec<u32>,
    frequencies: &[u32],
    simulate: bool,
) -> Report {
    let frequencies = frequencies
        .iter()
        .map(|&frequency_mhz| FrequencyReport {
            frequency_mhz,
            valid: allocator.is_valid_frequency(frequency_mhz),
            users: allocator.user_listing(frequency_mhz),
        })
        .collect();

    Report {
        generation: allocator.generation(),
        load,
        removed,
        spectrum: allocator.spectrum_status(),
        frequencies,
        stats: allocator.network_stats(),
        supported_at_nominal_load: simulate.then(|| allocator.simulate_saturation()),
    }
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let tech = report.stats.tech_name;

    if let Some(load) = &report.load {
        out.push_str(&format!(
            "\n[File Mode - {tech}] {}: {} admitted, {} rejected, {} other generation, {} malformed\n",
            load.path.display(),
            load.admitted,
            load.rejected,
            load.other_generation,
            load.malformed
        ));
    }
    for id in &report.removed {
        out.push_str(&format!("User U{id} removed.\n"));
    }

    out.push_str("\n--- SPECTRUM STATUS ---\n");
    for slot in &report.spectrum {
        let percent = slot
            .percent_full
            .map_or_else(|| "Invalid".to_string(), |p| p.to_string());
        out.push_str(&format!(
            "  {} MHz: {}/{} users ({percent}%)\n",
            slot.frequency_mhz, slot.used, slot.max
        ));
    }

    for freq in &report.frequencies {
        if !freq.valid {
            out.push_str(&format!(
                "\nFrequency {} MHz is not valid for {tech} generation.\n",
                freq.frequency_mhz
            ));
            continue;
        }
        out.push_str(&format!("\nUsers on {} MHz:\n", freq.frequency_mhz));
        if freq.users.is_empty() {
            out.push_str("  (None)\n");
        }
        for user in &freq.users {
            out.push_str(&format!(
                "  U{} | {} msgs | {}\n",
                user.id, user.cost, user.service_label
            ));
        }
    }

    let stats = &report.stats;
    out.push_str("\n--- Network Configuration ---\n");
    out.push_str(&format!("Technology: {}\n", stats.tech_name));
    out.push_str(&format!("Protocol: {}\n", stats.protocol));
    out.push_str(&format!("Spectrum: {} MHz\n", stats.total_spectrum_mhz));
    out.push_str(&format!("Max Users (Spectrum): {}\n", stats.max_users_by_spectrum));
    out.push_str(&format!("Current Users: {}\n", stats.current_users));
    out.push_str(&format!(
        "Core Load: {}/{} msgs\n",
        stats.ledger_load, stats.ledger_capacity
    ));
    out.push_str(&format!("Cores Needed for Full Capacity: {}\n", stats.cores_needed_for_full));
    if let Some(supported) = report.supported_at_nominal_load {
        out.push_str(&format!("Supported at Nominal Load: {supported}\n"));
    }
    out
}
