//! # Arcflash CLI
//!
//! Command-line host for the arc-flash engine.
//!
//! ```text
//! arcflash evaluate --equipment swgr-15kv --fault-current-ka 4.85 --voltage-kv 13.8 --arc-duration-ms 197
//! arcflash evaluate --input swgr-1.json --json
//! arcflash sweep --input swgr-1.json --from-kv 0.48 --to-kv 13.8 --steps 10
//! arcflash equipment
//! arcflash equations
//! ```
//!
//! Reports go to stdout, logs to stderr (`RUST_LOG`, `-v`, `--log-json`).

mod equipment;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use arcflash_core::calculations::{sweep_voltage, voltage_range};
use arcflash_core::enclosure::{EnclosureClass, EnclosureGeometry};
use arcflash_core::equations::{generate_equations_markdown, EquationTracker};
use arcflash_core::units::{KiloAmps, KiloVolts, Millimeters, Milliseconds, Seconds};
use arcflash_core::{ArcFlashEngine, CalcError, CalculationInput, CoefficientTable, ElectrodeConfiguration};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "arcflash", author, version, about = "Arc-flash hazard evaluation (NBR 17227 / IEEE 1584)")]
struct Cli {
    /// Print results (or the error) as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Coefficient table JSON file replacing the built-in NBR 17227 table
    #[arg(long, global = true, value_name = "PATH")]
    coefficients: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one piece of equipment
    Evaluate(InputArgs),
    /// Evaluate one input across a range of system voltages
    Sweep {
        #[command(flatten)]
        input: InputArgs,
        /// First system voltage (kV)
        #[arg(long)]
        from_kv: f64,
        /// Last system voltage (kV)
        #[arg(long)]
        to_kv: f64,
        /// Number of points, including both ends
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },
    /// List equipment-class defaults
    Equipment,
    /// Print the equation reference
    Equations,
}

/// Input sources, in override order: flags, then `--equipment` defaults,
/// then the `--input` file.
#[derive(Debug, Clone, Default, Args)]
struct InputArgs {
    /// CalculationInput JSON file
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Equipment class supplying gap, working distance and enclosure size
    #[arg(long, value_name = "KEY")]
    equipment: Option<String>,

    #[arg(long)]
    label: Option<String>,

    /// Bolted fault current (kA)
    #[arg(long)]
    fault_current_ka: Option<f64>,

    /// System voltage (kV)
    #[arg(long)]
    voltage_kv: Option<f64>,

    /// Arc duration (ms)
    #[arg(long, conflicts_with = "arc_duration_s")]
    arc_duration_ms: Option<f64>,

    /// Arc duration (s), converted to ms
    #[arg(long)]
    arc_duration_s: Option<f64>,

    /// Electrode gap (mm)
    #[arg(long)]
    gap_mm: Option<f64>,

    /// Working distance (mm)
    #[arg(long)]
    working_distance_mm: Option<f64>,

    /// Electrode configuration: VCB, VCBB, HCB, VOA or HOA
    #[arg(long)]
    configuration: Option<ElectrodeConfiguration>,

    #[arg(long)]
    height_mm: Option<f64>,

    #[arg(long)]
    width_mm: Option<f64>,

    #[arg(long)]
    depth_mm: Option<f64>,

    /// Enclosure class: typical or shallow (suggested from geometry if omitted)
    #[arg(long)]
    enclosure: Option<EnclosureClass>,
}

impl InputArgs {
    /// Merge flags, equipment defaults and the input file into one input.
    fn resolve(&self) -> Result<CalculationInput> {
        let file = self.input.as_deref().map(read_input).transpose()?;
        let defaults = match &self.equipment {
            Some(key) => Some(equipment::lookup(key).with_context(|| {
                format!("Unknown equipment class '{}' (known: {})", key, equipment::known_keys())
            })?),
            None => None,
        };

        let pick = |flag: Option<f64>, default: Option<f64>, file_value: Option<f64>, name: &str| {
            flag.or(default)
                .or(file_value)
                .with_context(|| format!("Missing --{} (or --input / --equipment)", name))
        };
        let from_file = |f: fn(&CalculationInput) -> f64| file.as_ref().map(f);

        let arc_duration_ms = match (self.arc_duration_ms, self.arc_duration_s) {
            (Some(ms), _) => Some(ms),
            (None, Some(s)) => Some(Milliseconds::from(Seconds(s)).0),
            (None, None) => None,
        };

        let system_voltage_kv = KiloVolts(pick(
            self.voltage_kv,
            None,
            from_file(|i| i.system_voltage_kv.0),
            "voltage-kv",
        )?);

        let enclosure = EnclosureGeometry::new(
            pick(self.height_mm, defaults.map(|d| d.height_mm), from_file(|i| i.enclosure.height_mm.0), "height-mm")?,
            pick(self.width_mm, defaults.map(|d| d.width_mm), from_file(|i| i.enclosure.width_mm.0), "width-mm")?,
            pick(self.depth_mm, defaults.map(|d| d.depth_mm), from_file(|i| i.enclosure.depth_mm.0), "depth-mm")?,
        );

        let enclosure_class = match (self.enclosure, &file) {
            (Some(class), _) => class,
            (None, Some(f)) if self.equipment.is_none() => f.enclosure_class,
            _ => {
                let suggested = enclosure.suggested_class(system_voltage_kv);
                debug!(class = %suggested, "Enclosure class suggested from geometry");
                suggested
            }
        };

        Ok(CalculationInput {
            label: self
                .label
                .clone()
                .or_else(|| file.as_ref().map(|f| f.label.clone()))
                .unwrap_or_default(),
            fault_current_ka: KiloAmps(pick(
                self.fault_current_ka,
                None,
                from_file(|i| i.fault_current_ka.0),
                "fault-current-ka",
            )?),
            gap_mm: Millimeters(pick(
                self.gap_mm,
                defaults.map(|d| d.gap_mm),
                from_file(|i| i.gap_mm.0),
                "gap-mm",
            )?),
            working_distance_mm: Millimeters(pick(
                self.working_distance_mm,
                defaults.map(|d| d.working_distance_mm),
                from_file(|i| i.working_distance_mm.0),
                "working-distance-mm",
            )?),
            arc_duration_ms: Milliseconds(pick(
                arc_duration_ms,
                None,
                from_file(|i| i.arc_duration_ms.0),
                "arc-duration-ms",
            )?),
            system_voltage_kv,
            electrode_configuration: self
                .configuration
                .or_else(|| file.as_ref().map(|f| f.electrode_configuration))
                .context("Missing --configuration (or --input)")?,
            enclosure,
            enclosure_class,
        })
    }
}

fn read_input(path: &Path) -> Result<CalculationInput> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Reading input file {}", path.display()))?;
    let input = serde_json::from_str(&json).map_err(CalcError::from)?;
    Ok(input)
}

fn init_tracing(verbose: bool, log_json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let custom;
    let table = match &cli.coefficients {
        Some(path) => {
            custom = CoefficientTable::from_json_file(path)?;
            info!(path = %path.display(), "Loaded coefficient table");
            &custom
        }
        None => CoefficientTable::standard(),
    };
    let engine = ArcFlashEngine::new(table);

    match &cli.command {
        Command::Evaluate(args) => {
            let input = args.resolve()?;
            let mut tracker = EquationTracker::new();
            let result = engine.evaluate_traced(&input, &mut tracker)?;

            if cli.json {
                print_json(&json!({
                    "generated_at": chrono::Utc::now().to_rfc3339(),
                    "input": input,
                    "result": result,
                    "equations": tracker.unique_equations(),
                }))?;
            } else {
                print!("{}", render::Report { input: &input, result: &result });
            }
        }
        Command::Sweep {
            input,
            from_kv,
            to_kv,
            steps,
        } => {
            let base = input.resolve()?;
            let voltages = voltage_range(KiloVolts(*from_kv), KiloVolts(*to_kv), *steps)?;
            let points = sweep_voltage(&engine, &base, &voltages);

            if cli.json {
                print_json(&json!({
                    "generated_at": chrono::Utc::now().to_rfc3339(),
                    "input": base,
                    "points": points,
                }))?;
            } else {
                print!("{}", render::SweepTable(&points));
            }
        }
        Command::Equipment => {
            if cli.json {
                print_json(&serde_json::to_value(equipment::EQUIPMENT)?)?;
            } else {
                print!("{}", render::EquipmentTable);
            }
        }
        Command::Equations => print!("{}", generate_equations_markdown()),
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc) = e.downcast_ref::<CalcError>() {
                debug!(code = calc.error_code(), "Evaluation failed");
            }
            if cli.json {
                let body = match e.downcast_ref::<CalcError>() {
                    Some(calc) => serde_json::to_value(calc).unwrap_or_default(),
                    None => json!({ "type": "Other", "details": { "reason": format!("{:#}", e) } }),
                };
                if let Ok(text) = serde_json::to_string_pretty(&body) {
                    println!("{}", text);
                }
            }
            ExitCode::FAILURE
        }
    }
}
