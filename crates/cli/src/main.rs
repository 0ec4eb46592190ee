use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{prelude::*, EnvFilter};
use tower_core::{
    config::{self, AppConfig},
    Carrier, CarrierCategory, ControlTower, GateNumber, GatePoolManager, Knots,
    LandingInstructions, Terminal,
};

#[derive(Parser)]
#[command(
    name = "control-tower",
    about = "Runway, terminal and gate assignment for arriving carriers",
    version
)]
struct Cli {
    /// Configuration file layered over the built-in gate layout
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request landing instructions for a carrier.
    ///
    /// Unknown operators are private traffic and must declare a speed.
    Land {
        /// Operator name, e.g. american, klm, cessna
        operator: String,
        /// Descent speed in knots (defaults to the operator's nominal speed)
        #[arg(short, long)]
        speed: Option<Knots>,
        /// Flight identity (defaults to the operator name)
        #[arg(short, long)]
        callsign: Option<String>,
        /// Commit the assigned gate as occupied
        #[arg(long)]
        reserve: bool,
        /// Print instructions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show occupied and vacant gates
    Gates {
        /// Only this terminal
        terminal: Option<Terminal>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => {
            config::ensure_default_config()?;
            AppConfig::load()?
        }
    };
    let seed = config.seed().context("invalid gate layout")?;
    let tower = ControlTower::new(GatePoolManager::new(seed));

    match cli.command {
        Commands::Land {
            operator,
            speed,
            callsign,
            reserve,
            json,
        } => {
            let carrier = build_carrier(&operator, speed, callsign)?;
            let instructions = if reserve {
                tower.land_and_reserve(&carrier)
            } else {
                tower.land(&carrier)
            };
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&landing_record(&carrier, &instructions))?
                );
            } else {
                println!("{}", render_landing(&carrier, &instructions));
            }
        }
        Commands::Gates { terminal } => {
            for line in render_gates(tower.gates(), terminal) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn build_carrier(operator: &str, speed: Option<Knots>, callsign: Option<String>) -> Result<Carrier> {
    let operator = operator.trim();
    let category = CarrierCategory::from_operator_name(operator);
    let callsign = callsign.unwrap_or_else(|| operator.to_uppercase());
    match speed {
        Some(speed) => Ok(Carrier::new(callsign, category, speed)),
        None => Carrier::nominal(callsign, category).ok_or_else(|| {
            anyhow!("'{operator}' has no nominal descent speed; pass --speed KNOTS")
        }),
    }
}

fn render_landing(carrier: &Carrier, instructions: &LandingInstructions) -> String {
    format!(
        "{} [{}, {} kt] {}",
        carrier.callsign(),
        carrier.category(),
        carrier.descend_speed(),
        instructions
    )
}

fn landing_record(carrier: &Carrier, instructions: &LandingInstructions) -> serde_json::Value {
    serde_json::json!({
        "callsign": carrier.callsign(),
        "category": carrier.category().to_string(),
        "descend_speed": carrier.descend_speed(),
        "instructions": instructions,
    })
}

fn render_gates(gates: &GatePoolManager, only: Option<Terminal>) -> Vec<String> {
    let terminals = match only {
        Some(terminal) => vec![terminal],
        None => gates.terminals(),
    };

    terminals
        .into_iter()
        .map(|terminal| match gates.pool(terminal) {
            Some(pool) => format!(
                "{:<14} occupied: {:<24} vacant: {}",
                terminal.label(),
                join_gates(pool.occupied()),
                join_gates(pool.vacant())
            ),
            None => format!("{:<14} no gate pool", terminal.label()),
        })
        .collect()
}

fn join_gates(gates: impl Iterator<Item = GateNumber>) -> String {
    let joined = gates.map(|gate| gate.to_string()).collect::<Vec<_>>().join(",");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .compact()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_core::{DomesticOperator, GateSeed, Runway};

    #[test]
    fn builds_carriers_from_flags() -> Result<()> {
        let carrier = build_carrier("american", Some(75), None)?;
        assert_eq!(
            carrier.category(),
            CarrierCategory::Domestic(DomesticOperator::American)
        );
        assert_eq!(carrier.descend_speed(), 75);
        assert_eq!(carrier.callsign(), "AMERICAN");

        let carrier = build_carrier("klm", None, Some("KL601".to_string()))?;
        assert_eq!(carrier.descend_speed(), 130);
        assert_eq!(carrier.callsign(), "KL601");

        assert!(build_carrier("cessna", None, None).is_err());
        Ok(())
    }

    #[test]
    fn renders_landing_line_and_json() -> Result<()> {
        let tower = ControlTower::default();
        let carrier = build_carrier("cessna", Some(100), Some("N172SP".to_string()))?;
        let instructions = tower.land(&carrier);
        assert_eq!(instructions.runway, Runway::L31R);

        assert_eq!(
            render_landing(&carrier, &instructions),
            "N172SP [other, 100 kt] Runway: L31R, Terminal: Private, Gate: 2"
        );
        assert_eq!(
            landing_record(&carrier, &instructions),
            serde_json::json!({
                "callsign": "N172SP",
                "category": "other",
                "descend_speed": 100,
                "instructions": {
                    "runway": "L31R",
                    "terminal": "Private",
                    "gate": 2
                }
            })
        );
        Ok(())
    }

    #[test]
    fn renders_gate_pools() -> Result<()> {
        let tower = ControlTower::default();
        tower.land_and_reserve(&build_carrier("piper", Some(80), None)?);

        let lines = render_gates(tower.gates(), Some(Terminal::Private));
        assert_eq!(
            lines,
            vec![format!("{:<14} occupied: {:<24} vacant: {}", "Private", "1,2", "3")]
        );

        let seed = GateSeed::default().with_pool(Terminal::A, [1], Vec::new())?;
        let gates = GatePoolManager::new(seed);
        assert_eq!(
            render_gates(&gates, None),
            vec![format!("{:<14} occupied: {:<24} vacant: {}", "A", "1", "-")]
        );
        assert_eq!(
            render_gates(&gates, Some(Terminal::C)),
            vec![format!("{:<14} no gate pool", "C")]
        );
        Ok(())
    }

    #[test]
    fn gate_lists_render_compactly() {
        assert_eq!(join_gates([4, 5, 6].into_iter()), "4,5,6");
        assert_eq!(join_gates(std::iter::empty()), "-");
    }
}
