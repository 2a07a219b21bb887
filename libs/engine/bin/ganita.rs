//! Ganita CLI - run any calculation method and print its step trace
//!
//! Usage:
//!   ganita list [operation]
//!   ganita run multiplication karatsuba 56 78
//!   ganita run division synthetic 1 5 3 -8 2 --json
//!   ganita example subtraction twos-complement
//!   ganita compare multiplication 97 96
//!   ganita config --config ~/.config/ganita/engine.toml

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ganita_config::{EngineConfig, LoggingConfig};
use ganita_engine::{CalculationMethod, CalculationResult, Operands, Operation, Registry};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ganita", version, about = "Multi-method arithmetic with step-by-step traces")]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "ganita_engine=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List methods, optionally for one operation
    List { operation: Option<Operation> },

    /// Run one method on the given operands
    Run {
        operation: Operation,
        method: String,
        /// Two numbers; one for ekadhikena; coefficients then root for synthetic; any count for kahan
        #[arg(required = true, allow_negative_numbers = true)]
        operands: Vec<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a method on its built-in example
    Example {
        operation: Operation,
        method: String,
        #[arg(long)]
        json: bool,
    },

    /// Run every method of an operation on the same pair
    Compare {
        operation: Operation,
        #[arg(allow_negative_numbers = true)]
        num1: i64,
        #[arg(allow_negative_numbers = true)]
        num2: i64,
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_logging(config: &LoggingConfig, level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?,
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn lookup<'a>(
    registry: &'a Registry,
    operation: Operation,
    id: &str,
) -> Result<&'a dyn CalculationMethod> {
    match registry.get_method(operation, id) {
        Some(method) => Ok(method),
        None => {
            let known: Vec<&str> = registry
                .get_method_list(operation)
                .iter()
                .map(|meta| meta.id)
                .collect();
            bail!(
                "unknown {operation} method '{id}' (available: {})",
                known.join(", ")
            )
        }
    }
}

fn parse_integers(raw: &[String]) -> Result<Vec<i64>> {
    raw.iter()
        .map(|s| s.parse::<i64>().with_context(|| format!("'{s}' is not an integer")))
        .collect()
}

/// Shape the raw command-line values for the chosen method
fn parse_operands(method: &dyn CalculationMethod, raw: &[String]) -> Result<Operands> {
    match method.id() {
        "synthetic" => {
            let mut values = parse_integers(raw)?;
            if values.len() < 2 {
                bail!("synthetic division needs coefficients followed by the root");
            }
            let root = values.pop().unwrap_or_default();
            Ok(Operands::polynomial(values, root))
        }
        "kahan" => {
            let values = raw
                .iter()
                .map(|s| s.parse::<f64>().with_context(|| format!("'{s}' is not a number")))
                .collect::<Result<Vec<_>>>()?;
            Ok(Operands::series(values))
        }
        id => match parse_integers(raw)?.as_slice() {
            [num] if id == "vedic-ekadhikena" => Ok(Operands::single(*num)),
            [num1, num2] => Ok(Operands::pair(*num1, *num2)),
            other => bail!("{id} expects two numbers, got {}", other.len()),
        },
    }
}

fn print_result(result: &CalculationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{} ({})  inputs {}", result.method_name, result.method, result.inputs);
    println!();
    for step in &result.steps {
        println!("{:>3}. [{}] {}", step.step_number, step.step_type, step.title);
        for text in [&step.description, &step.calculation, &step.explanation] {
            for line in text.lines().filter(|l| !l.is_empty()) {
                println!("       {line}");
            }
        }
    }
    println!();
    println!("Answer:   {}", result.final_answer);
    println!(
        "Verified: {} (expected {})",
        if result.verification.correct { "yes" } else { "NO" },
        result.verification.expected
    );
    println!("Complexity: {}", result.time_complexity);
    for warning in &result.warnings {
        println!("Warning:  {warning}");
    }
    Ok(())
}

fn list(registry: &Registry, operation: Option<Operation>) {
    let operations = match operation {
        Some(op) => vec![op],
        None => Operation::ALL.to_vec(),
    };
    for op in operations {
        println!("{op}:");
        for meta in registry.get_method_list(op) {
            println!(
                "  {:<18} {:<34} {:?}, difficulty {}",
                meta.id, meta.name, meta.category, meta.difficulty
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EngineConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging, cli.log_level.as_deref())?;
    debug!(path = ?cli.config, "Configuration ready");

    let registry = Registry::new(&config);

    match cli.command {
        Command::List { operation } => list(&registry, operation),
        Command::Run {
            operation,
            method,
            operands,
            json,
        } => {
            let method = lookup(&registry, operation, &method)?;
            let operands = parse_operands(method, &operands)?;
            let validation = method.validate_input(&operands);
            if !validation.valid {
                eprintln!("note: {}", validation.message);
            }
            let result = method
                .calculate(&operands)
                .with_context(|| format!("{} failed on {operands}", method.id()))?;
            print_result(&result, json)?;
        }
        Command::Example {
            operation,
            method,
            json,
        } => {
            let method = lookup(&registry, operation, &method)?;
            let example = method.example();
            if !json {
                println!("Example: {}", example.description);
            }
            let result = method.calculate(&example.operands)?;
            print_result(&result, json)?;
        }
        Command::Compare {
            operation,
            num1,
            num2,
            json,
        } => {
            let rows = registry.compare(operation, &Operands::pair(num1, num2));
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{num1} {} {num2}", operation.symbol());
                for row in rows {
                    let outcome = match (&row.answer, &row.error) {
                        (Some(answer), _) => format!(
                            "{answer}  [{}; {} steps]",
                            if row.verified { "verified" } else { "MISMATCH" },
                            row.step_count
                        ),
                        (None, Some(error)) => format!("error: {error}"),
                        (None, None) => "no result".to_string(),
                    };
                    println!("  {:<18} {outcome}", row.method);
                }
            }
        }
        Command::Config => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}
