use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use calcgraph_core::{sample_function, Domain, DEFAULT_SAMPLE_COUNT};

#[derive(Parser)]
#[command(name = "calcgraph-eval")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluates, converts and samples arithmetic expressions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the value of an expression
    Eval {
        /// The expression, for example `2 + 3 * 4`
        #[arg(required = true)]
        expr: Vec<String>,

        /// Value of the variable `x`
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,
    },

    /// Convert an infix expression to postfix order
    Postfix {
        #[arg(required = true)]
        expr: Vec<String>,
    },

    /// Evaluate a function of `x` at evenly spaced points
    Sample {
        #[arg(required = true)]
        expr: Vec<String>,

        /// First value of `x`
        #[arg(long, default_value_t = Domain::default().start, allow_hyphen_values = true)]
        from: f64,

        /// Last value of `x`
        #[arg(long, default_value_t = Domain::default().end, allow_hyphen_values = true)]
        to: f64,

        /// Number of points
        #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
        count: usize,

        /// Print the points as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Eval { expr, x } => {
            let expr = expr.join(" ");
            let val = match x {
                Some(x) => calcgraph_core::evaluate_text_at(&expr, x),
                None => calcgraph_core::evaluate_text(&expr),
            }
            .with_context(|| format!("cannot evaluate `{}`", expr))?;
            println!("Result: {}", val);
        }
        Commands::Postfix { expr } => {
            let expr = expr.join(" ");
            let postfix = calcgraph_core::to_postfix_text(&expr)
                .with_context(|| format!("cannot convert `{}`", expr))?;
            println!("Postfix: {}", postfix);
        }
        Commands::Sample {
            expr,
            from,
            to,
            count,
            json,
        } => {
            let expr = expr.join(" ");
            let series = sample_function(&expr, Domain::new(from, to), count)
                .with_context(|| format!("cannot sample `{}`", expr))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                for point in &series.points {
                    println!("{}\t{}", point.x, point.y);
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
