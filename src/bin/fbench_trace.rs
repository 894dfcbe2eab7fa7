//! Per-surface dump of the benchmark ray traces
//!
//! The output lists the object distance and the axis slope angle after each
//! surface for the four traces of a design evaluation, followed by the
//! evaluation report, so that implementations can be diffed step by step.

use clap::Parser;
use fbench::diagnostic::TraceLog;
use fbench::{log_level, Design, DesignEvaluation, Real, Representation};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fbench_trace")]
#[command(about = "Per-surface trace of the fbench lens design")]
#[command(version)]
struct Cli {
    /// Real number representation
    #[arg(short, long, value_enum, default_value_t = Representation::Double)]
    real: Representation,
    /// Writes the per-surface records to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn dump<T: Real>(cli: &Cli) -> anyhow::Result<()> {
    let design: Design<T> = Design::wyld();
    println!("{}", design);

    let log = TraceLog::evaluation(&design)?;
    print!("{}", log);
    if let Some(path) = &cli.csv {
        log.to_path(path)?;
        log::info!("trace records written to {}", path.display());
    }

    let mut de = DesignEvaluation::new(&design)?;
    println!();
    print!("{}", de.evaluate().report());
    let validation = de.validate();
    println!();
    print!("{}", validation);
    println!("{}", validation.summary());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .with_utc_timestamps()
        .env()
        .init()?;

    match cli.real {
        Representation::Double => dump::<f64>(&cli),
        #[cfg(feature = "mpfr")]
        Representation::Extended => dump::<fbench::real::Extended>(&cli),
        #[cfg(feature = "mpfr")]
        Representation::Quadruple => dump::<fbench::real::Quadruple>(&cli),
        #[cfg(feature = "mpfr")]
        Representation::Mpfr => dump::<fbench::real::Mpfr128>(&cli),
    }
}
