use clap::Parser;
use console::style;
use fbench::benchmark::{self, Summary, DEFAULT_ITERATIONS};
use fbench::{log_level, Design, DesignEvaluation, Real, Representation};
use indicatif::{ProgressBar, ProgressStyle};
use simple_logger::SimpleLogger;

#[derive(Parser)]
#[command(name = "fbench")]
#[command(about = "Optical ray tracing floating point benchmark")]
#[command(version)]
struct Cli {
    /// Number of design evaluations
    #[arg(default_value_t = DEFAULT_ITERATIONS, value_parser = clap::value_parser!(u64).range(1..))]
    iterations: u64,
    /// Real number representation
    #[arg(short, long, value_enum, default_value_t = Representation::Double)]
    real: Representation,
    /// Print a JSON summary instead of the report
    #[arg(long)]
    json: bool,
    /// Do not draw the progress bar
    #[arg(short, long)]
    quiet: bool,
    /// Logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn progress_bar(iterations: u64) -> anyhow::Result<ProgressBar> {
    let bar = ProgressBar::new(iterations);
    bar.set_style(ProgressStyle::default_bar().template("{eta} {bar:40.cyan/blue} {pos}/{len}")?);
    Ok(bar)
}

fn bench<T: Real>(cli: &Cli) -> anyhow::Result<()> {
    let design: Design<T> = Design::wyld();
    let mut de = DesignEvaluation::new(&design)?;
    let bar = if cli.quiet {
        None
    } else {
        Some(progress_bar(cli.iterations)?)
    };
    let timing = benchmark::run(&mut de, cli.iterations, bar.as_ref());
    let report = de.report().clone();
    let validation = de.validate();

    if cli.json {
        let summary = Summary::new(cli.real.name(), &timing, &report, &validation);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print!("{}", report);
    println!();
    print!("{}", validation);
    if validation.is_ok() {
        println!("{}", style(validation.summary()).green());
    } else {
        println!("{}", style(validation.summary()).red().bold());
    }
    println!("{}", style(timing).bold());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .with_utc_timestamps()
        .env()
        .init()?;
    log::info!("{} representation", cli.real);

    match cli.real {
        Representation::Double => bench::<f64>(&cli),
        #[cfg(feature = "mpfr")]
        Representation::Extended => bench::<fbench::real::Extended>(&cli),
        #[cfg(feature = "mpfr")]
        Representation::Quadruple => bench::<fbench::real::Quadruple>(&cli),
        #[cfg(feature = "mpfr")]
        Representation::Mpfr => bench::<fbench::real::Mpfr128>(&cli),
    }
}
