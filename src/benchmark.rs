use crate::evaluation::{DesignEvaluation, Report, Validation};
use crate::Real;
use indicatif::ProgressBar;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Default number of design evaluations of a benchmark run
pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Evaluations between two progress bar updates
pub const CHUNK: u64 = 10_000;

/// Wall-clock time of a benchmark run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub iterations: u64,
    pub elapsed: Duration,
}
impl Timing {
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
    /// Mean time of one evaluation [µs], 0 for an empty run
    pub fn micros_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.seconds() * 1e6 / self.iterations as f64
        }
    }
}
impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time for {} iterations: {:.4} seconds, {:.4} \u{00B5}sec/iteration.",
            self.iterations,
            self.seconds(),
            self.micros_per_iteration()
        )
    }
}

/// Evaluates the design `iterations` times
///
/// The progress bar, if any, is advanced every [`CHUNK`] evaluations and
/// cleared at the end of the run.
pub fn run<T: Real>(
    evaluation: &mut DesignEvaluation<'_, T>,
    iterations: u64,
    progress: Option<&ProgressBar>,
) -> Timing {
    log::info!("running {} evaluations", iterations);
    let now = Instant::now();
    let mut done = 0u64;
    while done < iterations {
        let chunk = CHUNK.min(iterations - done);
        for _ in 0..chunk {
            evaluation.evaluate();
        }
        done += chunk;
        if let Some(bar) = progress {
            bar.inc(chunk);
        }
    }
    let timing = Timing {
        iterations,
        elapsed: now.elapsed(),
    };
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }
    log::info!(
        "{} evaluations in {:.3}s ({:.4}µs/evaluation)",
        iterations,
        timing.seconds(),
        timing.micros_per_iteration()
    );
    timing
}

/// Outcome of a benchmark run, as written by `fbench --json`
#[derive(Debug, Serialize)]
pub struct Summary {
    pub real: String,
    pub iterations: u64,
    pub seconds: f64,
    pub micros_per_iteration: f64,
    pub report: Vec<String>,
    pub errors: usize,
}
impl Summary {
    pub fn new(real: &str, timing: &Timing, report: &Report, validation: &Validation) -> Self {
        Summary {
            real: real.to_owned(),
            iterations: timing.iterations,
            seconds: timing.seconds(),
            micros_per_iteration: timing.micros_per_iteration(),
            report: report.lines.to_vec(),
            errors: validation.errors(),
        }
    }
}
