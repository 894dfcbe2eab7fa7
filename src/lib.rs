//! Optical ray tracing floating point benchmark
//!
//! The benchmark traces rays of several spectral lines through the Wyld
//! 4 inch f/12 achromatic objective, computes its aberrations and compares the
//! edited results against a table of reference values.
//!
//! ```
//! use fbench::{Design, DesignEvaluation};
//!
//! let design: Design<f64> = Design::wyld();
//! let mut de = DesignEvaluation::new(&design).unwrap();
//! de.evaluate().report();
//! assert!(de.validate().is_ok());
//! ```

pub mod benchmark;
pub mod diagnostic;
pub mod error;
pub mod evaluation;
pub mod lens;
pub mod real;
pub mod spectral;
pub mod trace;

pub use error::{DesignError, Result};
pub use evaluation::{DesignEvaluation, Report, Validation, GOLDEN};
pub use lens::{Design, Surface, MAX_SURFACES};
pub use real::{Real, Representation};
pub use spectral::SpectralLine;
pub use trace::{AxialIncidence, Ray, TraceContext};

/// Logging level for a count of `-v` flags, warnings only by default
pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
