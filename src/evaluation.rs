use crate::error::Result;
use crate::lens::Design;
use crate::real::fixed_width;
use crate::spectral::SpectralLine;
use crate::trace::{AxialIncidence, TraceContext};
use crate::Real;
use std::fmt;

/// Number of decimals of the report, the golden table being compared character by character
pub const REPORT_PRECISION: usize = 11;

/// Number of lines of a [`Report`]
pub const REPORT_LINES: usize = 8;

/// Evaluation of the Wyld objective, derived from a run of Microsoft Quick
/// BASIC on the IBM PC/AT
pub const GOLDEN: [&str; REPORT_LINES] = [
    "   Marginal ray          47.09479120920   0.04178472683",
    "   Paraxial ray          47.08372160249   0.04177864821",
    "Longitudinal spherical aberration:        -0.01106960671",
    "    (Maximum permissible):                 0.05306749907",
    "Offense against sine condition (coma):     0.00008954761",
    "    (Maximum permissible):                 0.00250000000",
    "Axial chromatic aberration:                0.00448229032",
    "    (Maximum permissible):                 0.05306749907",
];

/// Maximum permissible offense against the sine condition
pub const MAX_OFFENSE_AGAINST_SINE_CONDITION: f64 = 0.0025;

/// Traces rays through a [`Design`] in several wavelengths and axial
/// incidences and computes its aberrations against acceptable maxima
pub struct DesignEvaluation<'a, T: Real> {
    tc: TraceContext<'a, T>,
    c_marginal_od: T,
    f_marginal_od: T,
    pub d_marginal_od: T,
    pub d_marginal_sa: T,
    pub d_paraxial_od: T,
    pub d_paraxial_sa: T,
    pub longitudinal_spherical_aberration: T,
    pub offense_against_sine_condition: T,
    pub axial_chromatic_aberration: T,
    pub max_longitudinal_spherical_aberration: T,
    pub max_offense_against_sine_condition: T,
    pub max_axial_chromatic_aberration: T,
    report: Report,
}
impl<'a, T: Real> DesignEvaluation<'a, T> {
    pub fn new(design: &'a Design<T>) -> Result<Self> {
        let tc = TraceContext::new(design, SpectralLine::D, AxialIncidence::Marginal)?;
        log::debug!("evaluation of a {} surface design", design.n_surface());
        Ok(DesignEvaluation {
            tc,
            c_marginal_od: T::zero(),
            f_marginal_od: T::zero(),
            d_marginal_od: T::zero(),
            d_marginal_sa: T::zero(),
            d_paraxial_od: T::zero(),
            d_paraxial_sa: T::zero(),
            longitudinal_spherical_aberration: T::zero(),
            offense_against_sine_condition: T::zero(),
            axial_chromatic_aberration: T::zero(),
            max_longitudinal_spherical_aberration: T::zero(),
            max_offense_against_sine_condition: T::from_f64(MAX_OFFENSE_AGAINST_SINE_CONDITION),
            max_axial_chromatic_aberration: T::zero(),
            report: Report::default(),
        })
    }
    pub fn design(&self) -> &'a Design<T> {
        self.tc.design()
    }
    pub fn c_marginal_od(&self) -> &T {
        &self.c_marginal_od
    }
    pub fn f_marginal_od(&self) -> &T {
        &self.f_marginal_od
    }
    /// Traces the design and computes its aberrations
    pub fn evaluate(&mut self) -> &mut Self {
        let (od, sa) = self
            .tc
            .reset(SpectralLine::D, AxialIncidence::Marginal)
            .trace_line();
        self.d_marginal_od = od;
        self.d_marginal_sa = sa;

        let (od, sa) = self
            .tc
            .reset(SpectralLine::D, AxialIncidence::Paraxial)
            .trace_line();
        self.d_paraxial_od = od;
        self.d_paraxial_sa = sa;

        let (od, _) = self
            .tc
            .reset(SpectralLine::C, AxialIncidence::Marginal)
            .trace_line();
        self.c_marginal_od = od;

        let (od, _) = self
            .tc
            .reset(SpectralLine::F, AxialIncidence::Marginal)
            .trace_line();
        self.f_marginal_od = od;

        // where the D line focuses for paraxial and marginal rays
        self.longitudinal_spherical_aberration =
            self.d_paraxial_od.clone() - self.d_marginal_od.clone();
        // coma, as the lateral distance between paraxial and marginal foci
        self.offense_against_sine_condition = T::one()
            - (self.d_paraxial_od.clone() * self.d_paraxial_sa.clone())
                / (self.d_marginal_sa.sin() * self.d_marginal_od.clone());
        // where C and F marginal rays focus
        self.axial_chromatic_aberration = self.f_marginal_od.clone() - self.c_marginal_od.clone();

        let sin_dm_sa = self.d_marginal_sa.sin();
        self.max_longitudinal_spherical_aberration =
            T::from_f64(0.0000926) / (sin_dm_sa.clone() * sin_dm_sa);
        // same criterion
        self.max_axial_chromatic_aberration = self.max_longitudinal_spherical_aberration.clone();
        self
    }
    /// Edits the evaluation into the report lines
    pub fn report(&mut self) -> &Report {
        let p = REPORT_PRECISION;
        let ray = |label: &str, od: &T, sa: &T| {
            format!(
                "{:>15}   {}  {}",
                label,
                fixed_width(od, 21, p),
                fixed_width(sa, 14, p)
            )
        };
        let line = |label: &str, x: &T| format!("{}{}", label, fixed_width(x, 16, p));
        let permissible = "    (Maximum permissible):              ";
        self.report = Report {
            lines: [
                ray("Marginal ray", &self.d_marginal_od, &self.d_marginal_sa),
                ray("Paraxial ray", &self.d_paraxial_od, &self.d_paraxial_sa),
                line(
                    "Longitudinal spherical aberration:      ",
                    &self.longitudinal_spherical_aberration,
                ),
                line(permissible, &self.max_longitudinal_spherical_aberration),
                line(
                    "Offense against sine condition (coma):  ",
                    &self.offense_against_sine_condition,
                ),
                line(permissible, &self.max_offense_against_sine_condition),
                line(
                    "Axial chromatic aberration:             ",
                    &self.axial_chromatic_aberration,
                ),
                line(permissible, &self.max_axial_chromatic_aberration),
            ],
        };
        &self.report
    }
    /// Compares the last report against the [`GOLDEN`] table
    pub fn validate(&self) -> Validation {
        let validation = self.report.compare(&GOLDEN);
        for mismatch in &validation.mismatches {
            log::warn!(
                "line {}: {} character(s) differ from the reference",
                mismatch.line,
                mismatch.errors()
            );
        }
        validation
    }
}

/// The eight edited lines of an evaluation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub lines: [String; REPORT_LINES],
}
impl Report {
    /// Compares the report character by character against `expected`
    pub fn compare(&self, expected: &[&str; REPORT_LINES]) -> Validation {
        let mismatches = self
            .lines
            .iter()
            .zip(expected.iter())
            .enumerate()
            .filter(|(_, (received, expected))| received != expected)
            .map(|(k, (received, expected))| LineMismatch::new(k + 1, expected, received))
            .collect();
        Validation { mismatches }
    }
}
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines.iter() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A report line that differs from its reference
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMismatch {
    /// Line number, starting at 1
    pub line: usize,
    pub expected: String,
    pub received: String,
    /// `^` under each character of `expected` that is not matched in `received`
    pub carets: String,
}
impl LineMismatch {
    pub fn new(line: usize, expected: &str, received: &str) -> Self {
        let received_bytes = received.as_bytes();
        let carets = expected
            .bytes()
            .enumerate()
            .map(|(j, e)| {
                if received_bytes.get(j) == Some(&e) {
                    ' '
                } else {
                    '^'
                }
            })
            .collect();
        LineMismatch {
            line,
            expected: expected.to_owned(),
            received: received.to_owned(),
            carets,
        }
    }
    /// Number of mismatched characters
    pub fn errors(&self) -> usize {
        self.carets.bytes().filter(|&c| c == b'^').count()
    }
}
impl fmt::Display for LineMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error in results on line {}...", self.line)?;
        writeln!(f, "Expected:  \"{}\"", self.expected)?;
        writeln!(f, "Received:  \"{}\"", self.received)?;
        writeln!(f, "(Errors)    {}", self.carets)
    }
}

/// Outcome of the comparison of a [`Report`] with its reference
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub mismatches: Vec<LineMismatch>,
}
impl Validation {
    /// Total number of mismatched characters over all lines
    pub fn errors(&self) -> usize {
        self.mismatches.iter().map(LineMismatch::errors).sum()
    }
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
    pub fn summary(&self) -> String {
        match self.errors() {
            0 => "No errors in results.".to_owned(),
            1 => "1 error in results.  This is VERY SERIOUS.".to_owned(),
            n => format!("{} errors in results.  This is VERY SERIOUS.", n),
        }
    }
}
impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mismatch in &self.mismatches {
            write!(f, "{}", mismatch)?;
        }
        Ok(())
    }
}
