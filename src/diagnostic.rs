//! Per-surface dump of the ray traces, the step-by-step reference used to
//! find where two implementations of the benchmark diverge

use crate::error::Result;
use crate::lens::Design;
use crate::spectral::SpectralLine;
use crate::trace::{AxialIncidence, TraceContext};
use crate::Real;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::Path;

/// The wavelength and incidence combinations of a design evaluation, in trace order
pub const EVALUATION_TRACES: [(SpectralLine, AxialIncidence); 4] = [
    (SpectralLine::D, AxialIncidence::Marginal),
    (SpectralLine::D, AxialIncidence::Paraxial),
    (SpectralLine::C, AxialIncidence::Marginal),
    (SpectralLine::F, AxialIncidence::Marginal),
];

/// Ray leaving one surface
#[derive(Clone, Debug)]
pub struct SurfaceRecord<T: Real> {
    /// Surface index, starting at 0
    pub surface: usize,
    pub object_distance: T,
    pub axis_slope_angle: T,
    pub ray_height: T,
    pub to_index: T,
}

/// All the surfaces of one spectral line trace
#[derive(Clone, Debug)]
pub struct LineTrace<T: Real> {
    pub line: SpectralLine,
    pub incidence: AxialIncidence,
    pub ray_height: T,
    pub surfaces: Vec<SurfaceRecord<T>>,
    pub object_distance: T,
    pub axis_slope_angle: T,
}
impl<T: Real> LineTrace<T> {
    /// Resets `tc` to `line` and `incidence` and records its trace
    pub fn record(tc: &mut TraceContext<'_, T>, line: SpectralLine, incidence: AxialIncidence) -> Self {
        tc.reset(line, incidence);
        let ray_height = tc.ray().ray_height.clone();
        let mut surfaces = Vec::with_capacity(tc.design().n_surface());
        let (object_distance, axis_slope_angle) = tc.trace_line_with(|step| {
            surfaces.push(SurfaceRecord {
                surface: step.surface,
                object_distance: step.ray.object_distance.clone(),
                axis_slope_angle: step.ray.axis_slope_angle.clone(),
                ray_height: step.ray.ray_height.clone(),
                to_index: step.to_index.clone(),
            })
        });
        LineTrace {
            line,
            incidence,
            ray_height,
            surfaces,
            object_distance,
            axis_slope_angle,
        }
    }
}
impl<T: Real> fmt::Display for LineTrace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Tracing {} ({}) {} line at height {}:",
            self.line.letter(),
            self.line.ordinal(),
            self.incidence,
            self.ray_height.to_f64()
        )?;
        for s in &self.surfaces {
            writeln!(
                f,
                "  Surface {}  object_distance = {:>16}  axis_slope_angle = {:>16}",
                s.surface + 1,
                s.object_distance.to_fixed(11),
                s.axis_slope_angle.to_fixed(11)
            )?;
        }
        writeln!(
            f,
            "  Result     object_distance = {:>16}  axis_slope_angle = {:>16}",
            self.object_distance.to_fixed(11),
            self.axis_slope_angle.to_fixed(11)
        )
    }
}

#[derive(Serialize)]
struct CsvRecord {
    line: SpectralLine,
    incidence: AxialIncidence,
    surface: usize,
    object_distance: f64,
    axis_slope_angle: f64,
    ray_height: f64,
    to_index: f64,
}

/// Traces of a design
#[derive(Clone, Debug)]
pub struct TraceLog<T: Real> {
    pub traces: Vec<LineTrace<T>>,
}
impl<T: Real> TraceLog<T> {
    /// Records the traces of a design evaluation, see [`EVALUATION_TRACES`]
    pub fn evaluation(design: &Design<T>) -> Result<Self> {
        TraceLog::new(design, &EVALUATION_TRACES)
    }
    /// Records the traces of `design` for each line and incidence pair, reusing a single context
    pub fn new(design: &Design<T>, cases: &[(SpectralLine, AxialIncidence)]) -> Result<Self> {
        let (line, incidence) = cases
            .first()
            .copied()
            .unwrap_or((SpectralLine::D, AxialIncidence::Marginal));
        let mut tc = TraceContext::new(design, line, incidence)?;
        let traces = cases
            .iter()
            .map(|&(line, incidence)| LineTrace::record(&mut tc, line, incidence))
            .collect();
        Ok(TraceLog { traces })
    }
    /// Writes one CSV record per traced surface
    pub fn to_writer<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        self.write_records(&mut csv::Writer::from_writer(writer))
    }
    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> csv::Result<()> {
        self.write_records(&mut csv::Writer::from_path(path)?)
    }
    fn write_records<W: io::Write>(&self, wtr: &mut csv::Writer<W>) -> csv::Result<()> {
        for trace in &self.traces {
            for s in &trace.surfaces {
                wtr.serialize(CsvRecord {
                    line: trace.line,
                    incidence: trace.incidence,
                    surface: s.surface + 1,
                    object_distance: s.object_distance.to_f64(),
                    axis_slope_angle: s.axis_slope_angle.to_f64(),
                    ray_height: s.ray_height.to_f64(),
                    to_index: s.to_index.to_f64(),
                })?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}
impl<T: Real> fmt::Display for TraceLog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trace in &self.traces {
            write!(f, "{}", trace)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::DesignEvaluation;

    #[test]
    fn evaluation_traces_match_design_evaluation() {
        let design: Design<f64> = Design::wyld();
        let log = TraceLog::evaluation(&design).unwrap();
        let mut de = DesignEvaluation::new(&design).unwrap();
        de.evaluate();
        assert_eq!(log.traces.len(), 4);
        assert_eq!(log.traces[0].object_distance, de.d_marginal_od);
        assert_eq!(log.traces[0].axis_slope_angle, de.d_marginal_sa);
        assert_eq!(log.traces[1].object_distance, de.d_paraxial_od);
        assert_eq!(log.traces[1].axis_slope_angle, de.d_paraxial_sa);
        assert_eq!(log.traces[2].object_distance, *de.c_marginal_od());
        assert_eq!(log.traces[3].object_distance, *de.f_marginal_od());
    }

    #[test]
    fn text_dump_layout() {
        let design: Design<f64> = Design::wyld();
        let log = TraceLog::evaluation(&design).unwrap();
        let text = log.traces[0].to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Tracing D (4) marginal line at height 2:");
        assert!(lines[1].starts_with("  Surface 1  object_distance = "));
        assert_eq!(
            lines[5],
            "  Result     object_distance =   47.09479120920  axis_slope_angle =    0.04178472683"
        );
    }

    #[test]
    fn csv_has_one_record_per_surface() {
        let design: Design<f64> = Design::wyld();
        let log = TraceLog::evaluation(&design).unwrap();
        let mut buffer = Vec::new();
        log.to_writer(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("line,incidence,surface,object_distance,axis_slope_angle,ray_height,to_index")
        );
        assert_eq!(lines.clone().count(), 16);
        assert!(lines.next().unwrap().starts_with("D,marginal,1,"));
    }

    #[test]
    fn empty_case_list() {
        let design: Design<f64> = Design::wyld();
        let log = TraceLog::new(&design, &[]).unwrap();
        assert!(log.traces.is_empty());
        assert_eq!(log.to_string(), "");
    }
}
