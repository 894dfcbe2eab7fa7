use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fbench::{AxialIncidence, Design, DesignEvaluation, Real, SpectralLine, TraceContext};

fn evaluate<T: Real>(c: &mut Criterion, name: &str) {
    let design: Design<T> = Design::wyld();
    let mut de = DesignEvaluation::new(&design).unwrap();
    c.bench_function(name, |b| {
        b.iter(|| {
            de.evaluate();
            black_box(&de.axial_chromatic_aberration);
        })
    });
}

fn wyld_evaluation(c: &mut Criterion) {
    evaluate::<f64>(c, "evaluate double");
}

fn wyld_trace(c: &mut Criterion) {
    let design: Design<f64> = Design::wyld();
    let mut tc = TraceContext::new(&design, SpectralLine::D, AxialIncidence::Marginal).unwrap();
    let mut group = c.benchmark_group("trace line");
    for &incidence in [AxialIncidence::Marginal, AxialIncidence::Paraxial].iter() {
        group.bench_function(incidence.to_string(), |b| {
            b.iter(|| black_box(tc.reset(SpectralLine::D, incidence).trace_line()))
        });
    }
    group.finish();
}

#[cfg(feature = "mpfr")]
fn wyld_evaluation_mpfr(c: &mut Criterion) {
    use fbench::real::{Extended, Mpfr128, Quadruple};
    evaluate::<Extended>(c, "evaluate extended");
    evaluate::<Quadruple>(c, "evaluate quadruple");
    evaluate::<Mpfr128>(c, "evaluate mpfr 128");
}

#[cfg(not(feature = "mpfr"))]
criterion_group!(benches, wyld_evaluation, wyld_trace);
#[cfg(feature = "mpfr")]
criterion_group!(benches, wyld_evaluation, wyld_trace, wyld_evaluation_mpfr);
criterion_main!(benches);
