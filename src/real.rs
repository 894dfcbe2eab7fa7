use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "mpfr")]
pub mod mpfr;

#[cfg(feature = "mpfr")]
pub use self::mpfr::{Extended, Mpfr, Mpfr128, Quadruple};

/// Real number representation used by the ray trace
///
/// Every numeric type of the crate ([`Surface`](crate::Surface),
/// [`Design`](crate::Design), [`TraceContext`](crate::TraceContext),
/// [`DesignEvaluation`](crate::DesignEvaluation)) is generic over `Real`, so
/// the same recurrence runs in double precision or, with the `mpfr` feature,
/// in any MPFR precision.
pub trait Real:
    Clone
    + PartialOrd
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Converts a double literal into this representation
    fn from_f64(x: f64) -> Self;
    fn zero() -> Self {
        Self::from_f64(0.0)
    }
    fn one() -> Self {
        Self::from_f64(1.0)
    }
    fn sin(&self) -> Self;
    fn cos(&self) -> Self;
    fn tan(&self) -> Self;
    fn asin(&self) -> Self;
    /// Cotangent, `1/tan(x)` unless the representation provides its own
    fn cot(&self) -> Self {
        Self::one() / self.tan()
    }
    fn is_zero(&self) -> bool;
    /// Nearest double, for exports that are not part of the validated report
    fn to_f64(&self) -> f64;
    /// Fixed-point text with `decimals` digits after the decimal point
    fn to_fixed(&self, decimals: usize) -> String;
}

impl Real for f64 {
    #[inline]
    fn from_f64(x: f64) -> f64 {
        x
    }
    #[inline]
    fn sin(&self) -> f64 {
        f64::sin(*self)
    }
    #[inline]
    fn cos(&self) -> f64 {
        f64::cos(*self)
    }
    #[inline]
    fn tan(&self) -> f64 {
        f64::tan(*self)
    }
    #[inline]
    fn asin(&self) -> f64 {
        f64::asin(*self)
    }
    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
    fn to_f64(&self) -> f64 {
        *self
    }
    fn to_fixed(&self, decimals: usize) -> String {
        format!("{:.*}", decimals, self)
    }
}

/// Real number representations selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Representation {
    /// Native double precision
    Double,
    /// 64 bit mantissa
    #[cfg(feature = "mpfr")]
    Extended,
    /// 113 bit mantissa
    #[cfg(feature = "mpfr")]
    Quadruple,
    /// 128 bit mantissa
    #[cfg(feature = "mpfr")]
    Mpfr,
}
impl Representation {
    pub fn name(self) -> &'static str {
        match self {
            Representation::Double => "double",
            #[cfg(feature = "mpfr")]
            Representation::Extended => "extended",
            #[cfg(feature = "mpfr")]
            Representation::Quadruple => "quadruple",
            #[cfg(feature = "mpfr")]
            Representation::Mpfr => "mpfr",
        }
    }
    /// Mantissa width [bit]
    pub fn precision(self) -> u32 {
        match self {
            Representation::Double => f64::MANTISSA_DIGITS,
            #[cfg(feature = "mpfr")]
            Representation::Extended => 64,
            #[cfg(feature = "mpfr")]
            Representation::Quadruple => 113,
            #[cfg(feature = "mpfr")]
            Representation::Mpfr => 128,
        }
    }
}
impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bit)", self.name(), self.precision())
    }
}

/// Formats a value right-aligned in a field of `width` characters
pub fn fixed_width<T: Real>(x: &T, width: usize, decimals: usize) -> String {
    format!("{:>width$}", x.to_fixed(decimals), width = width)
}
