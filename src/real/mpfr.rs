use super::Real;
use rug::Float;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// MPFR float with a mantissa of `PREC` bits
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Mpfr<const PREC: u32>(pub Float);

/// Mantissa width of an x87 extended float
pub type Extended = Mpfr<64>;
/// Mantissa width of an IEEE binary128 float
pub type Quadruple = Mpfr<113>;
pub type Mpfr128 = Mpfr<128>;

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl<const PREC: u32> $trait for Mpfr<PREC> {
            type Output = Self;
            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Mpfr($trait::$method(self.0, rhs.0))
            }
        }
    };
}
forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl<const PREC: u32> Neg for Mpfr<PREC> {
    type Output = Self;
    fn neg(self) -> Self {
        Mpfr(-self.0)
    }
}

impl<const PREC: u32> Real for Mpfr<PREC> {
    fn from_f64(x: f64) -> Self {
        Mpfr(Float::with_val(PREC, x))
    }
    fn sin(&self) -> Self {
        Mpfr(self.0.clone().sin())
    }
    fn cos(&self) -> Self {
        Mpfr(self.0.clone().cos())
    }
    fn tan(&self) -> Self {
        Mpfr(self.0.clone().tan())
    }
    fn asin(&self) -> Self {
        Mpfr(self.0.clone().asin())
    }
    fn cot(&self) -> Self {
        Mpfr(self.0.clone().cot())
    }
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
    fn to_f64(&self) -> f64 {
        self.0.to_f64()
    }
    /// Scales by 10^decimals, rounds to the nearest integer and inserts the
    /// decimal point.
    fn to_fixed(&self, decimals: usize) -> String {
        let mut scale = Float::with_val(PREC, 1);
        for _ in 0..decimals {
            scale *= 10;
        }
        let scaled = (self.0.clone() * scale).round();
        let units = match scaled.to_integer() {
            Some(units) => units,
            None => return self.0.to_string(),
        };
        let sign = if self.0.is_sign_negative() { "-" } else { "" };
        let digits = format!("{:0>width$}", units.abs().to_string(), width = decimals + 1);
        let (int, frac) = digits.split_at(digits.len() - decimals);
        if decimals == 0 {
            format!("{}{}", sign, int)
        } else {
            format!("{}{}.{}", sign, int, frac)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mpfr_fixed_matches_f64() {
        for x in [47.0947912092, 0.04178472683, -0.01106960671, 0.0025, 0.0] {
            assert_eq!(Extended::from_f64(x).to_fixed(11), x.to_fixed(11));
        }
    }

    #[test]
    fn mpfr_fixed_small_negative_keeps_sign() {
        assert_eq!(Quadruple::from_f64(-1e-15).to_fixed(11), "-0.00000000000");
        assert_eq!(Quadruple::from_f64(1e-15).to_fixed(11), "0.00000000000");
    }

    #[test]
    fn mpfr_fixed_without_decimals() {
        assert_eq!(Mpfr128::from_f64(-2.6).to_fixed(0), "-3");
    }

    #[test]
    fn mpfr_arithmetic_keeps_precision() {
        let third = Mpfr128::one() / Mpfr128::from_f64(3.0);
        assert_eq!(third.0.prec(), 128);
        assert!(Mpfr128::from_f64(3.0) * third > Mpfr128::from_f64(0.999));
    }
}
