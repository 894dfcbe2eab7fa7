use crate::Real;
use serde::Serialize;
use std::fmt;

/// Standard spectral lines
///
/// The C, D and F lines drive the chromatic correction of the refractive
/// index; the others are kept for completeness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SpectralLine {
    A,
    B,
    C,
    D,
    E,
    F,
    #[serde(rename = "G'")]
    GPrime,
    H,
}
impl SpectralLine {
    pub const ALL: [SpectralLine; 8] = [
        SpectralLine::A,
        SpectralLine::B,
        SpectralLine::C,
        SpectralLine::D,
        SpectralLine::E,
        SpectralLine::F,
        SpectralLine::GPrime,
        SpectralLine::H,
    ];
    /// Wavelength [Angstrom]
    pub const fn angstroms(self) -> f64 {
        match self {
            SpectralLine::A => 7621.0,
            SpectralLine::B => 6869.955,
            SpectralLine::C => 6562.816,
            SpectralLine::D => 5895.944,
            SpectralLine::E => 5269.557,
            SpectralLine::F => 4861.344,
            SpectralLine::GPrime => 4340.477,
            SpectralLine::H => 3968.494,
        }
    }
    pub fn wavelength<T: Real>(self) -> T {
        T::from_f64(self.angstroms())
    }
    /// Position of the line in the A..H sequence, starting at 1
    pub fn ordinal(self) -> usize {
        self as usize + 1
    }
    /// Single letter used by the per-surface trace dump
    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}
impl fmt::Display for SpectralLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectralLine::GPrime => write!(f, "G'"),
            line => write!(f, "{}", line.letter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wavelengths_decrease_from_a_to_h() {
        let w: Vec<f64> = SpectralLine::ALL.iter().map(|l| l.angstroms()).collect();
        assert!(w.windows(2).all(|p| p[0] > p[1]));
    }

    #[test]
    fn reference_lines() {
        assert_eq!(SpectralLine::C.wavelength::<f64>(), 6562.816);
        assert_eq!(SpectralLine::D.wavelength::<f64>(), 5895.944);
        assert_eq!(SpectralLine::F.wavelength::<f64>(), 4861.344);
    }

    #[test]
    fn letters_and_ordinals() {
        assert_eq!(SpectralLine::D.letter(), 'D');
        assert_eq!(SpectralLine::D.ordinal(), 4);
        assert_eq!(SpectralLine::F.ordinal(), 6);
        assert_eq!(SpectralLine::GPrime.letter(), 'G');
        assert_eq!(SpectralLine::GPrime.to_string(), "G'");
        assert_eq!(SpectralLine::H.to_string(), "H");
    }
}
