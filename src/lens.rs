use crate::error::{DesignError, Result};
use crate::Real;
use std::fmt;

/// Maximum number of surfaces in a [`Design`]
pub const MAX_SURFACES: usize = 10;

/// Clear aperture of the Wyld objective [inch]
pub const WYLD_CLEAR_APERTURE: f64 = 4.0;

/// Wyld's 4 inch f/12 achromatic objective from Amateur Telescope Making
///
/// One row per surface: curvature radius, index of refraction, dispersion,
/// edge thickness.
pub const WYLD_PRESCRIPTION: [[f64; 4]; 4] = [
    [27.05, 1.5137, 63.6, 0.52],
    [-16.68, 1.0, 0.0, 0.138],
    [-16.68, 1.6164, 36.7, 0.38],
    [-78.1, 1.0, 0.0, 0.0],
];

/// Boundary between two media of a [`Design`]
#[derive(Clone, Debug, PartialEq)]
pub struct Surface<T: Real> {
    curvature_radius: T,
    index_of_refraction: T,
    dispersion: T,
    edge_thickness: T,
}
impl<T: Real> Surface<T> {
    /// Creates a new surface, a zero `curvature_radius` being a flat surface and
    /// an `index_of_refraction` of 1 being air
    pub fn new(curvature_radius: T, index_of_refraction: T, dispersion: T, edge_thickness: T) -> Self {
        Surface {
            curvature_radius,
            index_of_refraction,
            dispersion,
            edge_thickness,
        }
    }
    /// Creates a surface from a prescription row `[radius, index, dispersion, thickness]`
    pub fn from_prescription(row: &[f64; 4]) -> Self {
        Surface::new(
            T::from_f64(row[0]),
            T::from_f64(row[1]),
            T::from_f64(row[2]),
            T::from_f64(row[3]),
        )
    }
    pub fn curvature_radius(&self) -> &T {
        &self.curvature_radius
    }
    pub fn index_of_refraction(&self) -> &T {
        &self.index_of_refraction
    }
    pub fn dispersion(&self) -> &T {
        &self.dispersion
    }
    pub fn edge_thickness(&self) -> &T {
        &self.edge_thickness
    }
    pub fn is_flat(&self) -> bool {
        self.curvature_radius.is_zero()
    }
    /// `true` if the medium behind the surface is glass rather than air
    pub fn is_glass(&self) -> bool {
        self.index_of_refraction > T::one()
    }
}

/// Optical assembly: a clear aperture and up to [`MAX_SURFACES`] surfaces
/// traversed front to back
#[derive(Clone, Debug)]
pub struct Design<T: Real> {
    clear_aperture: T,
    n_surface: usize,
    surfaces: [Option<Surface<T>>; MAX_SURFACES],
}
impl<T: Real> Design<T> {
    /// Creates an empty design of `n_surface` surfaces to be filled with [`Design::set_surf`]
    pub fn new(clear_aperture: T, n_surface: usize) -> Result<Self> {
        if n_surface > MAX_SURFACES {
            return Err(DesignError::TooManySurfaces {
                count: n_surface,
                capacity: MAX_SURFACES,
            });
        }
        Ok(Design {
            clear_aperture,
            n_surface,
            surfaces: std::array::from_fn(|_| None),
        })
    }
    /// Creates a design from prescription rows, see [`Surface::from_prescription`]
    pub fn from_prescription(clear_aperture: f64, rows: &[[f64; 4]]) -> Result<Self> {
        let mut design = Design::new(T::from_f64(clear_aperture), rows.len())?;
        for (index, row) in rows.iter().enumerate() {
            design.set_surf(index, Surface::from_prescription(row))?;
        }
        Ok(design)
    }
    /// The benchmark design, see [`WYLD_PRESCRIPTION`]
    pub fn wyld() -> Self {
        let mut surfaces: [Option<Surface<T>>; MAX_SURFACES] = std::array::from_fn(|_| None);
        for (slot, row) in surfaces.iter_mut().zip(WYLD_PRESCRIPTION.iter()) {
            *slot = Some(Surface::from_prescription(row));
        }
        Design {
            clear_aperture: T::from_f64(WYLD_CLEAR_APERTURE),
            n_surface: WYLD_PRESCRIPTION.len(),
            surfaces,
        }
    }
    /// Places `surface` at `index`, replacing any surface already there
    pub fn set_surf(&mut self, index: usize, surface: Surface<T>) -> Result<&mut Self> {
        match self.surfaces.get_mut(index) {
            Some(slot) => {
                *slot = Some(surface);
                Ok(self)
            }
            None => Err(DesignError::SurfaceIndexOutOfRange {
                index,
                capacity: MAX_SURFACES,
            }),
        }
    }
    pub fn clear_aperture(&self) -> &T {
        &self.clear_aperture
    }
    pub fn n_surface(&self) -> usize {
        self.n_surface
    }
    /// Returns the surface at `index`, `None` past the surface count or if it is unset
    pub fn surface(&self, index: usize) -> Option<&Surface<T>> {
        if index < self.n_surface {
            self.surfaces[index].as_ref()
        } else {
            None
        }
    }
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface<T>> {
        self.surfaces[..self.n_surface].iter().flatten()
    }
    /// Checks that the design can be traced
    pub fn check(&self) -> Result<()> {
        for index in 0..self.n_surface {
            match &self.surfaces[index] {
                None => return Err(DesignError::MissingSurface { index }),
                Some(surface) if surface.is_glass() && surface.dispersion.is_zero() => {
                    return Err(DesignError::ZeroDispersion { index })
                }
                Some(_) => (),
            }
        }
        log::debug!(
            "design checked: {} surfaces, clear aperture {}",
            self.n_surface,
            self.clear_aperture.to_fixed(3)
        );
        Ok(())
    }
}
impl<T: Real> fmt::Display for Design<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Clear aperture: {}", self.clear_aperture.to_fixed(4))?;
        writeln!(
            f,
            " Surf      Radius           Index        Dispersion       Edge Thick"
        )?;
        for index in 0..self.n_surface {
            match &self.surfaces[index] {
                Some(s) => writeln!(
                    f,
                    "  {}: {:>12} {:>15} {:>17} {:>16}",
                    index,
                    s.curvature_radius.to_fixed(4),
                    s.index_of_refraction.to_fixed(4),
                    s.dispersion.to_fixed(4),
                    s.edge_thickness.to_fixed(4)
                )?,
                None => writeln!(f, "  {}: (unset)", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wyld_design() {
        let design: Design<f64> = Design::wyld();
        assert_eq!(design.n_surface(), 4);
        assert_eq!(*design.clear_aperture(), 4.0);
        assert!(design.check().is_ok());
        let glass: Vec<bool> = design.surfaces().map(|s| s.is_glass()).collect();
        assert_eq!(glass, vec![true, false, true, false]);
        assert_eq!(*design.surface(2).unwrap().dispersion(), 36.7);
        assert!(design.surface(4).is_none());
    }

    #[test]
    fn wyld_matches_prescription_builder() {
        let built: Design<f64> = Design::from_prescription(WYLD_CLEAR_APERTURE, &WYLD_PRESCRIPTION).unwrap();
        let wyld: Design<f64> = Design::wyld();
        assert!(built.surfaces().eq(wyld.surfaces()));
    }

    #[test]
    fn too_many_surfaces() {
        let err = Design::<f64>::new(4.0, 11).unwrap_err();
        assert_eq!(
            err,
            DesignError::TooManySurfaces {
                count: 11,
                capacity: MAX_SURFACES
            }
        );
        assert!(err.is_out_of_range());
        assert!(Design::<f64>::new(4.0, MAX_SURFACES).is_ok());
    }

    #[test]
    fn surface_index_out_of_range() {
        let mut design = Design::<f64>::new(4.0, 4).unwrap();
        let err = design
            .set_surf(10, Surface::new(1.0, 1.0, 0.0, 0.0))
            .unwrap_err();
        assert!(err.is_out_of_range());
        assert!(design.set_surf(9, Surface::new(1.0, 1.0, 0.0, 0.0)).is_ok());
    }

    #[test]
    fn missing_surface() {
        let mut design = Design::<f64>::new(4.0, 2).unwrap();
        design.set_surf(0, Surface::new(10.0, 1.5, 60.0, 0.2)).unwrap();
        assert_eq!(design.check(), Err(DesignError::MissingSurface { index: 1 }));
        assert!(!design.check().unwrap_err().is_out_of_range());
    }

    #[test]
    fn zero_dispersion_glass() {
        let design = Design::<f64>::from_prescription(2.0, &[[10.0, 1.5, 0.0, 0.2], [0.0, 1.0, 0.0, 0.0]]).unwrap();
        assert_eq!(design.check(), Err(DesignError::ZeroDispersion { index: 0 }));
    }

    #[test]
    fn display_lists_surfaces() {
        let design: Design<f64> = Design::wyld();
        let dump = design.to_string();
        assert!(dump.starts_with("Clear aperture: 4.0000\n"));
        assert_eq!(dump.lines().count(), 6);
        assert!(dump.contains("-78.1000"));
    }
}
