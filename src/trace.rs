use crate::error::Result;
use crate::lens::Design;
use crate::spectral::SpectralLine;
use crate::Real;
use serde::Serialize;
use std::fmt;

/// Axial incidence of a traced ray
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxialIncidence {
    /// Exact trigonometric trace of a ray at the edge of the aperture
    Marginal,
    /// Small angle approximation of the trace
    Paraxial,
}
impl AxialIncidence {
    /// The refraction at a surface for this incidence
    pub fn transition<T: Real>(self) -> Transition<T> {
        match self {
            AxialIncidence::Marginal => marginal::<T>,
            AxialIncidence::Paraxial => paraxial::<T>,
        }
    }
}
impl fmt::Display for AxialIncidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxialIncidence::Marginal => write!(f, "marginal"),
            AxialIncidence::Paraxial => write!(f, "paraxial"),
        }
    }
}

/// Geometry of a ray at a surface
#[derive(Clone, Debug, PartialEq)]
pub struct Ray<T: Real> {
    /// Distance from the surface vertex to the object focus, 0 for parallel rays
    pub object_distance: T,
    /// Height of the ray from the axis, only used when `object_distance` is 0
    pub ray_height: T,
    /// Angle the ray makes with the axis
    pub axis_slope_angle: T,
}
impl<T: Real> Ray<T> {
    pub fn parallel(ray_height: T) -> Self {
        Ray {
            object_distance: T::zero(),
            ray_height,
            axis_slope_angle: T::zero(),
        }
    }
}

/// Refraction of a ray at a surface of curvature `radius` going from a medium
/// of index `from_index` into one of index `to_index`
pub type Transition<T> = fn(&Ray<T>, &T, &T, &T) -> Ray<T>;

/// Paraxial refraction at a surface
pub fn paraxial<T: Real>(ray: &Ray<T>, radius: &T, from_index: &T, to_index: &T) -> Ray<T> {
    let Ray {
        object_distance: od,
        ray_height: rh,
        axis_slope_angle: asa,
    } = ray.clone();
    if radius.is_zero() {
        return Ray {
            object_distance: od * (to_index.clone() / from_index.clone()),
            ray_height: rh,
            axis_slope_angle: asa * (from_index.clone() / to_index.clone()),
        };
    }
    let r = radius.clone();
    let odz = od.is_zero();
    let asaprime = if odz { T::zero() } else { asa.clone() };
    let iangsin = if odz {
        rh.clone() / r
    } else {
        ((od.clone() - r.clone()) / r) * asa
    };
    let rangsin = (from_index.clone() / to_index.clone()) * iangsin.clone();
    let asadoubleprime = asaprime.clone() + iangsin - rangsin;
    let rayheightprime = if odz { rh } else { od * asaprime };
    Ray {
        object_distance: rayheightprime.clone() / asadoubleprime.clone(),
        ray_height: rayheightprime,
        axis_slope_angle: asadoubleprime,
    }
}

/// Exact trigonometric refraction at a surface
pub fn marginal<T: Real>(ray: &Ray<T>, radius: &T, from_index: &T, to_index: &T) -> Ray<T> {
    let Ray {
        object_distance: od,
        ray_height: rh,
        axis_slope_angle: asa,
    } = ray.clone();
    if radius.is_zero() {
        let rang = -(from_index.clone() / to_index.clone()).asin() * asa.sin();
        return Ray {
            object_distance: od
                * ((to_index.clone() * (-rang.clone()).cos())
                    / (from_index.clone() * asa.cos())),
            ray_height: rh,
            axis_slope_angle: -rang,
        };
    }
    let r = radius.clone();
    let odz = od.is_zero();
    let asaprime = if odz { T::zero() } else { asa.clone() };
    let iangsin = if odz {
        rh.clone() / r.clone()
    } else {
        ((od.clone() - r.clone()) / r.clone()) * asa.sin()
    };
    let iang = iangsin.asin();
    let rangsin = (from_index.clone() / to_index.clone()) * iangsin;
    let asadoubleprime = asaprime.clone() + iang.clone() - rangsin.asin();
    let sinasaiang = ((asaprime.clone() + iang.clone()) / T::from_f64(2.0)).sin();
    let sagitta = T::from_f64(2.0) * r.clone() * sinasaiang.clone() * sinasaiang;
    let rayheightprime = if odz { rh } else { od * asaprime.clone() };
    Ray {
        object_distance: ((r * (asaprime + iang).sin()) * asadoubleprime.cot()) + sagitta,
        ray_height: rayheightprime,
        axis_slope_angle: asadoubleprime,
    }
}

/// Index of refraction of a glass of base index `index` and `dispersion` at the wavelength `line`
pub fn chromatic_index<T: Real>(index: &T, dispersion: &T, line: &T) -> T {
    let d = SpectralLine::D.wavelength::<T>();
    let c = SpectralLine::C.wavelength::<T>();
    let f = SpectralLine::F.wavelength::<T>();
    index.clone() + ((d - line.clone()) / (c - f)) * ((index.clone() - T::one()) / dispersion.clone())
}

/// State of a ray right after its refraction at a surface
#[derive(Debug)]
pub struct SurfaceStep<'s, T: Real> {
    /// Surface index, starting at 0
    pub surface: usize,
    pub line: SpectralLine,
    pub incidence: AxialIncidence,
    /// Ray leaving the surface, before the edge thickness is taken off the object distance
    pub ray: &'s Ray<T>,
    pub to_index: &'s T,
}

/// Ray trace of one spectral line through a [`Design`]
///
/// The context is walked surface by surface with [`TraceContext::transit_surface`]
/// and must be [`reset`](TraceContext::reset) before tracing another line.
pub struct TraceContext<'a, T: Real> {
    design: &'a Design<T>,
    incidence: AxialIncidence,
    line: SpectralLine,
    wavelength: T,
    transition: Transition<T>,
    c_surf: usize,
    radius_of_curvature: T,
    ray: Ray<T>,
    from_index: T,
    to_index: T,
}
impl<'a, T: Real> TraceContext<'a, T> {
    /// Creates a context at the first surface of `design`
    pub fn new(design: &'a Design<T>, line: SpectralLine, incidence: AxialIncidence) -> Result<Self> {
        design.check()?;
        Ok(TraceContext {
            design,
            incidence,
            line,
            wavelength: line.wavelength(),
            transition: incidence.transition(),
            c_surf: 0,
            radius_of_curvature: T::zero(),
            ray: Ray::parallel(design.clear_aperture().clone() / T::from_f64(2.0)),
            from_index: T::one(),
            to_index: T::zero(),
        })
    }
    /// Resets the context to the first surface for a new line and incidence
    pub fn reset(&mut self, line: SpectralLine, incidence: AxialIncidence) -> &mut Self {
        self.incidence = incidence;
        self.line = line;
        self.wavelength = line.wavelength();
        self.transition = incidence.transition();
        self.c_surf = 0;
        self.radius_of_curvature = T::zero();
        self.ray = Ray::parallel(self.design.clear_aperture().clone() / T::from_f64(2.0));
        self.from_index = T::one();
        self.to_index = T::zero();
        self
    }
    pub fn design(&self) -> &'a Design<T> {
        self.design
    }
    pub fn line(&self) -> SpectralLine {
        self.line
    }
    pub fn incidence(&self) -> AxialIncidence {
        self.incidence
    }
    /// Index of the next surface to transit
    pub fn cursor(&self) -> usize {
        self.c_surf
    }
    pub fn ray(&self) -> &Ray<T> {
        &self.ray
    }
    pub fn object_distance(&self) -> &T {
        &self.ray.object_distance
    }
    pub fn axis_slope_angle(&self) -> &T {
        &self.ray.axis_slope_angle
    }
    pub fn is_terminal(&self) -> bool {
        self.c_surf >= self.design.n_surface()
    }
    /// Transits the current surface, returning `true` once the last surface has been traversed
    pub fn transit_surface(&mut self) -> bool {
        self.transit_observed(&mut |_| ())
    }
    fn transit_observed<F>(&mut self, observe: &mut F) -> bool
    where
        F: FnMut(SurfaceStep<'_, T>),
    {
        let design = self.design;
        let surface = match design.surface(self.c_surf) {
            Some(surface) => surface,
            None => return true,
        };
        self.radius_of_curvature = surface.curvature_radius().clone();
        self.to_index = if surface.is_glass() {
            chromatic_index(surface.index_of_refraction(), surface.dispersion(), &self.wavelength)
        } else {
            surface.index_of_refraction().clone()
        };
        self.ray = (self.transition)(
            &self.ray,
            &self.radius_of_curvature,
            &self.from_index,
            &self.to_index,
        );
        observe(SurfaceStep {
            surface: self.c_surf,
            line: self.line,
            incidence: self.incidence,
            ray: &self.ray,
            to_index: &self.to_index,
        });
        self.from_index = self.to_index.clone();
        self.ray.object_distance = self.ray.object_distance.clone() - surface.edge_thickness().clone();
        self.c_surf += 1;
        log::trace!("{} {} surface {}: {}", self.line, self.incidence, self.c_surf, self);
        self.is_terminal()
    }
    /// Traces the line through all remaining surfaces and returns the final
    /// object distance and axis slope angle
    pub fn trace_line(&mut self) -> (T, T) {
        self.trace_line_with(|_| ())
    }
    /// Same as [`TraceContext::trace_line`], calling `observe` after the
    /// refraction at each surface
    pub fn trace_line_with<F>(&mut self, mut observe: F) -> (T, T)
    where
        F: FnMut(SurfaceStep<'_, T>),
    {
        while !self.transit_observed(&mut observe) {}
        (
            self.ray.object_distance.clone(),
            self.ray.axis_slope_angle.clone(),
        )
    }
}
impl<'a, T: Real> fmt::Display for TraceContext<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OD: {}  SA: {}  ROC: {}  RH: {}  FI: {}  TI: {}",
            self.ray.object_distance.to_fixed(13),
            self.ray.axis_slope_angle.to_fixed(13),
            self.radius_of_curvature.to_fixed(13),
            self.ray.ray_height.to_fixed(13),
            self.from_index.to_fixed(13),
            self.to_index.to_fixed(13)
        )
    }
}
