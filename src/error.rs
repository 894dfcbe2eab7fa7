use thiserror::Error;

pub type Result<T> = std::result::Result<T, DesignError>;

/// Structural errors of a lens design
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignError {
    #[error("number of surfaces ({count}) exceeds the design capacity ({capacity})")]
    TooManySurfaces { count: usize, capacity: usize },
    #[error("surface index {index} is out of range (capacity {capacity})")]
    SurfaceIndexOutOfRange { index: usize, capacity: usize },
    #[error("surface {index} has not been set")]
    MissingSurface { index: usize },
    #[error("surface {index} is glass with a zero dispersion")]
    ZeroDispersion { index: usize },
}
impl DesignError {
    /// `true` for the capacity violations
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            DesignError::TooManySurfaces { .. } | DesignError::SurfaceIndexOutOfRange { .. }
        )
    }
}
