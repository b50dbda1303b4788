use thiserror::Error;

/// Errors returned by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ResolveError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or NaN
    #[error("invalid coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("no candidate locations to search")]
    EmptyCandidateSet,
}
