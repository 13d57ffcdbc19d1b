//! Error types for strip building.

use thiserror::Error;

/// Result type alias for strip operations.
pub type StripResult<T> = Result<T, StripError>;

/// Errors that can occur while building triangle strips.
///
/// Only malformed input and (in strict mode) non-manifold topology are
/// reported here. Anything else the strip builder runs into is a defect in
/// the builder itself and panics.
#[derive(Debug, Error)]
pub enum StripError {
    /// Index list length is not a multiple of 3.
    #[error("index list length {len} is not a multiple of 3")]
    InvalidInput { len: usize },

    /// An edge is shared by more than two triangles (strict mode only).
    #[error("edge ({v0}, {v1}) is shared by {triangle_count} triangles")]
    NonManifoldTopology {
        v0: u32,
        v1: u32,
        triangle_count: usize,
    },

    /// A parameter document could not be parsed or written.
    #[cfg(feature = "config")]
    #[error("invalid strip parameters: {details}")]
    Config { details: String },
}
