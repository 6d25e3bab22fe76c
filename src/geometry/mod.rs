//! Pure geometry: corner decomposition, ring placement and fit transforms.

/// Rounded-rectangle decomposition and outlines.
pub mod corners;
/// Aspect-preserving and stretching fits.
pub mod fit;
/// Border normalization and ring boundaries.
pub mod rings;
