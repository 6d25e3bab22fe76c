//! Shape renderers and the pixel plumbing they share.

pub(crate) mod circle;
pub mod composite;
pub(crate) mod mask;
pub mod pool;
pub(crate) mod raster;
pub(crate) mod rounded;
pub(crate) mod vector;
