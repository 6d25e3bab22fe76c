//! Shapeclip clips a decoded image to a shape and frames it with up to two concentric rings.
//!
//! Supported shapes are a circle, a rounded rectangle with any of fifteen corner selections, the
//! alpha channel of an external stencil image, and a vector path. Rings follow the shape outline
//! inward from the canvas edge; the image fills what is left.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: a [`ShapeSpec`] (serde-tagged, readable from JSON) names the shape and rings.
//! 2. **Validate**: [`ShapeTransform::new`] checks the spec and computes its
//!    [`TransformIdentity`], the disk-cache key.
//! 3. **Apply**: [`ShapeTransform::apply`] loads stencils or paths through a
//!    [`ResourceSource`], draws into buffers from a [`BufferPool`] and returns the composited
//!    [`PixelBuffer`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs produce identical pixels.
//! - **No IO in renderers**: resources are loaded before any buffer is acquired.
//! - **Premultiplied RGBA8** output; [`to_rgba_image`] converts back to straight alpha.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod geometry;
mod identity;
mod render;
mod transform;

/// Raster backend used for [`PixelBuffer`].
pub use resvg::tiny_skia;

pub use assets::cache::PathCache;
pub use assets::decode::{RasterImage, decode_image};
pub use assets::path::{PathDefinition, PathId};
pub use assets::source::{
    DirResources, MaskId, MemoryResources, ResourceSource, normalize_rel_path,
};
pub use foundation::core::{Affine, BezPath, CanvasSize, Point, Rect, Rgba8, TargetSize, Vec2};
pub use foundation::error::{ShapeClipError, ShapeClipResult};
pub use geometry::corners::{
    CornerType, Corners, Primitive, corner_outline, decompose, rounded_rect_path, union_path,
};
pub use geometry::fit::{PathFit, cover, stretch};
pub use geometry::rings::{Border, Borders, RingGeometry, RingInsets, RingStroke};
pub use identity::{IdentityDigest, TransformIdentity};
pub use render::pool::{
    BoundedPool, BoundedPoolOpts, BufferPool, HeapPool, PixelBuffer, PoolStats,
};
pub use render::raster::to_rgba_image;
pub use transform::{ShapeSpec, ShapeTransform};
