use std::sync::Arc;

use crate::assets::cache::PathCache;
use crate::assets::decode::RasterImage;
use crate::assets::path::{PathDefinition, PathId};
use crate::assets::source::{MaskId, ResourceSource};
use crate::foundation::core::{CanvasSize, TargetSize};
use crate::foundation::error::{ShapeClipError, ShapeClipResult};
use crate::geometry::corners::CornerType;
use crate::geometry::rings::Borders;
use crate::identity::TransformIdentity;
use crate::render::pool::{BufferPool, PixelBuffer};
use crate::render::{circle, mask, raster, rounded, vector};

/// Shape to clip the source image to, with its rings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// Circle inscribed in the smaller canvas side.
    Circle {
        /// Rings around the circle.
        #[serde(default)]
        borders: Borders,
    },
    /// Rectangle with some corners rounded.
    RoundedRect {
        /// Corner radius of the image area in pixels.
        radius: u32,
        /// Which corners are rounded.
        #[serde(default)]
        corners: CornerType,
        /// Rings around the rectangle.
        #[serde(default)]
        borders: Borders,
    },
    /// Shape given by the alpha channel of an external stencil.
    ExternalMask {
        /// Stencil identifier.
        mask: MaskId,
        /// Rings following the stencil outline.
        #[serde(default)]
        borders: Borders,
    },
    /// Shape given by a vector path; no path means an empty shape.
    VectorPath {
        /// Path identifier.
        #[serde(default)]
        path: Option<PathId>,
        /// Rings following the path outline.
        #[serde(default)]
        borders: Borders,
    },
}

impl ShapeSpec {
    /// Circle shape.
    pub fn circle(borders: Borders) -> Self {
        Self::Circle { borders }
    }

    /// Rounded-rectangle shape.
    pub fn rounded_rect(radius: u32, corners: CornerType, borders: Borders) -> Self {
        Self::RoundedRect {
            radius,
            corners,
            borders,
        }
    }

    /// Stencil-mask shape.
    pub fn external_mask(mask: impl Into<MaskId>, borders: Borders) -> Self {
        Self::ExternalMask {
            mask: mask.into(),
            borders,
        }
    }

    /// Vector-path shape.
    pub fn vector_path(path: Option<PathId>, borders: Borders) -> Self {
        Self::VectorPath { path, borders }
    }

    /// Parse a JSON shape description.
    pub fn from_json(json: &str) -> ShapeClipResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ShapeClipError::serde(format!("invalid shape spec: {e}")))
    }

    /// Rings of this shape.
    pub fn borders(&self) -> &Borders {
        match self {
            Self::Circle { borders }
            | Self::RoundedRect { borders, .. }
            | Self::ExternalMask { borders, .. }
            | Self::VectorPath { borders, .. } => borders,
        }
    }

    fn validate(&self) -> ShapeClipResult<()> {
        self.borders().validate()?;
        if let Self::ExternalMask { mask, .. } = self
            && mask.as_str().trim().is_empty()
        {
            return Err(ShapeClipError::validation("mask id must be non-empty"));
        }
        Ok(())
    }
}

/// Shape with its external resources loaded.
enum Resolved {
    Circle,
    Rounded { radius: u32, corners: CornerType },
    Mask(RasterImage),
    Path(Option<Arc<PathDefinition>>),
}

/// A validated, reusable shape transform.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeTransform {
    spec: ShapeSpec,
    identity: TransformIdentity,
}

impl ShapeTransform {
    /// Validate `spec` and precompute its identity.
    pub fn new(spec: ShapeSpec) -> ShapeClipResult<Self> {
        spec.validate()?;
        let identity = TransformIdentity::of(&spec);
        Ok(Self { spec, identity })
    }

    /// Normalized shape description.
    pub fn spec(&self) -> &ShapeSpec {
        &self.spec
    }

    /// Canonical identity, used as the disk-cache key.
    pub fn identity(&self) -> &TransformIdentity {
        &self.identity
    }

    /// Clip `source` to the shape at `target` size.
    ///
    /// Resources are loaded before any buffer is acquired. Every intermediate buffer goes back
    /// to `pool`, also on error; the returned buffer is owned by the caller.
    #[tracing::instrument(skip(self, source, pool, resources), fields(identity = %self.identity))]
    pub fn apply(
        &self,
        source: &RasterImage,
        target: TargetSize,
        pool: &mut dyn BufferPool,
        resources: &dyn ResourceSource,
    ) -> ShapeClipResult<PixelBuffer> {
        let canvas = target.resolve(source.width(), source.height())?;

        let resolved = match &self.spec {
            ShapeSpec::ExternalMask { mask, .. } => {
                let stencil = resources.load_mask_stencil(mask)?;
                if stencil.is_empty() {
                    return Err(ShapeClipError::resource(format!("mask '{mask}' is empty")));
                }
                Resolved::Mask(stencil)
            }
            ShapeSpec::VectorPath { path, .. } => Resolved::Path(match path {
                Some(id) => Some(PathCache::global().get_or_load(id, resources)?),
                None => None,
            }),
            ShapeSpec::Circle { .. } => Resolved::Circle,
            ShapeSpec::RoundedRect {
                radius, corners, ..
            } => Resolved::Rounded {
                radius: *radius,
                corners: *corners,
            },
        };

        let src = if source.is_empty() {
            None
        } else {
            Some(raster::upload(source, pool)?)
        };
        let out = self.render(src.as_ref(), &resolved, canvas, pool);
        if let Some(buf) = src {
            pool.release(buf);
        }
        let out = out?;
        tracing::debug!(width = out.width(), height = out.height(), "shape applied");
        Ok(out)
    }

    fn render(
        &self,
        src: Option<&PixelBuffer>,
        resolved: &Resolved,
        canvas: CanvasSize,
        pool: &mut dyn BufferPool,
    ) -> ShapeClipResult<PixelBuffer> {
        let borders = self.spec.borders();
        match resolved {
            Resolved::Circle => circle::render(src, canvas, borders, pool),
            Resolved::Rounded { radius, corners } => {
                rounded::render(src, canvas, *radius, *corners, borders, pool)
            }
            Resolved::Mask(stencil) => {
                let stencil = raster::upload(stencil, pool)?;
                let out = mask::render(src, &stencil, canvas, borders, pool);
                pool.release(stencil);
                out
            }
            Resolved::Path(def) => vector::render(src, def.as_deref(), canvas, borders, pool),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/transform.rs"]
mod tests;
