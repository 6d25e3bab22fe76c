use std::fmt;

use anyhow::Context;
use resvg::tiny_skia::PathSegment;

use crate::foundation::core::{Affine, BezPath, Point};
use crate::foundation::error::{ShapeClipError, ShapeClipResult};

/// Identifier of a vector path definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PathId(String);

impl PathId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Immutable closed outline with its bounding size in path units.
#[derive(Clone, Debug, PartialEq)]
pub struct PathDefinition {
    outline: BezPath,
    width: f64,
    height: f64,
}

impl PathDefinition {
    /// Build a definition from an outline and its reference size.
    pub fn new(outline: BezPath, width: f64, height: f64) -> ShapeClipResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ShapeClipError::validation(format!(
                "path size must be positive and finite, got {width}x{height}"
            )));
        }
        if outline.elements().is_empty() {
            return Err(ShapeClipError::validation("path outline must be non-empty"));
        }
        Ok(Self {
            outline,
            width,
            height,
        })
    }

    /// Parse SVG path data (`d` attribute syntax) with an explicit reference size.
    pub fn from_path_data(d: &str, width: f64, height: f64) -> ShapeClipResult<Self> {
        let d = d.trim();
        if d.is_empty() {
            return Err(ShapeClipError::validation("path data must be non-empty"));
        }
        let outline = BezPath::from_svg(d)
            .map_err(|e| ShapeClipError::validation(format!("invalid path data: {e}")))?;
        Self::new(outline, width, height)
    }

    /// Parse an SVG document, merging every path into one outline sized to the document.
    pub fn from_svg(bytes: &[u8]) -> ShapeClipResult<Self> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
        let mut outline = BezPath::new();
        collect_group(tree.root(), &mut outline);
        let size = tree.size();
        Self::new(outline, f64::from(size.width()), f64::from(size.height()))
    }

    /// Outline in path units.
    pub fn outline(&self) -> &BezPath {
        &self.outline
    }

    /// Reference width in path units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Reference height in path units.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Outline mapped through `transform`.
    pub fn transformed(&self, transform: Affine) -> BezPath {
        transform * self.outline.clone()
    }
}

fn collect_group(group: &usvg::Group, out: &mut BezPath) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_group(g, out),
            usvg::Node::Path(p) => append_usvg_path(p, out),
            _ => {}
        }
    }
}

fn append_usvg_path(path: &usvg::Path, out: &mut BezPath) {
    let ts = path.abs_transform();
    let affine = Affine::new([
        f64::from(ts.sx),
        f64::from(ts.ky),
        f64::from(ts.kx),
        f64::from(ts.sy),
        f64::from(ts.tx),
        f64::from(ts.ty),
    ]);
    let pt = |p: resvg::tiny_skia::Point| affine * Point::new(f64::from(p.x), f64::from(p.y));
    for seg in path.data().segments() {
        match seg {
            PathSegment::MoveTo(p) => out.move_to(pt(p)),
            PathSegment::LineTo(p) => out.line_to(pt(p)),
            PathSegment::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathSegment::CubicTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathSegment::Close => out.close_path(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/path.rs"]
mod tests;
