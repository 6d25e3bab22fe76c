//! Rounded-rectangle decomposition for the corner-type family.
//!
//! Each [`CornerType`] maps to a fixed table of templates. A template names its four edges
//! symbolically (start, start + r, start + 2r, end - 2r, end - r, end) so one table covers every
//! size, radius and inset. Rounded templates come first; the straight rectangles that follow only
//! cover interior regions, and the renderer fills the whole set as one non-zero path so shared
//! edges are never painted twice.

use crate::foundation::core::{BezPath, Point, Rect};

/// Cubic Bezier handle length for a quarter circle.
const KAPPA: f64 = 0.552_284_749_830_793_6;

/// Which corners of a rectangle are rounded.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CornerType {
    /// All four corners.
    #[default]
    All,
    /// Top-left corner only.
    TopLeft,
    /// Top-right corner only.
    TopRight,
    /// Bottom-left corner only.
    BottomLeft,
    /// Bottom-right corner only.
    BottomRight,
    /// Both top corners.
    Top,
    /// Both bottom corners.
    Bottom,
    /// Both left corners.
    Left,
    /// Both right corners.
    Right,
    /// Every corner except top-left.
    OtherTopLeft,
    /// Every corner except top-right.
    OtherTopRight,
    /// Every corner except bottom-left.
    OtherBottomLeft,
    /// Every corner except bottom-right.
    OtherBottomRight,
    /// Top-left and bottom-right.
    DiagonalFromTopLeft,
    /// Top-right and bottom-left.
    DiagonalFromTopRight,
}

/// Rounded flags per corner, clockwise from top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Corners {
    /// Top-left corner is rounded.
    pub top_left: bool,
    /// Top-right corner is rounded.
    pub top_right: bool,
    /// Bottom-right corner is rounded.
    pub bottom_right: bool,
    /// Bottom-left corner is rounded.
    pub bottom_left: bool,
}

impl Corners {
    const fn new(top_left: bool, top_right: bool, bottom_right: bool, bottom_left: bool) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Per-corner radii `[tl, tr, br, bl]`, zero for square corners.
    pub fn radii(self, radius: f64) -> [f64; 4] {
        let pick = |rounded: bool| if rounded { radius } else { 0.0 };
        [
            pick(self.top_left),
            pick(self.top_right),
            pick(self.bottom_right),
            pick(self.bottom_left),
        ]
    }
}

impl CornerType {
    /// Every variant, in declaration order.
    pub const VARIANTS: [Self; 15] = [
        Self::All,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::OtherTopLeft,
        Self::OtherTopRight,
        Self::OtherBottomLeft,
        Self::OtherBottomRight,
        Self::DiagonalFromTopLeft,
        Self::DiagonalFromTopRight,
    ];

    /// Stable upper-case name used in identities.
    pub fn name(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::TopLeft => "TOP_LEFT",
            Self::TopRight => "TOP_RIGHT",
            Self::BottomLeft => "BOTTOM_LEFT",
            Self::BottomRight => "BOTTOM_RIGHT",
            Self::Top => "TOP",
            Self::Bottom => "BOTTOM",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::OtherTopLeft => "OTHER_TOP_LEFT",
            Self::OtherTopRight => "OTHER_TOP_RIGHT",
            Self::OtherBottomLeft => "OTHER_BOTTOM_LEFT",
            Self::OtherBottomRight => "OTHER_BOTTOM_RIGHT",
            Self::DiagonalFromTopLeft => "DIAGONAL_FROM_TOP_LEFT",
            Self::DiagonalFromTopRight => "DIAGONAL_FROM_TOP_RIGHT",
        }
    }

    /// Which corners this variant rounds.
    pub fn rounded_corners(self) -> Corners {
        match self {
            Self::All => Corners::new(true, true, true, true),
            Self::TopLeft => Corners::new(true, false, false, false),
            Self::TopRight => Corners::new(false, true, false, false),
            Self::BottomLeft => Corners::new(false, false, false, true),
            Self::BottomRight => Corners::new(false, false, true, false),
            Self::Top => Corners::new(true, true, false, false),
            Self::Bottom => Corners::new(false, false, true, true),
            Self::Left => Corners::new(true, false, false, true),
            Self::Right => Corners::new(false, true, true, false),
            Self::OtherTopLeft => Corners::new(false, true, true, true),
            Self::OtherTopRight => Corners::new(true, false, true, true),
            Self::OtherBottomLeft => Corners::new(true, true, true, false),
            Self::OtherBottomRight => Corners::new(true, true, false, true),
            Self::DiagonalFromTopLeft => Corners::new(true, false, true, false),
            Self::DiagonalFromTopRight => Corners::new(false, true, false, true),
        }
    }

    fn templates(self) -> &'static [Template] {
        use Edge::{End, EndD, EndR, Start, StartD, StartR};
        match self {
            Self::All => const { &[round(Start, Start, End, End)] },
            Self::TopLeft => const {
                &[
                    round(Start, Start, StartD, StartD),
                    fill(Start, StartR, StartR, End),
                    fill(StartR, Start, End, End),
                ]
            },
            Self::TopRight => const {
                &[
                    round(EndD, Start, End, StartD),
                    fill(Start, Start, EndR, End),
                    fill(EndR, StartR, End, End),
                ]
            },
            Self::BottomLeft => const {
                &[
                    round(Start, EndD, StartD, End),
                    fill(Start, Start, StartR, EndR),
                    fill(StartR, Start, End, End),
                ]
            },
            Self::BottomRight => const {
                &[
                    round(EndD, EndD, End, End),
                    fill(Start, Start, EndR, End),
                    fill(EndR, Start, End, EndR),
                ]
            },
            Self::Top => const { &[round(Start, Start, End, StartD), fill(Start, StartR, End, End)] },
            Self::Bottom => const { &[round(Start, EndD, End, End), fill(Start, Start, End, EndR)] },
            Self::Left => const { &[round(Start, Start, StartD, End), fill(StartR, Start, End, End)] },
            Self::Right => const { &[round(EndD, Start, End, End), fill(Start, Start, EndR, End)] },
            Self::OtherTopLeft => const {
                &[
                    round(Start, EndD, End, End),
                    round(EndD, Start, End, End),
                    fill(Start, Start, EndR, EndR),
                ]
            },
            Self::OtherTopRight => const {
                &[
                    round(Start, Start, StartD, End),
                    round(Start, EndD, End, End),
                    fill(StartR, Start, End, EndR),
                ]
            },
            Self::OtherBottomLeft => const {
                &[
                    round(Start, Start, End, StartD),
                    round(EndD, Start, End, End),
                    fill(Start, StartR, EndR, End),
                ]
            },
            Self::OtherBottomRight => const {
                &[
                    round(Start, Start, End, StartD),
                    round(Start, Start, StartD, End),
                    fill(StartR, StartR, End, End),
                ]
            },
            Self::DiagonalFromTopLeft => const {
                &[
                    round(Start, Start, StartD, StartD),
                    round(EndD, EndD, End, End),
                    fill(Start, StartR, EndR, End),
                    fill(StartR, Start, End, EndR),
                ]
            },
            Self::DiagonalFromTopRight => const {
                &[
                    round(EndD, Start, End, StartD),
                    round(Start, EndD, StartD, End),
                    fill(Start, Start, EndR, EndR),
                    fill(StartR, StartR, End, End),
                ]
            },
        }
    }
}

/// One fill primitive of a decomposed rounded rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Rounded-rectangle fill with a uniform corner radius.
    Rounded {
        /// Sub-rectangle to fill.
        rect: Rect,
        /// Corner radius, never clamped to the sub-rectangle size.
        radius: f64,
    },
    /// Axis-aligned rectangle fill.
    Rect(Rect),
}

impl Primitive {
    /// Bounding rectangle of the primitive.
    pub fn rect(&self) -> Rect {
        match *self {
            Self::Rounded { rect, .. } | Self::Rect(rect) => rect,
        }
    }

    /// Outline of the primitive, clockwise in y-down pixel space.
    pub fn to_path(&self) -> BezPath {
        match *self {
            Self::Rounded { rect, radius } => rounded_rect_path(rect, [radius; 4]),
            Self::Rect(rect) => rounded_rect_path(rect, [0.0; 4]),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Edge {
    Start,
    StartR,
    StartD,
    EndD,
    EndR,
    End,
}

impl Edge {
    fn resolve(self, start: f64, end: f64, radius: f64) -> f64 {
        match self {
            Self::Start => start,
            Self::StartR => start + radius,
            Self::StartD => start + 2.0 * radius,
            Self::EndD => end - 2.0 * radius,
            Self::EndR => end - radius,
            Self::End => end,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Template {
    rounded: bool,
    x0: Edge,
    y0: Edge,
    x1: Edge,
    y1: Edge,
}

const fn round(x0: Edge, y0: Edge, x1: Edge, y1: Edge) -> Template {
    Template {
        rounded: true,
        x0,
        y0,
        x1,
        y1,
    }
}

const fn fill(x0: Edge, y0: Edge, x1: Edge, y1: Edge) -> Template {
    Template {
        rounded: false,
        x0,
        y0,
        x1,
        y1,
    }
}

impl Template {
    fn resolve(&self, bounds: Rect, radius: f64) -> Primitive {
        let rect = Rect::new(
            self.x0.resolve(bounds.x0, bounds.x1, radius),
            self.y0.resolve(bounds.y0, bounds.y1, radius),
            self.x1.resolve(bounds.x0, bounds.x1, radius),
            self.y1.resolve(bounds.y0, bounds.y1, radius),
        );
        if self.rounded {
            Primitive::Rounded { rect, radius }
        } else {
            Primitive::Rect(rect)
        }
    }
}

/// Decompose a `width x height` box inset by `inset` into fill primitives for `corners`.
///
/// A zero radius yields a single rectangle. The radius is used as given even when it exceeds
/// half of the inset box's shorter side; the rounded primitives then self-intersect and a
/// non-zero fill leaves partially covered holes inside the shape.
pub fn decompose(
    width: f64,
    height: f64,
    radius: f64,
    corners: CornerType,
    inset: f64,
) -> Vec<Primitive> {
    let bounds = Rect::new(inset, inset, width - inset, height - inset);
    if radius <= 0.0 {
        return vec![Primitive::Rect(bounds)];
    }
    corners
        .templates()
        .iter()
        .map(|t| t.resolve(bounds, radius))
        .collect()
}

/// Concatenate primitive outlines into one path; filled non-zero it is their union.
pub fn union_path(primitives: &[Primitive]) -> BezPath {
    let mut out = BezPath::new();
    for p in primitives {
        out.extend(p.to_path().elements().iter().copied());
    }
    out
}

/// Outline of `rect` rounding the corners flagged in `corners` with `radius`.
pub fn corner_outline(rect: Rect, radius: f64, corners: Corners) -> BezPath {
    rounded_rect_path(rect, corners.radii(radius))
}

/// Clockwise rounded-rectangle outline with per-corner radii `[tl, tr, br, bl]`.
///
/// Radii are not clamped. A radius above half a side makes the outline cross itself, so the
/// non-zero fill of the result can have holes.
pub fn rounded_rect_path(rect: Rect, radii: [f64; 4]) -> BezPath {
    let Rect { x0, y0, x1, y1 } = rect;
    let [tl, tr, br, bl] = radii.map(|r| r.max(0.0));
    let mut p = BezPath::new();

    p.move_to(Point::new(x0 + tl, y0));
    p.line_to(Point::new(x1 - tr, y0));
    if tr > 0.0 {
        p.curve_to(
            Point::new(x1 - tr + KAPPA * tr, y0),
            Point::new(x1, y0 + tr - KAPPA * tr),
            Point::new(x1, y0 + tr),
        );
    }
    p.line_to(Point::new(x1, y1 - br));
    if br > 0.0 {
        p.curve_to(
            Point::new(x1, y1 - br + KAPPA * br),
            Point::new(x1 - br + KAPPA * br, y1),
            Point::new(x1 - br, y1),
        );
    }
    p.line_to(Point::new(x0 + bl, y1));
    if bl > 0.0 {
        p.curve_to(
            Point::new(x0 + bl - KAPPA * bl, y1),
            Point::new(x0, y1 - bl + KAPPA * bl),
            Point::new(x0, y1 - bl),
        );
    }
    p.line_to(Point::new(x0, y0 + tl));
    if tl > 0.0 {
        p.curve_to(
            Point::new(x0, y0 + tl - KAPPA * tl),
            Point::new(x0 + tl - KAPPA * tl, y0),
            Point::new(x0 + tl, y0),
        );
    }
    p.close_path();
    p
}

/// Signed distance from `p` to a rounded rectangle (negative inside).
#[cfg(test)]
pub(crate) fn rounded_rect_sdf(rect: Rect, radii: [f64; 4], p: Point) -> f64 {
    let [tl, tr, br, bl] = radii;
    let corner = |cx: f64, cy: f64, r: f64| ((p.x - cx).hypot(p.y - cy)) - r;
    if tl > 0.0 && p.x < rect.x0 + tl && p.y < rect.y0 + tl {
        return corner(rect.x0 + tl, rect.y0 + tl, tl);
    }
    if tr > 0.0 && p.x > rect.x1 - tr && p.y < rect.y0 + tr {
        return corner(rect.x1 - tr, rect.y0 + tr, tr);
    }
    if br > 0.0 && p.x > rect.x1 - br && p.y > rect.y1 - br {
        return corner(rect.x1 - br, rect.y1 - br, br);
    }
    if bl > 0.0 && p.x < rect.x0 + bl && p.y > rect.y1 - bl {
        return corner(rect.x0 + bl, rect.y1 - bl, bl);
    }
    (rect.x0 - p.x)
        .max(p.x - rect.x1)
        .max(rect.y0 - p.y)
        .max(p.y - rect.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/corners.rs"]
mod tests;
