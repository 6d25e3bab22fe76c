use super::*;
use crate::assets::source::MemoryResources;
use crate::foundation::core::Rgba8;
use crate::geometry::rings::Border;
use crate::render::pool::{BoundedPool, HeapPool};

#[test]
fn spec_json_uses_tagged_kinds() {
    let spec = ShapeSpec::from_json(
        r#"{"kind":"rounded_rect","radius":12,"corners":"TOP_LEFT",
            "borders":{"first":{"width":5,"color":{"r":255,"g":0,"b":0,"a":255}}}}"#,
    )
    .unwrap();
    assert_eq!(
        spec,
        ShapeSpec::rounded_rect(
            12,
            CornerType::TopLeft,
            Borders::one(Border::new(5, Rgba8::opaque(255, 0, 0)))
        )
    );

    let circle = ShapeSpec::from_json(r#"{"kind":"circle"}"#).unwrap();
    assert!(circle.borders().is_empty());
    assert!(matches!(
        ShapeSpec::from_json(r#"{"kind":"hexagon"}"#),
        Err(ShapeClipError::Serde(_))
    ));
}

#[test]
fn invalid_opacity_is_rejected() {
    let spec = ShapeSpec::circle(Borders::one(Border::new(2, Rgba8::BLACK).with_opacity(2.0)));
    assert!(matches!(
        ShapeTransform::new(spec),
        Err(ShapeClipError::Validation(_))
    ));
}

#[test]
fn zero_target_fails_before_any_allocation() {
    let t = ShapeTransform::new(ShapeSpec::circle(Borders::none())).unwrap();
    let mut pool = BoundedPool::default();
    let err = t
        .apply(
            &RasterImage::solid(4, 4, [0, 0, 0, 255]),
            TargetSize::exact(0, 10),
            &mut pool,
            &MemoryResources::new(),
        )
        .unwrap_err();
    assert!(matches!(err, ShapeClipError::InvalidDimensions { .. }));
    assert_eq!(pool.stats().alloc_buffers, 0);
}

#[test]
fn missing_mask_is_resource_error() {
    let t = ShapeTransform::new(ShapeSpec::external_mask("nope", Borders::none())).unwrap();
    let mut pool = BoundedPool::default();
    let err = t
        .apply(
            &RasterImage::solid(4, 4, [0, 0, 0, 255]),
            TargetSize::exact(8, 8),
            &mut pool,
            &MemoryResources::new(),
        )
        .unwrap_err();
    assert!(matches!(err, ShapeClipError::ResourceUnavailable(_)));
    assert_eq!(pool.stats().alloc_buffers, 0);
}

#[test]
fn original_size_sentinel_uses_source_dimensions() {
    let t = ShapeTransform::new(ShapeSpec::rounded_rect(4, CornerType::All, Borders::none()))
        .unwrap();
    let out = t
        .apply(
            &RasterImage::solid(30, 12, [1, 2, 3, 255]),
            TargetSize::Original,
            &mut HeapPool,
            &MemoryResources::new(),
        )
        .unwrap();
    assert_eq!((out.width(), out.height()), (30, 12));
}

#[test]
fn intermediates_return_to_the_pool() {
    let stencil = RasterImage::solid(5, 5, [0, 0, 0, 255]);
    let res = MemoryResources::new().with_mask("sq", stencil);
    let t = ShapeTransform::new(ShapeSpec::external_mask(
        "sq",
        Borders::two(Border::new(2, Rgba8::BLACK), Border::new(2, Rgba8::BLACK)),
    ))
    .unwrap();
    let mut pool = BoundedPool::default();
    let src = RasterImage::solid(10, 10, [9, 9, 9, 255]);
    let out = t
        .apply(&src, TargetSize::exact(20, 20), &mut pool, &res)
        .unwrap();
    let st = pool.stats();
    assert_eq!(st.alloc_buffers as usize, st.retained_buffers + 1);
    pool.release(out);

    let again = t
        .apply(&src, TargetSize::exact(20, 20), &mut pool, &res)
        .unwrap();
    assert!(pool.stats().reused_buffers > 0);
    pool.release(again);
}

#[test]
fn empty_source_renders_rings_only() {
    let t = ShapeTransform::new(ShapeSpec::circle(Borders::one(Border::new(
        3,
        Rgba8::opaque(0, 255, 0),
    ))))
    .unwrap();
    let out = t
        .apply(
            &RasterImage::solid(0, 0, [0, 0, 0, 0]),
            TargetSize::exact(20, 20),
            &mut HeapPool,
            &MemoryResources::new(),
        )
        .unwrap();
    let px = |x: u32, y: u32| {
        let i = ((y * 20 + x) * 4) as usize;
        [out.data()[i], out.data()[i + 1], out.data()[i + 2], out.data()[i + 3]]
    };
    assert_eq!(px(10, 1), [0, 255, 0, 255]);
    assert_eq!(px(10, 10)[3], 0);
}

#[test]
fn empty_source_leaves_every_shape_interior_clear() {
    let ring = Borders::one(Border::new(4, Rgba8::opaque(0, 0, 255)));
    let res = MemoryResources::new().with_mask("sq", RasterImage::solid(8, 8, [0, 0, 0, 255]));
    let empty = RasterImage::solid(0, 0, [0, 0, 0, 0]);
    for spec in [
        ShapeSpec::circle(ring),
        ShapeSpec::rounded_rect(6, CornerType::All, ring),
        ShapeSpec::external_mask("sq", ring),
    ] {
        let t = ShapeTransform::new(spec.clone()).unwrap();
        let out = t
            .apply(&empty, TargetSize::exact(40, 40), &mut HeapPool, &res)
            .unwrap();
        let i = ((20 * out.width() + 20) * 4) as usize;
        assert_eq!(&out.data()[i..i + 4], &[0, 0, 0, 0], "{spec:?}");
    }
}

#[test]
fn border_colors_accept_hex_strings() {
    let spec = ShapeSpec::from_json(
        r##"{"kind":"circle","borders":{"first":{"width":2,"color":"#00ff00"}}}"##,
    )
    .unwrap();
    let ring = spec.borders().first().copied().unwrap();
    assert_eq!(ring.color, Rgba8::opaque(0, 255, 0));
    assert_eq!(
        TransformIdentity::of(&spec).as_str(),
        "shapeclip.Circle(b1=2,#00ff00ff,1.0,b2=0,#00000000,1.0)"
    );
}
