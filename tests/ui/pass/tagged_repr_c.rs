use shape_macros::{extract_variant, Tagged};
use shape_tag::Tagged as _;

#[extract_variant(derive_exclude(Tagged))]
#[derive(Clone, Copy, Tagged)]
#[tagged(variant_of)]
#[repr(C)]
pub enum Shape {
    #[attribute(repr(C))]
    Circle { radius: f32 },
    #[attribute(repr(C))]
    Square { size: f32 },
}

fn main() {
    assert_eq!(std::mem::size_of::<Shape>(), 8);
    assert_eq!(std::mem::size_of::<Circle>(), 4);
    assert_eq!(Shape::from(Square { size: 1.0 }).tag(), ShapeTag::Square);
}
