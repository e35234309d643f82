//! A shape that is either a circle or a square.
//!
//! [`Shape`] is a closed tagged union: the variant *is* the payload, so a square can never be
//! read as a circle. Consumers dispatch on it with an exhaustive `match`, and adding a variant
//! breaks every `match` that does not handle it:
//!
//! ```compile_fail
//! use shape::Shape;
//!
//! fn is_round(shape: Shape) -> bool {
//!     match shape {
//!         Shape::Circle(_) => true,
//!     }
//! }
//! ```
//!
//! Payloads are checked against their variant when the shape is built:
//!
//! ```compile_fail
//! use shape::{Shape, Square};
//!
//! let shape = Shape::Circle(Square { size: 1.0 });
//! ```
//!
//! The [`ffi`] module carries the C layout of the same union, for data that comes from
//! outside Rust and has to be validated first.

use shape_macros::extract_variant;
use tracing::debug;

mod error;
pub mod ffi;

pub use error::ShapeError;
pub use shape_tag::{Discriminant, Tagged, VariantMismatch, VariantOf};

#[extract_variant(derive_exclude(shape_macros::Tagged))]
#[derive(Debug, Clone, Copy, PartialEq, shape_macros::Tagged)]
#[tagged(tag(generate(ShapeTag)), variant_of)]
#[repr(C)]
pub enum Shape {
    /// A circle of the given radius.
    #[attribute(repr(C))]
    Circle { radius: f32 },
    /// A square with sides of the given length.
    #[attribute(repr(C))]
    Square { size: f32 },
}

impl Shape {
    /// Zero, negative and non-finite radii are accepted as they are.
    pub const fn circle(radius: f32) -> Self {
        Shape::Circle(Circle { radius })
    }

    /// Zero, negative and non-finite sizes are accepted as they are.
    pub const fn square(size: f32) -> Self {
        Shape::Square(Square { size })
    }

    pub fn discriminant(&self) -> ShapeTag {
        self.tag()
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle(_))
    }

    pub fn is_square(&self) -> bool {
        matches!(self, Shape::Square(_))
    }

    /// The circle payload, or [`ShapeError::VariantMismatch`] if this is a square.
    pub fn as_circle(self) -> Result<Circle, ShapeError> {
        self.extract()
    }

    /// The square payload, or [`ShapeError::VariantMismatch`] if this is a circle.
    pub fn as_square(self) -> Result<Square, ShapeError> {
        self.extract()
    }

    fn extract<V: VariantOf<Shape>>(self) -> Result<V, ShapeError> {
        V::extract(self).map_err(|mismatch| {
            debug!(%mismatch, "shape payload requested for the wrong variant");
            ShapeError::from(mismatch)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_indices_follow_declaration_order() {
        assert_eq!(ShapeTag::ALL, &[ShapeTag::Circle, ShapeTag::Square]);
        assert_eq!(ShapeTag::Circle.index(), 0);
        assert_eq!(ShapeTag::Square.index(), 1);
        assert_eq!(ShapeTag::from_index(1), Some(ShapeTag::Square));
        assert_eq!(ShapeTag::from_index(2), None);
    }

    #[test]
    fn variant_of_tags() {
        assert_eq!(<Circle as VariantOf<Shape>>::TAG, ShapeTag::Circle);
        assert_eq!(<Square as VariantOf<Shape>>::TAG, ShapeTag::Square);
    }

    #[test]
    fn conversions() {
        let shape = Shape::from(Circle { radius: 3.0 });
        assert_eq!(shape, Shape::circle(3.0));
        assert_eq!(Circle::try_from(shape), Ok(Circle { radius: 3.0 }));
        // the untouched shape comes back on a miss
        assert_eq!(Square::try_from(shape), Err(shape));
    }

    #[test]
    fn mismatch_names_both_variants() {
        let err = Shape::square(1.0).as_circle().unwrap_err();
        assert_eq!(
            err,
            ShapeError::VariantMismatch(VariantMismatch {
                expected: ShapeTag::Circle,
                found: ShapeTag::Square,
            })
        );
        assert_eq!(
            err.to_string(),
            "expected the `Circle` variant, found `Square`"
        );
    }
}
