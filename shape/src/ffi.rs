//! The C layout of [`Shape`]:
//!
//! ```c
//! struct Shape {
//!     Shape_type type;        /* Circle = 0, Square = 1 */
//!     union {
//!         Circle circle;      /* float radius */
//!         Square square;      /* float size */
//!     } value;
//! };
//! ```
//!
//! Nothing guarantees that a [`RawShape`] filled in by foreign code holds a known
//! discriminant, so the only way back to a [`Shape`] is through [`TryFrom`].

use std::fmt;

use tracing::{trace, warn};

use crate::{Circle, Discriminant, Shape, ShapeError, ShapeTag, Square, Tagged};

#[repr(C)]
#[derive(Clone, Copy)]
pub union RawShapeValue {
    pub circle: Circle,
    pub square: Square,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawShape {
    pub ty: u32,
    pub value: RawShapeValue,
}

impl RawShape {
    pub fn discriminant(&self) -> Result<ShapeTag, ShapeError> {
        ShapeTag::from_index(self.ty).ok_or(ShapeError::InvalidDiscriminant(self.ty))
    }

    fn decode(&self) -> Result<Shape, ShapeError> {
        // SAFETY: only the field named by a validated discriminant is read, and every bit
        // pattern is a valid `f32`.
        Ok(match self.discriminant()? {
            ShapeTag::Circle => Shape::Circle(unsafe { self.value.circle }),
            ShapeTag::Square => Shape::Square(unsafe { self.value.square }),
        })
    }
}

impl From<Shape> for RawShape {
    fn from(shape: Shape) -> Self {
        let value = match shape {
            Shape::Circle(circle) => RawShapeValue { circle },
            Shape::Square(square) => RawShapeValue { square },
        };
        RawShape {
            ty: shape.tag().index(),
            value,
        }
    }
}

impl TryFrom<RawShape> for Shape {
    type Error = ShapeError;

    fn try_from(raw: RawShape) -> Result<Self, Self::Error> {
        let shape = raw
            .decode()
            .inspect_err(|err| warn!(ty = raw.ty, %err, "rejected raw shape"))?;
        trace!(?shape, "decoded raw shape");
        Ok(shape)
    }
}

impl fmt::Debug for RawShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(shape) => f.debug_tuple("RawShape").field(&shape).finish(),
            Err(_) => f
                .debug_struct("RawShape")
                .field("ty", &self.ty)
                .finish_non_exhaustive(),
        }
    }
}
