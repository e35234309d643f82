use shape_tag::VariantMismatch;
use thiserror::Error;

use crate::ShapeTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A payload was requested from a shape holding the other variant.
    #[error(transparent)]
    VariantMismatch(#[from] VariantMismatch<ShapeTag>),
    /// A raw discriminant outside the known variants.
    #[error("invalid shape discriminant {0}")]
    InvalidDiscriminant(u32),
}
