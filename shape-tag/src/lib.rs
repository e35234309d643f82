use std::fmt::Debug;

use thiserror::Error;

/// A field-less enum naming the variants of a [`Tagged`] enum.
pub trait Discriminant: Copy + Eq + Debug + 'static {
    /// Every tag, in declaration order.
    const ALL: &'static [Self];

    /// The value this tag has in a C-style `enum`.
    fn index(self) -> u32;

    fn from_index(index: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.index() == index)
    }
}

pub trait Tagged {
    type Tag: Discriminant;

    /// Which variant is currently held.
    fn tag(&self) -> Self::Tag;
}

/// Implemented by a payload type wrapped by exactly one variant of `Enum`.
pub trait VariantOf<Enum: Tagged>: Into<Enum> + TryFrom<Enum, Error = Enum> {
    const TAG: Enum::Tag;

    /// Like [`TryFrom`], but reports which variant was found instead of handing the
    /// value back.
    fn extract(value: Enum) -> Result<Self, VariantMismatch<Enum::Tag>> {
        Self::try_from(value).map_err(|value| VariantMismatch {
            expected: Self::TAG,
            found: value.tag(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("expected the `{expected:?}` variant, found `{found:?}`")]
pub struct VariantMismatch<T: Debug> {
    pub expected: T,
    pub found: T,
}
