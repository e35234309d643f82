use proc_macro::TokenStream;
use syn::{parse_macro_input, Result};

mod common;

mod extract_variant;
mod tagged;

#[inline]
fn result_of(doit: Result<impl Into<TokenStream>>) -> TokenStream {
    match doit {
        Ok(token_stream) => token_stream.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Extracts each variant in an enum into its own standalone struct, then implements conversion traits
/// between the original enum and the generated struct.
///
/// Take argument in the same format as other proc_macro_attribute, eg. `#[extract_variant(no_impl, prefix(Extracted))]`.
///
/// Valid arguments:
/// - `no_impl`: stop [`From`] variant and [`TryFrom`] enum from being implemented.
/// - `prefix`: prepend to the identifier of every generated structs.
/// - `suffix`: append to the identifier of every generated structs.
/// - `derive_exclude`: derives on the enum that should not be copied onto the generated structs,
///   eg. `derive_exclude(Tagged)`.
///
/// Attributes meant for a generated struct only can be written on its variant as
/// `#[attribute(...)]`, eg. `#[attribute(repr(C))]`.
///
/// ```
/// use shape_macros::extract_variant;
///
/// #[extract_variant]
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Shape {
///     Circle { radius: f32 },
///     Square { size: f32 },
/// }
///
/// let shape = Shape::from(Circle { radius: 1.0 });
/// assert_eq!(Circle::try_from(shape), Ok(Circle { radius: 1.0 }));
/// assert_eq!(Square::try_from(shape), Err(shape));
/// ```
#[proc_macro_attribute]
pub fn extract_variant(args: TokenStream, input: TokenStream) -> TokenStream {
    result_of(extract_variant::doit(
        args.into(),
        parse_macro_input!(input),
    ))
}

/// Implements `shape_tag::Tagged` for an enum, generating its tag enum unless told to reuse one.
///
/// Configured through `#[tagged(...)]`:
/// - `tag(generate(Name))`, `tag(generate())` or `tag(path::to::ExistingEnum)`. Without it, the
///   tag is generated as `{Enum}Tag`.
/// - `variant_of`: also implement `shape_tag::VariantOf` for the type wrapped by every variant.
///   Pairs with [`macro@extract_variant`].
#[cfg(feature = "tag")]
#[proc_macro_derive(Tagged, attributes(tagged))]
pub fn tagged(input: TokenStream) -> TokenStream {
    result_of(tagged::doit(parse_macro_input!(input)))
}
