#![cfg(feature = "tag")]
use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{parse::Parser, Error, Fields, ItemEnum, Meta, MetaList, Path, Result, Variant};

use crate::common::{fill_empty_or_else, flag_value, ident, Args, WrappedVariant};

pub fn doit(item_enum: ItemEnum) -> Result<TokenStream> {
    let ItemEnum {
        attrs,
        vis,
        ident,
        generics,
        variants,
        ..
    } = &item_enum;

    let params = match attrs.iter().find(|attr| attr.path().is_ident("tagged")) {
        Some(attr) => Params::try_from(attr.parse_args_with(Args::parse_terminated)?)?,
        None => Params::default(),
    };
    let Config { tag, variant_of } = Config::new(params, &item_enum);

    if variants.is_empty() {
        Err(Error::new_spanned(
            ident,
            "Tagged: enum must have at least one variant",
        ))?
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let arms = variants.iter().map(|Variant { ident: id, fields, .. }| {
        let rest = match fields {
            Fields::Named(_) => quote!({ .. }),
            Fields::Unnamed(_) => quote!((..)),
            Fields::Unit => quote!(),
        };
        quote! { Self::#id #rest => #tag::#id }
    });

    let generated_tag = match &tag {
        Tag::Generate(tag_ident) => {
            let stripped_variants = variants.iter().map(|variant| &variant.ident);
            let indices = (0..variants.len()).map(Literal::usize_unsuffixed);
            let all = stripped_variants.clone();
            let doc = format!("Discriminant of [`{ident}`].");
            quote! {
                #[doc = #doc]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                #[repr(u32)]
                #vis enum #tag_ident {
                    #(#stripped_variants = #indices),*
                }

                impl ::shape_tag::Discriminant for #tag_ident {
                    const ALL: &'static [Self] = &[#(Self::#all),*];
                    fn index(self) -> u32 {
                        self as u32
                    }
                }
            }
        }
        Tag::Existing(_) => quote!(),
    };

    let variant_of_impls = if variant_of {
        variants
            .iter()
            .map(|variant| {
                let WrappedVariant { attrs: _, id, ty } = WrappedVariant::try_from(variant)?;
                Ok(quote! {
                    impl #impl_generics ::shape_tag::VariantOf<#ident #ty_generics> for #ty #where_clause {
                        const TAG: #tag = #tag::#id;
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    Ok(quote! {
        impl #impl_generics ::shape_tag::Tagged for #ident #ty_generics #where_clause {
            type Tag = #tag;
            fn tag(&self) -> #tag {
                match self {
                    #(#arms),*
                }
            }
        }
        #generated_tag
        #(#variant_of_impls)*
    })
}

#[derive(Default)]
struct Params {
    tag: Option<TagParam>,
    variant_of: Option<bool>,
}
impl TryFrom<Args> for Params {
    type Error = Error;
    fn try_from(args: Args) -> std::result::Result<Self, Self::Error> {
        let mut params = Params::default();
        const TAG_VALID_FORMS: &str =
            "valid forms are `tag(PathTo::ExistingEnum)`, `tag(generate())`, or `tag(generate(NameOfEnumToBeGenerated))`";
        let duplicate = |arg: &Meta| Error::new_spanned(arg, "duplicate parameter");

        for arg in args {
            let ident = ident(&arg)?;

            match ident.to_string().as_str() {
                "tag" => {
                    let Meta::List(MetaList { tokens, .. }) = &arg else {
                        return Err(Error::new_spanned(&arg, TAG_VALID_FORMS));
                    };
                    let item: Meta = syn::parse2(tokens.clone()).map_err(|mut err| {
                        err.combine(Error::new_spanned(tokens, TAG_VALID_FORMS));
                        err
                    })?;
                    let tag = match item {
                        Meta::Path(path) => TagParam::Existing(path),
                        Meta::List(MetaList { path, tokens, .. }) => {
                            if !path.is_ident("generate") {
                                Err(Error::new_spanned(path, TAG_VALID_FORMS))?
                            }
                            if tokens.is_empty() {
                                TagParam::Generate(None)
                            } else {
                                TagParam::Generate(Some(syn::parse2(tokens.clone()).map_err(
                                    |_| Error::new_spanned(tokens, "must be a bare identifier"),
                                )?))
                            }
                        }
                        a => Err(Error::new_spanned(a, TAG_VALID_FORMS))?,
                    };
                    fill_empty_or_else(&mut params.tag, tag, |_, _| duplicate(&arg))?
                }
                "variant_of" => {
                    fill_empty_or_else(&mut params.variant_of, flag_value(&arg)?, |_, _| {
                        duplicate(&arg)
                    })?
                }
                _ => Err(Error::new_spanned(ident, "Tagged: unrecognized parameter"))?,
            }
        }
        Ok(params)
    }
}

enum TagParam {
    /// `generate()` leaves the name to `Config`.
    Generate(Option<Ident>),
    Existing(Path),
}

enum Tag {
    Generate(Ident),
    Existing(Path),
}
impl ToTokens for Tag {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Tag::Generate(ident) => ident.to_tokens(tokens),
            Tag::Existing(path) => path.to_tokens(tokens),
        }
    }
}
struct Config {
    tag: Tag,
    variant_of: bool,
}
impl Config {
    fn new(Params { tag, variant_of }: Params, item_enum: &ItemEnum) -> Self {
        let tag = match tag {
            Some(TagParam::Existing(path)) => Tag::Existing(path),
            Some(TagParam::Generate(Some(ident))) => Tag::Generate(ident),
            Some(TagParam::Generate(None)) | None => {
                Tag::Generate(format_ident!("{}Tag", item_enum.ident))
            }
        };
        Self {
            tag,
            variant_of: variant_of.unwrap_or_default(),
        }
    }
}
