use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    parse::Parser, punctuated::Punctuated, token, Attribute, Error, Expr, ExprLit, Fields,
    Generics, ItemEnum, ItemStruct, Lit, Meta, MetaList, MetaNameValue, Path, Result, Token, Type,
    TypePath, Variant,
};

use tap::prelude::*;

use crate::common::{
    fill_empty_or_else, flag_value, generate_conversion_impl, ident, Args, WrappedVariant,
};

pub fn doit(args: TokenStream, item_enum: ItemEnum) -> Result<TokenStream> {
    let params = Args::parse_terminated
        .parse2(args)?
        .pipe(Params::try_from)?;
    let Config {
        map_ident,
        implement_conversions,
        derive_exclude,
    } = Config::new(params);

    let ItemEnum {
        attrs,
        vis,
        enum_token,
        ident,
        generics,
        brace_token: _,
        variants,
    } = &item_enum;

    if let Some(lt_token) = generics.lt_token {
        return Err(Error::new_spanned(
            lt_token,
            "`extract_variant` does not support generic parameters",
        ));
    }
    if let Some((_, discriminant)) = variants.iter().find_map(|v| v.discriminant.as_ref()) {
        return Err(Error::new_spanned(
            discriminant,
            "`extract_variant` does not support explicit discriminants",
        ));
    }

    let global_derive = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .map(|attr| -> Result<Attribute> {
            Ok(Attribute {
                meta: if let Meta::List(list) = &attr.meta {
                    let kept = Punctuated::<Path, Token![,]>::parse_terminated
                        .parse2(list.tokens.clone())?
                        .into_iter()
                        .filter(|path| !derive_exclude.contains(path));
                    Meta::List(MetaList {
                        tokens: quote! { #(#kept),* },
                        ..list.clone()
                    })
                } else {
                    attr.meta.clone()
                },
                ..attr.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let wrap_variant = |variant: &Variant| {
        // `#[attribute(...)]` belongs to the generated struct only.
        let attrs = variant
            .attrs
            .iter()
            .filter(|attr| !attr.path().is_ident("attribute"))
            .cloned()
            .collect();
        let id = variant.ident.clone();
        let ty = Type::Path(TypePath {
            qself: None,
            path: Path::from(map_ident(&id)),
        });
        WrappedVariant { attrs, id, ty }
    };

    let wrapped_variants: Vec<WrappedVariant> = variants.iter().map(wrap_variant).collect();

    let generate_struct = |Variant {
                               attrs,
                               ident,
                               fields,
                               discriminant: _,
                           }: &Variant|
     -> Result<ItemStruct> {
        Ok(ItemStruct {
            attrs: attrs
                .iter()
                .filter_map(|attr| {
                    let path = attr.path();
                    if path.is_ident("attribute") {
                        Some(if let Meta::List(MetaList { tokens, .. }) = &attr.meta {
                            syn::parse2::<Meta>(tokens.clone()).map(|meta| Attribute {
                                meta,
                                ..attr.clone()
                            })
                        } else {
                            Err(Error::new_spanned(
                                attr.meta.clone(),
                                "must be in the form of `#[attribute(...)]`",
                            ))
                        })
                    } else if path.is_ident("doc") {
                        Some(Ok(attr.clone()))
                    } else {
                        None
                    }
                })
                .collect::<Result<Vec<_>>>()?
                .tap_mut(|attrs| attrs.extend_from_slice(&global_derive)),
            vis: vis.clone(),
            struct_token: token::Struct {
                span: Span::call_site(),
            },
            ident: map_ident(ident),
            generics: Generics::default(),
            fields: fields
                .clone()
                .tap_mut(|fields| fields.iter_mut().for_each(|field| field.vis = vis.clone())),
            semi_token: match fields {
                Fields::Named(_) => None,
                Fields::Unnamed(_) | Fields::Unit => Some(Default::default()),
            },
        })
    };

    let generated_structs = variants
        .iter()
        .map(generate_struct)
        .collect::<Result<Vec<_>>>()?;

    let conversion_impls = wrapped_variants
        .iter()
        .filter(|_| implement_conversions)
        .map(|WrappedVariant { attrs: _, id, ty }| generate_conversion_impl(ident, id, ty));

    Ok(quote! {
        #(#attrs)*
        #vis #enum_token #ident {
            #(#wrapped_variants),*
        }
        #(#generated_structs)*
        #(#conversion_impls)*
    })
}

struct Config {
    map_ident: Box<dyn Fn(&Ident) -> Ident>,
    implement_conversions: bool,
    derive_exclude: Vec<Path>,
}
impl Config {
    fn new(
        Params {
            prefix,
            suffix,
            no_impl,
            derive_exclude,
        }: Params,
    ) -> Self {
        let prefix = prefix.unwrap_or_default();
        let suffix = suffix.unwrap_or_default();
        Self {
            map_ident: Box::new(move |vid| format_ident!("{prefix}{vid}{suffix}")),
            implement_conversions: !no_impl.unwrap_or_default(),
            derive_exclude,
        }
    }
}

#[derive(Default)]
struct Params {
    prefix: Option<String>,
    suffix: Option<String>,
    no_impl: Option<bool>,
    derive_exclude: Vec<Path>,
}

/// `name(Ident)` or `name = "Ident"`.
fn affix_value(arg: &Meta) -> Result<String> {
    let name = ident(arg)?;
    let error = |tokens: &dyn quote::ToTokens| {
        Error::new_spanned(
            tokens,
            format!(r#"valid forms are `{name}(Ident)` or `{name} = "Ident"`"#),
        )
    };
    match arg {
        Meta::Path(path) => Err(error(path)),
        Meta::List(MetaList { tokens, .. }) => {
            let id: Ident = syn::parse2(tokens.clone()).map_err(|mut err| {
                err.combine(error(tokens));
                err
            })?;
            Ok(id.to_string())
        }
        Meta::NameValue(MetaNameValue {
            value: Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }),
            ..
        }) => {
            let value = s.value();
            if syn::parse_str::<Ident>(&value).is_ok() {
                Ok(value)
            } else {
                Err(error(s))
            }
        }
        _ => Err(error(arg)),
    }
}

impl TryFrom<Args> for Params {
    type Error = Error;
    fn try_from(args: Args) -> std::result::Result<Self, Self::Error> {
        let mut params = Params::default();
        let duplicate = |arg: &Meta| Error::new_spanned(arg, "duplicate parameter");
        for arg in args {
            let ident = ident(&arg)?;
            match ident.to_string().as_str() {
                "prefix" => fill_empty_or_else(&mut params.prefix, affix_value(&arg)?, |_, _| {
                    duplicate(&arg)
                })?,
                "suffix" => fill_empty_or_else(&mut params.suffix, affix_value(&arg)?, |_, _| {
                    duplicate(&arg)
                })?,
                "no_impl" => {
                    fill_empty_or_else(&mut params.no_impl, flag_value(&arg)?, |_, _| {
                        duplicate(&arg)
                    })?
                }
                "derive_exclude" => {
                    if let Meta::List(MetaList { tokens, .. }) = &arg {
                        let paths =
                            Punctuated::<Path, Token![,]>::parse_terminated.parse2(tokens.clone())?;
                        params.derive_exclude.extend(paths)
                    } else {
                        Err(Error::new_spanned(
                            &arg,
                            "valid form is `derive_exclude(Path0, Path1, ...)`",
                        ))?
                    }
                }
                _ => Err(Error::new_spanned(
                    ident,
                    "extract_variant: unrecognized parameter",
                ))?,
            }
        }
        Ok(params)
    }
}
