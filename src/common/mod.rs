use proc_macro2::{Delimiter, Group, TokenStream};
use quote::{quote, ToTokens, TokenStreamExt};
use syn::{
    punctuated::Punctuated, Attribute, Error, Expr, ExprLit, Fields, FieldsUnnamed, Ident, Lit,
    Meta, MetaNameValue, Path, Result, Token, Type, TypePath, Variant,
};

pub type Args = Punctuated<Meta, Token![,]>;
pub fn ident(arg: &Meta) -> Result<&Ident> {
    let path = arg.path();
    path.get_ident()
        .ok_or_else(|| Error::new_spanned(path, "must be a bare identifier"))
}

/// Reads a boolean switch written either as `name` or `name = bool`.
pub fn flag_value(arg: &Meta) -> Result<bool> {
    match arg {
        Meta::Path(_) => Ok(true),
        Meta::NameValue(MetaNameValue {
            value:
                Expr::Lit(ExprLit {
                    lit: Lit::Bool(bool),
                    ..
                }),
            ..
        }) => Ok(bool.value),
        _ => {
            let name = arg.path().to_token_stream();
            Err(Error::new_spanned(
                arg,
                format!("valid forms are `{name}`, or `{name} = bool`"),
            ))
        }
    }
}

pub fn fill_empty_or_else<T>(
    opt: &mut Option<T>,
    new: T,
    err: impl FnOnce(&T, T) -> Error,
) -> Result<()> {
    match opt {
        Some(old) => Err(err(old, new)),
        None => {
            opt.replace(new);
            Ok(())
        }
    }
}

pub struct WrappedVariant {
    pub attrs: Vec<Attribute>,
    pub id: Ident,
    pub ty: Type,
}

impl ToTokens for WrappedVariant {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append_all(&self.attrs);
        self.id.to_tokens(tokens);
        tokens.append(Group::new(
            Delimiter::Parenthesis,
            self.ty.to_token_stream(),
        ));
    }
}

impl TryFrom<&Variant> for WrappedVariant {
    type Error = Error;
    fn try_from(variant: &Variant) -> std::result::Result<Self, Self::Error> {
        let attrs = variant.attrs.clone();
        let id = variant.ident.clone();
        let ty = match &variant.fields {
            Fields::Named(named_fields) => Err(Error::new(
                named_fields.brace_token.span.join(),
                "named fields unsupported",
            ))?,
            Fields::Unnamed(FieldsUnnamed {
                unnamed,
                paren_token,
            }) => match unnamed.first() {
                Some(field) if unnamed.len() == 1 => field.ty.clone(),
                _ => Err(Error::new(
                    paren_token.span.join(),
                    "tuple-like variant must have exactly 1 field",
                ))?,
            },
            Fields::Unit => Type::Path(TypePath {
                qself: None,
                path: Path::from(id.clone()),
            }),
        };
        Ok(WrappedVariant { attrs, id, ty })
    }
}

pub fn generate_conversion_impl(ident: &Ident, id: &Ident, ty: &Type) -> TokenStream {
    quote! {
        impl ::core::convert::From<#ty> for #ident {
            fn from(value: #ty) -> Self {
                #ident::#id(value)
            }
        }

        impl ::core::convert::TryFrom<#ident> for #ty {
            type Error = #ident;
            fn try_from(value: #ident) -> ::core::result::Result<Self, Self::Error> {
                if let #ident::#id(value) = value {
                    ::core::result::Result::Ok(value)
                } else {
                    ::core::result::Result::Err(value)
                }
            }
        }
    }
}
