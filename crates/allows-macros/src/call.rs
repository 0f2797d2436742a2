//! Call signature macro implementation.
//!
//! This module implements the `call!` macro, which turns an
//! argument list (`"stuff", 3, thing = "hi"`) into a chain of
//! `allows::Call` builder calls.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, Ident, Result, Token};

/// A single argument in the call list.
pub enum Argument {
    /// A positional argument.
    Positional(Expr),
    /// A keyword argument (`name = value`).
    Keyword {
        /// The keyword.
        name: Ident,
        /// The value expression.
        value: Expr,
    },
}

impl Parse for Argument {
    fn parse(input: ParseStream) -> Result<Self> {
        // `name = value`, but not `name == value`
        if input.peek(Ident) && input.peek2(Token![=]) && !input.peek2(Token![==]) {
            let name: Ident = input.parse()?;
            let _: Token![=] = input.parse()?;
            let value: Expr = input.parse()?;
            return Ok(Self::Keyword { name, value });
        }

        Ok(Self::Positional(input.parse()?))
    }
}

/// The call! macro input.
pub struct CallInput {
    /// Positional argument expressions, in order.
    pub positional: Vec<Expr>,
    /// Keyword arguments, in written order.
    pub keywords: Vec<(Ident, Expr)>,
}

impl Parse for CallInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let arguments: Punctuated<Argument, Token![,]> = Punctuated::parse_terminated(input)?;

        let mut positional = Vec::new();
        let mut keywords: Vec<(Ident, Expr)> = Vec::new();
        let mut seen = HashSet::new();

        for argument in arguments {
            match argument {
                Argument::Positional(expr) => {
                    if !keywords.is_empty() {
                        return Err(syn::Error::new_spanned(
                            expr,
                            "positional argument follows keyword argument",
                        ));
                    }
                    positional.push(expr);
                }
                Argument::Keyword { name, value } => {
                    let key = name.to_string();
                    if !seen.insert(key.clone()) {
                        return Err(syn::Error::new(
                            name.span(),
                            format!("keyword argument repeated: {key}"),
                        ));
                    }
                    keywords.push((name, value));
                }
            }
        }

        Ok(Self {
            positional,
            keywords,
        })
    }
}

/// Generate code for the call! macro.
pub fn expand(input: CallInput) -> TokenStream {
    let positional = input.positional.iter();
    let keywords = input.keywords.iter().map(|(name, value)| {
        let key = name.to_string();
        let key = key.strip_prefix("r#").unwrap_or(&key);
        quote! { .kwarg(#key, #value) }
    });

    quote! {
        ::allows::Call::new()
            #( .arg(#positional) )*
            #( #keywords )*
    }
}
