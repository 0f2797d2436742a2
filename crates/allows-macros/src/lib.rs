//! allows-macros: Procedural macros for allows
//!
//! This crate provides the [`call!`] macro, which builds an `allows::Call`
//! from positional and keyword arguments.
//!
//! # Example
//!
//! ```ignore
//! use allows::call;
//!
//! let signature = call!("stuff", 42, thing = "hi");
//! let no_args = call!();
//! ```

// In proc-macro crates, passing parsed input by value is idiomatic
#![allow(clippy::needless_pass_by_value)]

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod call;

/// Build a call signature from positional and keyword arguments.
///
/// Positional arguments are any expressions; keyword arguments are written
/// `name = expr`. Every value is converted with `allows::Value::from`.
///
/// # Rules
///
/// - Positional arguments must come before keyword arguments.
/// - A keyword may only be given once.
///
/// Both are reported as compile errors.
///
/// # Examples
///
/// ```ignore
/// use allows::call;
///
/// let process = call!("stuff", thing = "hi");
/// let numbers = call!(1, 2, 3);
/// let keywords_only = call!(retries = 3, verbose = true);
/// ```
#[proc_macro]
pub fn call(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as call::CallInput);
    call::expand(input).into()
}
