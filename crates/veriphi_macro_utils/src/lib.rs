//! Path resolution for code generated by Veriphi procedural macros.
//!
//! Generated code names items of `veriphi_hooks`. Depending on how the
//! consumer pulls Veriphi in, that crate is reachable as:
//!
//! - `veriphi_hooks` (or a rename), for a direct dependency
//! - `veriphi::veriphi_hooks` (or a rename of `veriphi`), through the umbrella
//!
//! Inside a crate's own lib and doctests `proc-macro-crate` reports
//! [`FoundCrate::Itself`]. Both crates alias themselves with
//! `extern crate self as <name>;`, so the crate name stays a valid path there.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Package name of the umbrella crate.
pub const UMBRELLA: &str = "veriphi";

/// Package name of the crate holding the interceptor runtime.
pub const HOOKS: &str = "veriphi_hooks";

/// Returns the path generated code uses to reach `veriphi_hooks`.
///
/// A direct dependency wins over the umbrella. When neither is found the bare
/// crate name is emitted, so the compiler points at the missing dependency.
#[must_use]
pub fn hooks_path() -> TokenStream {
    member_path(
        HOOKS,
        crate_name(HOOKS).ok(),
        crate_name(UMBRELLA).ok(),
    )
}

/// Builds the path to `member` from what the manifest lookups found.
///
/// `direct` is the lookup of `member` itself, `umbrella` the lookup of
/// [`UMBRELLA`].
#[must_use]
pub fn member_path(
    member: &str,
    direct: Option<FoundCrate>,
    umbrella: Option<FoundCrate>,
) -> TokenStream {
    let member_ident = format_ident!("{}", member);

    match (direct, umbrella) {
        (Some(found), _) => {
            let root = root_ident(found, member);
            quote!(#root)
        }
        (None, Some(found)) => {
            let root = root_ident(found, UMBRELLA);
            quote!(#root::#member_ident)
        }
        (None, None) => quote!(#member_ident),
    }
}

fn root_ident(found: FoundCrate, own_name: &str) -> proc_macro2::Ident {
    match found {
        FoundCrate::Itself => format_ident!("{}", own_name),
        FoundCrate::Name(name) => format_ident!("{}", name),
    }
}
