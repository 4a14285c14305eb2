//! Signature validation and parameter parsing for `#[intercept]`.

use proc_macro2::TokenStream;
use syn::{FnArg, Ident, Pat, ReturnType, Signature, Type};

/// Validates that a function signature is suitable for `#[intercept]`.
///
/// Rejects async, const, unsafe, extern, variadic and generic functions, and
/// functions without a return type.
pub(crate) fn validate_signature(sig: &Signature) -> Option<TokenStream> {
    if let Some(asyncness) = &sig.asyncness {
        return Some(
            syn::Error::new_spanned(asyncness, "#[intercept] does not support async functions")
                .to_compile_error(),
        );
    }

    if let Some(constness) = &sig.constness {
        return Some(
            syn::Error::new_spanned(constness, "#[intercept] cannot be applied to const functions")
                .to_compile_error(),
        );
    }

    if let Some(unsafety) = &sig.unsafety {
        return Some(
            syn::Error::new_spanned(unsafety, "#[intercept] cannot be applied to unsafe functions")
                .to_compile_error(),
        );
    }

    if let Some(abi) = &sig.abi {
        return Some(
            syn::Error::new_spanned(abi, "#[intercept] cannot be applied to extern functions")
                .to_compile_error(),
        );
    }

    if let Some(variadic) = &sig.variadic {
        return Some(
            syn::Error::new_spanned(variadic, "#[intercept] does not support variadic functions")
                .to_compile_error(),
        );
    }

    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Some(
            syn::Error::new_spanned(
                &sig.generics,
                "#[intercept] does not support generic parameters",
            )
            .to_compile_error(),
        );
    }

    if let ReturnType::Default = sig.output {
        return Some(
            syn::Error::new_spanned(
                &sig.ident,
                "#[intercept] requires a function returning `Result<T, E>`",
            )
            .to_compile_error(),
        );
    }

    None
}

/// A parameter of an intercepted function.
#[derive(Debug, Clone)]
pub(crate) struct ParamInfo {
    /// Binding name.
    pub ident: Ident,
    /// Declared type.
    pub ty: Type,
}

/// Parses every parameter, rejecting receivers and non-identifier patterns.
pub(crate) fn parse_params(sig: &Signature) -> Result<Vec<ParamInfo>, TokenStream> {
    sig.inputs
        .iter()
        .map(|arg| match arg {
            FnArg::Receiver(receiver) => Err(syn::Error::new_spanned(
                receiver,
                "#[intercept] functions cannot have a `self` receiver; \
                 wrap a free function or use `Interceptor::wrap` instead",
            )
            .to_compile_error()),
            FnArg::Typed(pat_type) => match &*pat_type.pat {
                Pat::Ident(pat_ident) if pat_ident.by_ref.is_none() && pat_ident.subpat.is_none() => {
                    Ok(ParamInfo {
                        ident: pat_ident.ident.clone(),
                        ty: (*pat_type.ty).clone(),
                    })
                }
                other => Err(syn::Error::new_spanned(
                    other,
                    "#[intercept] parameters must be plain identifiers",
                )
                .to_compile_error()),
            },
        })
        .collect()
}

/// Returns the position of the parameter named `context`, if any.
pub(crate) fn context_param_index(params: &[ParamInfo]) -> Option<usize> {
    params.iter().position(|param| param.ident == "context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn accepts_plain_result_function() {
        let sig: Signature = parse_quote! { fn add(a: i32, b: i32) -> Result<i32, String> };
        assert!(validate_signature(&sig).is_none());
    }

    #[test]
    fn rejects_async_generic_and_missing_return() {
        let async_sig: Signature = parse_quote! { async fn add(a: i32) -> Result<i32, String> };
        assert!(validate_signature(&async_sig).is_some());

        let generic_sig: Signature = parse_quote! { fn add<T>(a: T) -> Result<T, String> };
        assert!(validate_signature(&generic_sig).is_some());

        let unit_sig: Signature = parse_quote! { fn add(a: i32) };
        assert!(validate_signature(&unit_sig).is_some());
    }

    #[test]
    fn parse_params_strips_mut_and_finds_context() {
        let sig: Signature = parse_quote! {
            fn handle(mut count: u32, context: Option<SharedContext>) -> Result<u32, String>
        };
        let params = parse_params(&sig).expect("params should parse");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].ident, "count");
        assert_eq!(context_param_index(&params), Some(1));
    }

    #[test]
    fn parse_params_rejects_receiver_and_patterns() {
        let receiver: Signature = parse_quote! { fn handle(&self) -> Result<(), String> };
        assert!(parse_params(&receiver).is_err());

        let tuple: Signature = parse_quote! { fn handle((a, b): (u8, u8)) -> Result<(), String> };
        assert!(parse_params(&tuple).is_err());
    }
}
