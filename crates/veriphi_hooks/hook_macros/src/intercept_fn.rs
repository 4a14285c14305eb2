//! Code generation for `#[intercept]` on free functions.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Expr, ItemFn, ReturnType};
use veriphi_macro_utils::hooks_path;

use crate::common::{context_param_index, parse_params, validate_signature};

/// Rewrites an `#[intercept]` function into an intercepted wrapper.
///
/// The macro consumes the original function and generates:
/// - A nested `__intercept_body_<name>` function with the original body
/// - An outer function with the original name and parameters that packs the
///   arguments into a tuple and runs the body through the interceptor
pub(crate) fn generate_intercept_fn(interceptor: Option<&Expr>, input: &ItemFn) -> TokenStream {
    if let Some(err) = validate_signature(&input.sig) {
        return err;
    }
    let params = match parse_params(&input.sig) {
        Ok(params) => params,
        Err(err) => return err,
    };
    let ReturnType::Type(_, return_type) = &input.sig.output else {
        return syn::Error::new_spanned(&input.sig, "#[intercept] requires a return type")
            .to_compile_error();
    };

    let vh = hooks_path();

    let fn_name = &input.sig.ident;
    let fn_name_str = fn_name.to_string();
    let body_fn_name = format_ident!("__intercept_body_{}", fn_name);

    let attrs = &input.attrs;
    let vis = &input.vis;
    let block = &input.block;
    let body_inputs = &input.sig.inputs;

    let idents: Vec<_> = params.iter().map(|param| &param.ident).collect();
    let types: Vec<_> = params.iter().map(|param| &param.ty).collect();

    let interceptor = match interceptor {
        Some(expr) => quote! { (#expr) },
        None => quote! { #vh::Interceptor::new() },
    };

    let explicit_context = match context_param_index(&params) {
        Some(index) => {
            let index = syn::Index::from(index);
            quote! { #vh::AsContext::as_context(&__args.#index) }
        }
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        #(#attrs)*
        #vis fn #fn_name(#(#idents: #types),*) -> #vh::InterceptedResult<#return_type> {
            fn #body_fn_name(#body_inputs) -> #return_type #block

            let __args = (#(#idents,)*);
            let __context = #explicit_context;
            #interceptor.invoke(
                #vh::Target::new(#fn_name_str).with_module(::core::module_path!()),
                &__args,
                __context,
                |(#(#idents,)*): &(#(#types,)*)| {
                    #vh::CallResult::into_result(
                        #body_fn_name(#(::core::clone::Clone::clone(#idents)),*)
                    )
                },
            )
        }
    }
}
