//! Procedural macros for Veriphi call interception.
//!
//! Provides `#[intercept]`, the attribute form of
//! `veriphi_hooks::Interceptor`.

mod common;
mod intercept_fn;

use proc_macro::TokenStream;

/// Wraps a free function so every call runs through an `Interceptor`.
///
/// The attribute argument is an expression evaluating to an
/// `Interceptor<(T1, T2, ..), R, E>` (or a reference to one) for a function
/// `fn f(p1: T1, p2: T2, ..) -> Result<R, E>`. It is evaluated on every call.
/// Without an argument the function is wrapped with an empty interceptor.
///
/// The function keeps its name, visibility and parameters. Its return type
/// becomes `InterceptedResult<Result<R, E>>`, i.e. `Result<Option<R>, E>`,
/// where `Ok(None)` signals an error suppressed by an `on_error` hook.
///
/// # Parameters
///
/// - Every parameter type must implement `Clone`; the body receives clones of
///   the arguments the hooks observe.
/// - A parameter named `context` is offered to the interceptor as the
///   caller-supplied context. Its type must implement `AsContext`, which
///   covers `SharedContext`, `Option<SharedContext>` and references to
///   either; any other type fails to compile with an unmet `AsContext`
///   bound. Rename the parameter to pass a value that is not a context.
///
/// # Example
///
/// ```
/// use veriphi_hooks::{HookBundle, Interceptor, intercept};
///
/// fn doubled() -> Interceptor<(u32,), u32, String> {
///     Interceptor::new().with_hooks(HookBundle::new().with_after(|_call, n| Ok(n * 2)))
/// }
///
/// #[intercept(doubled())]
/// fn square(n: u32) -> Result<u32, String> {
///     Ok(n * n)
/// }
///
/// assert_eq!(square(3), Ok(Some(18)));
/// ```
///
/// # Restrictions
///
/// Only free, synchronous, non-generic functions are accepted: `async`,
/// `const`, `unsafe` and `extern` functions, `self` receivers and
/// destructuring parameter patterns are rejected at compile time.
#[proc_macro_attribute]
pub fn intercept(attr: TokenStream, item: TokenStream) -> TokenStream {
    let interceptor = if attr.is_empty() {
        None
    } else {
        Some(syn::parse_macro_input!(attr as syn::Expr))
    };
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    intercept_fn::generate_intercept_fn(interceptor.as_ref(), &input).into()
}
