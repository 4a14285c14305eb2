//! Per-call hook sequencing: ordering, result transforms, error routing.

mod test_utils;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use test_utils::{StepLog, TestError};
use veriphi_context::ContextError;
use veriphi_hooks::{ErrorAction, HookBundle, Interceptor, Target};

type Bundle = HookBundle<(i32, i32), i32, TestError>;

fn add(args: &(i32, i32)) -> Result<i32, TestError> {
    Ok(args.0 + args.1)
}

fn fail(_: &(i32, i32)) -> Result<i32, TestError> {
    Err(TestError::body("boom"))
}

/// Builds a bundle that logs every hook it runs.
fn logging_bundle(log: &StepLog) -> Bundle {
    let before_log = log.clone();
    let after_log = log.clone();
    let error_log = log.clone();
    Bundle::new()
        .with_before(move |_| {
            before_log.push("before");
            Ok(())
        })
        .with_after(move |_, result| {
            after_log.push("after");
            Ok(result)
        })
        .with_on_error(move |_, _| {
            error_log.push("on_error");
            Ok(ErrorAction::Propagate)
        })
}

#[test]
fn empty_bundle_is_identity_wrapper() {
    let wrapped = Interceptor::new().wrap(Target::new("add"), add);

    for (a, b) in [(0, 0), (1, 2), (-5, 3), (i32::MAX, 0)] {
        assert_eq!(wrapped.call((a, b)), Ok(Some(add(&(a, b)).unwrap())));
    }
}

#[test]
fn empty_bundle_propagates_body_error_unchanged() {
    let wrapped = Interceptor::new().wrap(Target::new("fail"), fail);
    assert_eq!(wrapped.call((1, 2)), Err(TestError::body("boom")));
}

#[test]
fn hooks_run_before_body_then_after() {
    let log = StepLog::new();
    let body_log = log.clone();

    let wrapped = Interceptor::new()
        .with_hooks(logging_bundle(&log))
        .wrap(Target::new("add"), move |args: &(i32, i32)| {
            body_log.push("body");
            add(args)
        });

    assert_eq!(wrapped.call((1, 2)), Ok(Some(3)));
    assert_eq!(log.steps(), vec!["before", "body", "after"]);
}

#[test]
fn failing_body_runs_before_then_on_error() {
    let log = StepLog::new();
    let body_log = log.clone();

    let wrapped = Interceptor::new()
        .with_hooks(logging_bundle(&log))
        .wrap(Target::new("fail"), move |args: &(i32, i32)| {
            body_log.push("body");
            fail(args)
        });

    assert_eq!(wrapped.call((1, 2)), Err(TestError::body("boom")));
    assert_eq!(log.steps(), vec!["before", "body", "on_error"]);
}

#[test]
fn after_replaces_result() {
    let wrapped = Interceptor::new()
        .with_hooks(Bundle::new().with_after(|_, result| Ok(result * 2)))
        .wrap(Target::new("three"), |_: &(i32, i32)| Ok(3));

    assert_eq!(wrapped.call((0, 0)), Ok(Some(6)));
}

#[test]
fn after_sees_arguments_and_target() {
    let wrapped = Interceptor::new()
        .with_hooks(Bundle::new().with_after(|call, result| {
            assert_eq!(call.target.name(), "add");
            Ok(result + call.args.0 * 100)
        }))
        .wrap(Target::new("add"), add);

    assert_eq!(wrapped.call((1, 2)), Ok(Some(103)));
}

#[test]
fn on_error_true_suppresses() {
    let wrapped = Interceptor::new()
        .with_hooks(Bundle::new().with_error_filter(|_, _| true))
        .wrap(Target::new("fail"), fail);

    assert_eq!(wrapped.call((1, 2)), Ok(None));
}

#[test]
fn on_error_false_reraises_original() {
    let wrapped = Interceptor::new()
        .with_hooks(Bundle::new().with_error_filter(|_, _| false))
        .wrap(Target::new("fail"), fail);

    assert_eq!(wrapped.call((1, 2)), Err(TestError::body("boom")));
}

#[test]
fn on_error_can_recover_with_value() {
    let wrapped = Interceptor::new()
        .with_hooks(Bundle::new().with_on_error(|call, error| {
            assert_eq!(*error, TestError::body("boom"));
            Ok(ErrorAction::Recover(call.args.0))
        }))
        .wrap(Target::new("fail"), fail);

    assert_eq!(wrapped.call((7, 2)), Ok(Some(7)));
}

#[test]
fn suppressed_result_differs_from_legitimate_empty_result() {
    let interceptor: Interceptor<(), Option<i32>, TestError> =
        Interceptor::new().with_hooks(HookBundle::new().with_error_filter(|_, _| true));

    let legit = interceptor.invoke(Target::new("none"), &(), None, |_| Ok(None));
    let suppressed = interceptor.invoke(Target::new("fail"), &(), None, |_| {
        Err(TestError::body("boom"))
    });

    assert_eq!(legit, Ok(Some(None)));
    assert_eq!(suppressed, Ok(None));
}

#[test]
fn before_error_skips_body_and_other_hooks() {
    let log = StepLog::new();
    let after_log = log.clone();
    let error_log = log.clone();
    let body_calls = Arc::new(AtomicUsize::new(0));
    let body_calls_clone = Arc::clone(&body_calls);

    let wrapped = Interceptor::new()
        .with_hooks(
            Bundle::new()
                .with_before(|_| Err(TestError::hook("denied")))
                .with_after(move |_, result| {
                    after_log.push("after");
                    Ok(result)
                })
                .with_on_error(move |_, _| {
                    error_log.push("on_error");
                    Ok(ErrorAction::Suppress)
                }),
        )
        .wrap(Target::new("add"), move |args: &(i32, i32)| {
            body_calls_clone.fetch_add(1, Ordering::SeqCst);
            add(args)
        });

    assert_eq!(wrapped.call((1, 2)), Err(TestError::hook("denied")));
    assert_eq!(body_calls.load(Ordering::SeqCst), 0);
    assert!(log.steps().is_empty(), "after/on_error must not run");
}

#[test]
fn ensure_failure_in_before_aborts_call() {
    let wrapped = Interceptor::new()
        .with_context_provider(|_| Ok(Arc::new(Denying) as veriphi_context::SharedContext))
        .with_hooks(Bundle::new().with_before(|call| {
            call.context
                .ensure("can_add", veriphi_context::Metadata::new())
                .map_err(TestError::from)
        }))
        .wrap(Target::new("add"), add);

    assert_eq!(
        wrapped.call((1, 2)),
        Err(TestError::Context(ContextError::requirement_failed(
            "can_add",
            "denied"
        )))
    );
}

#[test]
fn after_error_propagates() {
    let wrapped = Interceptor::new()
        .with_hooks(Bundle::new().with_after(|_, _| Err(TestError::hook("after broke"))))
        .wrap(Target::new("add"), add);

    assert_eq!(wrapped.call((1, 2)), Err(TestError::hook("after broke")));
}

#[test]
fn on_error_error_masks_body_error() {
    let wrapped = Interceptor::new()
        .with_hooks(Bundle::new().with_on_error(|_, _| Err(TestError::hook("handler broke"))))
        .wrap(Target::new("fail"), fail);

    assert_eq!(wrapped.call((1, 2)), Err(TestError::hook("handler broke")));
}

#[test]
fn provider_error_runs_no_hooks() {
    let log = StepLog::new();

    let wrapped = Interceptor::new()
        .with_context_provider(|_| Err(ContextError::unavailable("no tenant").into()))
        .with_hooks(logging_bundle(&log))
        .wrap(Target::new("add"), add);

    assert_eq!(
        wrapped.call((1, 2)),
        Err(TestError::Context(ContextError::unavailable("no tenant")))
    );
    assert!(log.steps().is_empty());
}

/// Context whose every requirement check fails.
struct Denying;

impl veriphi_context::Context for Denying {
    fn bind(
        self: Arc<Self>,
        _metadata: veriphi_context::Metadata,
    ) -> Result<veriphi_context::SharedContext, ContextError> {
        Ok(self)
    }

    fn emit(&self, _event: &str, _payload: veriphi_context::Metadata) {}

    fn ensure(
        &self,
        requirement: &str,
        _details: veriphi_context::Metadata,
    ) -> Result<(), ContextError> {
        Err(ContextError::requirement_failed(requirement, "denied"))
    }
}
