//! Handler resolution: determinism, specificity, ambiguity, caching.

use relais::{
    Arg, Dispatcher, HandlerDescriptor, HandlerResolver, ParameterSpec, ResolveError, Subscriber,
};
use std::sync::Arc;

mod common;
use common::{CLICK, ClickEvent, INPUT, TICK, TickEvent};

/// Declares one handler per level of the input branch.
struct Widget;

impl Subscriber for Widget {
    fn handler_table(&self) -> Vec<HandlerDescriptor> {
        vec![
            HandlerDescriptor::new("on_click", |_: &Widget, _: &[Arg<'_>]| ()).on(&CLICK),
            HandlerDescriptor::new("on_input", |_: &Widget, _: &[Arg<'_>]| ()).on(&INPUT),
        ]
    }
}

/// Declares only the broad handler.
struct InputOnly;

impl Subscriber for InputOnly {
    fn handler_table(&self) -> Vec<HandlerDescriptor> {
        vec![HandlerDescriptor::new("on_input", |_: &InputOnly, _: &[Arg<'_>]| ()).on(&INPUT)]
    }
}

#[test]
fn resolution_is_deterministic_and_cached() {
    let resolver = HandlerResolver::new();
    let widget = Widget;

    let first = resolver.resolve(&widget, &CLICK).unwrap().unwrap();
    assert_eq!(first.name(), "on_click");
    assert_eq!(resolver.cache_size(), 1);

    // Warm-cache resolution returns the identical candidate.
    let second = resolver.resolve(&widget, &CLICK).unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(resolver.cache_size(), 1);
}

#[test]
fn racing_resolvers_agree_and_publish_one_entry() {
    let resolver = Arc::new(HandlerResolver::new());

    // Hammer the same (target, kind) pair from several threads at once.
    // Whoever wins the publish race, every thread must observe the same
    // resolution and the cache must hold exactly one entry afterwards.
    let threads: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || {
                let candidate = resolver.resolve(&Widget, &CLICK).unwrap().unwrap();
                candidate.name()
            })
        })
        .collect();

    for thread in threads {
        assert_eq!(thread.join().unwrap(), "on_click");
    }
    assert_eq!(resolver.cache_size(), 1);
}

#[test]
fn narrower_candidate_wins_over_broader() {
    let resolver = HandlerResolver::new();
    let widget = Widget;

    let for_click = resolver.resolve(&widget, &CLICK).unwrap().unwrap();
    assert_eq!(
        for_click.name(),
        "on_click",
        "the ClickEvent handler must beat the InputEvent handler for a click"
    );

    let for_input = resolver.resolve(&widget, &INPUT).unwrap().unwrap();
    assert_eq!(for_input.name(), "on_input");
}

#[test]
fn broad_handler_receives_narrower_events() {
    let resolver = HandlerResolver::new();
    let candidate = resolver.resolve(&InputOnly, &CLICK).unwrap().unwrap();
    assert_eq!(candidate.name(), "on_input");
}

#[test]
fn equally_specific_candidates_are_ambiguous() {
    struct Clashing;

    impl Subscriber for Clashing {
        fn handler_table(&self) -> Vec<HandlerDescriptor> {
            vec![
                HandlerDescriptor::new("first", |_: &Clashing, _: &[Arg<'_>]| ()).on(&INPUT),
                HandlerDescriptor::new("second", |_: &Clashing, _: &[Arg<'_>]| ()).on(&INPUT),
            ]
        }
    }

    let resolver = HandlerResolver::new();
    let err = resolver.resolve(&Clashing, &CLICK).unwrap_err();
    match err {
        ResolveError::AmbiguousHandler { first, second, .. } => {
            assert_eq!(first, "first");
            assert_eq!(second, "second");
        }
        other => panic!("expected AmbiguousHandler, got {other:?}"),
    }
}

#[test]
fn disabled_descriptors_are_skipped() {
    struct PartlyDisabled;

    impl Subscriber for PartlyDisabled {
        fn handler_table(&self) -> Vec<HandlerDescriptor> {
            vec![
                HandlerDescriptor::new("on_click", |_: &PartlyDisabled, _: &[Arg<'_>]| ())
                    .on(&CLICK)
                    .disabled(),
                HandlerDescriptor::new("on_input", |_: &PartlyDisabled, _: &[Arg<'_>]| ())
                    .on(&INPUT),
            ]
        }
    }

    let resolver = HandlerResolver::new();
    let candidate = resolver.resolve(&PartlyDisabled, &CLICK).unwrap().unwrap();
    assert_eq!(candidate.name(), "on_input");
}

#[test]
fn event_kind_is_inferred_from_the_whole_event_parameter() {
    struct Inferred;

    impl Subscriber for Inferred {
        fn handler_table(&self) -> Vec<HandlerDescriptor> {
            // No explicit `.on(...)`: the kind comes from the parameter.
            vec![
                HandlerDescriptor::new("on_click", |_: &Inferred, _: &[Arg<'_>]| ())
                    .param(ParameterSpec::event(&CLICK)),
            ]
        }
    }

    let resolver = HandlerResolver::new();
    let candidate = resolver.resolve(&Inferred, &CLICK).unwrap().unwrap();
    assert_eq!(candidate.event_kind().name(), "ClickEvent");
}

#[test]
fn two_whole_event_parameters_cannot_be_inferred() {
    struct DoubleEvent;

    impl Subscriber for DoubleEvent {
        fn handler_table(&self) -> Vec<HandlerDescriptor> {
            vec![
                HandlerDescriptor::new("confused", |_: &DoubleEvent, _: &[Arg<'_>]| ())
                    .param(ParameterSpec::event(&CLICK))
                    .param(ParameterSpec::event(&INPUT)),
            ]
        }
    }

    let resolver = HandlerResolver::new();
    let err = resolver.resolve(&DoubleEvent, &CLICK).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::AmbiguousEventParameter { count: 2, .. }
    ));
}

#[test]
fn a_kindless_candidate_is_an_error() {
    struct Kindless;

    impl Subscriber for Kindless {
        fn handler_table(&self) -> Vec<HandlerDescriptor> {
            vec![HandlerDescriptor::new("mystery", |_: &Kindless, _: &[Arg<'_>]| ())]
        }
    }

    let resolver = HandlerResolver::new();
    let err = resolver.resolve(&Kindless, &CLICK).unwrap_err();
    assert!(matches!(err, ResolveError::UnknownEventKind { .. }));
}

#[test]
fn no_handler_is_cached_and_non_fatal() {
    let resolver = HandlerResolver::new();
    let widget = Widget;

    // TickEvent is outside the input branch: nobody listens.
    assert!(resolver.resolve(&widget, &TICK).unwrap().is_none());
    assert_eq!(resolver.cache_size(), 1);
    assert!(resolver.resolve(&widget, &TICK).unwrap().is_none());
    assert_eq!(resolver.cache_size(), 1);
}

#[test]
fn invoke_without_a_handler_returns_the_default() {
    let dispatcher = Dispatcher::new();
    let widget = Widget;
    let tick = TickEvent { frame: 9 };

    let out: u32 = dispatcher.invoke(&widget, &tick, None).unwrap();
    assert_eq!(out, 0);
}

#[test]
fn resolve_is_a_pure_query_on_the_dispatcher() {
    let dispatcher = Dispatcher::new();
    let widget = Widget;

    let candidate = dispatcher.resolve(&widget, &CLICK).unwrap().unwrap();
    assert_eq!(candidate.name(), "on_click");

    // The speculative query warms the same cache the dispatch path uses.
    assert_eq!(dispatcher.resolver().cache_size(), 1);
    let click = ClickEvent { x: 1, y: 2 };
    dispatcher.invoke::<()>(&widget, &click, None).unwrap();
    assert_eq!(dispatcher.resolver().cache_size(), 1);
}
