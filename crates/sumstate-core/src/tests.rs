#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::prelude::*;
    use crate::tag::{family, register_family};

    // -- dynamic case tables ------------------------------------------------

    #[test]
    fn case_table_dispatches_by_tag() {
        let render: CaseTable<AsyncData<u32>, &'static str> = Cases::new()
            .on("not_asked", |_| "idle")
            .on("loading", |_| "spinner")
            .on("done", |_| "value")
            .build()
            .unwrap();

        assert_eq!(render.apply(&AsyncData::NotAsked).unwrap(), "idle");
        assert_eq!(render.apply(&AsyncData::Loading).unwrap(), "spinner");
        assert_eq!(render.apply(&AsyncData::Done(3)).unwrap(), "value");
    }

    #[test]
    fn missing_handler_fails_at_build() {
        let err = Cases::<AsyncData<u32>, &'static str>::new()
            .on("not_asked", |_| "idle")
            .on("loading", |_| "spinner")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::MissingHandler {
                family: "async_data",
                missing: "done",
            }
        );
    }

    #[test]
    fn foreign_handler_fails_at_build() {
        let err = Cases::<Option<u32>, ()>::new()
            .on("some", |_| ())
            .on("none", |_| ())
            .on("perhaps", |_| ())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::ForeignHandler {
                family: "option",
                tag: "perhaps",
            }
        );
    }

    #[test]
    fn duplicate_handler_fails_at_build() {
        let err = Cases::<Option<u32>, ()>::new()
            .on("some", |_| ())
            .on("some", |_| ())
            .on("none", |_| ())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::DuplicateHandler {
                family: "option",
                tag: "some",
            }
        );
    }

    struct Rogue;

    impl Tagged for Rogue {
        const FAMILY: TagFamily = TagFamily::new("rogue", &["real"]);

        fn tag(&self) -> Tag {
            "impostor"
        }
    }

    #[test]
    fn unknown_runtime_tag_is_reported_not_swallowed() {
        let table: CaseTable<Rogue, ()> = Cases::new().on("real", |_| ()).build().unwrap();
        assert_eq!(
            table.apply(&Rogue).unwrap_err(),
            MatchError::UnknownTag {
                family: "rogue",
                tag: "impostor",
            }
        );
    }

    #[test]
    fn family_name_collision_is_detected() {
        register_family(TagFamily::new("clash", &["a", "b"])).unwrap();
        let err = register_family(TagFamily::new("clash", &["a"])).unwrap_err();
        assert_eq!(err, MatchError::FamilyMismatch { family: "clash" });
        // identical re-registration is fine
        register_family(TagFamily::new("clash", &["a", "b"])).unwrap();
    }

    #[test]
    fn building_a_table_registers_the_family() {
        let _table: CaseTable<AsyncData<u32>, ()> = Cases::new()
            .on("not_asked", |_| ())
            .on("loading", |_| ())
            .on("done", |_| ())
            .build()
            .unwrap();
        assert_eq!(family("async_data").unwrap(), crate::async_data::ASYNC_DATA);
    }

    // -- option -------------------------------------------------------------

    #[test]
    fn absent_pipelines_short_circuit() {
        let calls = Rc::new(RefCell::new(0));
        let seen = calls.clone();
        let out = from_nullable::<i32>(None::<i32>).map(|n| {
            *seen.borrow_mut() += 1;
            n * 2
        });
        assert_eq!(out, None);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn present_values_map_through() {
        assert_eq!(from_nullable(5).map(|n| n * 2), Some(10));
    }

    #[test]
    fn option_fold_is_terminal() {
        assert_eq!(Some(3).fold(|n| n * 10, || -1), 30);
        assert_eq!(None::<i32>.fold(|n| n * 10, || -1), -1);
    }

    // -- result -------------------------------------------------------------

    fn parse(input: &str) -> Result<i64, &'static str> {
        input.trim().parse::<i64>().map_err(|_| "not a number")
    }

    fn ensure_even(n: i64) -> Result<i64, &'static str> {
        if n % 2 == 0 { Ok(n) } else { Err("not even") }
    }

    #[test]
    fn fallible_pipeline_resolves_each_input() {
        let run = |input: &str| parse(input).and_then(ensure_even).map(|n| n / 2);
        assert_eq!(run("8"), Ok(4));
        assert_eq!(run("7"), Err("not even"));
        assert_eq!(run("x"), Err("not a number"));
    }

    #[test]
    fn first_error_propagates_untouched() {
        let original = Rc::new("boom".to_string());
        let calls = Rc::new(RefCell::new(0));
        let (c1, c2) = (calls.clone(), calls.clone());

        let out: Result<i32, Rc<String>> = Err::<i32, _>(original.clone())
            .and_then(|n| {
                *c1.borrow_mut() += 1;
                Ok(n + 1)
            })
            .map(|n| {
                *c2.borrow_mut() += 1;
                n * 2
            });

        match out {
            // the very same allocation, not an equal-looking copy
            Err(error) => assert!(Rc::ptr_eq(&error, &original)),
            Ok(_) => panic!("error vanished"),
        }
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn success_chains_without_double_wrapping() {
        assert_eq!(Ok::<i64, &'static str>(8).and_then(ensure_even), ensure_even(8));
    }

    #[test]
    fn result_fold_is_terminal() {
        let render = |r: Result<i32, &str>| r.fold(|n| format!("{n}"), |e| format!("error: {e}"));
        assert_eq!(render(Ok(4)), "4");
        assert_eq!(render(Err("nope")), "error: nope");
    }

    // -- async data ---------------------------------------------------------

    #[test]
    fn map_applies_only_when_done() {
        let calls = Rc::new(RefCell::new(0));
        let count = |calls: &Rc<RefCell<i32>>| {
            let calls = calls.clone();
            move |n: i32| {
                *calls.borrow_mut() += 1;
                n + 1
            }
        };

        assert_eq!(AsyncData::NotAsked.map(count(&calls)), AsyncData::NotAsked);
        assert_eq!(AsyncData::Loading.map(count(&calls)), AsyncData::Loading);
        assert_eq!(*calls.borrow(), 0);

        assert_eq!(AsyncData::Done(1).map(count(&calls)), AsyncData::Done(2));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn and_then_chains_request_states() {
        let refetch = |n: i32| {
            if n % 2 == 0 {
                AsyncData::Done(n / 2)
            } else {
                AsyncData::Loading
            }
        };
        assert_eq!(AsyncData::Done(8).and_then(refetch), AsyncData::Done(4));
        assert_eq!(AsyncData::Done(7).and_then(refetch), AsyncData::Loading);
        assert_eq!(AsyncData::NotAsked.and_then(refetch), AsyncData::NotAsked);
    }

    #[test]
    fn option_converts_into_async_data() {
        assert_eq!(AsyncData::from(Some(3)), AsyncData::Done(3));
        assert_eq!(AsyncData::from(None::<i32>), AsyncData::NotAsked);
    }

    #[test]
    fn exactly_four_request_states_exist() {
        let states: [AsyncResult<i32, &'static str>; 4] = [
            AsyncData::NotAsked,
            AsyncData::Loading,
            AsyncData::Done(Ok(1)),
            AsyncData::Done(Err("boom")),
        ];
        for (i, a) in states.iter().enumerate() {
            for b in &states[i + 1..] {
                assert_ne!(a, b);
            }
        }
        let tags: Vec<Tag> = states.iter().map(|s| s.tag()).collect();
        assert_eq!(tags, vec!["not_asked", "loading", "done", "done"]);
    }

    #[test]
    fn nested_combinators_reach_through_the_pair() {
        let settled: AsyncResult<i32, String> = AsyncData::Done(Ok(21));
        assert_eq!(settled.map_ok(|n| n * 2), AsyncData::Done(Ok(42)));

        let failed: AsyncResult<i32, String> = AsyncData::Done(Err("low".into()));
        assert_eq!(
            failed.map_err(|e| format!("{e}!")),
            AsyncData::Done(Err("low!".into()))
        );

        let loading: AsyncResult<i32, String> = AsyncData::Loading;
        assert_eq!(loading.map_ok(|n| n * 2), AsyncData::Loading);

        let checked = AsyncData::Done(Ok(7)).and_then_ok(|n: i32| {
            if n % 2 == 0 {
                Ok(n)
            } else {
                Err("odd".to_string())
            }
        });
        assert_eq!(checked, AsyncData::Done(Err("odd".to_string())));
    }

    #[test]
    fn resolve_collapses_to_a_display_value() {
        let render = |state: AsyncResult<u32, &'static str>| {
            state.resolve(
                || "—".to_string(),
                || "loading…".to_string(),
                |n| format!("{n} items"),
                |e| format!("failed: {e}"),
            )
        };
        assert_eq!(render(AsyncData::NotAsked), "—");
        assert_eq!(render(AsyncData::Loading), "loading…");
        assert_eq!(render(AsyncData::Done(Ok(3))), "3 items");
        assert_eq!(render(AsyncData::Done(Err("offline"))), "failed: offline");
    }

    // -- fetch boundary -----------------------------------------------------

    #[test]
    fn flag_product_collapses_deterministically() {
        let run = |data: Option<i32>, error: Option<&'static str>, is_loading: bool| {
            FetchFlags {
                data,
                error,
                is_loading,
            }
            .into_async()
        };

        // data > error > loading > none, over all eight combinations
        assert_eq!(run(Some(1), Some("e"), true), AsyncData::Done(Ok(1)));
        assert_eq!(run(Some(1), Some("e"), false), AsyncData::Done(Ok(1)));
        assert_eq!(run(Some(1), None, true), AsyncData::Done(Ok(1)));
        assert_eq!(run(Some(1), None, false), AsyncData::Done(Ok(1)));
        assert_eq!(run(None, Some("e"), true), AsyncData::Done(Err("e")));
        assert_eq!(run(None, Some("e"), false), AsyncData::Done(Err("e")));
        assert_eq!(run(None, None, true), AsyncData::Loading);
        assert_eq!(run(None, None, false), AsyncData::NotAsked);
    }

    // -- store & request ----------------------------------------------------

    #[test]
    fn store_notifies_subscribers_until_unsubscribed() {
        let store = Store::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = store.subscribe(move |v: &i32| sink.borrow_mut().push(*v));

        store.set(1);
        store.update(|v| *v += 1);
        assert!(store.unsubscribe(sub));
        store.set(9);

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(store.get(), 9);
        assert!(!store.unsubscribe(sub));
    }

    #[test]
    fn request_walks_the_expected_sequence() {
        let req = Request::<i32, &'static str>::new();
        let seen: Rc<RefCell<Vec<Tag>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        req.store().subscribe(move |s| sink.borrow_mut().push(s.tag()));

        assert!(req.state().is_not_asked());
        req.begin();
        assert!(req.state().is_loading());
        req.finish(Ok(7));
        assert_eq!(req.state().ok(), Some(7));
        req.reset();

        assert_eq!(*seen.borrow(), vec!["loading", "done", "not_asked"]);
    }

    // -- wire shape ---------------------------------------------------------

    #[cfg(feature = "serde")]
    mod wire {
        use serde_json::json;

        use crate::prelude::*;

        #[test]
        fn async_data_uses_the_tagged_wire_shape() {
            assert_eq!(
                serde_json::to_value(AsyncData::Done(3)).unwrap(),
                json!({"state": "done", "value": 3})
            );
            assert_eq!(
                serde_json::to_value(AsyncData::<i32>::Loading).unwrap(),
                json!({"state": "loading"})
            );
            assert_eq!(
                serde_json::to_value(AsyncData::<i32>::NotAsked).unwrap(),
                json!({"state": "not_asked"})
            );
        }

        #[test]
        fn async_data_round_trips() {
            for state in [AsyncData::NotAsked, AsyncData::Loading, AsyncData::Done(5i32)] {
                let wire = serde_json::to_string(&state).unwrap();
                let back: AsyncData<i32> = serde_json::from_str(&wire).unwrap();
                assert_eq!(back, state);
            }
        }

        #[test]
        fn fetch_flags_accept_sparse_camel_case_payloads() {
            let flags: FetchFlags<i32, String> =
                serde_json::from_value(json!({"data": 5, "isLoading": true})).unwrap();
            assert_eq!(flags.into_async(), AsyncData::Done(Ok(5)));
        }
    }
}
