//! Property tests for the parameter store and query parsing.

use proptest::prelude::*;

use route_context::routing::{Params, RouteContext};
use route_context::Queries;

#[derive(Debug, Clone)]
enum Op {
    Add(String, String),
    Set(String, String),
    Del(String),
}

fn key() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
}

fn value() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,4}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (key(), value()).prop_map(|(k, v)| Op::Add(k, v)),
        (key(), value()).prop_map(|(k, v)| Op::Set(k, v)),
        key().prop_map(Op::Del),
    ]
}

fn apply(params: &mut Params, op: &Op) {
    match op {
        Op::Add(k, v) => params.add(k.as_str(), v.as_str()),
        Op::Set(k, v) => params.set(k, v.as_str()),
        Op::Del(k) => {
            params.del(k);
        }
    }
}

proptest! {
    #[test]
    fn prop_set_then_get(ops in prop::collection::vec(op(), 0..32), k in key(), v in value()) {
        let mut params = Params::new();
        for op in &ops {
            apply(&mut params, op);
        }
        params.set(&k, v.as_str());

        prop_assert_eq!(params.get(&k), v.as_str());
        prop_assert_eq!(params.keys().filter(|existing| *existing == k).count(), 1);
    }

    #[test]
    fn prop_set_then_del_clears(ops in prop::collection::vec(op(), 0..32), k in key(), v in value()) {
        let mut params = Params::new();
        for op in &ops {
            apply(&mut params, op);
        }
        params.set(&k, v.as_str());
        let before = params.len();

        prop_assert_eq!(params.del(&k), v);
        prop_assert_eq!(params.get(&k), "");
        prop_assert_eq!(params.len(), before - 1);
    }

    #[test]
    fn prop_del_removes_first(ops in prop::collection::vec(op(), 0..32), k in key()) {
        let mut params = Params::new();
        for op in &ops {
            apply(&mut params, op);
        }
        let before = params.len();
        let expected = params.get(&k).to_string();
        let present = params.keys().any(|existing| existing == k);

        let removed = params.del(&k);

        prop_assert_eq!(removed, expected);
        prop_assert_eq!(params.len(), if present { before - 1 } else { before });
    }

    #[test]
    fn prop_del_absent_is_noop(ops in prop::collection::vec(op(), 0..32)) {
        let mut params = Params::new();
        for op in &ops {
            apply(&mut params, op);
        }
        let before = params.clone();

        prop_assert_eq!(params.del("absent"), "");
        prop_assert_eq!(params.get("absent"), "");
        prop_assert_eq!(params, before);
    }

    #[test]
    fn prop_add_preserves_order(values in prop::collection::vec(value(), 0..16)) {
        let mut params = Params::new();
        for (i, v) in values.iter().enumerate() {
            params.add(format!("k{}", i), v.as_str());
        }
        let seen: Vec<&str> = params.values().collect();
        let expected: Vec<&str> = values.iter().map(String::as_str).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_reset_empties(ops in prop::collection::vec(op(), 0..32), patterns in prop::collection::vec("/[a-z]{1,4}", 0..4)) {
        let mut rctx = RouteContext::new();
        for op in &ops {
            apply(&mut rctx.url_params, op);
        }
        for pattern in &patterns {
            rctx.push_pattern(pattern.as_str());
        }
        rctx.reset();
        prop_assert!(rctx.url_params.is_empty());
        prop_assert!(rctx.route_patterns.is_empty());
        prop_assert_eq!(rctx.route_pattern.as_str(), "");
    }

    #[test]
    fn prop_query_comma_expansion(pieces in prop::collection::vec(prop::collection::vec("[a-z0-9]{0,3}", 1..4), 1..4)) {
        let raw = pieces
            .iter()
            .map(|group| format!("k={}", group.join(",")))
            .collect::<Vec<_>>()
            .join("&");
        let queries = Queries::extract(&raw).unwrap();

        let expected: Vec<String> = pieces.iter().flatten().cloned().collect();
        prop_assert_eq!(&queries.get_all()["k"], &expected);

        let fallback = vec!["fallback".to_string()];
        let got = queries.get("k", &fallback);
        if expected.iter().all(String::is_empty) {
            prop_assert_eq!(got, fallback.as_slice());
        } else {
            prop_assert_eq!(got, expected.as_slice());
        }
    }
}
