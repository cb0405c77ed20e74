use super::*;
use crate::define::combinators::{get, random_int, val};
use crate::define::produce::{Env, produce};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn literals_arrays_and_objects_keep_shape() {
    let spec = Spec::object([
        ("s", Spec::from("x")),
        ("n", Spec::from(3)),
        ("list", Spec::array([Spec::from(true), Spec::null(), Spec::absent()])),
    ]);
    let v = produce("S", &spec, &Env::new()).unwrap();
    assert_eq!(
        serde_json::to_value(&v).unwrap(),
        serde_json::json!({"s": "x", "n": 3, "list": [true, null, null]})
    );
    let keys: Vec<_> = v.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["s", "n", "list"]);
}

#[test]
fn forward_reference_resolves_later_sibling() {
    let spec = Spec::object([("b", get("a")), ("a", Spec::from(42))]);
    let v = produce("S", &spec, &Env::new()).unwrap();
    assert_eq!(v.index("b"), Some(&Value::from(42)));
}

#[test]
fn each_node_is_evaluated_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let spec = Spec::object([
        ("b", get("a")),
        (
            "a",
            Spec::thunk(move |c| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::from(c.random_int(0, 100)))
            }),
        ),
        ("c", get("a")),
    ]);
    let v = produce("S", &spec, &Env::new()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(v.index("a"), v.index("b"));
    assert_eq!(v.index("a"), v.index("c"));
}

#[test]
fn array_elements_can_reference_later_elements() {
    let spec = Spec::array([get("1"), random_int(0, 1000)]);
    let v = produce("S", &spec, &Env::new()).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items[0], items[1]);
}

#[test]
fn mutual_references_are_a_cycle() {
    let spec = Spec::object([("a", get("b")), ("b", get("a"))]);
    let err = produce("S", &spec, &Env::new()).unwrap_err();
    assert!(matches!(err, DefineError::CycleDetected { path } if path == "a"));
}

#[test]
fn self_reference_is_a_cycle() {
    let spec = Spec::object([("a", Spec::object([("x", get("a"))]))]);
    let err = produce("S", &spec, &Env::new()).unwrap_err();
    assert!(matches!(err, DefineError::CycleDetected { .. }));
}

#[test]
fn thunk_values_are_not_expanded() {
    let spec = Spec::object([("v", val(Value::from(vec![Value::from(1)])))]);
    let v = produce("S", &spec, &Env::new()).unwrap();
    assert_eq!(v.index("v").and_then(|a| a.index("0")), Some(&Value::from(1)));
}
