use super::*;
use crate::define::produce::Producer;

fn produce_json(def: serde_json::Value) -> DefineResult<Value> {
    let spec = spec_from_json(&def)?;
    Producer::new("S").env_var("name", "Ada").produce(&spec)
}

#[test]
fn plain_json_is_literal_structure() {
    let def = serde_json::json!({"a": [1, "two", null, false], "b": {"c": 1.5}});
    let v = produce_json(def.clone()).unwrap();
    assert_eq!(v.to_json(), def);
}

#[test]
fn directives_expand_to_combinators() {
    let def = serde_json::json!({
        "who": {"$env": "name"},
        "n": {"$randomInt": [10, 20]},
        "copy": {"$get": "n"},
        "r": {"$random": null},
        "p": {"$pick": ["x", "y"]},
        "s": {"$shuffle": [1, 2, 3]},
        "raw": {"$val": {"$get": "n"}},
        "c": {"$concat": ["id:", {"$env": "name"}]},
        "t": {"$text": {"template": " ${} has ${} ", "args": ["who", [{"$val": "cats"}]]}},
        "m": {"$match": {"on": ".who", "cases": {"Ada": "yes", "_": "no"}}}
    });
    let v = produce_json(def).unwrap();
    let n = v.index("n").and_then(Value::as_i64).unwrap();
    assert!((10..20).contains(&n));
    assert_eq!(v.index("copy").and_then(Value::as_i64), Some(n));
    assert_eq!(v.index("who"), Some(&Value::from("Ada")));
    assert!(matches!(v.index("p").and_then(Value::as_str), Some("x" | "y")));
    assert_eq!(v.index("s").and_then(Value::as_array).map(<[Value]>::len), Some(3));
    assert_eq!(
        v.index("raw").map(Value::to_json),
        Some(serde_json::json!({"$get": "n"}))
    );
    assert_eq!(v.index("c"), Some(&Value::from("id:Ada")));
    assert_eq!(v.index("t"), Some(&Value::from("Ada has cats")));
    assert_eq!(v.index("m"), Some(&Value::from("yes")));
}

#[test]
fn match_accepts_spec_scrutinee() {
    let def = serde_json::json!({"$match": {"on": {"$val": 3}, "cases": {"3": "three"}}});
    assert_eq!(produce_json(def).unwrap(), Value::from("three"));
}

#[test]
fn unknown_directive_is_unknown_spec_kind() {
    let err = spec_from_json(&serde_json::json!({"a": {"$frobnicate": 1}})).unwrap_err();
    assert!(matches!(err, DefineError::UnknownSpecKind(msg) if msg.contains("$frobnicate")));
}

#[test]
fn malformed_directive_is_unknown_spec_kind() {
    for def in [
        serde_json::json!({"$randomInt": [1]}),
        serde_json::json!({"$get": 3}),
        serde_json::json!({"$pick": "x"}),
        serde_json::json!({"$text": {"args": []}}),
        serde_json::json!({"$match": {"on": "x"}}),
    ] {
        assert!(matches!(
            spec_from_json(&def).unwrap_err(),
            DefineError::UnknownSpecKind(_)
        ));
    }
}

#[test]
fn multi_key_and_double_dollar_objects_are_plain() {
    let def = serde_json::json!({"$$x": 1});
    assert_eq!(produce_json(def.clone()).unwrap().to_json(), def);
    let def = serde_json::json!({"$env": "name", "other": 1});
    assert_eq!(produce_json(def.clone()).unwrap().to_json(), def);
}

#[test]
fn invalid_json_text_is_wrapped() {
    assert!(matches!(spec_from_str("{").unwrap_err(), DefineError::Other(_)));
}

#[test]
fn produced_objects_keep_authored_key_order() {
    let spec = spec_from_str(r#"{"zeta": 1, "alpha": {"$get": "zeta"}, "mid": [3]}"#).unwrap();
    let v = Producer::new("S").produce(&spec).unwrap();
    let keys: Vec<_> = v.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    assert_eq!(v.to_json().to_string(), r#"{"zeta":1,"alpha":1,"mid":[3]}"#);
}
