use super::*;
use crate::foundation::rng::HashSeeder;

fn arena() -> Arena {
    let mut env = Env::new();
    env.insert("name".to_string(), Value::from("Ada"));
    Arena::new("S1".to_string(), env, Arc::new(HashSeeder))
}

#[test]
fn children_are_memoized_and_keyed_by_path() {
    let mut a = arena();
    let x = a.child(NodeId::ROOT, "x");
    let y = a.child(x, "0");
    assert_eq!(a.child(NodeId::ROOT, "x"), x);
    assert_eq!(a.key_path(y), vec!["$root", "x", "0"]);
    assert_eq!(a.dotted_path(y), "x.0");
    assert_eq!(a.dotted_path(NodeId::ROOT), "$root");
    assert_eq!(a.node(y).depth, 2);
    assert_eq!(a.ancestor_at_depth(y, 0), NodeId::ROOT);
    assert_eq!(a.ancestor_at_depth(y, 1), x);
    assert_eq!(a.ancestor_at_depth(y, 5), y);
}

#[test]
fn anonymous_children_are_numbered_and_unregistered() {
    let mut a = arena();
    let first = a.mint_anon(NodeId::ROOT);
    let second = a.mint_anon(NodeId::ROOT);
    assert_eq!(a.node(first).key, "$$anon_0");
    assert_eq!(a.node(second).key, "$$anon_1");
    assert!(a.node(NodeId::ROOT).children.is_empty());
}

#[test]
fn node_rng_depends_only_on_position() {
    let mut a = arena();
    let _noise = a.child(NodeId::ROOT, "other");
    let x = a.child(NodeId::ROOT, "x");
    let from_arena = a.node_mut(x).rng.next_f64();

    let mut b = arena();
    let x = b.child(NodeId::ROOT, "x");
    assert_eq!(b.node_mut(x).rng.next_f64(), from_arena);
}

#[test]
fn ctx_exposes_env_and_location() {
    let mut a = arena();
    let x = a.child(NodeId::ROOT, "x");
    let c = Ctx::new(&mut a, x);
    assert_eq!(c.key(), "x");
    assert_eq!(c.path(), vec!["$root".to_string(), "x".to_string()]);
    assert_eq!(c.depth(), 1);
    assert_eq!(c.base_seed(), "S1");
    assert_eq!(c.env("name"), Value::from("Ada"));
    assert_eq!(c.env("missing"), Value::Absent);
}

#[test]
fn settle_reports_in_progress_nodes_as_cycles() {
    let mut a = arena();
    let x = a.child(NodeId::ROOT, "x");
    a.node_mut(x).slot = Slot::InProgress;
    assert!(matches!(
        a.settle(x),
        Err(DefineError::CycleDetected { path }) if path == "x"
    ));
    a.node_mut(x).slot = Slot::Resolved(Value::from(3));
    assert_eq!(a.settle(x).unwrap(), Value::from(3));
}
