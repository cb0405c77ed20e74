use std::{collections::HashMap, sync::Arc};

use crate::{
    define::{path::PathRef, produce::Env, spec::Spec},
    foundation::error::{DefineError, DefineResult},
    foundation::rng::{self, RandomSource, Seeder},
    foundation::value::Value,
};

pub(crate) const ROOT_KEY: &str = "$root";
pub(crate) const ANON_PREFIX: &str = "$$anon_";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Memo slot of one node.
#[derive(Debug)]
pub(crate) enum Slot {
    Unresolved,
    InProgress,
    Resolved(Value),
}

pub(crate) struct Node {
    pub(crate) key: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: usize,
    pub(crate) child_specs: HashMap<String, Spec>,
    pub(crate) children: HashMap<String, NodeId>,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) slot: Slot,
    anon_counter: u32,
}

/// All nodes of one production. Nodes never move or get freed before the arena drops.
pub(crate) struct Arena {
    base_seed: String,
    env: Env,
    seeder: Arc<dyn Seeder>,
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn new(base_seed: String, env: Env, seeder: Arc<dyn Seeder>) -> Self {
        let rng = seeder.rng_for(&base_seed, &[ROOT_KEY]);
        let root = Node {
            key: ROOT_KEY.to_string(),
            parent: None,
            depth: 0,
            child_specs: HashMap::new(),
            children: HashMap::new(),
            rng,
            slot: Slot::Unresolved,
            anon_counter: 0,
        };
        Self {
            base_seed,
            env,
            seeder,
            nodes: vec![root],
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn base_seed(&self) -> &str {
        &self.base_seed
    }

    pub(crate) fn env(&self) -> &Env {
        &self.env
    }

    /// Keys from `$root` down to `id`, inclusive.
    pub(crate) fn key_path(&self, id: NodeId) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.node(id).depth + 1);
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = self.node(n);
            keys.push(node.key.as_str());
            cur = node.parent;
        }
        keys.reverse();
        keys
    }

    /// Human-readable location used in errors and traces (`$root` for the root).
    pub(crate) fn dotted_path(&self, id: NodeId) -> String {
        let keys = self.key_path(id);
        if keys.len() == 1 {
            return ROOT_KEY.to_string();
        }
        keys[1..].join(".")
    }

    pub(crate) fn ancestor_at_depth(&self, id: NodeId, depth: usize) -> NodeId {
        let mut cur = id;
        while self.node(cur).depth > depth {
            match self.node(cur).parent {
                Some(p) => cur = p,
                None => break,
            }
        }
        cur
    }

    /// Allocate a node under `parent` without registering it in `parent.children`.
    fn alloc(&mut self, parent: NodeId, key: String) -> NodeId {
        let rng = {
            let mut path = self.key_path(parent);
            path.push(&key);
            self.seeder.rng_for(&self.base_seed, &path)
        };
        let depth = self.node(parent).depth + 1;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            key,
            parent: Some(parent),
            depth,
            child_specs: HashMap::new(),
            children: HashMap::new(),
            rng,
            slot: Slot::Unresolved,
            anon_counter: 0,
        });
        id
    }

    /// The memoized child `key` of `parent`, created on first access.
    pub(crate) fn child(&mut self, parent: NodeId, key: &str) -> NodeId {
        if let Some(&id) = self.node(parent).children.get(key) {
            return id;
        }
        let id = self.alloc(parent, key.to_string());
        self.node_mut(parent).children.insert(key.to_string(), id);
        id
    }

    /// A fresh `$$anon_<n>` child. It is never registered, so no path can reach it.
    pub(crate) fn mint_anon(&mut self, parent: NodeId) -> NodeId {
        let n = {
            let node = self.node_mut(parent);
            let n = node.anon_counter;
            node.anon_counter += 1;
            n
        };
        let id = self.alloc(parent, format!("{ANON_PREFIX}{n}"));
        tracing::trace!(parent = %self.dotted_path(parent), anon = n, "minted anonymous context");
        id
    }
}

/// Handle given to thunks: the node being resolved plus the production it belongs to.
pub struct Ctx<'a> {
    arena: &'a mut Arena,
    node: NodeId,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(arena: &'a mut Arena, node: NodeId) -> Self {
        Self { arena, node }
    }

    /// This node's edge label (`$root`, a field name, an index, or `$$anon_<n>`).
    pub fn key(&self) -> &str {
        &self.arena.node(self.node).key
    }

    /// Keys from `$root` to this node.
    pub fn path(&self) -> Vec<String> {
        self.arena
            .key_path(self.node)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Number of ancestors (0 at the root).
    pub fn depth(&self) -> usize {
        self.arena.node(self.node).depth
    }

    /// The production's base seed.
    pub fn base_seed(&self) -> &str {
        self.arena.base_seed()
    }

    /// One input from the production's environment, or [`Value::Absent`].
    pub fn env(&self, key: &str) -> Value {
        self.arena.env().get(key).cloned().unwrap_or_default()
    }

    /// One uniform draw in `[0, 1)` from this node's generator.
    pub fn random_f64(&mut self) -> f64 {
        self.arena.node_mut(self.node).rng.next_f64()
    }

    /// `floor(draw * (max_excl - min)) + min`.
    pub fn random_int(&mut self, min: i64, max_excl: i64) -> i64 {
        rng::random_int(self.arena.node_mut(self.node).rng.as_mut(), min, max_excl)
    }

    /// Fisher–Yates with this node's generator.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        rng::shuffle_in_place(self.arena.node_mut(self.node).rng.as_mut(), items);
    }

    /// Read another node by absolute (`a.b`) or relative (`.a`, `..a`) path.
    pub fn get(&mut self, path: &str) -> DefineResult<Value> {
        let path = PathRef::parse(path);
        self.arena.resolve_path(self.node, &path)
    }

    pub(crate) fn get_ref(&mut self, path: &PathRef) -> DefineResult<Value> {
        self.arena.resolve_path(self.node, path)
    }

    /// Resolve `spec` under this very node, so its children become addressable here.
    pub fn resolve(&mut self, spec: &Spec) -> DefineResult<Value> {
        self.arena.resolve(self.node, spec)
    }

    /// Resolve `spec` under a fresh anonymous child of this node.
    pub fn resolve_isolated(&mut self, spec: &Spec) -> DefineResult<Value> {
        let anon = self.mint_anon();
        self.resolve_anon(anon, spec)
    }

    pub(crate) fn mint_anon(&mut self) -> NodeId {
        self.arena.mint_anon(self.node)
    }

    pub(crate) fn resolve_anon(&mut self, anon: NodeId, spec: &Spec) -> DefineResult<Value> {
        debug_assert_eq!(self.arena.node(anon).parent, Some(self.node));
        self.arena.node_mut(anon).slot = Slot::InProgress;
        let value = self.arena.resolve(anon, spec)?;
        self.arena.node_mut(anon).slot = Slot::Resolved(value.clone());
        Ok(value)
    }
}

impl Arena {
    /// Resolve the value held by an existing node.
    pub(crate) fn settle(&mut self, id: NodeId) -> DefineResult<Value> {
        match &self.node(id).slot {
            Slot::Resolved(v) => Ok(v.clone()),
            Slot::InProgress => Err(DefineError::cycle(self.dotted_path(id))),
            Slot::Unresolved => {
                let node = self.node(id);
                let key = node.key.clone();
                let spec = node
                    .parent
                    .and_then(|p| self.node(p).child_specs.get(&key).cloned().map(|s| (p, s)));
                match spec {
                    Some((parent, spec)) => self.resolve_or_fetch(parent, &key, &spec),
                    None => Err(DefineError::missing_key(key)),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/define/context.rs"]
mod tests;
