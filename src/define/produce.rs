use std::{collections::BTreeMap, sync::Arc};

use crate::{
    define::context::{Arena, NodeId, Slot},
    define::spec::Spec,
    foundation::error::DefineResult,
    foundation::rng::{HashSeeder, Seeder},
    foundation::value::Value,
};

/// Caller-supplied inputs visible to every node through `env(..)`.
pub type Env = BTreeMap<String, Value>;

/// Configured entry point for producing definitions.
///
/// Each call to [`Producer::produce`] builds a fresh node tree; nothing is shared between
/// calls, so one producer (and one [`Spec`]) may serve many threads.
#[derive(Clone)]
pub struct Producer {
    base_seed: String,
    env: Env,
    seeder: Arc<dyn Seeder>,
}

impl Producer {
    /// A producer with an empty environment and the default [`HashSeeder`].
    pub fn new(base_seed: impl Into<String>) -> Self {
        Self {
            base_seed: base_seed.into(),
            env: Env::new(),
            seeder: Arc::new(HashSeeder),
        }
    }

    /// Replace the environment.
    pub fn env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    /// Set a single environment input.
    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Replace the per-node generator factory.
    pub fn seeder(mut self, seeder: impl Seeder + 'static) -> Self {
        self.seeder = Arc::new(seeder);
        self
    }

    /// The base seed this producer was built with.
    pub fn base_seed(&self) -> &str {
        &self.base_seed
    }

    /// Resolve `spec` into a concrete value.
    #[tracing::instrument(skip_all, fields(base_seed = %self.base_seed))]
    pub fn produce(&self, spec: &Spec) -> DefineResult<Value> {
        let mut arena = Arena::new(
            self.base_seed.clone(),
            self.env.clone(),
            Arc::clone(&self.seeder),
        );
        let root = NodeId::ROOT;
        arena.node_mut(root).slot = Slot::InProgress;
        let value = arena.resolve(root, spec)?;
        arena.node_mut(root).slot = Slot::Resolved(value.clone());
        Ok(value)
    }
}

/// Resolve `spec` with the default seeder. Same inputs always give the same value.
pub fn produce(base_seed: &str, spec: &Spec, env: &Env) -> DefineResult<Value> {
    Producer::new(base_seed).env(env.clone()).produce(spec)
}

#[cfg(test)]
#[path = "../../tests/unit/define/produce.rs"]
mod tests;
