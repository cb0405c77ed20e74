use crate::{
    define::context::{Arena, Ctx, NodeId, Slot},
    define::spec::Spec,
    foundation::error::{DefineError, DefineResult},
    foundation::value::{Fields, Value},
};

impl Arena {
    /// Expand `spec` under `node`.
    ///
    /// Arrays and objects register every child spec on `node` before any child is
    /// resolved, so earlier siblings may reference later ones.
    pub(crate) fn resolve(&mut self, node: NodeId, spec: &Spec) -> DefineResult<Value> {
        match spec {
            Spec::Literal(v) => Ok(v.clone()),
            Spec::Thunk(t) => t.call(&mut Ctx::new(self, node)),
            Spec::Array(items) => {
                {
                    let specs = &mut self.node_mut(node).child_specs;
                    for (i, item) in items.iter().enumerate() {
                        specs.insert(i.to_string(), item.clone());
                    }
                }
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(self.resolve_or_fetch(node, &i.to_string(), item)?);
                }
                Ok(Value::Array(out))
            }
            Spec::Object(fields) => {
                {
                    let specs = &mut self.node_mut(node).child_specs;
                    for (k, v) in fields.iter() {
                        specs.insert(k.to_string(), v.clone());
                    }
                }
                let mut out = Fields::with_capacity(fields.len());
                for (k, v) in fields.iter() {
                    out.insert(k, self.resolve_or_fetch(node, k, v)?);
                }
                Ok(Value::Object(out))
            }
        }
    }

    /// The single choke point for child evaluation: each child resolves at most once.
    pub(crate) fn resolve_or_fetch(
        &mut self,
        parent: NodeId,
        key: &str,
        spec: &Spec,
    ) -> DefineResult<Value> {
        let child = self.child(parent, key);
        match &self.node(child).slot {
            Slot::Resolved(v) => return Ok(v.clone()),
            Slot::InProgress => return Err(DefineError::cycle(self.dotted_path(child))),
            Slot::Unresolved => {}
        }

        self.node_mut(child).slot = Slot::InProgress;
        let value = self.resolve(child, spec)?;
        self.node_mut(child).slot = Slot::Resolved(value.clone());
        Ok(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/define/resolve.rs"]
mod tests;
