use crate::{
    define::context::{ANON_PREFIX, Arena, NodeId, Slot},
    foundation::error::{DefineError, DefineResult},
    foundation::value::Value,
};

/// A parsed path reference.
///
/// `"a.b"` is absolute (starts at the root). `".a"` starts at the parent of the reading
/// node, `"..a"` at its grandparent, and so on; starting points above the root clamp to
/// the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PathRef {
    pub(crate) levels_up: Option<usize>,
    pub(crate) segments: Vec<String>,
}

impl PathRef {
    pub(crate) fn parse(path: &str) -> Self {
        let rest = path.trim_start_matches('.');
        let dots = path.len() - rest.len();
        Self {
            levels_up: (dots > 0).then_some(dots),
            segments: rest.split('.').map(str::to_string).collect(),
        }
    }

    /// One more level up for relative paths; absolute paths are unchanged.
    pub(crate) fn one_level_deeper(mut self) -> Self {
        if let Some(k) = self.levels_up.as_mut() {
            *k += 1;
        }
        self
    }
}

impl Arena {
    pub(crate) fn resolve_path(&mut self, from: NodeId, path: &PathRef) -> DefineResult<Value> {
        if let Some(seg) = path.segments.iter().find(|s| s.starts_with(ANON_PREFIX)) {
            return Err(DefineError::missing_key(seg.clone()));
        }

        let start = match path.levels_up {
            None => NodeId::ROOT,
            Some(k) => {
                let depth = self.node(from).depth;
                self.ancestor_at_depth(from, depth.saturating_sub(k))
            }
        };

        // Structural descent through nodes that already exist.
        let mut cur = start;
        let mut consumed = 0;
        for seg in &path.segments {
            match self.node(cur).children.get(seg) {
                Some(&child) => {
                    cur = child;
                    consumed += 1;
                }
                None => break,
            }
        }

        let rest = &path.segments[consumed..];
        let Some((first, tail)) = rest.split_first() else {
            return self.settle(cur);
        };

        let registered = self.node(cur).child_specs.get(first).cloned();
        let value = match registered {
            Some(spec) => {
                tracing::trace!(
                    from = %self.dotted_path(from),
                    at = %self.dotted_path(cur),
                    key = %first,
                    "resolving on demand"
                );
                self.resolve_or_fetch(cur, first, &spec)?
            }
            // Nodes produced by thunks have no child specs, but their value may still
            // be a mapping or sequence.
            None => match &self.node(cur).slot {
                Slot::Resolved(v) => return index_value(v, rest),
                _ => return Err(DefineError::missing_key(first.clone())),
            },
        };

        index_value(&value, tail)
    }
}

/// Plain field/index lookups into an already concrete value.
fn index_value(value: &Value, segments: &[String]) -> DefineResult<Value> {
    let mut cur = value;
    for seg in segments {
        if !cur.is_indexable() {
            return Err(DefineError::not_indexable(seg.clone()));
        }
        cur = cur
            .index(seg)
            .ok_or_else(|| DefineError::missing_key(seg.clone()))?;
    }
    Ok(cur.clone())
}

#[cfg(test)]
#[path = "../../tests/unit/define/path.rs"]
mod tests;
