use std::{fmt, sync::Arc};

use crate::{
    define::context::Ctx,
    foundation::error::DefineResult,
    foundation::value::{Fields, Value},
};

type ThunkFn = dyn Fn(&mut Ctx<'_>) -> DefineResult<Value> + Send + Sync;

/// A function of the resolution context embedded in a [`Spec`].
#[derive(Clone)]
pub struct Thunk(Arc<ThunkFn>);

impl Thunk {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&mut Ctx<'_>) -> DefineResult<Value> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, ctx: &mut Ctx<'_>) -> DefineResult<Value> {
        (self.0)(ctx)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

/// An authored, unresolved description of a value.
///
/// Specs are immutable and cheap to clone; one definition can be produced many times
/// (and from many threads) with different seeds and environments.
#[derive(Clone, Debug)]
pub enum Spec {
    /// A value returned as-is. Paths may still index into it once it is resolved.
    Literal(Value),
    /// Ordered children, addressed by decimal index.
    Array(Arc<[Spec]>),
    /// Named children, registered in insertion order.
    Object(Arc<Fields<Spec>>),
    /// A function of the context of the node it is resolved under.
    Thunk(Thunk),
}

impl Spec {
    /// A literal value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// The absent value.
    pub fn absent() -> Self {
        Self::Literal(Value::Absent)
    }

    /// An explicit null.
    pub fn null() -> Self {
        Self::Literal(Value::Null)
    }

    /// An array of child specs.
    pub fn array(items: impl IntoIterator<Item = Spec>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// A mapping of child specs, kept in the given order.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Spec)>) -> Self {
        Self::Object(Arc::new(fields.into_iter().collect()))
    }

    /// An arbitrary function of the context.
    pub fn thunk(f: impl Fn(&mut Ctx<'_>) -> DefineResult<Value> + Send + Sync + 'static) -> Self {
        Self::Thunk(Thunk::new(f))
    }
}

impl From<Value> for Spec {
    /// Arrays and objects become addressable child specs; scalars become literals.
    fn from(v: Value) -> Self {
        match v {
            Value::Array(items) => Self::array(items.into_iter().map(Spec::from)),
            Value::Object(fields) => {
                Self::object(fields.into_iter().map(|(k, v)| (k, Spec::from(v))))
            }
            scalar => Self::Literal(scalar),
        }
    }
}

impl From<&str> for Spec {
    fn from(v: &str) -> Self {
        Self::literal(v)
    }
}

impl From<String> for Spec {
    fn from(v: String) -> Self {
        Self::literal(v)
    }
}

impl From<bool> for Spec {
    fn from(v: bool) -> Self {
        Self::literal(v)
    }
}

impl From<f64> for Spec {
    fn from(v: f64) -> Self {
        Self::literal(v)
    }
}

impl From<i32> for Spec {
    fn from(v: i32) -> Self {
        Self::literal(v)
    }
}

impl From<i64> for Spec {
    fn from(v: i64) -> Self {
        Self::literal(v)
    }
}

impl From<Vec<Spec>> for Spec {
    fn from(v: Vec<Spec>) -> Self {
        Self::array(v)
    }
}

impl From<Thunk> for Spec {
    fn from(v: Thunk) -> Self {
        Self::Thunk(v)
    }
}
