//! Builders for the thunks definitions are written with.
//!
//! Every function here returns a [`Spec`]; nothing runs until the spec is produced.

use std::sync::Arc;

use crate::{
    define::context::Ctx,
    define::path::PathRef,
    define::spec::Spec,
    foundation::error::{DefineError, DefineResult},
    foundation::value::Value,
};

const PLACEHOLDER: &str = "${}";

/// A constant value, returned unchanged and never expanded into child nodes.
pub fn val(value: impl Into<Value>) -> Spec {
    let value = value.into();
    Spec::thunk(move |_| Ok(value.clone()))
}

/// One input from the production environment ([`Value::Absent`] when unset).
pub fn env(key: impl Into<String>) -> Spec {
    let key = key.into();
    Spec::thunk(move |c| Ok(c.env(&key)))
}

/// The value of another node; see [`Ctx::get`] for path syntax.
pub fn get(path: &str) -> Spec {
    let path = PathRef::parse(path);
    Spec::thunk(move |c| c.get_ref(&path))
}

/// One uniform draw in `[0, 1)`.
pub fn random() -> Spec {
    Spec::thunk(|c| Ok(Value::Number(c.random_f64())))
}

/// A uniform integer in `[min, max_excl)`, one draw.
pub fn random_int(min: i64, max_excl: i64) -> Spec {
    Spec::thunk(move |c| Ok(Value::from(c.random_int(min, max_excl))))
}

/// One of `specs`, resolved under the invoking node itself.
pub fn pick(specs: impl IntoIterator<Item = Spec>) -> Spec {
    let specs: Arc<[Spec]> = specs.into_iter().collect();
    Spec::thunk(move |c| pick_from(c, &specs))
}

fn pick_from(c: &mut Ctx<'_>, specs: &[Spec]) -> DefineResult<Value> {
    let index = c.random_int(0, specs.len() as i64);
    match usize::try_from(index).ok().and_then(|i| specs.get(i)) {
        Some(spec) => c.resolve(spec),
        None => Ok(Value::Absent),
    }
}

/// `specs` permuted with the invoking node's generator, then resolved as an array
/// under that node.
pub fn shuffle(specs: impl IntoIterator<Item = Spec>) -> Spec {
    let specs: Vec<Spec> = specs.into_iter().collect();
    Spec::thunk(move |c| {
        let mut order = specs.clone();
        c.shuffle(&mut order);
        c.resolve(&Spec::array(order))
    })
}

/// What a [`match_on`] switches on.
#[derive(Clone, Debug)]
pub enum Scrutinee {
    /// A path reference, read relative to the invoking node.
    Path(String),
    /// Any spec, resolved in isolation.
    Spec(Spec),
}

impl From<&str> for Scrutinee {
    fn from(v: &str) -> Self {
        Self::Path(v.to_string())
    }
}

impl From<String> for Scrutinee {
    fn from(v: String) -> Self {
        Self::Path(v)
    }
}

impl From<Spec> for Scrutinee {
    fn from(v: Spec) -> Self {
        Self::Spec(v)
    }
}

/// Switch on the stringified scrutinee; `"_"` is the fallback case.
///
/// The scrutinee is resolved in an anonymous child, so relative paths are shifted one
/// level up to keep meaning "relative to the invoking node".
pub fn match_on<K: Into<String>>(
    expr: impl Into<Scrutinee>,
    cases: impl IntoIterator<Item = (K, Spec)>,
) -> Spec {
    let expr = match expr.into() {
        Scrutinee::Path(p) => {
            let path = PathRef::parse(&p).one_level_deeper();
            Spec::thunk(move |c| c.get_ref(&path))
        }
        Scrutinee::Spec(s) => s,
    };
    let cases: Vec<(String, Spec)> = cases.into_iter().map(|(k, v)| (k.into(), v)).collect();
    bind(expr, move |value| {
        let key = value.to_string();
        let case = cases
            .iter()
            .find(|(k, _)| *k == key)
            .or_else(|| cases.iter().find(|(k, _)| k == "_"));
        match case {
            Some((_, spec)) => Ok(spec.clone()),
            None => Err(DefineError::no_matching_case(key)),
        }
    })
}

/// Sample each spec in its own anonymous child, then resolve the spec `mapper` builds
/// from the samples under the invoking node.
fn bind_n(
    specs: Vec<Spec>,
    mapper: impl Fn(Vec<Value>) -> DefineResult<Spec> + Send + Sync + 'static,
) -> Spec {
    Spec::thunk(move |c| {
        let anons: Vec<_> = specs.iter().map(|_| c.mint_anon()).collect();
        let mut values = Vec::with_capacity(specs.len());
        for (anon, spec) in anons.into_iter().zip(&specs) {
            values.push(c.resolve_anon(anon, spec)?);
        }
        let next = mapper(values)?;
        c.resolve(&next)
    })
}

/// Sample `spec` privately, then publish the spec built from the sample.
pub fn bind(
    spec: Spec,
    mapper: impl Fn(Value) -> DefineResult<Spec> + Send + Sync + 'static,
) -> Spec {
    bind_n(vec![spec], move |mut v| mapper(v.remove(0)))
}

/// [`bind`] over two independent samples.
pub fn bind2(
    a: Spec,
    b: Spec,
    mapper: impl Fn(Value, Value) -> DefineResult<Spec> + Send + Sync + 'static,
) -> Spec {
    bind_n(vec![a, b], move |v| {
        let [a, b]: [Value; 2] = v
            .try_into()
            .map_err(|_| DefineError::mapper("bind2 expects two samples"))?;
        mapper(a, b)
    })
}

/// [`bind`] over three independent samples.
pub fn bind3(
    a: Spec,
    b: Spec,
    c: Spec,
    mapper: impl Fn(Value, Value, Value) -> DefineResult<Spec> + Send + Sync + 'static,
) -> Spec {
    bind_n(vec![a, b, c], move |v| {
        let [a, b, c]: [Value; 3] = v
            .try_into()
            .map_err(|_| DefineError::mapper("bind3 expects three samples"))?;
        mapper(a, b, c)
    })
}

fn map_n(
    paths: &[&str],
    mapper: impl Fn(Vec<Value>) -> DefineResult<Value> + Send + Sync + 'static,
) -> Spec {
    let paths: Vec<PathRef> = paths.iter().map(|p| PathRef::parse(p)).collect();
    Spec::thunk(move |c| {
        let values = paths
            .iter()
            .map(|p| c.get_ref(p))
            .collect::<DefineResult<Vec<_>>>()?;
        mapper(values)
    })
}

/// Transform the value at `path`.
pub fn map(
    path: &str,
    mapper: impl Fn(Value) -> DefineResult<Value> + Send + Sync + 'static,
) -> Spec {
    map_n(&[path], move |mut v| mapper(v.remove(0)))
}

/// Combine the values at two paths.
pub fn map2(
    p1: &str,
    p2: &str,
    mapper: impl Fn(Value, Value) -> DefineResult<Value> + Send + Sync + 'static,
) -> Spec {
    map_n(&[p1, p2], move |v| {
        let mut it = v.into_iter();
        mapper(it.next().unwrap_or_default(), it.next().unwrap_or_default())
    })
}

/// Combine the values at three paths.
pub fn map3(
    p1: &str,
    p2: &str,
    p3: &str,
    mapper: impl Fn(Value, Value, Value) -> DefineResult<Value> + Send + Sync + 'static,
) -> Spec {
    map_n(&[p1, p2, p3], move |v| {
        let mut it = v.into_iter();
        mapper(
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
        )
    })
}

/// Combine the values at four paths.
pub fn map4(
    paths: [&str; 4],
    mapper: impl Fn(Value, Value, Value, Value) -> DefineResult<Value> + Send + Sync + 'static,
) -> Spec {
    map_n(&paths, move |v| {
        let mut it = v.into_iter();
        mapper(
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
        )
    })
}

/// Combine the values at five paths.
pub fn map5(
    paths: [&str; 5],
    mapper: impl Fn(Value, Value, Value, Value, Value) -> DefineResult<Value>
    + Send
    + Sync
    + 'static,
) -> Spec {
    map_n(&paths, move |v| {
        let mut it = v.into_iter();
        mapper(
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
            it.next().unwrap_or_default(),
        )
    })
}

/// One interpolated argument of [`text`].
#[derive(Clone, Debug)]
pub enum TextArg {
    /// A path reference, read relative to the invoking node.
    Path(String),
    /// Alternatives; one is picked with the invoking node's generator.
    Pick(Vec<Spec>),
    /// Any spec, resolved under the invoking node.
    Spec(Spec),
}

impl From<&str> for TextArg {
    fn from(v: &str) -> Self {
        Self::Path(v.to_string())
    }
}

impl From<String> for TextArg {
    fn from(v: String) -> Self {
        Self::Path(v)
    }
}

impl From<Vec<Spec>> for TextArg {
    fn from(v: Vec<Spec>) -> Self {
        Self::Pick(v)
    }
}

impl From<Spec> for TextArg {
    fn from(v: Spec) -> Self {
        Self::Spec(v)
    }
}

/// Interpolate `args` into the `${}` placeholders of `template`, then trim.
///
/// Arguments are evaluated left to right, which fixes the order of random draws.
pub fn text(template: &str, args: impl IntoIterator<Item = TextArg>) -> Spec {
    let pieces: Vec<String> = template.split(PLACEHOLDER).map(str::to_string).collect();
    let args: Vec<TextArg> = args.into_iter().collect();
    Spec::thunk(move |c| {
        if pieces.len() != args.len() + 1 {
            return Err(DefineError::template(format!(
                "{} placeholder(s) but {} argument(s)",
                pieces.len() - 1,
                args.len()
            )));
        }
        let mut out = String::new();
        for (i, piece) in pieces.iter().enumerate() {
            out.push_str(piece);
            if let Some(arg) = args.get(i) {
                let value = match arg {
                    TextArg::Path(p) => c.get(p)?,
                    TextArg::Pick(specs) => pick_from(c, specs)?,
                    TextArg::Spec(spec) => c.resolve(spec)?,
                };
                out.push_str(&value.to_string());
            }
        }
        Ok(Value::String(out.trim().to_string()))
    })
}

/// Resolve every part under the invoking node, stringify, join and trim.
pub fn concat(parts: impl IntoIterator<Item = Spec>) -> Spec {
    let parts: Vec<Spec> = parts.into_iter().collect();
    Spec::thunk(move |c| {
        let mut out = String::new();
        for part in &parts {
            out.push_str(&c.resolve(part)?.to_string());
        }
        Ok(Value::String(out.trim().to_string()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/define/combinators.rs"]
mod tests;
