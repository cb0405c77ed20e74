//! Definitions authored as JSON.
//!
//! Plain JSON maps one-to-one onto [`Spec`]. An object with exactly one key that starts
//! with a single `$` is a directive:
//!
//! | directive    | argument                                   |
//! |--------------|--------------------------------------------|
//! | `$val`       | any JSON, returned untouched                |
//! | `$env`       | environment key                             |
//! | `$get`       | path reference                              |
//! | `$random`    | ignored                                     |
//! | `$randomInt` | `[min, max_excl]`                           |
//! | `$pick`      | array of specs                              |
//! | `$shuffle`   | array of specs                              |
//! | `$concat`    | array of specs                              |
//! | `$text`      | `{"template": "...", "args": [...]}`        |
//! | `$match`     | `{"on": path-or-spec, "cases": {...}}`      |
//!
//! In `$text` arguments a string is a path, an array is a pick, anything else a spec.
//! In `$match`, a string `on` is a path.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    define::combinators::{self, Scrutinee, TextArg},
    define::spec::Spec,
    foundation::error::{DefineError, DefineResult},
    foundation::value::Value,
};

type Json = serde_json::Value;

/// Parse a definition from JSON text.
pub fn spec_from_str(s: &str) -> DefineResult<Spec> {
    let json: Json = serde_json::from_str(s)?;
    spec_from_json(&json)
}

/// Read and parse a definition file.
pub fn spec_from_path(path: &Path) -> DefineResult<Spec> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read definition '{}'", path.display()))?;
    spec_from_str(&s)
}

/// Convert a JSON value into a spec, expanding directives.
pub fn spec_from_json(json: &Json) -> DefineResult<Spec> {
    match json {
        Json::Array(items) => Ok(Spec::array(
            items.iter().map(spec_from_json).collect::<DefineResult<Vec<_>>>()?,
        )),
        Json::Object(map) => {
            if map.len() == 1
                && let Some((key, arg)) = map.iter().next()
                && is_directive(key)
            {
                return directive(key, arg);
            }
            let fields = map
                .iter()
                .map(|(k, v)| Ok((k.clone(), spec_from_json(v)?)))
                .collect::<DefineResult<Vec<_>>>()?;
            Ok(Spec::object(fields))
        }
        scalar => Ok(Spec::Literal(Value::from(scalar.clone()))),
    }
}

fn is_directive(key: &str) -> bool {
    key.starts_with('$') && !key.starts_with("$$")
}

fn directive(name: &str, arg: &Json) -> DefineResult<Spec> {
    match name {
        "$val" => Ok(combinators::val(Value::from(arg.clone()))),
        "$env" => Ok(combinators::env(expect_str(name, arg)?)),
        "$get" => Ok(combinators::get(expect_str(name, arg)?)),
        "$random" => Ok(combinators::random()),
        "$randomInt" => {
            let bounds = expect_array(name, arg)?;
            match bounds {
                [min, max] => Ok(combinators::random_int(
                    expect_i64(name, min)?,
                    expect_i64(name, max)?,
                )),
                _ => Err(malformed(name, "expected [min, max_excl]")),
            }
        }
        "$pick" => Ok(combinators::pick(specs_of(name, arg)?)),
        "$shuffle" => Ok(combinators::shuffle(specs_of(name, arg)?)),
        "$concat" => Ok(combinators::concat(specs_of(name, arg)?)),
        "$text" => {
            let template = arg
                .get("template")
                .and_then(Json::as_str)
                .ok_or_else(|| malformed(name, "expected a string 'template'"))?;
            let args = match arg.get("args") {
                None => Vec::new(),
                Some(a) => expect_array(name, a)?
                    .iter()
                    .map(text_arg)
                    .collect::<DefineResult<Vec<_>>>()?,
            };
            Ok(combinators::text(template, args))
        }
        "$match" => {
            let on = arg
                .get("on")
                .ok_or_else(|| malformed(name, "expected 'on'"))?;
            let on = match on {
                Json::String(p) => Scrutinee::Path(p.clone()),
                other => Scrutinee::Spec(spec_from_json(other)?),
            };
            let cases = arg
                .get("cases")
                .and_then(Json::as_object)
                .ok_or_else(|| malformed(name, "expected an object 'cases'"))?
                .iter()
                .map(|(k, v)| Ok((k.clone(), spec_from_json(v)?)))
                .collect::<DefineResult<Vec<_>>>()?;
            Ok(combinators::match_on(on, cases))
        }
        other => Err(DefineError::unknown_spec(format!("unknown directive '{other}'"))),
    }
}

fn text_arg(json: &Json) -> DefineResult<TextArg> {
    Ok(match json {
        Json::String(p) => TextArg::Path(p.clone()),
        Json::Array(items) => TextArg::Pick(
            items
                .iter()
                .map(spec_from_json)
                .collect::<DefineResult<Vec<_>>>()?,
        ),
        other => TextArg::Spec(spec_from_json(other)?),
    })
}

fn specs_of(name: &str, arg: &Json) -> DefineResult<Vec<Spec>> {
    expect_array(name, arg)?.iter().map(spec_from_json).collect()
}

fn expect_str<'a>(name: &str, arg: &'a Json) -> DefineResult<&'a str> {
    arg.as_str()
        .ok_or_else(|| malformed(name, "expected a string"))
}

fn expect_array<'a>(name: &str, arg: &'a Json) -> DefineResult<&'a [Json]> {
    arg.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| malformed(name, "expected an array"))
}

fn expect_i64(name: &str, arg: &Json) -> DefineResult<i64> {
    arg.as_i64()
        .ok_or_else(|| malformed(name, "expected an integer"))
}

fn malformed(name: &str, msg: &str) -> DefineError {
    DefineError::unknown_spec(format!("malformed '{name}': {msg}"))
}

#[cfg(test)]
#[path = "../../tests/unit/define/json.rs"]
mod tests;
