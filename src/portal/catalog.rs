use crate::{
    define::combinators::{TextArg, bind, env, get, map, pick, random_int, text},
    define::spec::Spec,
    foundation::error::DefineError,
    foundation::value::Value,
    portal::assignment::AssignmentSpec,
};

const FIRST_DESCRIPTION: &str = r#"
# Bazat e Programimit - Detyra 1

| Studenti | ID |
|----------|----|
| ${} | ${} |

Shkruani një program në C++ që lexon **${}** numra të plotë nga hyrja standarde
dhe shtyp ${} e tyre.

Për hyrjen:

```
${}
```

programi duhet të shtypë vetëm rezultatin, p.sh. `Rezultati: 42`.
"#;

/// The bundled first assignment.
///
/// Each student gets their own count of inputs, operation, and test input.
pub fn first_assignment() -> AssignmentSpec {
    AssignmentSpec::new(text(
        FIRST_DESCRIPTION,
        [
            TextArg::from(env("name")),
            TextArg::from(env("id")),
            TextArg::from("params.count"),
            TextArg::from("params.operation"),
            TextArg::from("testStdin"),
        ],
    ))
    .summary(text(
        "Detyra 1: ${} e ${} numrave",
        [TextArg::from("params.operation"), TextArg::from("params.count")],
    ))
    .test_stdin(map("params.inputs", |inputs| {
        let lines = inputs
            .as_array()
            .ok_or_else(|| DefineError::mapper("params.inputs is not a list"))?
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>();
        Ok(Value::String(lines.join("\n")))
    }))
    .with(
        "params",
        Spec::object([
            ("count", random_int(3, 6)),
            ("operation", pick([Spec::from("shumën"), Spec::from("prodhimin")])),
            (
                "inputs",
                bind(get("params.count"), |n| {
                    let n = n.as_i64().unwrap_or(0).max(0);
                    Ok(Spec::array((0..n).map(|_| random_int(1, 50))))
                }),
            ),
        ]),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/portal/catalog.rs"]
mod tests;
