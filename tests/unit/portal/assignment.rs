use super::*;
use crate::define::combinators::{env, get, random_int, text, TextArg};
use crate::foundation::error::DefineError;

fn config() -> PortalConfig {
    PortalConfig {
        secret: "test::".to_string(),
        ..PortalConfig::default()
    }
}

#[test]
fn produces_student_specific_fields() {
    let spec = AssignmentSpec::new(text("Hi ${} (${})", [TextArg::from(env("name")), TextArg::from(env("id"))]))
        .test_stdin(Spec::from("1\n2"));
    let a = produce_assignment(&config(), &spec.to_spec(), "7", "Ada").unwrap();
    assert_eq!(a.description, "Hi Ada (7)");
    assert_eq!(a.summary, None);
    assert_eq!(a.test_stdin.as_deref(), Some("1\n2"));
    assert_eq!(a.archive_summary(), "Hi Ada (7)");
}

#[test]
fn same_student_same_assignment() {
    let spec = AssignmentSpec::new(text("n = ${}", [TextArg::from("n")]))
        .with("n", random_int(0, 1_000_000))
        .to_spec();
    let a = produce_assignment(&config(), &spec, "100", "A").unwrap();
    let b = produce_assignment(&config(), &spec, "100", "Someone Else").unwrap();
    assert_eq!(a, b);

    let other_secret = PortalConfig {
        secret: "other::".to_string(),
        ..PortalConfig::default()
    };
    let c = produce_assignment(&other_secret, &spec, "100", "A").unwrap();
    assert_ne!(a, c);
}

#[test]
fn summary_wins_in_archives() {
    let spec = AssignmentSpec::new("long text").summary(get("short")).with("short", Spec::from("s"));
    let a = produce_assignment(&config(), &spec.into(), "1", "A").unwrap();
    assert_eq!(a.archive_summary(), "s");
}

#[test]
fn non_string_description_is_rejected() {
    let spec = AssignmentSpec::new(Spec::from(3)).to_spec();
    assert!(matches!(
        produce_assignment(&config(), &spec, "1", "A").unwrap_err(),
        DefineError::Other(_)
    ));
}

#[test]
fn assignment_serializes_camel_case() {
    let a = Assignment {
        description: "d".to_string(),
        summary: None,
        test_stdin: Some("1".to_string()),
    };
    assert_eq!(
        serde_json::to_value(&a).unwrap(),
        serde_json::json!({"description": "d", "summary": null, "testStdin": "1"})
    );
}

#[test]
fn student_fields_are_trimmed() {
    let spec = AssignmentSpec::new(text("${}|${}|${}", [
        TextArg::from(env("name")),
        TextArg::from(env("id")),
        TextArg::from("n"),
    ]))
    .with("n", random_int(0, 1_000_000))
    .to_spec();
    let padded = produce_assignment(&config(), &spec, " 123\n", "\tAda ").unwrap();
    let clean = produce_assignment(&config(), &spec, "123", "Ada").unwrap();
    assert_eq!(padded, clean);
    assert!(clean.description.starts_with("Ada|123|"));
}
