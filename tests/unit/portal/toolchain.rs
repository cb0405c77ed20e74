use super::*;

#[test]
fn successful_process_keeps_warnings_in_log() {
    let r = TypeCheckResult::from_process(false, "", "main.cpp:2:9: warning: unused variable 'x'\n");
    assert!(r.is_ok());
    assert_eq!(r.log, "main.cpp:2:9: warning: unused variable 'x'");

    assert_eq!(TypeCheckResult::from_process(false, "", ""), TypeCheckResult::ok());
}

#[test]
fn log_joins_stdout_and_stderr() {
    let r = TypeCheckResult::from_process(true, "note: from stdout\n", "error: from stderr");
    assert_eq!(r.status, CheckStatus::Failed);
    assert_eq!(r.log, "note: from stdout\n\nerror: from stderr");
}

#[test]
fn failure_strips_fatal_errors_note() {
    let stderr = "main.cpp:3:5: error: expected ';'\ncompilation terminated due to -Wfatal-errors.\n";
    let r = TypeCheckResult::from_process(true, "", stderr);
    assert_eq!(r.status, CheckStatus::Failed);
    assert_eq!(r.log, "main.cpp:3:5: error: expected ';'");
}

#[test]
fn silent_failure_is_unknown() {
    let r = TypeCheckResult::from_process(true, " linker said something \n", "");
    assert_eq!(r.status, CheckStatus::Unknown);
    assert_eq!(r.log, "linker said something");
}

#[test]
fn any_stderr_on_failure_is_failed() {
    let r = TypeCheckResult::from_process(true, "", "compilation terminated due to -Wfatal-errors.");
    assert_eq!(r.status, CheckStatus::Failed);
    assert_eq!(r.log, "");

    let r = TypeCheckResult::from_process(true, "", "  \n");
    assert_eq!(r.status, CheckStatus::Failed);
}

#[test]
fn status_serializes_uppercase() {
    assert_eq!(serde_json::to_value(CheckStatus::Failed).unwrap(), serde_json::json!("FAILED"));
}

#[test]
fn compilation_failure_has_no_output() {
    let r = ExecutionResult::compilation_failed(TypeCheckResult::from_process(true, "", "boom"));
    assert_eq!(r.output, "");
    assert_eq!(r.exit_code, None);
    assert_eq!(r.error.as_deref(), Some("Compilation failed."));
}
