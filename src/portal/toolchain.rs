/// Marker appended by the compiler when it stops at the first error.
const FATAL_ERRORS_NOTE: &str = "compilation terminated due to -Wfatal-errors.";

/// Outcome of a type check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    /// Compiled cleanly.
    Ok,
    /// Rejected with diagnostics.
    Failed,
    /// The compiler failed without saying why.
    Unknown,
}

/// Result of compiling a submission without running it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeCheckResult {
    /// Classification of the compile.
    pub status: CheckStatus,
    /// Compiler output with the fatal-errors note removed; warnings are kept.
    pub log: String,
}

impl TypeCheckResult {
    /// A clean compile.
    pub fn ok() -> Self {
        Self {
            status: CheckStatus::Ok,
            log: String::new(),
        }
    }

    /// Classify a finished compiler process.
    ///
    /// The log joins stdout and stderr, so warnings survive a clean compile. A failed
    /// process that wrote anything to stderr is `Failed`, otherwise `Unknown`.
    pub fn from_process(failed: bool, stdout: &str, stderr: &str) -> Self {
        let log = format!("{stdout}\n{stderr}")
            .replace(FATAL_ERRORS_NOTE, "")
            .trim()
            .to_string();
        let status = match (failed, stderr.is_empty()) {
            (false, _) => CheckStatus::Ok,
            (true, false) => CheckStatus::Failed,
            (true, true) => CheckStatus::Unknown,
        };
        Self { status, log }
    }

    /// Whether the source compiled.
    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

/// Result of compiling and running a submission.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Compile step of the run.
    pub compilation: TypeCheckResult,
    /// Program stdout.
    pub output: String,
    /// Process exit code, if the program ran to completion.
    pub exit_code: Option<i32>,
    /// Runtime failure description (crash, timeout).
    pub error: Option<String>,
}

impl ExecutionResult {
    /// A run that stopped at the compile step.
    pub fn compilation_failed(compilation: TypeCheckResult) -> Self {
        Self {
            compilation,
            output: String::new(),
            exit_code: None,
            error: Some("Compilation failed.".to_string()),
        }
    }
}

/// A C++ compiler and runner.
///
/// Implementations own sandboxing and timeouts. Errors are reserved for failures of the
/// toolchain itself; a broken submission is reported through the result types.
pub trait Toolchain {
    /// Compile `source` without running it.
    fn type_check(&self, source: &str) -> anyhow::Result<TypeCheckResult>;

    /// Compile `source` and run it with `stdin`.
    fn evaluate(&self, source: &str, stdin: Option<&str>) -> anyhow::Result<ExecutionResult>;
}

#[cfg(test)]
#[path = "../../tests/unit/portal/toolchain.rs"]
mod tests;
