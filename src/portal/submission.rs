//! Checking and archiving submitted C++ programs.
//!
//! Test runs echo every value the program reads, so the captured output shows input and
//! results interleaved the way a student sees them in a terminal.

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;

use crate::portal::{
    assignment::Assignment,
    config::PortalConfig,
    toolchain::{ExecutionResult, Toolchain, TypeCheckResult},
};

/// Maximum characters kept from program output and runtime errors.
pub const OUTPUT_LIMIT: usize = 512;

const ECHO_PRELUDE: &str = r#"#include <iostream>
template<typename T>
std::istream& operator>>=(std::istream& is, T& x) {
    is >> x;
    std::cout << x << "\n";
    return is;
}"#;

const SEP_EDGE: &str = "***********************************************************************";

/// Prepend the echoing extraction operator and route every `>>` through it.
///
/// The rewrite is textual, so shifts and `>>` inside literals are affected too.
pub fn inject_echo_prelude(source: &str) -> String {
    format!("{ECHO_PRELUDE}\n{}", source.replace(">>", ">>="))
}

/// Normalize line endings and cap the length at [`OUTPUT_LIMIT`] characters.
pub fn normalize_output(output: &str) -> String {
    truncate_chars(&output.replace("\r\n", "\n"), OUTPUT_LIMIT)
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

/// Replace characters that are unsafe in file names with `-`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '-',
            c => c,
        })
        .collect()
}

/// Wall-clock time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clock {
    /// 0 to 23.
    pub hours: u8,
    /// 0 to 59.
    pub minutes: u8,
    /// 0 to 59.
    pub seconds: u8,
}

impl Clock {
    /// Hours, minutes and seconds of any chrono time value.
    pub fn from_time(t: &impl chrono::Timelike) -> Self {
        Self {
            hours: t.hour() as u8,
            minutes: t.minute() as u8,
            seconds: t.second() as u8,
        }
    }

    /// Current local time of day.
    pub fn now() -> Self {
        Self::from_time(&chrono::Local::now())
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Everything that goes into an archived source file.
#[derive(Clone, Debug)]
pub struct ArchiveEntry<'a> {
    /// Student id.
    pub id: &'a str,
    /// Student name.
    pub name: &'a str,
    /// Assignment text for the header.
    pub summary: &'a str,
    /// Submitted source, copied verbatim.
    pub source: &'a str,
    /// Submission time.
    pub time: Clock,
    /// Test output or compiler log.
    pub output: &'a str,
}

/// Render the archived file: a header comment, the untouched source, a grading footer.
pub fn format_archive(entry: &ArchiveEntry<'_>) -> String {
    let sep = format!("{SEP_EDGE}**");
    format!(
        "/*{SEP_EDGE}\n\
         Emri: {name}\n\
         ID: {id}\n\
         Ora e dorëzimit: {time}\n\
         {sep}\n\
         {summary}\n\
         {sep}\n\
         {output}\n\
         {SEP_EDGE}*/\n\
         \n\
         {source}\n\
         \n\
         /*{SEP_EDGE}\n\
         Student: {name} ({id})\n\
         Pikët: \n\
         {SEP_EDGE}*/",
        name = entry.name,
        id = entry.id,
        time = entry.time,
        summary = entry.summary,
        output = entry.output.trim(),
        source = entry.source,
    )
}

/// Run a submission on `stdin` with echoed reads, capping output and error text.
pub fn run_submission(
    toolchain: &dyn Toolchain,
    stdin: &str,
    source: &str,
) -> anyhow::Result<ExecutionResult> {
    let mut result = toolchain
        .evaluate(&inject_echo_prelude(source), Some(stdin))
        .context("run submission")?;
    result.output = normalize_output(&result.output);
    if let Some(err) = result.error.as_mut() {
        *err = truncate_chars(err, OUTPUT_LIMIT);
    }
    Ok(result)
}

/// Feedback for the student before submitting.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CheckReport {
    /// Type check of the untouched source.
    pub compile: TypeCheckResult,
    /// Present when the compile succeeded and the assignment has test input.
    pub execution: Option<ExecutionResult>,
}

/// Type-check the untouched source, then run it on the assignment's test input.
#[tracing::instrument(skip_all)]
pub fn check_submission(
    toolchain: &dyn Toolchain,
    assignment: &Assignment,
    source: &str,
) -> anyhow::Result<CheckReport> {
    let compile = toolchain.type_check(source).context("type-check submission")?;
    let execution = match assignment.test_stdin.as_deref() {
        Some(stdin) if compile.is_ok() => Some(run_submission(toolchain, stdin, source)?),
        _ => None,
    };
    tracing::debug!(status = ?compile.status, ran = execution.is_some(), "checked submission");
    Ok(CheckReport { compile, execution })
}

/// A written archive file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchivedSubmission {
    /// Where the archive was written.
    pub path: PathBuf,
    /// Archive text.
    pub contents: String,
    /// Confirmation shown to the student.
    pub receipt: String,
}

/// Run the test input once more and write the archive to `config.source_dir`.
#[tracing::instrument(skip(toolchain, config, assignment, source))]
pub fn archive_submission(
    toolchain: &dyn Toolchain,
    config: &PortalConfig,
    assignment: &Assignment,
    id: &str,
    name: &str,
    source: &str,
    time: Clock,
) -> anyhow::Result<ArchivedSubmission> {
    let (id, name) = (id.trim(), name.trim());
    let (stdout, compile_log) = match assignment.test_stdin.as_deref() {
        Some(stdin) => {
            let run = run_submission(toolchain, stdin, source)?;
            (run.output.trim().to_string(), run.compilation.log)
        }
        None => (String::new(), String::new()),
    };
    let output = [stdout.as_str(), compile_log.as_str()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or("<No output>");

    let contents = format_archive(&ArchiveEntry {
        id,
        name,
        summary: assignment.archive_summary(),
        source,
        time,
        output,
    });

    let base_name = sanitize_file_name(&format!("{name}_{id}_{time}"));
    let path = config.source_dir.join(format!("{base_name}.cpp"));
    std::fs::create_dir_all(&config.source_dir)
        .with_context(|| format!("create {}", config.source_dir.display()))?;
    std::fs::write(&path, &contents).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "archived submission");

    Ok(ArchivedSubmission {
        path,
        contents,
        receipt: format!("Dorëzimi është pranuar në ora {time}."),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/portal/submission.rs"]
mod tests;
