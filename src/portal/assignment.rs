use crate::{
    define::produce::Producer,
    define::spec::Spec,
    foundation::error::DefineResult,
    portal::config::PortalConfig,
};

/// Authoring shape of an assignment definition.
///
/// Extra fields (`with`) are produced alongside the public ones so that templates can
/// reference shared parameters by path, e.g. `params.count`.
#[derive(Clone, Debug)]
pub struct AssignmentSpec {
    description: Spec,
    summary: Option<Spec>,
    test_stdin: Option<Spec>,
    extras: Vec<(String, Spec)>,
}

impl AssignmentSpec {
    /// An assignment with only a description.
    pub fn new(description: impl Into<Spec>) -> Self {
        Self {
            description: description.into(),
            summary: None,
            test_stdin: None,
            extras: Vec::new(),
        }
    }

    /// Short text copied into archived submissions instead of the full description.
    pub fn summary(mut self, summary: impl Into<Spec>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Standard input fed to submitted programs.
    pub fn test_stdin(mut self, stdin: impl Into<Spec>) -> Self {
        self.test_stdin = Some(stdin.into());
        self
    }

    /// An additional addressable field.
    pub fn with(mut self, key: impl Into<String>, spec: impl Into<Spec>) -> Self {
        self.extras.push((key.into(), spec.into()));
        self
    }

    /// The full definition tree.
    pub fn to_spec(&self) -> Spec {
        let mut fields = vec![("description".to_string(), self.description.clone())];
        if let Some(s) = &self.summary {
            fields.push(("summary".to_string(), s.clone()));
        }
        if let Some(s) = &self.test_stdin {
            fields.push(("testStdin".to_string(), s.clone()));
        }
        fields.extend(self.extras.iter().cloned());
        Spec::object(fields)
    }
}

impl From<AssignmentSpec> for Spec {
    fn from(v: AssignmentSpec) -> Self {
        v.to_spec()
    }
}

/// One student's instance of an assignment.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Markdown description shown to the student.
    pub description: String,
    /// Optional short form used in archives.
    #[serde(default)]
    pub summary: Option<String>,
    /// Optional stdin for the test run.
    #[serde(default)]
    pub test_stdin: Option<String>,
}

impl Assignment {
    /// Text placed in the archive header: the summary, or the description without one.
    pub fn archive_summary(&self) -> &str {
        self.summary.as_deref().unwrap_or(&self.description)
    }
}

/// Produce `definition` for one student.
///
/// The seed is `config.secret + id` and the environment is `{id, name}`, so the same
/// student always receives the same instance. Surrounding whitespace in `id` and `name`
/// is ignored.
#[tracing::instrument(skip(config, definition))]
pub fn produce_assignment(
    config: &PortalConfig,
    definition: &Spec,
    id: &str,
    name: &str,
) -> DefineResult<Assignment> {
    let (id, name) = (id.trim(), name.trim());
    let value = Producer::new(config.base_seed(id))
        .env_var("id", id)
        .env_var("name", name)
        .produce(definition)?;
    let assignment = serde_json::from_value(value.to_json())?;
    Ok(assignment)
}

#[cfg(test)]
#[path = "../../tests/unit/portal/assignment.rs"]
mod tests;
