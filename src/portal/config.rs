use std::path::PathBuf;

/// Secret used when `DETYRA_SECRET` is not set. Deployments should override it.
pub const DEFAULT_SECRET: &str = "detyra::";

/// Portal settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PortalConfig {
    /// Prefixed to every student id to form the base seed.
    pub secret: String,
    /// Root directory for archived submissions.
    pub submissions_dir: PathBuf,
    /// Directory receiving archived source files.
    pub source_dir: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        let submissions_dir = PathBuf::from("submissions");
        Self {
            secret: DEFAULT_SECRET.to_string(),
            source_dir: submissions_dir.join("source"),
            submissions_dir,
        }
    }
}

impl PortalConfig {
    /// Read `DETYRA_SECRET`, `SUBMISSIONS_MD_DIR` and `SUBMISSIONS_CPP_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Like [`PortalConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let submissions_dir = lookup("SUBMISSIONS_MD_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.submissions_dir);
        let source_dir = lookup("SUBMISSIONS_CPP_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| submissions_dir.join("source"));
        Self {
            secret: lookup("DETYRA_SECRET")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.secret),
            submissions_dir,
            source_dir,
        }
    }

    /// Base seed for one student: the secret followed by the id.
    pub fn base_seed(&self, student_id: &str) -> String {
        format!("{}{}", self.secret, student_id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/portal/config.rs"]
mod tests;
