/// Convenience result type used across the definition engine.
pub type DefineResult<T> = Result<T, DefineError>;

/// Top-level error taxonomy for producing a definition.
///
/// Every variant describes a mistake in the authored definition rather than a transient
/// condition, so callers should never retry a failed production.
#[derive(thiserror::Error, Debug)]
pub enum DefineError {
    /// A definition value is not a scalar, array, mapping or known directive.
    #[error("unknown spec kind: {0}")]
    UnknownSpecKind(String),

    /// A path reference names a field or index that was never registered.
    #[error("missing key '{key}'")]
    MissingKey {
        /// The offending path segment.
        key: String,
    },

    /// A path reference continues past a scalar value.
    #[error("cannot access key '{key}' of a non-object")]
    NotIndexable {
        /// The segment that was applied to the scalar.
        key: String,
    },

    /// `match` found neither a matching case nor a `_` default.
    #[error("no match for '{value}'")]
    NoMatchingCase {
        /// The stringified scrutinee.
        value: String,
    },

    /// A node was demanded while it was still being resolved.
    #[error("reference cycle detected at '{path}'")]
    CycleDetected {
        /// Dotted path of the re-entered node.
        path: String,
    },

    /// A `text` template and its arguments disagree.
    #[error("template error: {0}")]
    Template(String),

    /// An author-supplied mapper or thunk rejected its input.
    #[error("mapper error: {0}")]
    Mapper(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DefineError {
    /// Build a [`DefineError::UnknownSpecKind`] value.
    pub fn unknown_spec(msg: impl Into<String>) -> Self {
        Self::UnknownSpecKind(msg.into())
    }

    /// Build a [`DefineError::MissingKey`] value.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Build a [`DefineError::NotIndexable`] value.
    pub fn not_indexable(key: impl Into<String>) -> Self {
        Self::NotIndexable { key: key.into() }
    }

    /// Build a [`DefineError::NoMatchingCase`] value.
    pub fn no_matching_case(value: impl Into<String>) -> Self {
        Self::NoMatchingCase {
            value: value.into(),
        }
    }

    /// Build a [`DefineError::CycleDetected`] value.
    pub fn cycle(path: impl Into<String>) -> Self {
        Self::CycleDetected { path: path.into() }
    }

    /// Build a [`DefineError::Template`] value.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`DefineError::Mapper`] value.
    pub fn mapper(msg: impl Into<String>) -> Self {
        Self::Mapper(msg.into())
    }
}

impl From<serde_json::Error> for DefineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Other(anyhow::Error::new(e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
