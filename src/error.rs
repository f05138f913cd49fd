use thiserror::Error;

/// Opaque error produced by host-supplied collaborators (view constructors,
/// menu items rejecting a view).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum InflateError {
    /// A textual attribute carries a hardcoded value while strict i18n mode is on.
    /// Never wrapped by [`InflateError::Inflation`].
    #[error("strict i18n violation: attribute '{attribute}' has hardcoded value \"{value}\"")]
    Validation { attribute: String, value: String },

    #[error("error inflating {resource}: {source}")]
    Inflation {
        resource: String,
        #[source]
        source: Box<InflateError>,
    },

    #[error("action view class '{class}' could not be instantiated: {source}")]
    ActionViewInstantiation {
        class: String,
        #[source]
        source: BoxError,
    },

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("invalid value \"{value}\" for attribute '{attribute}': {reason}")]
    InvalidAttribute {
        attribute: String,
        value: String,
        reason: String,
    },

    #[error("failed to parse menu tree: {0}")]
    ParseError(String),

    #[error("menu item rejected action view: {0}")]
    ActionView(String),
}

impl InflateError {
    /// Wrap a descent failure with the resource it happened in. Validation
    /// failures pass through untouched; anything else, including an
    /// `Inflation` raised by a host collaborator for some other resource, gets
    /// this resource as its outer context.
    pub(crate) fn wrap(resource: impl Into<String>, err: InflateError) -> Self {
        match err {
            InflateError::Validation { .. } => err,
            other => InflateError::Inflation {
                resource: resource.into(),
                source: Box::new(other),
            },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, InflateError::Validation { .. })
    }

    /// The innermost error, looking through any `Inflation` layers.
    pub fn root_cause(&self) -> &InflateError {
        let mut current = self;
        while let InflateError::Inflation { source, .. } = current {
            current = source;
        }
        current
    }
}

impl From<serde_json::Error> for InflateError {
    fn from(err: serde_json::Error) -> Self {
        InflateError::ParseError(err.to_string())
    }
}
