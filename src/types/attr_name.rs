//! Namespace-qualified attribute names.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::InflateError;

/// Namespace carrying the standard menu attributes (`title`, `id`, ...).
pub const MENU_NS: &str = "http://schemas.android.com/apk/res/android";

/// A `(namespace, key)` attribute name.
///
/// The string form is Clark notation, `{namespace}key`. A bare `key` is read
/// as belonging to [`MENU_NS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttrName {
    namespace: String,
    key: String,
}

impl AttrName {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        AttrName {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// An attribute in [`MENU_NS`].
    pub fn menu(key: impl Into<String>) -> Self {
        Self::new(MENU_NS, key)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matches(&self, namespace: &str, key: &str) -> bool {
        self.namespace == namespace && self.key == key
    }
}

impl Display for AttrName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.namespace == MENU_NS {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.key)
        }
    }
}

impl FromStr for AttrName {
    type Err = InflateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, key) = match s.strip_prefix('{') {
            Some(rest) => rest.split_once('}').ok_or_else(|| {
                InflateError::ParseError(format!(
                    "unterminated namespace in attribute name '{s}' (expected format: {{namespace}}key)"
                ))
            })?,
            None => (MENU_NS, s),
        };
        if key.is_empty() {
            return Err(InflateError::ParseError(format!(
                "empty key in attribute name '{s}'"
            )));
        }
        Ok(AttrName::new(namespace, key))
    }
}
