//! Inflater configuration and the strict i18n policy.

use std::collections::BTreeSet;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::InflateError;
use crate::traits::Environment;

use super::attr_name::{AttrName, MENU_NS};
use super::reference::{INDIRECTION_SIGIL, THEME_SIGIL};

static DEFAULT_I18N_KEYS: Lazy<BTreeSet<String>> = Lazy::new(|| {
    [
        "title",
        "titleCondensed",
        "summary",
        "text",
        "hint",
        "contentDescription",
    ]
    .into_iter()
    .map(String::from)
    .collect()
});

fn default_namespace() -> String {
    MENU_NS.to_string()
}

/// Which attributes must hold resource references rather than literal text
/// when strict i18n mode is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nPolicy {
    #[serde(default = "default_namespace")]
    namespace: String,
    keys: BTreeSet<String>,
}

impl Default for I18nPolicy {
    fn default() -> Self {
        I18nPolicy {
            namespace: default_namespace(),
            keys: DEFAULT_I18N_KEYS.clone(),
        }
    }
}

impl I18nPolicy {
    pub fn new<I, S>(namespace: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        I18nPolicy {
            namespace: namespace.into(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn covers(&self, name: &AttrName) -> bool {
        name.namespace() == self.namespace && self.keys.contains(name.key())
    }

    /// Check one attribute; returns the violation if `value` is hardcoded text.
    pub fn check(&self, name: &AttrName, value: &str) -> Result<(), InflateError> {
        if !self.covers(name) || value.starts_with([INDIRECTION_SIGIL, THEME_SIGIL]) {
            return Ok(());
        }
        Err(InflateError::Validation {
            attribute: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Settings for a [`MenuInflater`](crate::MenuInflater).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflaterConfig {
    /// Reject hardcoded text in attributes covered by `i18n_policy`.
    pub strict_i18n: bool,
    pub i18n_policy: I18nPolicy,
}

impl InflaterConfig {
    pub fn strict() -> Self {
        InflaterConfig {
            strict_i18n: true,
            ..Default::default()
        }
    }
}

impl FromStr for InflaterConfig {
    type Err = InflateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

/// A fixed device configuration, described by its qualifier string
/// (e.g. `fr-rCA-land`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    qualifiers: String,
}

impl Configuration {
    pub fn new(qualifiers: impl Into<String>) -> Self {
        Configuration {
            qualifiers: qualifiers.into(),
        }
    }
}

impl Environment for Configuration {
    fn qualifiers(&self) -> String {
        self.qualifiers.clone()
    }
}
