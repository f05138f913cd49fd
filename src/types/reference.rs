//! Resource references such as `@string/exit_label` or `@+id/settings`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::error::InflateError;

/// Integer resource identifier. `0` means "no resource".
pub type ResId = i32;

/// Marks an attribute value that must be resolved through a resource id.
pub const INDIRECTION_SIGIL: char = '@';

/// Marks a theme attribute reference (`?attr/colorPrimary`).
pub const THEME_SIGIL: char = '?';

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@(\+)?(?:([A-Za-z][\w.]*):)?([a-z]+)/([A-Za-z_][\w.]*)$")
        .expect("reference pattern compiles")
});

/// Resource types a reference may name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    StrumDisplay,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Anim,
    Attr,
    Bool,
    Color,
    Dimen,
    Drawable,
    Id,
    Integer,
    Layout,
    Menu,
    Mipmap,
    Plurals,
    Raw,
    String,
    Style,
    Xml,
}

impl ResourceType {
    /// Position of this type in the id space, starting at 1.
    pub(crate) fn slot(self) -> i32 {
        self as i32 + 1
    }
}

/// A parsed `@[+][package:]type/name` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    package: Option<String>,
    kind: ResourceType,
    name: String,
    create: bool,
}

impl ResourceRef {
    pub fn new(kind: ResourceType, name: impl Into<String>) -> Self {
        ResourceRef {
            package: None,
            kind,
            name: name.into(),
            create: false,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn kind(&self) -> ResourceType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for `@+id/...` references, which declare the id they name.
    pub fn creates(&self) -> bool {
        self.create
    }

    /// `type/name`, or `package:type/name` when a package is given.
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{package}:{}/{}", self.kind, self.name),
            None => format!("{}/{}", self.kind, self.name),
        }
    }
}

impl Display for ResourceRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let plus = if self.create { "+" } else { "" };
        write!(f, "{INDIRECTION_SIGIL}{plus}{}", self.qualified_name())
    }
}

impl FromStr for ResourceRef {
    type Err = InflateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = REFERENCE_RE.captures(s.trim()).ok_or_else(|| {
            InflateError::ParseError(format!(
                "'{s}' is not a resource reference (expected format: @[+][package:]type/name)"
            ))
        })?;
        let kind = caps[3].parse::<ResourceType>().map_err(|_| {
            InflateError::ParseError(format!("unknown resource type '{}' in '{s}'", &caps[3]))
        })?;
        Ok(ResourceRef {
            package: caps.get(2).map(|m| m.as_str().to_string()),
            kind,
            name: caps[4].to_string(),
            create: caps.get(1).is_some(),
        })
    }
}

/// True when `value` must be resolved through a resource rather than used as-is.
pub fn is_indirect(value: &str) -> bool {
    value.starts_with(INDIRECTION_SIGIL)
}
