//! Data model types: the resource tree, attribute names, resource references
//! and configuration.
//!
//! Canonical string forms:
//! - Attribute name: `key` (menu namespace) or `{namespace}key`
//! - Resource reference: `@[+][package:]type/name`, e.g. `@string/exit_label`
//! - Qualifiers: dash-separated, most general first, e.g. `fr-rCA-land`

mod attr_name;
mod config;
mod node;
mod reference;

pub use attr_name::{AttrName, MENU_NS};
pub use config::{Configuration, I18nPolicy, InflaterConfig};
pub use node::{NodeKind, NodeTag, ResourceNode};
pub use reference::{
    INDIRECTION_SIGIL, ResId, ResourceRef, ResourceType, THEME_SIGIL, is_indirect,
};
