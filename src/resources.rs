//! In-memory resource table: ids, strings and menu trees keyed by qualifiers.
//!
//! Values are stored per qualifier string. A lookup for `fr-rCA-land` tries
//! `fr-rCA-land`, then `fr-rCA`, then `fr`, then the default variant (`""`).

use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tracing::debug;

use crate::error::InflateError;
use crate::loader;
use crate::traits::{MenuSource, ResourceIndex, StringResolver};
use crate::types::{ResId, ResourceNode, ResourceRef, ResourceType};

const PACKAGE_ID: ResId = 0x7f00_0000;

/// Candidate qualifier strings for `qualifiers`, most specific first.
pub fn qualifier_fallbacks(qualifiers: &str) -> Vec<String> {
    let parts: Vec<&str> = qualifiers.split('-').filter(|p| !p.is_empty()).collect();
    let mut candidates: Vec<String> = (1..=parts.len())
        .rev()
        .map(|n| parts[..n].iter().join("-"))
        .collect();
    candidates.push(String::new());
    candidates
}

fn select<'v, V>(variants: &'v HashMap<String, V>, qualifiers: &str) -> Option<(String, &'v V)> {
    qualifier_fallbacks(qualifiers)
        .into_iter()
        .find_map(|candidate| variants.get(&candidate).map(|v| (candidate, v)))
}

/// Resource storage implementing [`ResourceIndex`], [`MenuSource`] and
/// [`StringResolver`]. Build one with [`ResourceTableBuilder`].
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    ids: HashMap<String, ResId>,
    names: HashMap<ResId, String>,
    menus: HashMap<ResId, HashMap<String, Arc<ResourceNode>>>,
    strings: HashMap<ResId, HashMap<String, String>>,
}

impl ResourceTable {
    pub fn builder() -> ResourceTableBuilder {
        ResourceTableBuilder::new()
    }

    /// Id of `type/name`, if declared.
    pub fn id_of(&self, kind: ResourceType, name: &str) -> Option<ResId> {
        self.resource_id(&ResourceRef::new(kind, name))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn describe(&self, id: ResId) -> String {
        self.resource_name(id)
            .unwrap_or_else(|| format!("0x{id:08x}"))
    }
}

impl ResourceIndex for ResourceTable {
    fn resource_id(&self, reference: &ResourceRef) -> Option<ResId> {
        self.ids.get(&reference.qualified_name()).copied()
    }

    fn resource_name(&self, id: ResId) -> Option<String> {
        self.names.get(&id).cloned()
    }
}

impl MenuSource for ResourceTable {
    fn menu_node(&self, id: ResId, qualifiers: &str) -> Result<Arc<ResourceNode>, InflateError> {
        let (selected, node) = self
            .menus
            .get(&id)
            .and_then(|variants| select(variants, qualifiers))
            .ok_or_else(|| InflateError::UnknownResource(self.describe(id)))?;
        debug!(
            event = "Resources",
            phase = "SelectMenu",
            resource = %self.describe(id),
            qualifiers,
            selected = %selected
        );
        Ok(Arc::clone(node))
    }
}

impl StringResolver for ResourceTable {
    fn resolve_string(&self, id: ResId, qualifiers: &str) -> Result<String, InflateError> {
        self.strings
            .get(&id)
            .and_then(|variants| select(variants, qualifiers))
            .map(|(_, text)| text.clone())
            .ok_or_else(|| InflateError::UnknownResource(self.describe(id)))
    }
}

/// Builder for [`ResourceTable`]. Ids are allocated per resource type, in
/// declaration order.
#[derive(Debug, Default)]
pub struct ResourceTableBuilder {
    table: ResourceTable,
    next_entry: HashMap<ResourceType, ResId>,
}

impl ResourceTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `type/name`, returning its id. Declaring twice returns the same id.
    pub fn declare(&mut self, kind: ResourceType, name: &str) -> ResId {
        self.declare_ref(&ResourceRef::new(kind, name))
    }

    pub fn declare_ref(&mut self, reference: &ResourceRef) -> ResId {
        let qualified = reference.qualified_name();
        if let Some(id) = self.table.ids.get(&qualified) {
            return *id;
        }
        let entry = self.next_entry.entry(reference.kind()).or_insert(0);
        let id = PACKAGE_ID | (reference.kind().slot() << 16) | *entry;
        *entry += 1;
        self.table.ids.insert(qualified.clone(), id);
        self.table.names.insert(id, qualified);
        id
    }

    /// Add a string value for `qualifiers` (`""` for the default variant).
    pub fn add_string(&mut self, name: &str, qualifiers: &str, text: impl Into<String>) -> ResId {
        let id = self.declare(ResourceType::String, name);
        self.table
            .strings
            .entry(id)
            .or_default()
            .insert(qualifiers.to_string(), text.into());
        id
    }

    /// Add a menu tree for `qualifiers`. Every `@+id/...` value in the tree is
    /// declared as well.
    pub fn add_menu(&mut self, name: &str, qualifiers: &str, root: ResourceNode) -> ResId {
        let created: Vec<ResourceRef> = root
            .walk()
            .flat_map(|node| node.attributes().values())
            .filter_map(|value| value.parse::<ResourceRef>().ok())
            .filter(ResourceRef::creates)
            .collect();
        for reference in &created {
            self.declare_ref(reference);
        }
        let id = self.declare(ResourceType::Menu, name);
        self.table
            .menus
            .entry(id)
            .or_default()
            .insert(qualifiers.to_string(), Arc::new(root));
        id
    }

    /// Parse a JSON menu tree (see [`loader::parse_menu_tree`]) and add it.
    pub fn add_menu_json(
        &mut self,
        name: &str,
        qualifiers: &str,
        json: &str,
    ) -> Result<ResId, InflateError> {
        let root = loader::parse_menu_tree(json)?;
        Ok(self.add_menu(name, qualifiers, root))
    }

    pub fn build(self) -> ResourceTable {
        self.table
    }
}
