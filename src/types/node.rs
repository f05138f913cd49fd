//! The parsed menu resource tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

use crate::error::InflateError;

use super::attr_name::{AttrName, MENU_NS};

/// Element names with a meaning during inflation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NodeTag {
    Menu,
    Item,
    Group,
}

/// How a node is handled by the inflater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// An `item` producing a plain menu item.
    Item,
    /// An `item` whose first child is a nested `menu`.
    SubMenuItem,
    /// A `group` scoping its children to a group id.
    Group,
    /// Anything else; skipped together with its subtree.
    Unrecognized(&'a str),
}

/// One element of a menu resource: a name, namespaced attributes and ordered
/// children. Trees are immutable once built and are shared between
/// inflations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct ResourceNode {
    name: String,
    attributes: BTreeMap<AttrName, String>,
    children: Vec<ResourceNode>,
}

impl ResourceNode {
    pub fn new(name: impl Into<String>) -> Self {
        ResourceNode {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn menu() -> Self {
        Self::new(NodeTag::Menu.as_ref())
    }

    pub fn item() -> Self {
        Self::new(NodeTag::Item.as_ref())
    }

    pub fn group() -> Self {
        Self::new(NodeTag::Group.as_ref())
    }

    /// Set an attribute in [`MENU_NS`].
    pub fn with_attr(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_ns_attr(MENU_NS, key, value)
    }

    pub fn with_ns_attr(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes
            .insert(AttrName::new(namespace, key), value.into());
        self
    }

    pub fn with_child(mut self, child: ResourceNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ResourceNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Attach `menu` as the nested submenu of this item.
    pub fn with_sub_menu(self, menu: ResourceNode) -> Self {
        self.with_child(menu)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &BTreeMap<AttrName, String> {
        &self.attributes
    }

    pub fn attribute(&self, namespace: &str, key: &str) -> Option<&str> {
        self.attributes
            .get(&AttrName::new(namespace, key))
            .map(String::as_str)
    }

    pub fn children(&self) -> &[ResourceNode] {
        &self.children
    }

    pub fn is_sub_menu_item(&self) -> bool {
        self.name == NodeTag::Item.as_ref()
            && self
                .children
                .first()
                .is_some_and(|child| child.name == NodeTag::Menu.as_ref())
    }

    pub fn kind(&self) -> NodeKind<'_> {
        match self.name.parse::<NodeTag>() {
            Ok(NodeTag::Item) if self.is_sub_menu_item() => NodeKind::SubMenuItem,
            Ok(NodeTag::Item) => NodeKind::Item,
            Ok(NodeTag::Group) => NodeKind::Group,
            Ok(NodeTag::Menu) | Err(_) => NodeKind::Unrecognized(&self.name),
        }
    }

    /// Depth-first walk over this node and all of its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &ResourceNode> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// Wire form: attribute names as strings (see [`AttrName`]'s `FromStr`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
}

impl TryFrom<RawNode> for ResourceNode {
    type Error = InflateError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let attributes = raw
            .attributes
            .into_iter()
            .map(|(name, value)| Ok((name.parse::<AttrName>()?, value)))
            .collect::<Result<BTreeMap<_, _>, InflateError>>()?;
        let children = raw
            .children
            .into_iter()
            .map(ResourceNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResourceNode {
            name: raw.name,
            attributes,
            children,
        })
    }
}

impl From<ResourceNode> for RawNode {
    fn from(node: ResourceNode) -> Self {
        RawNode {
            name: node.name,
            attributes: node
                .attributes
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            children: node.children.into_iter().map(RawNode::from).collect(),
        }
    }
}
