use crate::error::InflateError;
use crate::types::{NodeTag, ResourceNode};

/// Parse the JSON form of a menu resource tree into a `ResourceNode`.
///
/// The root must be a `menu` node. Attribute names are `key` for the menu
/// namespace or `{namespace}key` otherwise.
///
/// Example:
/// ```rust
/// use menu_inflater::parse_menu_tree;
/// let tree = parse_menu_tree(r#"{
///     "name": "menu",
///     "children": [
///         { "name": "item", "attributes": { "id": "@+id/settings", "title": "Settings" } }
///     ]
/// }"#).unwrap();
/// assert_eq!(tree.children().len(), 1);
/// ```
pub fn parse_menu_tree(text: &str) -> Result<ResourceNode, InflateError> {
    let root: ResourceNode = serde_json::from_str(text)?;
    if root.name() != NodeTag::Menu.as_ref() {
        return Err(InflateError::ParseError(format!(
            "root element must be '{}', found '{}'",
            NodeTag::Menu.as_ref(),
            root.name()
        )));
    }
    Ok(root)
}
