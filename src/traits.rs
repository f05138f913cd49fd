//! Seams between the inflater and the host: where trees, strings, views and
//! menus come from and go to.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use crate::action_view::ViewContext;
use crate::error::InflateError;
use crate::types::{ResId, ResourceNode, ResourceRef};

/// Maps resource references to ids and back.
pub trait ResourceIndex: Send + Sync {
    fn resource_id(&self, reference: &ResourceRef) -> Option<ResId>;

    /// `type/name` for `id`, used in logs and error messages.
    fn resource_name(&self, id: ResId) -> Option<String>;
}

/// Selects the menu tree variant for a resource id and a qualifier string.
pub trait MenuSource: Send + Sync {
    fn menu_node(&self, id: ResId, qualifiers: &str) -> Result<Arc<ResourceNode>, InflateError>;
}

/// Resolves string resources to text.
pub trait StringResolver: Send + Sync {
    /// Fails with [`InflateError::UnknownResource`] if `id` has no value.
    fn resolve_string(&self, id: ResId, qualifiers: &str) -> Result<String, InflateError>;
}

/// Supplies the qualifier string of the active configuration.
pub trait Environment: Send + Sync {
    fn qualifiers(&self) -> String;
}

impl<F> Environment for F
where
    F: Fn() -> String + Send + Sync,
{
    fn qualifiers(&self) -> String {
        self()
    }
}

/// Typed, namespaced lookups over one node's attributes.
pub trait AttributeResolver {
    fn get_string(&self, namespace: &str, key: &str) -> Option<&str>;

    /// Absent → `default`; present but not an integer → error.
    fn get_int(&self, namespace: &str, key: &str, default: i32) -> Result<i32, InflateError>;

    /// Absent → `default`; references are looked up, bare integers are taken
    /// as-is.
    fn get_resource_id(
        &self,
        namespace: &str,
        key: &str,
        default: ResId,
    ) -> Result<ResId, InflateError>;

    /// Fails with [`InflateError::Validation`] on the first hardcoded value
    /// the active i18n policy covers.
    fn validate_strict_i18n(&self) -> Result<(), InflateError>;
}

/// A view shown in place of a menu item's default representation.
pub trait ActionView: Any + Debug + Send {
    fn class_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// Builds action views from class names.
pub trait ActionViewFactory: Send + Sync {
    /// Failures of any other kind are reclassified as
    /// [`InflateError::ActionViewInstantiation`] by the inflater.
    fn create(
        &self,
        class_name: &str,
        context: &ViewContext,
    ) -> Result<Box<dyn ActionView>, InflateError>;
}

/// The menu being populated. The inflater only ever adds to it.
pub trait Menu {
    fn add(
        &mut self,
        group_id: i32,
        item_id: ResId,
        order: i32,
        title: Option<&str>,
    ) -> &mut dyn MenuItem;

    fn add_sub_menu(
        &mut self,
        group_id: i32,
        item_id: ResId,
        order: i32,
        title: Option<&str>,
    ) -> &mut dyn Menu;
}

pub trait MenuItem {
    fn set_action_view(&mut self, view: Box<dyn ActionView>) -> Result<(), InflateError>;
}
