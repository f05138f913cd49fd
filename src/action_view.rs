//! Action views: named view classes constructed on demand and attached to
//! menu items.
//!
//! Class names are resolved through an [`ActionViewRegistry`] that the host
//! fills with constructors up front.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{BoxError, InflateError};
use crate::traits::{ActionView, ActionViewFactory, AttributeResolver, MenuItem};
use crate::types::MENU_NS;

/// Attribute naming the action view class of an item.
pub const ACTION_VIEW_CLASS: &str = "actionViewClass";

/// Construction context handed to every view constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewContext {
    qualifiers: String,
    resource: String,
}

impl ViewContext {
    pub fn new(qualifiers: impl Into<String>, resource: impl Into<String>) -> Self {
        ViewContext {
            qualifiers: qualifiers.into(),
            resource: resource.into(),
        }
    }

    /// Qualifiers of the configuration the menu is inflated for.
    pub fn qualifiers(&self) -> &str {
        &self.qualifiers
    }

    /// Menu resource being inflated.
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

/// A class name with no registered constructor.
#[derive(Debug, Error)]
#[error("class not found: {0}")]
pub struct ClassNotFound(pub String);

pub type ViewConstructor =
    Arc<dyn Fn(&ViewContext) -> Result<Box<dyn ActionView>, BoxError> + Send + Sync>;

/// Class name → constructor map. Cloneable and thread-safe.
#[derive(Clone, Default)]
pub struct ActionViewRegistry {
    constructors: Arc<HashMap<String, ViewConstructor>>,
}

impl ActionViewRegistry {
    pub fn builder() -> ActionViewRegistryBuilder {
        ActionViewRegistryBuilder::new()
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.constructors.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl Debug for ActionViewRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut classes: Vec<&String> = self.constructors.keys().collect();
        classes.sort();
        f.debug_struct("ActionViewRegistry")
            .field("classes", &classes)
            .finish()
    }
}

impl ActionViewFactory for ActionViewRegistry {
    fn create(
        &self,
        class_name: &str,
        context: &ViewContext,
    ) -> Result<Box<dyn ActionView>, InflateError> {
        let constructor = self.constructors.get(class_name).ok_or_else(|| {
            InflateError::ActionViewInstantiation {
                class: class_name.to_string(),
                source: Box::new(ClassNotFound(class_name.to_string())),
            }
        })?;
        constructor(context).map_err(|source| InflateError::ActionViewInstantiation {
            class: class_name.to_string(),
            source,
        })
    }
}

#[derive(Default)]
pub struct ActionViewRegistryBuilder {
    constructors: HashMap<String, ViewConstructor>,
}

impl ActionViewRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fallible constructor for `class_name`. A later registration
    /// for the same class replaces the earlier one.
    pub fn register<F>(mut self, class_name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&ViewContext) -> Result<Box<dyn ActionView>, BoxError> + Send + Sync + 'static,
    {
        self.constructors
            .insert(class_name.into(), Arc::new(constructor));
        self
    }

    /// Register an infallible constructor for `class_name`.
    pub fn register_view<V, F>(self, class_name: impl Into<String>, constructor: F) -> Self
    where
        V: ActionView,
        F: Fn(&ViewContext) -> V + Send + Sync + 'static,
    {
        self.register(class_name, move |ctx| {
            Ok(Box::new(constructor(ctx)) as Box<dyn ActionView>)
        })
    }

    pub fn build(self) -> ActionViewRegistry {
        ActionViewRegistry {
            constructors: Arc::new(self.constructors),
        }
    }
}

/// Construct and attach the action view named by `attributes`, if any.
///
/// Returns whether a view was attached. Any failure to find, construct or
/// attach the view is an [`InflateError::ActionViewInstantiation`]; the item
/// stays in its menu either way.
pub fn attach(
    item: &mut dyn MenuItem,
    attributes: &dyn AttributeResolver,
    factory: &dyn ActionViewFactory,
    context: &ViewContext,
) -> Result<bool, InflateError> {
    let Some(class_name) = attributes.get_string(MENU_NS, ACTION_VIEW_CLASS) else {
        return Ok(false);
    };

    let view = factory
        .create(class_name, context)
        .map_err(|err| match err {
            InflateError::ActionViewInstantiation { .. } => err,
            other => InflateError::ActionViewInstantiation {
                class: class_name.to_string(),
                source: Box::new(other),
            },
        })
        .inspect_err(|err| {
            warn!(event = "ActionView", phase = "Create", class = class_name, error = %err);
        })?;

    item.set_action_view(view)
        .map_err(|err| InflateError::ActionViewInstantiation {
            class: class_name.to_string(),
            source: Box::new(err),
        })?;

    debug!(event = "ActionView", phase = "Attach", class = class_name);
    Ok(true)
}
