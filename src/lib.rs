// src/lib.rs
pub use action_view::{
    ACTION_VIEW_CLASS, ActionViewRegistry, ActionViewRegistryBuilder, ClassNotFound,
    ViewConstructor, ViewContext,
};
pub use attributes::AttributeSet;
pub use engine::{MenuInflater, MenuInflaterBuilder};
pub use error::{BoxError, InflateError};
pub use loader::parse_menu_tree;
pub use recording::{MenuCall, RecordedItem, RecordingMenu};
pub use resources::{ResourceTable, ResourceTableBuilder, qualifier_fallbacks};
pub use traits::{
    ActionView, ActionViewFactory, AttributeResolver, Environment, Menu, MenuItem, MenuSource,
    ResourceIndex, StringResolver,
};
pub use types::*;

mod action_view;
mod attributes;
mod engine;
mod error;
mod loader;
pub mod metrics;
mod recording;
mod resources;
mod timers;
mod traits;
mod types;
