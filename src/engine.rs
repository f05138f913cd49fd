use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::action_view::{self, ActionViewRegistry, ViewContext};
use crate::attributes::AttributeSet;
use crate::error::InflateError;
use crate::metrics::{self, InflationPhases, InflationStats};
use crate::timers::PhaseTimer;
use crate::traits::{
    ActionViewFactory, AttributeResolver, Environment, Menu, MenuSource, ResourceIndex,
    StringResolver,
};
use crate::types::{
    Configuration, InflaterConfig, MENU_NS, NodeKind, ResId, ResourceNode, is_indirect,
};

/// Immutable traversal state handed down the recursion. A `group` node gets
/// a copy with its own id; siblings keep seeing the parent's.
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    group_id: i32,
    strict: bool,
    qualifiers: &'a str,
    view_context: &'a ViewContext,
}

impl Scope<'_> {
    fn with_group(&self, group_id: i32) -> Self {
        Scope { group_id, ..*self }
    }
}

#[derive(Debug, Default)]
struct Counts {
    items: usize,
    sub_menus: usize,
    action_views: usize,
}

#[derive(Debug, Default)]
struct Phases {
    load: Duration,
    descent: Duration,
}

/// Inflates menu resources into [`Menu`]s. Cloneable and thread-safe;
/// concurrent inflations must target different menus.
#[derive(Clone)]
pub struct MenuInflater {
    index: Arc<dyn ResourceIndex>,
    menus: Arc<dyn MenuSource>,
    strings: Arc<dyn StringResolver>,
    environment: Arc<dyn Environment>,
    action_views: Arc<dyn ActionViewFactory>,
    config: Arc<InflaterConfig>,
}

impl MenuInflater {
    /// Start building an inflater over `resources`, which serves ids, menu
    /// trees and strings.
    pub fn builder<R>(resources: Arc<R>) -> MenuInflaterBuilder
    where
        R: ResourceIndex + MenuSource + StringResolver + 'static,
    {
        MenuInflaterBuilder::new(resources)
    }

    pub fn config(&self) -> &InflaterConfig {
        &self.config
    }

    /// Inflate the menu resource `res_id` into `menu`.
    ///
    /// Strict i18n violations come back as [`InflateError::Validation`]
    /// untouched; every other failure is wrapped in
    /// [`InflateError::Inflation`] naming the resource. On error `menu` keeps
    /// whatever was added before the failure.
    pub fn inflate(&self, res_id: ResId, menu: &mut dyn Menu) -> Result<(), InflateError> {
        let start = Instant::now();
        let qualifiers = self.environment.qualifiers();
        let resource = self
            .index
            .resource_name(res_id)
            .unwrap_or_else(|| format!("0x{res_id:08x}"));

        debug!(
            event = "Inflate",
            phase = "Start",
            resource = %resource,
            qualifiers = %qualifiers,
            strict = self.config.strict_i18n
        );

        let mut counts = Counts::default();
        let mut phases = Phases::default();
        let result = self
            .run(res_id, &qualifiers, &resource, menu, &mut counts, &mut phases)
            .map_err(|err| InflateError::wrap(resource.as_str(), err));

        match &result {
            Ok(()) => info!(
                event = "Inflate",
                phase = "Done",
                resource = %resource,
                items = counts.items,
                sub_menus = counts.sub_menus,
                action_views = counts.action_views
            ),
            Err(err) => warn!(
                event = "Inflate",
                phase = "Failed",
                resource = %resource,
                validation = err.is_validation(),
                error = %err
            ),
        }

        let duration = start.elapsed();
        metrics::record_inflation(
            &InflationStats {
                duration,
                resource,
                qualifiers,
                items: counts.items,
                sub_menus: counts.sub_menus,
                action_views: counts.action_views,
                succeeded: result.is_ok(),
            },
            &InflationPhases {
                load_ms: phases.load.as_secs_f64() * 1_000.0,
                descent_ms: phases.descent.as_secs_f64() * 1_000.0,
                total_ms: duration.as_secs_f64() * 1_000.0,
            },
        );

        result
    }

    fn run(
        &self,
        res_id: ResId,
        qualifiers: &str,
        resource: &str,
        menu: &mut dyn Menu,
        counts: &mut Counts,
        phases: &mut Phases,
    ) -> Result<(), InflateError> {
        let root = {
            let _timer = PhaseTimer::new(&mut phases.load);
            self.menus.menu_node(res_id, qualifiers)?
        };

        let view_context = ViewContext::new(qualifiers, resource);
        let scope = Scope {
            group_id: 0,
            strict: self.config.strict_i18n,
            qualifiers,
            view_context: &view_context,
        };

        let _timer = PhaseTimer::new(&mut phases.descent);
        self.visit(&root, &scope, menu, counts)
    }

    fn visit(
        &self,
        node: &ResourceNode,
        scope: &Scope<'_>,
        menu: &mut dyn Menu,
        counts: &mut Counts,
    ) -> Result<(), InflateError> {
        for child in node.children() {
            let attributes = AttributeSet::new(
                child,
                self.index.as_ref(),
                &self.config.i18n_policy,
                scope.strict,
            );
            if scope.strict {
                attributes.validate_strict_i18n()?;
            }

            match child.kind() {
                NodeKind::SubMenuItem => {
                    let item_id = attributes.get_resource_id(MENU_NS, "id", 0)?;
                    // Submenu titles are used as written, never resolved.
                    let title = attributes.get_string(MENU_NS, "title");
                    trace!(
                        event = "Inflate",
                        phase = "AddSubMenu",
                        group = scope.group_id,
                        item_id,
                        title = ?title
                    );
                    let sub_menu = menu.add_sub_menu(scope.group_id, item_id, 0, title);
                    counts.sub_menus += 1;
                    if let Some(sub_root) = child.children().first() {
                        self.visit(sub_root, scope, sub_menu, counts)?;
                    }
                }
                NodeKind::Item => {
                    let title = self.resolve_title(&attributes, scope)?;
                    let order = attributes.get_int(MENU_NS, "orderInCategory", 0)?;
                    let item_id = attributes.get_resource_id(MENU_NS, "id", 0)?;
                    trace!(
                        event = "Inflate",
                        phase = "Add",
                        group = scope.group_id,
                        item_id,
                        order,
                        title = ?title
                    );
                    let item = menu.add(scope.group_id, item_id, order, title.as_deref());
                    counts.items += 1;
                    if action_view::attach(
                        item,
                        &attributes,
                        self.action_views.as_ref(),
                        scope.view_context,
                    )? {
                        counts.action_views += 1;
                    }
                }
                NodeKind::Group => {
                    let group_id = attributes.get_resource_id(MENU_NS, "id", 0)?;
                    self.visit(child, &scope.with_group(group_id), menu, counts)?;
                }
                NodeKind::Unrecognized(name) => {
                    trace!(event = "Inflate", phase = "Skip", node = name);
                }
            }
        }
        Ok(())
    }

    fn resolve_title(
        &self,
        attributes: &AttributeSet<'_>,
        scope: &Scope<'_>,
    ) -> Result<Option<String>, InflateError> {
        match attributes.get_string(MENU_NS, "title") {
            Some(raw) if is_indirect(raw) => {
                let id = attributes.get_resource_id(MENU_NS, "title", 0)?;
                self.strings.resolve_string(id, scope.qualifiers).map(Some)
            }
            literal => Ok(literal.map(str::to_string)),
        }
    }
}

/// Wires a [`MenuInflater`] together. Defaults: empty qualifiers, an empty
/// action view registry and a non-strict [`InflaterConfig`].
pub struct MenuInflaterBuilder {
    index: Arc<dyn ResourceIndex>,
    menus: Arc<dyn MenuSource>,
    strings: Arc<dyn StringResolver>,
    environment: Arc<dyn Environment>,
    action_views: Arc<dyn ActionViewFactory>,
    config: InflaterConfig,
}

impl MenuInflaterBuilder {
    pub fn new<R>(resources: Arc<R>) -> Self
    where
        R: ResourceIndex + MenuSource + StringResolver + 'static,
    {
        MenuInflaterBuilder {
            index: resources.clone(),
            menus: resources.clone(),
            strings: resources,
            environment: Arc::new(Configuration::default()),
            action_views: Arc::new(ActionViewRegistry::default()),
            config: InflaterConfig::default(),
        }
    }

    /// Resolve string resources somewhere other than the main resources.
    pub fn strings(mut self, strings: Arc<dyn StringResolver>) -> Self {
        self.strings = strings;
        self
    }

    pub fn environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = environment;
        self
    }

    pub fn action_views(mut self, action_views: Arc<dyn ActionViewFactory>) -> Self {
        self.action_views = action_views;
        self
    }

    pub fn config(mut self, config: InflaterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn strict_i18n(mut self, strict: bool) -> Self {
        self.config.strict_i18n = strict;
        self
    }

    pub fn build(self) -> MenuInflater {
        MenuInflater {
            index: self.index,
            menus: self.menus,
            strings: self.strings,
            environment: self.environment,
            action_views: self.action_views,
            config: Arc::new(self.config),
        }
    }
}

#[cfg(test)]
mod tests;
