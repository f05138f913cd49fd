use std::sync::Arc;

use super::*;
use crate::action_view::ActionViewRegistry;
use crate::recording::{MenuCall, RecordingMenu};
use crate::resources::{ResourceTable, ResourceTableBuilder};
use crate::types::ResourceNode;

mod inflate;

/// `item` node with numeric id and a title.
fn item(id: i32, title: &str) -> ResourceNode {
    ResourceNode::item()
        .with_attr("id", id.to_string())
        .with_attr("title", title)
}

fn group(id: i32, children: impl IntoIterator<Item = ResourceNode>) -> ResourceNode {
    ResourceNode::group()
        .with_attr("id", id.to_string())
        .with_children(children)
}

fn sub_menu_item(
    id: i32,
    title: &str,
    children: impl IntoIterator<Item = ResourceNode>,
) -> ResourceNode {
    item(id, title).with_sub_menu(ResourceNode::menu().with_children(children))
}

fn menu(children: impl IntoIterator<Item = ResourceNode>) -> ResourceNode {
    ResourceNode::menu().with_children(children)
}

fn add(depth: usize, group_id: i32, item_id: i32, order: i32, title: &str) -> MenuCall {
    MenuCall::Add {
        depth,
        group_id,
        item_id,
        order,
        title: Some(title.to_string()),
    }
}

fn add_sub_menu(depth: usize, group_id: i32, item_id: i32, title: &str) -> MenuCall {
    MenuCall::AddSubMenu {
        depth,
        group_id,
        item_id,
        order: 0,
        title: Some(title.to_string()),
    }
}

/// Resources with a default and a French `exit_label`, plus one menu.
struct Fixture {
    resources: Arc<ResourceTable>,
    menu_id: ResId,
}

impl Fixture {
    fn new(root: ResourceNode) -> Self {
        Self::with_builder(ResourceTableBuilder::new(), root)
    }

    fn with_builder(mut builder: ResourceTableBuilder, root: ResourceNode) -> Self {
        builder.add_string("exit_label", "", "Exit");
        builder.add_string("exit_label", "fr", "Quitter");
        builder.add_string("confirm_label", "", "Confirm");
        let menu_id = builder.add_menu("main", "", root);
        Fixture {
            resources: Arc::new(builder.build()),
            menu_id,
        }
    }

    fn builder(&self) -> MenuInflaterBuilder {
        MenuInflater::builder(self.resources.clone())
    }

    fn inflater(&self) -> MenuInflater {
        self.builder().build()
    }

    fn inflate_with(&self, inflater: &MenuInflater) -> (RecordingMenu, Result<(), InflateError>) {
        let mut target = RecordingMenu::new();
        let result = inflater.inflate(self.menu_id, &mut target);
        (target, result)
    }

    fn inflate(&self) -> RecordingMenu {
        let (target, result) = self.inflate_with(&self.inflater());
        result.expect("inflation succeeds");
        target
    }
}

#[test]
fn test_inflater_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<MenuInflater>();
}

#[test]
fn test_builder_defaults() {
    let fixture = Fixture::new(menu([]));
    let inflater = fixture.inflater();
    assert!(!inflater.config().strict_i18n);

    let inflater = fixture
        .builder()
        .action_views(Arc::new(ActionViewRegistry::default()))
        .strict_i18n(true)
        .build();
    assert!(inflater.config().strict_i18n);
}
