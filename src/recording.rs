//! A passive [`Menu`] that records everything added to it.

use serde::Serialize;

use crate::error::InflateError;
use crate::traits::{ActionView, Menu, MenuItem};
use crate::types::ResId;

#[derive(Debug, Serialize)]
pub struct RecordedItem {
    pub group_id: i32,
    pub item_id: ResId,
    pub order: i32,
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_view_class: Option<String>,
    #[serde(skip)]
    action_view: Option<Box<dyn ActionView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_menu: Option<RecordingMenu>,
}

impl RecordedItem {
    fn new(group_id: i32, item_id: ResId, order: i32, title: Option<&str>) -> Self {
        RecordedItem {
            group_id,
            item_id,
            order,
            title: title.map(str::to_string),
            action_view_class: None,
            action_view: None,
            sub_menu: None,
        }
    }

    pub fn action_view(&self) -> Option<&dyn ActionView> {
        self.action_view.as_deref()
    }

    pub fn is_sub_menu(&self) -> bool {
        self.sub_menu.is_some()
    }
}

impl MenuItem for RecordedItem {
    fn set_action_view(&mut self, view: Box<dyn ActionView>) -> Result<(), InflateError> {
        self.action_view_class = Some(view.class_name().to_string());
        self.action_view = Some(view);
        Ok(())
    }
}

/// One creation call, as seen from the root menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MenuCall {
    Add {
        depth: usize,
        group_id: i32,
        item_id: ResId,
        order: i32,
        title: Option<String>,
    },
    AddSubMenu {
        depth: usize,
        group_id: i32,
        item_id: ResId,
        order: i32,
        title: Option<String>,
    },
}

#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct RecordingMenu {
    items: Vec<RecordedItem>,
}

impl RecordingMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items and submenu anchors of this menu, in creation order.
    pub fn items(&self) -> &[RecordedItem] {
        &self.items
    }

    pub fn find(&self, item_id: ResId) -> Option<&RecordedItem> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    /// All plain items in this menu and its submenus.
    pub fn item_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match &item.sub_menu {
                Some(sub) => sub.item_count(),
                None => 1,
            })
            .sum()
    }

    /// Every creation call in the order the calls were made.
    pub fn calls(&self) -> Vec<MenuCall> {
        let mut calls = Vec::new();
        self.collect_calls(0, &mut calls);
        calls
    }

    fn collect_calls(&self, depth: usize, calls: &mut Vec<MenuCall>) {
        for item in &self.items {
            let (group_id, item_id, order, title) =
                (item.group_id, item.item_id, item.order, item.title.clone());
            match &item.sub_menu {
                Some(sub) => {
                    calls.push(MenuCall::AddSubMenu {
                        depth,
                        group_id,
                        item_id,
                        order,
                        title,
                    });
                    sub.collect_calls(depth + 1, calls);
                }
                None => calls.push(MenuCall::Add {
                    depth,
                    group_id,
                    item_id,
                    order,
                    title,
                }),
            }
        }
    }
}

impl Menu for RecordingMenu {
    fn add(
        &mut self,
        group_id: i32,
        item_id: ResId,
        order: i32,
        title: Option<&str>,
    ) -> &mut dyn MenuItem {
        self.items
            .push(RecordedItem::new(group_id, item_id, order, title));
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    fn add_sub_menu(
        &mut self,
        group_id: i32,
        item_id: ResId,
        order: i32,
        title: Option<&str>,
    ) -> &mut dyn Menu {
        self.items
            .push(RecordedItem::new(group_id, item_id, order, title));
        let last = self.items.len() - 1;
        self.items[last].sub_menu.get_or_insert_with(RecordingMenu::new)
    }
}
