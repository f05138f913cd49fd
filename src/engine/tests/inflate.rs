use std::thread;

use super::*;
use crate::types::{Configuration, ResourceType};
use yare::parameterized;

#[test]
fn test_group_with_plain_item_and_sub_menu() {
    let fixture = Fixture::new(menu([group(
        1,
        [
            item(10, "Settings").with_attr("orderInCategory", "5"),
            sub_menu_item(11, "@string/exit_label", [item(12, "Confirm")]),
        ],
    )]));

    let target = fixture.inflate();

    assert_eq!(
        target.calls(),
        vec![
            add(0, 1, 10, 5, "Settings"),
            add_sub_menu(0, 1, 11, "@string/exit_label"),
            add(1, 1, 12, 0, "Confirm"),
        ]
    );
}

#[test]
fn test_group_scope_does_not_leak_to_siblings() {
    let fixture = Fixture::new(menu([
        item(1, "Before"),
        group(7, [item(2, "Inside"), group(8, [item(3, "Nested")]), item(4, "Inside again")]),
        item(5, "After"),
    ]));

    let groups: Vec<(i32, i32)> = fixture
        .inflate()
        .items()
        .iter()
        .map(|i| (i.item_id, i.group_id))
        .collect();

    assert_eq!(groups, vec![(1, 0), (2, 7), (3, 8), (4, 7), (5, 0)]);
}

#[test]
fn test_group_without_id_uses_group_zero() {
    let fixture = Fixture::new(menu([group(
        3,
        [ResourceNode::group().with_child(item(1, "Reset"))],
    )]));
    assert_eq!(fixture.inflate().find(1).unwrap().group_id, 0);
}

#[test]
fn test_sub_menu_keeps_enclosing_group() {
    let fixture = Fixture::new(menu([group(
        4,
        [sub_menu_item(
            20,
            "More",
            [item(21, "One"), group(9, [item(22, "Two")])],
        )],
    )]));

    let target = fixture.inflate();
    let anchor = target.find(20).unwrap();
    assert_eq!(anchor.group_id, 4);
    assert_eq!(anchor.order, 0);

    let sub = anchor.sub_menu.as_ref().unwrap();
    assert_eq!(sub.find(21).unwrap().group_id, 4);
    assert_eq!(sub.find(22).unwrap().group_id, 9);
}

#[test]
fn test_sub_menu_anchor_ignores_order_in_category() {
    let fixture = Fixture::new(menu([
        sub_menu_item(20, "More", [item(21, "One")]).with_attr("orderInCategory", "9"),
    ]));
    assert_eq!(fixture.inflate().find(20).unwrap().order, 0);
}

#[test]
fn test_unrecognized_nodes_are_skipped_with_their_subtree() {
    let fixture = Fixture::new(menu([
        item(1, "Kept"),
        ResourceNode::new("separator").with_child(item(2, "Hidden")),
        ResourceNode::menu().with_child(item(3, "Also hidden")),
        item(4, "Kept too"),
    ]));

    let target = fixture.inflate();
    let ids: Vec<i32> = target.items().iter().map(|i| i.item_id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[parameterized(
    flat = { menu([item(1, "a"), item(2, "b"), item(3, "c")]), 3 },
    grouped = { menu([group(1, [item(1, "a"), item(2, "b")]), item(3, "c")]), 3 },
    sub_menus_not_counted = { menu([sub_menu_item(1, "s", [item(2, "a"), item(3, "b")])]), 2 },
    unknown_ignored = { menu([ResourceNode::new("x").with_child(item(1, "a")), item(2, "b")]), 1 },
    empty = { menu([]), 0 },
)]
fn test_item_count_matches_plain_items(root: ResourceNode, expected: usize) {
    let fixture = Fixture::new(root);
    assert_eq!(fixture.inflate().item_count(), expected);
}

#[test]
fn test_indirect_title_is_resolved() {
    let fixture = Fixture::new(menu([item(1, "@string/exit_label"), item(2, "Exit")]));
    let target = fixture.inflate();
    assert_eq!(target.find(1).unwrap().title.as_deref(), Some("Exit"));
    assert_eq!(target.find(2).unwrap().title.as_deref(), Some("Exit"));
}

#[test]
fn test_indirect_title_follows_environment_qualifiers() {
    let fixture = Fixture::new(menu([item(1, "@string/exit_label")]));
    let inflater = fixture
        .builder()
        .environment(Arc::new(|| "fr-rCA".to_string()))
        .build();

    let (target, result) = fixture.inflate_with(&inflater);
    result.unwrap();
    assert_eq!(target.find(1).unwrap().title.as_deref(), Some("Quitter"));
}

#[test]
fn test_attributes_default_to_zero() {
    let fixture = Fixture::new(menu([ResourceNode::item()]));
    let target = fixture.inflate();
    assert_eq!(
        target.calls(),
        vec![MenuCall::Add {
            depth: 0,
            group_id: 0,
            item_id: 0,
            order: 0,
            title: None,
        }]
    );
}

#[test]
fn test_reference_ids_are_resolved() {
    let mut builder = ResourceTableBuilder::new();
    let settings = builder.declare(ResourceType::Id, "settings");
    let fixture = Fixture::with_builder(
        builder,
        menu([ResourceNode::group()
            .with_attr("id", "@+id/primary")
            .with_child(
                ResourceNode::item()
                    .with_attr("id", "@id/settings")
                    .with_attr("title", "Settings"),
            )]),
    );

    let primary = fixture
        .resources
        .id_of(ResourceType::Id, "primary")
        .expect("declared by add_menu");
    let target = fixture.inflate();
    let item = target.find(settings).unwrap();
    assert_eq!(item.group_id, primary);
}

#[test]
fn test_missing_string_is_wrapped_with_resource_name() {
    let fixture = Fixture::new(menu([item(1, "@string/nope")]));
    let (target, result) = fixture.inflate_with(&fixture.inflater());

    let err = result.unwrap_err();
    match &err {
        InflateError::Inflation { resource, source } => {
            assert_eq!(resource, "menu/main");
            assert!(matches!(**source, InflateError::UnknownResource(_)));
        }
        other => panic!("expected Inflation, got {other:?}"),
    }
    assert!(target.items().is_empty());
}

#[test]
fn test_malformed_order_is_wrapped() {
    let fixture = Fixture::new(menu([
        item(1, "Ok"),
        item(2, "Bad").with_attr("orderInCategory", "first"),
        item(3, "Never"),
    ]));
    let (target, result) = fixture.inflate_with(&fixture.inflater());

    let err = result.unwrap_err();
    assert!(!err.is_validation());
    assert!(matches!(
        err.root_cause(),
        InflateError::InvalidAttribute { attribute, .. } if attribute == "orderInCategory"
    ));
    let ids: Vec<i32> = target.items().iter().map(|i| i.item_id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn test_unknown_menu_resource() {
    let fixture = Fixture::new(menu([]));
    let mut target = RecordingMenu::new();
    let err = fixture
        .inflater()
        .inflate(0x7f0a_0042, &mut target)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "error inflating 0x7f0a0042: unknown resource: 0x7f0a0042"
    );
}

#[test]
fn test_qualified_menu_variant_is_selected() {
    let mut builder = ResourceTableBuilder::new();
    builder.add_menu("main", "land", menu([item(99, "Landscape")]));
    let fixture = Fixture::with_builder(builder, menu([item(1, "Portrait")]));

    let (target, result) = fixture.inflate_with(
        &fixture
            .builder()
            .environment(Arc::new(Configuration::new("land-night")))
            .build(),
    );
    result.unwrap();
    assert!(target.find(99).is_some());
    assert!(target.find(1).is_none());
}

#[test]
fn test_inflating_twice_appends() {
    let fixture = Fixture::new(menu([item(1, "One")]));
    let inflater = fixture.inflater();
    let mut target = RecordingMenu::new();
    inflater.inflate(fixture.menu_id, &mut target).unwrap();
    inflater.inflate(fixture.menu_id, &mut target).unwrap();
    assert_eq!(target.item_count(), 2);
}

#[test]
fn test_inflate_from_json_tree() {
    let mut builder = ResourceTableBuilder::new();
    builder.add_string("search", "", "Search");
    let id = builder
        .add_menu_json(
            "toolbar",
            "",
            r#"{
                "name": "menu",
                "children": [
                    { "name": "item", "attributes": { "id": "@+id/search", "title": "@string/search", "orderInCategory": "2" } },
                    { "name": "item", "attributes": { "id": "@+id/more", "title": "More" }, "children": [
                        { "name": "menu", "children": [
                            { "name": "item", "attributes": { "id": "@+id/about", "title": "About" } }
                        ] }
                    ] }
                ]
            }"#,
        )
        .unwrap();
    let resources = Arc::new(builder.build());
    let search = resources.id_of(ResourceType::Id, "search").unwrap();
    let inflater = MenuInflater::builder(resources).build();

    let mut target = RecordingMenu::new();
    inflater.inflate(id, &mut target).unwrap();

    let item = target.find(search).unwrap();
    assert_eq!(item.title.as_deref(), Some("Search"));
    assert_eq!(item.order, 2);
    assert_eq!(target.item_count(), 2);
    assert_eq!(target.items()[1].sub_menu.as_ref().unwrap().items().len(), 1);
}

#[test]
fn test_recorded_menu_snapshot() {
    let fixture = Fixture::new(menu([
        group(1, [item(10, "Settings").with_attr("orderInCategory", "5")]),
        sub_menu_item(11, "More", [item(12, "@string/confirm_label")]),
    ]));

    insta::assert_json_snapshot!(fixture.inflate(), @r#"
    [
      {
        "group_id": 1,
        "item_id": 10,
        "order": 5,
        "title": "Settings"
      },
      {
        "group_id": 0,
        "item_id": 11,
        "order": 0,
        "title": "More",
        "sub_menu": [
          {
            "group_id": 0,
            "item_id": 12,
            "order": 0,
            "title": "Confirm"
          }
        ]
      }
    ]
    "#);
}

#[test]
fn test_custom_string_resolver() {
    struct Tagged;

    impl StringResolver for Tagged {
        fn resolve_string(&self, id: ResId, _qualifiers: &str) -> Result<String, InflateError> {
            Ok(format!("STRING-{id:x}"))
        }
    }

    let fixture = Fixture::new(menu([item(1, "@string/exit_label")]));
    let exit = fixture.resources.id_of(ResourceType::String, "exit_label").unwrap();
    let inflater = fixture.builder().strings(Arc::new(Tagged)).build();
    let (target, result) = fixture.inflate_with(&inflater);
    result.unwrap();
    assert_eq!(
        target.find(1).unwrap().title.as_deref(),
        Some(format!("STRING-{exit:x}").as_str())
    );
}

#[test]
fn test_nested_inflation_error_gets_menu_context() {
    struct Delegating;

    impl StringResolver for Delegating {
        fn resolve_string(&self, _id: ResId, _qualifiers: &str) -> Result<String, InflateError> {
            Err(InflateError::Inflation {
                resource: "values/strings".into(),
                source: Box::new(InflateError::ParseError("bad escape".into())),
            })
        }
    }

    let fixture = Fixture::new(menu([item(1, "@string/exit_label")]));
    let inflater = fixture.builder().strings(Arc::new(Delegating)).build();
    let (_, result) = fixture.inflate_with(&inflater);

    let err = result.unwrap_err();
    match &err {
        InflateError::Inflation { resource, source } => {
            assert_eq!(resource, "menu/main");
            assert!(matches!(
                &**source,
                InflateError::Inflation { resource, .. } if resource == "values/strings"
            ));
        }
        other => panic!("expected Inflation, got {other:?}"),
    }
    assert!(matches!(err.root_cause(), InflateError::ParseError(_)));
}

#[test]
fn test_concurrent_inflation_into_separate_menus() {
    let fixture = Fixture::new(menu([
        group(1, [item(1, "@string/exit_label"), item(2, "Two")]),
        sub_menu_item(3, "More", [item(4, "Four")]),
    ]));
    let inflater = fixture.inflater();
    let menu_id = fixture.menu_id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let inflater = inflater.clone();
            thread::spawn(move || {
                let mut target = RecordingMenu::new();
                for _ in 0..50 {
                    inflater.inflate(menu_id, &mut target).unwrap();
                }
                target.item_count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 150);
    }
}
