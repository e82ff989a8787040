//! End-to-end menu traversal against the recording mock menu.

use tiento::mock::{MenuCall, MockMenu, MockMenuItem};
use tiento::prelude::*;
use tiento::{FnCriteria, MenuPath};

fn app_menu() -> MockMenu {
    MockMenu::builder()
        .submenu("File", |file| {
            file.item("New")
                .item("Open")
                .submenu("Export", |export| {
                    export
                        .checked_item("CSV", false)
                        .checked_item("PDF", false)
                        .checked_item("PNG", true)
                })
        })
        .submenu("View", |view| {
            view.checked_item("Toolbar", true)
                .submenu("Zoom", |zoom| zoom.item("100%").item("200%"))
        })
        .build()
}

#[test]
fn export_csv_is_toggled_exactly_once() {
    let mut selector = MenuPathSelector::new(app_menu());
    selector.push(true, ["File", "Export", "CSV"]).unwrap();

    assert_eq!(
        selector.menu().calls(),
        &[
            MenuCall::Expand("File".to_string()),
            MenuCall::Expand("Export".to_string()),
            MenuCall::Toggle("CSV".to_string()),
        ]
    );
    assert!(selector.get_state(["File", "Export", "CSV"]).unwrap());
}

#[test]
fn push_leaves_siblings_alone() {
    let mut selector = MenuPathSelector::new(app_menu());
    selector.push(true, ["File", "Export", "PDF"]).unwrap();

    let menu = selector.into_inner();
    assert!(menu.is_checked("PDF"));
    assert!(!menu.is_checked("CSV"));
    assert!(menu.is_checked("PNG"));
    assert_eq!(menu.total_toggles(), 1);
}

#[test]
fn empty_path_is_rejected_before_touching_the_menu() {
    let mut selector = MenuPathSelector::new(app_menu());
    let empty: Vec<String> = Vec::new();

    let err = selector.get_state(empty).unwrap_err();
    assert!(matches!(err, TientoError::InvalidArgument { .. }));
    assert!(selector.menu().calls().is_empty());
}

#[test]
fn get_state_reads_without_toggling() {
    let mut selector = MenuPathSelector::new(app_menu());
    assert!(selector.get_state(["View", "Toolbar"]).unwrap());
    assert!(!selector.get_state(["File", "Export", "PDF"]).unwrap());
    assert_eq!(selector.menu().total_toggles(), 0);
}

#[test]
fn missing_intermediate_level_reports_level() {
    let mut selector = MenuPathSelector::new(app_menu());
    let err = selector.push(true, ["View", "Layout", "Compact"]).unwrap_err();

    assert!(err.is_lookup());
    assert_eq!(
        err.to_string(),
        "No entry found at level 2 for criteria: Text = Layout"
    );
    assert_eq!(selector.menu().expand_count("View"), 1);
    assert_eq!(selector.menu().total_toggles(), 0);
}

#[test]
fn criteria_tokens_mix_with_text() {
    let double_zoom = FnCriteria::new(
        |item: &MockMenuItem| item.label().starts_with('2'),
        "label starts with 2",
    );
    let path: MenuPath<MockMenuItem> = MenuPath::new(vec![
        PathToken::from("View"),
        PathToken::from("Zoom"),
        PathToken::criteria(double_zoom),
    ])
    .unwrap();
    assert_eq!(path.to_string(), "View > Zoom > [label starts with 2]");

    let mut selector = MenuPathSelector::new(app_menu());
    selector.push(true, &path).unwrap();
    assert_eq!(selector.menu().toggle_count("200%"), 1);
    assert_eq!(selector.menu().toggle_count("100%"), 0);
}

#[test]
fn config_driven_selector() {
    let config = TientoConfig::from_yaml("policy: exact_ignore_case\n").unwrap();
    let mut selector = MenuPathSelector::new(app_menu()).with_config(&config);

    selector.push(false, ["view", "TOOLBAR"]).unwrap();
    assert!(!selector.menu().is_checked("Toolbar"));

    let err = selector.get_state(["Vie", "Toolbar"]).unwrap_err();
    assert!(matches!(err, TientoError::Lookup { level: 1, .. }));
}

#[test]
fn borrowed_menu_is_usable_after_selector_drops() {
    let mut menu = app_menu();
    {
        let mut selector = MenuPathSelector::new(&mut menu);
        selector.push(true, ["File", "Export", "CSV"]).unwrap();
        selector.push(false, ["File", "Export", "PNG"]).unwrap();
    }
    assert!(menu.is_checked("CSV"));
    assert!(!menu.is_checked("PNG"));
    assert_eq!(menu.total_toggles(), 2);
}
