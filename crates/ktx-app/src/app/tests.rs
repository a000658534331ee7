use super::*;
use crossterm::event::KeyCode;

use crate::test_support::KubeDir;

fn make_app(kube: &KubeDir, config_filter: &str, context_filter: &str) -> App {
    let loaded = kube.load();
    App::new(loaded.contexts, &loaded.config, config_filter, context_filter)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn lists_every_context_in_configured_order() {
    let kube = KubeDir::new();
    let app = make_app(&kube, "", "");
    let names: Vec<_> = app.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["dev", "prod", "lab", "staging"]);
    assert!(app.filtering);
    assert_eq!(app.title, "Kube Contexts");
}

#[test]
fn cli_filters_narrow_items_and_disable_live_filter() {
    let kube = KubeDir::new();
    let app = make_app(&kube, "two", "ag");
    let names: Vec<_> = app.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["staging"]);
    assert!(!app.filtering);
}

#[test]
fn typing_filters_and_enter_switches() {
    let kube = KubeDir::new();
    let mut app = make_app(&kube, "", "");

    type_str(&mut app, "LA");
    assert_eq!(app.visible_count(), 1);
    press(&mut app, KeyCode::Enter);

    assert!(!app.running);
    assert_eq!(kube.current_context("kube.one"), "");
    assert_eq!(kube.current_context("kube.two"), "lab");
}

#[test]
fn navigation_keys_stay_in_bounds() {
    let kube = KubeDir::new();
    let mut app = make_app(&kube, "one", "x");
    assert!(app.items.is_empty());
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.selected, 0);

    let mut app = make_app(&kube, "", "");
    press(&mut app, KeyCode::Esc);
    assert!(!app.filtering);
    for _ in 0..10 {
        press(&mut app, KeyCode::Char('j'));
    }
    assert_eq!(app.selected, 3);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.selected, 1);

    press(&mut app, KeyCode::Enter);
    assert_eq!(kube.current_context("kube.one"), "prod");
    assert_eq!(kube.current_context("kube.two"), "");
}

#[test]
fn escape_stops_filtering_then_quits() {
    let kube = KubeDir::new();
    let mut app = make_app(&kube, "", "");

    type_str(&mut app, "q");
    assert!(app.running);
    assert_eq!(app.filter, "q");

    press(&mut app, KeyCode::Esc);
    assert!(app.running);
    assert!(!app.filtering);
    assert!(app.filter.is_empty());

    press(&mut app, KeyCode::Esc);
    assert!(!app.running);
}

#[test]
fn slash_starts_filter_and_help_toggles() {
    let kube = KubeDir::new();
    let mut app = make_app(&kube, "", "dev");
    assert!(app.show_help);
    press(&mut app, KeyCode::Char('H'));
    assert!(!app.show_help);

    press(&mut app, KeyCode::Char('/'));
    assert!(app.filtering);
    type_str(&mut app, "H");
    assert_eq!(app.filter, "H");
    assert!(!app.show_help);
}

#[test]
fn q_and_ctrl_c_quit() {
    let kube = KubeDir::new();
    let mut app = make_app(&kube, "", "d");
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.running);

    let mut app = make_app(&kube, "", "");
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(!app.running);
    assert!(app.filter.is_empty());
}

#[test]
fn failed_switch_shows_expiring_error() {
    let kube = KubeDir::new();
    let mut app = make_app(&kube, "", "");

    std::fs::remove_file(kube.path("kube.one")).unwrap();
    std::fs::create_dir(kube.path("kube.one")).unwrap();

    type_str(&mut app, "staging");
    press(&mut app, KeyCode::Enter);

    assert!(app.running);
    let (status, expires) = app.status.clone().unwrap();
    assert!(status.is_error);
    assert!(status.text.starts_with("Failed to switch to 'staging'"));

    app.expire_status(expires - Duration::from_millis(1));
    assert!(app.status.is_some());
    app.expire_status(expires);
    assert!(app.status.is_none());
}

#[test]
fn enter_with_no_match_does_nothing() {
    let kube = KubeDir::new();
    let mut app = make_app(&kube, "", "");
    type_str(&mut app, "zzz");
    press(&mut app, KeyCode::Enter);
    assert!(app.running);
    assert!(app.status.is_none());
    assert_eq!(kube.current_context("kube.one"), "prod");
}

#[test]
fn into_contexts_reflects_switch() {
    let kube = KubeDir::new();
    let mut app = make_app(&kube, "", "");
    type_str(&mut app, "staging");
    press(&mut app, KeyCode::Enter);

    let mut contexts = app.into_contexts();
    assert_eq!(crate::commands::current(&mut contexts).unwrap(), "staging");
}
