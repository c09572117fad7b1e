//! Unit Tests for History Navigation
//!
//! Arrow-key navigation through a shell's submission history.

#[path = "../test_utils/fixtures.rs"]
mod fixtures;

use fixtures::*;
use myterm::{Config, Key, Widget};

fn widget_with_history(lines: &[&str]) -> Widget {
    let mut widget = create_widget_with_builtins();
    for line in lines {
        submit(&mut widget, line);
    }
    widget
}

fn index(widget: &Widget) -> isize {
    widget.shell().unwrap().history_index()
}

#[test]
fn test_up_walks_back_and_pins() {
    let mut widget = widget_with_history(&["foo", "bar"]);
    assert_eq!(index(&widget), 2);

    let event = press(&mut widget, Key::ArrowUp);
    assert!(event.default_prevented());
    assert_eq!(widget.input_value(), "bar");
    assert_eq!(index(&widget), 1);

    press(&mut widget, Key::ArrowUp);
    assert_eq!(widget.input_value(), "foo");
    assert_eq!(index(&widget), 0);

    press(&mut widget, Key::ArrowUp);
    assert_eq!(widget.input_value(), "foo");
    assert_eq!(index(&widget), 0);
}

#[test]
fn test_down_returns_to_live_line() {
    let mut widget = widget_with_history(&["foo", "bar"]);
    press(&mut widget, Key::ArrowUp);
    press(&mut widget, Key::ArrowUp);

    press(&mut widget, Key::ArrowDown);
    assert_eq!(widget.input_value(), "bar");

    press(&mut widget, Key::ArrowDown);
    assert_eq!(widget.input_value(), "");
    assert_eq!(index(&widget), 2);
}

#[test]
fn test_down_on_live_line_is_noop() {
    let mut widget = widget_with_history(&["foo"]);
    widget.type_text("draft").unwrap();

    let event = press(&mut widget, Key::ArrowDown);
    assert!(event.default_prevented());
    assert_eq!(widget.input_value(), "draft");
    assert_eq!(index(&widget), 1);
}

#[test]
fn test_up_with_empty_history_is_noop() {
    let mut widget = create_widget_with_builtins();
    widget.type_text("draft").unwrap();

    press(&mut widget, Key::ArrowUp);
    assert_eq!(widget.input_value(), "draft");
    assert_eq!(index(&widget), -1);
}

#[test]
fn test_down_from_initial_state() {
    let mut widget = create_widget_with_builtins();
    widget.type_text("draft").unwrap();

    // from the initial cursor the live line is one step away
    press(&mut widget, Key::ArrowDown);
    assert_eq!(widget.input_value(), "");
    assert_eq!(index(&widget), 0);
}

#[test]
fn test_submission_resets_cursor() {
    let mut widget = widget_with_history(&["a", "b", "c"]);
    press(&mut widget, Key::ArrowUp);
    press(&mut widget, Key::ArrowUp);
    assert_eq!(index(&widget), 1);

    press(&mut widget, Key::Enter);
    widget.tick();

    assert_eq!(history_entries(&widget), vec!["a", "b", "c", "b"]);
    assert_eq!(index(&widget), 4);
}

#[test]
fn test_history_is_trimmed_before_recording() {
    let mut widget = create_widget_with_builtins();
    submit(&mut widget, "   padded   ");
    assert_eq!(history_entries(&widget), vec!["padded"]);
}

#[test]
fn test_history_limit_from_config() {
    let mut config = Config::default();
    config.shell.history_limit = 2;
    let mut widget = Widget::create_default(&config);

    for line in ["one", "two", "three"] {
        submit(&mut widget, line);
    }
    assert_eq!(history_entries(&widget), vec!["two", "three"]);
    assert_eq!(index(&widget), 2);

    press(&mut widget, Key::ArrowUp);
    press(&mut widget, Key::ArrowUp);
    press(&mut widget, Key::ArrowUp);
    assert_eq!(widget.input_value(), "two");
}
