//! Integration Tests for Command Dispatch Flows
//!
//! These tests drive a widget with key events the way a host would and check
//! what ends up in the transcript, the input and the shell history.

#[path = "../test_utils/fixtures.rs"]
mod fixtures;

use fixtures::*;
use myterm::{Command, Error, Key, Shell, StyleKind, Widget};

#[test]
fn test_help_after_autocomplete() {
    let mut widget = create_widget_with_builtins();

    widget.type_text("hel").unwrap();
    let event = press(&mut widget, Key::Tab);
    assert!(event.default_prevented());
    assert_eq!(widget.input_value(), "help");

    press(&mut widget, Key::Enter);
    widget.tick();

    assert_eq!(
        transcript_text(&widget),
        vec![
            ">> help",
            "Showing commands for SHELL",
            "    clear",
            "    help",
            "    toggleScrollbar",
        ]
    );
    assert_eq!(widget.input_value(), "");
}

#[test]
fn test_unknown_command() {
    let mut widget = create_widget_with_builtins();
    type_and_submit(&mut widget, "xyz");

    let text = transcript_text(&widget);
    assert_eq!(text, vec![">> xyz", "xyz is not a valid command"]);
    assert_eq!(
        text.iter()
            .filter(|line| line.ends_with("is not a valid command"))
            .count(),
        1
    );
    assert_eq!(history_entries(&widget), vec!["xyz"]);
}

#[test]
fn test_command_receives_arguments() {
    let mut widget = create_test_widget();
    let (command, calls) = create_recording_command("say");
    let mut shell = Shell::new("SHELL");
    shell.push_command(command);
    widget.attach_shell(shell).unwrap();

    submit(&mut widget, "say hello   there");
    submit(&mut widget, "say");

    assert_eq!(
        calls.borrow().as_slice(),
        [vec!["hello".to_string(), "there".to_string()], vec![]]
    );
}

#[test]
fn test_command_names_are_case_sensitive() {
    let mut widget = create_widget_with_builtins();
    submit(&mut widget, "HELP");
    assert_eq!(
        transcript_text(&widget).last().unwrap(),
        "HELP is not a valid command"
    );
}

#[test]
fn test_empty_submissions_change_nothing() {
    let mut widget = create_widget_with_builtins();

    for line in ["", " ", "\t", "   \n  "] {
        submit(&mut widget, line);
    }

    assert!(widget.transcript().is_empty());
    assert!(history_entries(&widget).is_empty());
}

#[test]
fn test_commands_can_change_registry() {
    let mut widget = create_test_widget();
    let mut shell = Shell::new("SHELL");
    shell.push_command(Command::new("learn", |widget, shell, _, args| {
        let word = args.first().copied().unwrap_or("nothing").to_string();
        shell.push_command(Command::new(word.clone(), move |widget, _, _, _| {
            widget.echo(format!("I know {}", word), StyleKind::Success);
            Ok(())
        }));
        widget.echo("learned", StyleKind::Log);
        Ok(())
    }));
    widget.attach_shell(shell).unwrap();

    submit(&mut widget, "learn tricks");
    submit(&mut widget, "tricks");

    assert_eq!(transcript_text(&widget).last().unwrap(), "I know tricks");
    assert_eq!(
        transcript_kinds(&widget).last().copied(),
        Some(StyleKind::Success)
    );
}

#[test]
fn test_failing_command_propagates() {
    let mut widget = create_test_widget();
    let mut shell = Shell::new("SHELL");
    shell.push_command(Command::new("fail", |_, _, _, _| {
        anyhow::bail!("disk on fire")
    }));
    widget.attach_shell(shell).unwrap();

    widget.set_input_value("fail");
    match widget.dispatch_key(Key::Enter) {
        Err(Error::CommandFailed { command, source }) => {
            assert_eq!(command, "fail");
            assert_eq!(source.to_string(), "disk on fire");
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }

    // the echo and history happen before the handler runs
    assert_eq!(transcript_text(&widget), vec![">> fail"]);
    assert_eq!(history_entries(&widget), vec!["fail"]);

    // the shell survives and keeps working
    submit(&mut widget, "nope");
    assert_eq!(
        transcript_text(&widget).last().unwrap(),
        "nope is not a valid command"
    );
}

#[test]
fn test_scroll_to_bottom_after_submit() {
    let mut widget = create_widget_with_builtins();
    for i in 0..20 {
        widget.echo(format!("line {}", i), StyleKind::Log);
    }
    widget.scroll_by(-5);
    assert!(!widget.transcript().is_at_bottom());

    submit(&mut widget, "xyz");
    assert!(widget.transcript().is_at_bottom());
}

#[test]
fn test_create_default_widget_dispatches() {
    let mut widget = Widget::create_default(&myterm::Config::default());
    submit(&mut widget, "anything");
    assert_eq!(
        transcript_text(&widget),
        vec![">> anything", "anything is not a valid command"]
    );
}

#[test]
fn test_no_shell_attached() {
    let mut widget = create_test_widget();
    widget.type_text("help").unwrap();
    press(&mut widget, Key::Enter);

    assert_eq!(
        transcript_text(&widget),
        vec!["No shell attached to terminal"]
    );
}
