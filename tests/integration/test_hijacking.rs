//! Integration Tests for Hijacking
//!
//! Attach/detach bookkeeping and key routing while a hijacker holds the
//! shell.

#[path = "../test_utils/fixtures.rs"]
mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use fixtures::*;
use myterm::{
    Command, Error, HijackContext, HijackHandler, HijackHooks, Hijacker, Key, KeyEvent, Shell,
    StyleKind,
};

/// Echoes submissions back and leaves on `quit`
#[derive(Default)]
struct Parrot {
    seen: Rc<RefCell<Vec<String>>>,
}

impl HijackHandler for Parrot {
    fn on_attach(&mut self, ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        ctx.widget().echo("parrot here", StyleKind::Info);
        Ok(())
    }

    fn handle_submit(&mut self, ctx: &mut HijackContext<'_>, input: &str) -> anyhow::Result<()> {
        self.seen.borrow_mut().push(input.to_string());
        if input.trim() == "quit" {
            ctx.detach();
        } else {
            ctx.widget().echo(format!("squawk {}", input), StyleKind::Themed);
        }
        Ok(())
    }

    fn on_detach(&mut self, ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        ctx.widget().echo("parrot gone", StyleKind::Info);
        Ok(())
    }
}

fn parrot() -> (Hijacker, Rc<RefCell<Vec<String>>>) {
    let parrot = Parrot::default();
    let seen = Rc::clone(&parrot.seen);
    (Hijacker::new("PARROT", parrot), seen)
}

#[test]
fn test_attach_and_detach_links() {
    let mut widget = create_widget_with_builtins();
    let (hijacker, _) = parrot();

    widget.attach_hijacker(&hijacker).unwrap();
    let shell = widget.shell().unwrap();
    assert_eq!(hijacker.shell_id(), Some(shell.id()));
    assert!(shell.hijacker().unwrap().ptr_eq(&hijacker));

    let detached = widget.detach_hijacker().unwrap().unwrap();
    assert!(detached.ptr_eq(&hijacker));
    assert!(hijacker.shell_id().is_none());
    assert!(widget.shell().unwrap().hijacker().is_none());

    assert_eq!(
        transcript_text(&widget),
        vec!["parrot here", "parrot gone"]
    );
}

#[test]
fn test_attach_to_unattached_shell_fails() {
    let mut widget = create_test_widget();
    let mut shell = Shell::new("LONELY");
    let (hijacker, _) = parrot();

    let result = hijacker.attach_to(&mut shell, &mut widget);
    assert!(matches!(result, Err(Error::ShellNotAttached { .. })));
    assert!(hijacker.shell_id().is_none());
    assert!(shell.hijacker().is_none());
    assert!(widget.transcript().is_empty());
}

#[test]
fn test_keys_reach_only_hijacker() {
    let mut widget = create_widget_with_builtins();
    submit(&mut widget, "help");
    let (hijacker, seen) = parrot();
    widget.attach_hijacker(&hijacker).unwrap();
    let before = transcript_text(&widget).len();

    // navigation and completion keys are left to the input control
    widget.type_text("hel").unwrap();
    for key in [Key::Tab, Key::ArrowUp, Key::ArrowDown] {
        let event = press(&mut widget, key);
        assert!(!event.default_prevented());
    }
    assert_eq!(widget.input_value(), "hel");
    assert_eq!(transcript_text(&widget).len(), before);

    press(&mut widget, Key::Enter);
    widget.tick();

    assert_eq!(seen.borrow().as_slice(), ["hel"]);
    assert_eq!(transcript_text(&widget).last().unwrap(), "squawk hel");
    // the shell neither echoed nor recorded the submission
    assert_eq!(history_entries(&widget), vec!["help"]);
    assert_eq!(widget.input_value(), "");
}

#[test]
fn test_submit_is_untrimmed() {
    let mut widget = create_widget_with_builtins();
    let (hijacker, seen) = parrot();
    widget.attach_hijacker(&hijacker).unwrap();

    widget.set_input_value("  spaced out  ");
    press(&mut widget, Key::Enter);
    widget.set_input_value("");
    press(&mut widget, Key::Enter);

    assert_eq!(seen.borrow().as_slice(), ["  spaced out  ", ""]);
}

#[test]
fn test_shift_enter_inserts_newline() {
    let mut widget = create_widget_with_builtins();
    let (hijacker, seen) = parrot();
    widget.attach_hijacker(&hijacker).unwrap();

    widget.type_text("line one").unwrap();
    let event = widget
        .dispatch_key(KeyEvent::shifted(Key::Enter))
        .unwrap();
    assert!(!event.default_prevented());
    widget.type_text("line two").unwrap();
    widget.tick();

    assert_eq!(widget.input_value(), "line one\nline two");
    assert_eq!(widget.input().rows(), 2);
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_quit_returns_control_to_shell() {
    let mut widget = create_widget_with_builtins();
    let (hijacker, seen) = parrot();
    widget.attach_hijacker(&hijacker).unwrap();

    type_and_submit(&mut widget, "quit");
    assert_eq!(seen.borrow().as_slice(), ["quit"]);
    assert!(!hijacker.is_attached());
    assert!(!widget.shell().unwrap().is_hijacked());
    assert_eq!(transcript_text(&widget).last().unwrap(), "parrot gone");

    // the shell handles the next submission itself
    type_and_submit(&mut widget, "toggleScrollbar");
    assert_eq!(
        transcript_text(&widget).last().unwrap(),
        "Scrollbar enabled"
    );
}

#[test]
fn test_command_can_hijack_its_shell() {
    let mut widget = create_widget_with_builtins();
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&seen);
    widget
        .with_shell(move |_, shell| {
            shell.push_command(Command::new("hijack", move |widget, shell, _, _| {
                let sink = Rc::clone(&sink);
                let hooks = HijackHooks::new().handle_submit(move |ctx, input| {
                    sink.borrow_mut().push(input.to_string());
                    ctx.detach();
                    Ok(())
                });
                Hijacker::new("ONCE", hooks).attach_to(shell, widget)?;
                Ok(())
            }));
        })
        .unwrap();

    submit(&mut widget, "hijack");
    assert!(widget.shell().unwrap().is_hijacked());

    submit(&mut widget, "hello");
    assert_eq!(seen.borrow().as_slice(), ["hello"]);
    assert!(!widget.shell().unwrap().is_hijacked());
}

#[test]
fn test_attaching_hijacked_twice_fails() {
    let mut widget = create_widget_with_builtins();
    let (hijacker, _) = parrot();
    widget.attach_hijacker(&hijacker).unwrap();

    let mut other = create_widget_with_builtins();
    let result = other.attach_hijacker(&hijacker);
    assert!(matches!(
        result,
        Err(Error::HijackerAlreadyAttached { .. })
    ));
    assert!(!other.shell().unwrap().is_hijacked());
}

#[test]
fn test_replacing_hijacker_detaches_old_one() {
    let mut widget = create_widget_with_builtins();
    let (first, _) = parrot();
    let second = Hijacker::new("SECOND", HijackHooks::new());

    widget.attach_hijacker(&first).unwrap();
    widget.attach_hijacker(&second).unwrap();

    assert!(!first.is_attached());
    assert!(second.is_attached());
    assert!(widget.shell().unwrap().hijacker().unwrap().ptr_eq(&second));
    assert_eq!(transcript_text(&widget).last().unwrap(), "parrot gone");
}

#[test]
fn test_detach_from_wrong_shell_fails() {
    let mut widget = create_widget_with_builtins();
    let (hijacker, _) = parrot();
    widget.attach_hijacker(&hijacker).unwrap();

    let mut other = create_test_widget();
    let mut stranger = Shell::new("STRANGER");
    let result = hijacker.detach(&mut stranger, &mut other);
    assert!(matches!(result, Err(Error::HijackerNotAttached { .. })));
    assert!(hijacker.is_attached());
}

#[test]
fn test_failing_submit_hook_propagates() {
    let mut widget = create_widget_with_builtins();
    let hooks = HijackHooks::new().handle_submit(|_, _| anyhow::bail!("cannot parse"));
    widget
        .attach_hijacker(&Hijacker::new("STRICT", hooks))
        .unwrap();

    widget.set_input_value("garbage");
    let result = widget.dispatch_key(Key::Enter);
    assert!(matches!(
        result,
        Err(Error::HookFailed { hook: "handle_submit", .. })
    ));
    // input was consumed before the hook ran
    assert_eq!(widget.input_value(), "");
}

#[test]
fn test_replacing_shell_from_hook_keeps_links_intact() {
    let mut widget = create_widget_with_builtins();
    let hooks = HijackHooks::new().handle_submit(|ctx, _| {
        ctx.widget().attach_shell(Shell::new("NEW"))?;
        Ok(())
    });
    let hijacker = Hijacker::new("H", hooks);
    widget.attach_hijacker(&hijacker).unwrap();

    widget.set_input_value("swap");
    let err = widget.dispatch_key(Key::Enter).unwrap_err();
    match err {
        Error::HookFailed { source, .. } => assert!(matches!(
            source.downcast_ref::<Error>(),
            Some(Error::ShellBusy { .. })
        )),
        other => panic!("unexpected error: {other}"),
    }

    // the hijacked shell is still in place and both links still agree
    let shell = widget.shell().unwrap();
    assert_ne!(shell.name(), "NEW");
    assert_eq!(hijacker.shell_id(), Some(shell.id()));
    assert!(shell.hijacker().unwrap().ptr_eq(&hijacker));

    // so the normal routes still work
    widget.detach_hijacker().unwrap();
    widget.attach_hijacker(&hijacker).unwrap();
    assert!(hijacker.is_attached());
}

#[test]
fn test_widget_hijacker_calls_are_refused_inside_handlers() {
    let mut widget = create_widget_with_builtins();
    let (hijacker, _) = parrot();
    let inner = hijacker.clone();
    widget
        .with_shell(move |_, shell| {
            shell.push_command(Command::new("grab", move |widget, _, _, _| {
                widget.attach_hijacker(&inner)?;
                Ok(())
            }));
        })
        .unwrap();

    widget.set_input_value("grab");
    let result = widget.dispatch_key(Key::Enter);
    assert!(matches!(result, Err(Error::CommandFailed { .. })));
    assert!(!hijacker.is_attached());

    let hooks = HijackHooks::new().handle_submit(|ctx, _| {
        ctx.widget().detach_hijacker()?;
        Ok(())
    });
    let sticky = Hijacker::new("STICKY", hooks);
    widget.attach_hijacker(&sticky).unwrap();

    widget.set_input_value("leave");
    let result = widget.dispatch_key(Key::Enter);
    assert!(matches!(result, Err(Error::HookFailed { .. })));
    assert!(sticky.is_attached());
    assert!(!widget.is_shell_busy());
}
