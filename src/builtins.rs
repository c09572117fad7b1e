//! Ready-made commands
//!
//! Hosts register these on a shell alongside their own commands.

use crate::commands::Command;
use crate::style::StyleKind;

/// `clear`: empty the transcript
pub fn clear() -> Command {
    Command::new("clear", |widget, _, _, _| {
        widget.clear_screen(None);
        Ok(())
    })
}

/// `help`: list every command on the shell
pub fn help() -> Command {
    Command::new("help", |widget, shell, _, _| {
        widget.echo(
            format!("Showing commands for {}", shell.name()),
            StyleKind::Info,
        );
        shell.show_help(widget);
        Ok(())
    })
}

/// `toggleScrollbar`: show or hide the transcript scrollbar
pub fn toggle_scrollbar() -> Command {
    Command::new("toggleScrollbar", |widget, _, _, _| {
        let hidden = widget.toggle_scrollbar();
        let state = if hidden { "disabled" } else { "enabled" };
        widget.echo(format!("Scrollbar {}", state), StyleKind::Log);
        Ok(())
    })
}

/// All builtins in registration order
pub fn defaults() -> Vec<Command> {
    vec![clear(), help(), toggle_scrollbar()]
}
