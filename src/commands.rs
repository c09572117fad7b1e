//! Shell commands
//!
//! A [`Command`] binds a name to a handler. Commands are cheap to clone; the
//! handler is shared, so a shell can hand a command out for execution while
//! the handler itself mutates the shell.

use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::shell::Shell;
use crate::widget::Widget;

/// Signature of a command handler
///
/// Receives the widget, the shell that dispatched the command, the command
/// itself and the whitespace-separated arguments after the command name.
pub type CommandHandler = dyn Fn(&mut Widget, &mut Shell, &Command, &[&str]) -> anyhow::Result<()>;

/// A named, invokable unit of behaviour
#[derive(Clone)]
pub struct Command {
    name: String,
    handler: Rc<CommandHandler>,
}

impl Command {
    /// Create a command instance
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Widget, &mut Shell, &Command, &[&str]) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            handler: Rc::new(handler),
        }
    }

    /// Name the command is looked up by (case-sensitive)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the command handler
    ///
    /// Handler errors are not caught; they come back wrapped with the
    /// command name.
    pub fn execute(&self, widget: &mut Widget, shell: &mut Shell, args: &[&str]) -> Result<()> {
        debug!("Executing command '{}' with {} args", self.name, args.len());
        (self.handler)(widget, shell, self, args).map_err(|source| Error::CommandFailed {
            command: self.name.clone(),
            source,
        })
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish()
    }
}
