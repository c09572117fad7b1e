//! Hijacker - alternate keystroke interpreter
//!
//! A hijacker temporarily takes over a shell's key handling, e.g. for a
//! game or a prompt that reads free text. Behaviour comes from a
//! [`HijackHandler`]; the [`Hijacker`] handle keeps the attachment state and
//! can be cloned cheaply so both the caller and the shell can hold it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::key::{Key, KeyEvent};
use crate::scheduler::Task;
use crate::shell::{Shell, ShellId};
use crate::widget::Widget;

/// Hooks a hijacker runs
///
/// All hooks default to doing nothing.
pub trait HijackHandler {
    /// Called right after the hijacker is attached
    fn on_attach(&mut self, _ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called right after the hijacker is detached
    fn on_detach(&mut self, _ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called with the raw (untrimmed) input when Enter is pressed
    fn handle_submit(&mut self, _ctx: &mut HijackContext<'_>, _input: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// What a hook can reach while it runs
pub struct HijackContext<'a> {
    widget: &'a mut Widget,
    shell: &'a Shell,
    hijacker: &'a str,
    detach_requested: bool,
}

impl<'a> HijackContext<'a> {
    fn new(widget: &'a mut Widget, shell: &'a Shell, hijacker: &'a str) -> Self {
        Self {
            widget,
            shell,
            hijacker,
            detach_requested: false,
        }
    }

    /// The widget the hijacked shell is attached to
    pub fn widget(&mut self) -> &mut Widget {
        self.widget
    }

    /// The hijacked shell
    pub fn shell(&self) -> &Shell {
        self.shell
    }

    /// Name of the running hijacker
    pub fn hijacker_name(&self) -> &str {
        self.hijacker
    }

    /// Detach once the running hook returns
    pub fn detach(&mut self) {
        self.detach_requested = true;
    }

    pub fn detach_requested(&self) -> bool {
        self.detach_requested
    }
}

type AttachHook = Box<dyn FnMut(&mut HijackContext<'_>) -> anyhow::Result<()>>;
type SubmitHook = Box<dyn FnMut(&mut HijackContext<'_>, &str) -> anyhow::Result<()>>;

/// Closure-backed [`HijackHandler`]
#[derive(Default)]
pub struct HijackHooks {
    on_attach: Option<AttachHook>,
    on_detach: Option<AttachHook>,
    handle_submit: Option<SubmitHook>,
}

impl HijackHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_attach<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut HijackContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.on_attach = Some(Box::new(hook));
        self
    }

    pub fn on_detach<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut HijackContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.on_detach = Some(Box::new(hook));
        self
    }

    pub fn handle_submit<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut HijackContext<'_>, &str) -> anyhow::Result<()> + 'static,
    {
        self.handle_submit = Some(Box::new(hook));
        self
    }
}

impl HijackHandler for HijackHooks {
    fn on_attach(&mut self, ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        match self.on_attach.as_mut() {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }

    fn on_detach(&mut self, ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        match self.on_detach.as_mut() {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }

    fn handle_submit(&mut self, ctx: &mut HijackContext<'_>, input: &str) -> anyhow::Result<()> {
        match self.handle_submit.as_mut() {
            Some(hook) => hook(ctx, input),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Hook<'a> {
    Attach,
    Detach,
    Submit(&'a str),
}

impl Hook<'_> {
    fn name(&self) -> &'static str {
        match self {
            Hook::Attach => "on_attach",
            Hook::Detach => "on_detach",
            Hook::Submit(_) => "handle_submit",
        }
    }
}

struct Inner {
    name: String,
    shell: Cell<Option<ShellId>>,
    handler: RefCell<Box<dyn HijackHandler>>,
}

/// Shared handle to a hijacker
#[derive(Clone)]
pub struct Hijacker {
    inner: Rc<Inner>,
}

impl Hijacker {
    /// Create a detached hijacker
    pub fn new(name: impl Into<String>, handler: impl HijackHandler + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                name: name.into(),
                shell: Cell::new(None),
                handler: RefCell::new(Box::new(handler)),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Shell this hijacker is attached to
    pub fn shell_id(&self) -> Option<ShellId> {
        self.inner.shell.get()
    }

    pub fn is_attached(&self) -> bool {
        self.shell_id().is_some()
    }

    /// Whether this handle and `shell` point at each other
    pub fn is_attached_to(&self, shell: &Shell) -> bool {
        self.shell_id() == Some(shell.id())
            && shell.hijacker().is_some_and(|current| current.ptr_eq(self))
    }

    /// Whether both handles refer to the same hijacker
    pub fn ptr_eq(&self, other: &Hijacker) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Take over `shell`, which must be attached to `widget`
    ///
    /// A different hijacker already on the shell is detached first.
    pub fn attach_to(&self, shell: &mut Shell, widget: &mut Widget) -> Result<()> {
        match shell.widget_id() {
            None => {
                return Err(Error::ShellNotAttached {
                    shell: shell.name().to_string(),
                })
            }
            Some(id) if id != widget.id() => {
                return Err(Error::ShellWidgetMismatch {
                    shell: shell.name().to_string(),
                })
            }
            Some(_) => {}
        }

        if self.is_attached() {
            return Err(Error::HijackerAlreadyAttached {
                hijacker: self.name().to_string(),
            });
        }

        if let Some(previous) = shell.hijacker().cloned() {
            info!(
                "Hijacker '{}' displaces '{}' on shell '{}'",
                self.name(),
                previous.name(),
                shell.name()
            );
            previous.detach(shell, widget)?;
        }

        shell.set_hijacker(Some(self.clone()));
        self.inner.shell.set(Some(shell.id()));
        info!("Hijacker '{}' attached to shell '{}'", self.name(), shell.name());

        self.run_hook(Hook::Attach, shell, widget)
    }

    /// Give `shell` back its own key handling
    pub fn detach(&self, shell: &mut Shell, widget: &mut Widget) -> Result<()> {
        if !self.is_attached_to(shell) {
            return Err(Error::HijackerNotAttached {
                hijacker: self.name().to_string(),
                shell: shell.name().to_string(),
            });
        }

        shell.set_hijacker(None);
        self.inner.shell.set(None);
        info!("Hijacker '{}' detached from shell '{}'", self.name(), shell.name());

        self.run_hook(Hook::Detach, shell, widget)
    }

    /// Interpret a key event on behalf of `shell`
    ///
    /// Only Shift turns Enter into a newline. Enter with Ctrl, Alt or no
    /// modifier at all submits the input to `handle_submit`.
    pub fn handle_key_down(
        &self,
        widget: &mut Widget,
        shell: &mut Shell,
        event: &mut KeyEvent,
    ) -> Result<()> {
        if !event.is(&Key::Enter) {
            return Ok(());
        }

        if event.modifiers.shift {
            // the newline goes in as usual; relayout after it lands
            widget.schedule(Duration::ZERO, Task::ResizeInput);
            return Ok(());
        }

        event.prevent_default();
        let input = widget.take_input();
        self.run_hook(Hook::Submit(&input), shell, widget)
    }

    fn run_hook(&self, hook: Hook<'_>, shell: &mut Shell, widget: &mut Widget) -> Result<()> {
        let (result, detach_requested) = {
            let mut handler =
                self.inner
                    .handler
                    .try_borrow_mut()
                    .map_err(|_| Error::HijackerBusy {
                        hijacker: self.name().to_string(),
                    })?;
            let mut ctx = HijackContext::new(widget, shell, &self.inner.name);
            let result = match hook {
                Hook::Attach => handler.on_attach(&mut ctx),
                Hook::Detach => handler.on_detach(&mut ctx),
                Hook::Submit(input) => handler.handle_submit(&mut ctx, input),
            };
            (result, ctx.detach_requested)
        };

        // honoured even when the hook failed
        if detach_requested && self.is_attached_to(shell) {
            debug!("Hijacker '{}' requested detach from {}", self.name(), hook.name());
            self.detach(shell, widget)?;
        }

        result.map_err(|source| Error::HookFailed {
            hijacker: self.name().to_string(),
            hook: hook.name(),
            source,
        })
    }
}

impl fmt::Debug for Hijacker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hijacker")
            .field("name", &self.inner.name)
            .field("shell", &self.inner.shell.get())
            .finish()
    }
}
