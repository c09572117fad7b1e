//! Widget - event routing and output surface
//!
//! The widget is the presentation model: a transcript of output lines, an
//! input control, a prompt and a theme. It owns at most one [`Shell`] and
//! forwards key events to it. Hosts feed it key events, drive its scheduler
//! with [`Widget::tick`] / [`Widget::advance`], and render what it exposes.

use std::fmt;
use std::time::Duration;

use uuid::Uuid;

use crate::config::{Config, WidgetConfig};
use crate::error::{Error, Result};
use crate::hijacker::Hijacker;
use crate::key::{Key, KeyEvent};
use crate::markup;
use crate::models::OutputLine;
use crate::scheduler::{Scheduler, Task};
use crate::shell::Shell;
use crate::style::{StyleKind, Theme};
use crate::ui::{InputControl, Prompt, Transcript};

/// Opaque widget identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(Uuid);

impl WidgetId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal widget
#[derive(Debug)]
pub struct Widget {
    id: WidgetId,
    transcript: Transcript,
    input: InputControl,
    prompt: Prompt,
    theme: Theme,
    scheduler: Scheduler,
    /// Attached shell; taken out while it handles an event
    shell: Option<Shell>,
    /// Name of the shell while it is taken out
    shell_in_flight: Option<String>,
}

impl Widget {
    /// Create a widget with no shell
    pub fn new(config: &WidgetConfig) -> Self {
        let mut transcript = Transcript::new();
        transcript.set_scrollbar_hidden(!config.show_scrollbar);

        let mut input = InputControl::new();
        if config.autofocus {
            input.focus();
        }

        Self {
            id: WidgetId::new(),
            transcript,
            input,
            prompt: Prompt::new(config.prompt_symbol.clone(), config.prompt_spacing),
            theme: config.theme,
            scheduler: Scheduler::new(),
            shell: None,
            shell_in_flight: None,
        }
    }

    /// Create a widget with a fresh shell attached
    pub fn create_default(config: &Config) -> Self {
        let mut widget = Self::new(&config.widget);
        let mut shell = Shell::from_config(&config.shell);
        shell.set_widget(Some(widget.id));
        widget.shell = Some(shell);
        widget
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    // === Shell management ===

    /// Attach `shell`, returning the previously attached one
    ///
    /// The previous shell is detached first, including its hijacker. Fails
    /// with [`Error::ShellBusy`] from inside a command handler or hook.
    pub fn attach_shell(&mut self, mut shell: Shell) -> Result<Option<Shell>> {
        let previous = self.detach_shell()?;
        shell.set_widget(Some(self.id));
        info!("Shell '{}' attached to widget {}", shell.name(), self.id);
        self.shell = Some(shell);
        Ok(previous)
    }

    /// Detach the current shell
    ///
    /// A hijacker on the shell is detached too, running its `on_detach`.
    /// Fails with [`Error::ShellBusy`] from inside a command handler or hook.
    pub fn detach_shell(&mut self) -> Result<Option<Shell>> {
        self.ensure_shell_idle()?;
        self.detach_hijacker()?;
        Ok(self.shell.take().map(|mut shell| {
            shell.set_widget(None);
            info!("Shell '{}' detached from widget {}", shell.name(), self.id);
            shell
        }))
    }

    pub fn shell(&self) -> Option<&Shell> {
        self.shell.as_ref()
    }

    pub fn shell_mut(&mut self) -> Option<&mut Shell> {
        self.shell.as_mut()
    }

    pub fn has_shell(&self) -> bool {
        self.shell.is_some()
    }

    /// Whether the shell is taken out handling an event
    pub fn is_shell_busy(&self) -> bool {
        self.shell_in_flight.is_some()
    }

    fn ensure_shell_idle(&self) -> Result<()> {
        match &self.shell_in_flight {
            Some(name) => Err(Error::ShellBusy { shell: name.clone() }),
            None => Ok(()),
        }
    }

    /// Run `f` with the widget and its shell borrowed side by side
    ///
    /// Returns `None` when no shell is attached, or when the shell is
    /// already out handling an event.
    pub fn with_shell<R>(&mut self, f: impl FnOnce(&mut Widget, &mut Shell) -> R) -> Option<R> {
        let mut shell = self.shell.take()?;
        self.shell_in_flight = Some(shell.name().to_string());
        let result = f(self, &mut shell);
        self.shell_in_flight = None;
        self.shell = Some(shell);
        Some(result)
    }

    /// Attach `hijacker` to this widget's shell
    ///
    /// Inside a command handler use [`Hijacker::attach_to`] with the shell
    /// the handler was given; this call fails there with
    /// [`Error::ShellBusy`].
    pub fn attach_hijacker(&mut self, hijacker: &Hijacker) -> Result<()> {
        self.ensure_shell_idle()?;
        self.with_shell(|widget, shell| hijacker.attach_to(shell, widget))
            .ok_or(Error::NoShellAttached)?
    }

    /// Detach whatever hijacker the shell has
    ///
    /// Inside a hook use [`HijackContext::detach`](crate::HijackContext::detach);
    /// this call fails there with [`Error::ShellBusy`].
    pub fn detach_hijacker(&mut self) -> Result<Option<Hijacker>> {
        self.ensure_shell_idle()?;
        let Some(hijacker) = self.shell.as_ref().and_then(|s| s.hijacker().cloned()) else {
            return Ok(None);
        };
        self.with_shell(|widget, shell| hijacker.detach(shell, widget))
            .ok_or(Error::NoShellAttached)??;
        Ok(Some(hijacker))
    }

    // === Events ===

    /// Route a key event to the shell
    pub fn handle_key_down(&mut self, event: &mut KeyEvent) -> Result<()> {
        match self.with_shell(|widget, shell| shell.handle_key_down(widget, event)) {
            Some(result) => result,
            None => {
                if event.is(&Key::Enter) {
                    self.echo("No shell attached to terminal", StyleKind::Log);
                }
                Ok(())
            }
        }
    }

    /// Input content changed by the user
    pub fn handle_input(&mut self) {
        self.input.auto_resize();
    }

    /// Full keystroke: routing, then the input's default action unless
    /// prevented, then relayout
    pub fn dispatch_key(&mut self, event: impl Into<KeyEvent>) -> Result<KeyEvent> {
        let mut event = event.into();
        self.handle_key_down(&mut event)?;
        if self.input.apply_default(&event) {
            self.handle_input();
        }
        Ok(event)
    }

    /// Dispatch each character of `text` as a keystroke
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            self.dispatch_key(ch)?;
        }
        Ok(())
    }

    /// Mouse released over the widget
    pub fn handle_mouse_up(&mut self, selection_empty: bool) {
        if selection_empty {
            self.input.focus();
        }
    }

    // === Output ===

    /// Append one line of plain text
    pub fn echo(&mut self, text: impl Into<String>, kind: StyleKind) {
        self.add_to_screen(OutputLine::new(text, kind), true);
    }

    /// Append a prepared line
    pub fn add_to_screen(&mut self, line: OutputLine, scrolling: bool) {
        self.transcript.push(line, scrolling);
    }

    /// Append each top-level element of `markup` as its own line
    pub fn parse_to_screen(&mut self, markup: &str) {
        for element in markup::parse_elements(markup) {
            self.add_to_screen(element.to_line(), true);
        }
    }

    /// Append the whole of `markup` as one line
    pub fn parse_output(&mut self, markup: &str) {
        let nodes = markup::parse_fragment(markup);
        let spans = markup::to_spans(&nodes, StyleKind::Log);
        self.add_to_screen(OutputLine::with_spans(spans, StyleKind::Log), true);
    }

    /// Clear the transcript now, or after `delay`
    pub fn clear_screen(&mut self, delay: Option<Duration>) {
        match delay {
            Some(delay) if !delay.is_zero() => self.schedule(delay, Task::ClearScreen),
            _ => self.transcript.clear(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Lines in a window of `rows` at the current scroll position
    pub fn visible_lines(&self, rows: usize) -> &[OutputLine] {
        self.transcript.visible(rows)
    }

    pub fn scroll_to_bottom(&mut self) {
        self.transcript.scroll_to_bottom();
    }

    /// Scroll by `delta` lines; negative scrolls towards older lines
    pub fn scroll_by(&mut self, delta: isize) {
        self.transcript.scroll_by(delta);
    }

    /// Flip scrollbar visibility, returning whether it is now hidden
    pub fn toggle_scrollbar(&mut self) -> bool {
        self.transcript.toggle_scrollbar()
    }

    pub fn is_scrollbar_hidden(&self) -> bool {
        self.transcript.is_scrollbar_hidden()
    }

    // === Input ===

    pub fn input(&self) -> &InputControl {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputControl {
        &mut self.input
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input.set_value(value);
        self.input.auto_resize();
    }

    /// Read and empty the input
    pub fn take_input(&mut self) -> String {
        let value = self.input.take();
        self.input.auto_resize();
        value
    }

    pub fn focus(&mut self) {
        self.input.focus();
    }

    /// Empty the input now, or after `delay`
    pub fn clear_text(&mut self, delay: Option<Duration>) {
        match delay {
            Some(delay) if !delay.is_zero() => self.schedule(
                delay,
                Task::ClearInput {
                    unless_edited_since: None,
                },
            ),
            _ => self.clear_input(),
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.input.auto_resize();
    }

    // === Presentation ===

    pub fn set_prompt(&mut self, symbol: impl Into<String>, spacing: usize) {
        self.prompt = Prompt::new(symbol, spacing);
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn set_theme(&mut self, theme: Theme) {
        debug!("Widget {} theme set to {}", self.id, theme);
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    // === Scheduling ===

    /// Queue `task` to run once `delay` has elapsed
    pub fn schedule(&mut self, delay: Duration, task: Task) {
        self.scheduler.schedule(delay, task);
    }

    /// Run every task that is due
    pub fn tick(&mut self) {
        for task in self.scheduler.take_due() {
            self.run_task(task);
        }
    }

    /// Move the clock forward and run what became due
    pub fn advance(&mut self, elapsed: Duration) {
        self.scheduler.advance(elapsed);
        self.tick();
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Time until the next task is due
    pub fn next_due_in(&self) -> Option<Duration> {
        self.scheduler.next_due_in()
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::ClearInput {
                unless_edited_since: Some(revision),
            } if self.input.revision() != revision => {
                debug!("Skipping deferred input clear, input was edited");
            }
            Task::ClearInput { .. } => self.clear_input(),
            Task::ClearScreen => self.transcript.clear(),
            Task::ResizeInput => {
                self.input.auto_resize();
            }
        }
    }
}
