//! Terminal host
//!
//! Maps crossterm events onto the widget and draws the widget state.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::{self, MoveTo};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode,
    KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use futures::StreamExt;
use tokio::time::{self, Instant};
use tracing::{debug, error};

use myterm::{Config, Key, KeyEvent, Modifiers, OutputLine, StyleKind, Theme, Widget};

use crate::demos::Demo;

/// Scheduler tick interval
const TICK_RATE: Duration = Duration::from_millis(50);

/// Widget plus host-side state
pub struct App {
    pub widget: Widget,
    should_quit: bool,
    dirty: bool,
}

impl App {
    pub fn new(config: &Config, demo: Demo) -> Result<Self> {
        let mut widget = Widget::create_default(config);
        demo.install(&mut widget)?;
        Ok(Self {
            widget,
            should_quit: false,
            dirty: true,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                let result = self.widget.type_text(&text);
                self.report(result);
            }
            Event::Resize(..) => {}
            _ => return,
        }
        self.dirty = true;
    }

    fn handle_key(&mut self, key: CtKeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            debug!("Quit requested");
            self.should_quit = true;
            return;
        }

        let page = terminal::size().map_or(10, |(_, rows)| rows as isize / 2);
        match key.code {
            KeyCode::PageUp => self.widget.scroll_by(-page),
            KeyCode::PageDown => self.widget.scroll_by(page),
            _ => {
                if let Some(event) = map_key(&key) {
                    let result = self.widget.dispatch_key(event).map(|_| ());
                    self.report(result);
                }
            }
        }
    }

    /// Show handler failures in the transcript instead of exiting
    fn report(&mut self, result: myterm::Result<()>) {
        if let Err(e) = result {
            error!("Key handling failed: {}", e);
            self.widget.echo(e.to_string(), StyleKind::Error);
        }
    }

    /// Move the widget clock forward
    pub fn advance(&mut self, elapsed: Duration) {
        let pending = self.widget.pending_tasks();
        self.widget.advance(elapsed);
        if self.widget.pending_tasks() != pending {
            self.dirty = true;
        }
    }

    /// Redraw if anything changed
    pub fn draw(&mut self, out: &mut impl Write) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;

        let (width, height) = terminal::size()?;
        let (width, height) = (width as usize, height as usize);
        let theme = self.widget.theme();

        let input = self.widget.input();
        let prompt = self.widget.prompt().render();
        let input_rows: Vec<&str> = input.value().split('\n').collect();
        let transcript_rows = height.saturating_sub(input_rows.len()).max(1);

        let mut rows: Vec<Vec<(String, StyleKind)>> = Vec::new();
        for line in self.widget.visible_lines(transcript_rows) {
            rows.extend(layout(line));
        }
        let skip = rows.len().saturating_sub(transcript_rows);

        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        for (y, row) in rows.iter().skip(skip).enumerate() {
            queue!(out, MoveTo(0, y as u16))?;
            for (text, kind) in row {
                queue!(out, SetForegroundColor(color(*kind, theme)), Print(text), ResetColor)?;
            }
        }

        if !self.widget.is_scrollbar_hidden() {
            self.draw_scrollbar(out, width, transcript_rows)?;
        }

        let top = transcript_rows.min(height.saturating_sub(1));
        let indent = " ".repeat(prompt.chars().count());
        for (i, text) in input_rows.iter().enumerate() {
            let lead = if i == 0 { prompt.as_str() } else { indent.as_str() };
            queue!(
                out,
                MoveTo(0, (top + i) as u16),
                SetForegroundColor(color(StyleKind::Themed, theme)),
                Print(lead),
                ResetColor,
                Print(text)
            )?;
        }

        let before: String = input.value().chars().take(input.cursor()).collect();
        let cursor_row = before.matches('\n').count();
        let cursor_col = before.rsplit('\n').next().map_or(0, |s| s.chars().count());
        queue!(
            out,
            MoveTo(
                (indent.len() + cursor_col) as u16,
                (top + cursor_row) as u16
            ),
            cursor::Show
        )?;

        out.flush()?;
        Ok(())
    }

    fn draw_scrollbar(&self, out: &mut impl Write, width: usize, rows: usize) -> Result<()> {
        let total = self.widget.transcript().len().max(1);
        let back = self.widget.transcript().scroll_back();
        let thumb = (rows * rows / total).clamp(1, rows);
        let bottom = rows - (back * rows / total).min(rows - thumb);
        let x = width.saturating_sub(1) as u16;

        for y in 0..rows {
            let glyph = if y + thumb >= bottom && y < bottom { "█" } else { "│" };
            queue!(out, MoveTo(x, y as u16), Print(glyph))?;
        }
        Ok(())
    }
}

/// Translate a crossterm key into a widget key event
pub fn map_key(event: &CtKeyEvent) -> Option<KeyEvent> {
    let mut modifiers = Modifiers {
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
    };

    let key = match event.code {
        KeyCode::Enter => {
            // many terminals cannot report Shift+Enter
            if modifiers.alt {
                modifiers.shift = true;
                modifiers.alt = false;
            }
            Key::Enter
        }
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::BackTab => return None,
        other => Key::Other(format!("{:?}", other)),
    };

    Some(KeyEvent::new(key, modifiers))
}

/// Split a transcript line into screen rows at embedded newlines
fn layout(line: &OutputLine) -> Vec<Vec<(String, StyleKind)>> {
    let mut rows = vec![Vec::new()];
    for span in &line.spans {
        for (i, part) in span.text.split('\n').enumerate() {
            if i > 0 {
                rows.push(Vec::new());
            }
            if !part.is_empty() {
                if let Some(row) = rows.last_mut() {
                    row.push((part.to_string(), span.kind));
                }
            }
        }
    }
    rows
}

/// Foreground colour for a style kind under a theme
pub fn color(kind: StyleKind, theme: Theme) -> Color {
    let accent = match theme {
        Theme::Default => Color::Reset,
        Theme::Green => Color::Green,
        Theme::Cyan => Color::Cyan,
    };
    match kind {
        StyleKind::Log | StyleKind::Themed => accent,
        StyleKind::Error => Color::Red,
        StyleKind::Success => Color::Green,
        StyleKind::Info => Color::Blue,
        StyleKind::Warning => Color::Yellow,
    }
}

/// Put the terminal into raw mode, run the event loop, and restore it
pub async fn run(mut app: App) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableBracketedPaste,
            cursor::Show
        );
        original_hook(info);
    }));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let result = event_loop(&mut app, &mut stdout).await;

    terminal::disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableBracketedPaste, cursor::Show)?;

    result
}

async fn event_loop(app: &mut App, stdout: &mut Stdout) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = time::interval(TICK_RATE);
    let mut last_tick = Instant::now();

    app.draw(stdout)?;
    while !app.should_quit() {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                app.advance(now - last_tick);
                last_tick = now;
            }
            event = events.next() => {
                match event {
                    Some(Ok(event)) => app.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
        }
        app.draw(stdout)?;
    }

    Ok(())
}
