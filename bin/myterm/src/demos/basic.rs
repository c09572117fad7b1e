//! Basic demo: builtin commands and a `hijack` command

use myterm::{builtins, Command, Error, HijackContext, HijackHandler, Hijacker, StyleKind, Theme, Widget};

const WELCOME: &str = r#"
<p>Welcome to <span class="themed">myterm</span></p>
<p class="info">Type <span class="success">help</span> to list commands, Tab to complete</p>
"#;

pub fn install(widget: &mut Widget) -> myterm::Result<()> {
    widget
        .with_shell(|_, shell| {
            shell.extend_commands(builtins::defaults());
            shell.push_command(hijack());
        })
        .ok_or(Error::NoShellAttached)?;

    widget.parse_to_screen(WELCOME);
    widget.focus();
    Ok(())
}

fn hijack() -> Command {
    Command::new("hijack", |widget, shell, _, _| {
        Hijacker::new("HIJACKER", Ignorer).attach_to(shell, widget)?;
        Ok(())
    })
}

/// Takes over the shell and ignores everything but `quit`
struct Ignorer;

impl HijackHandler for Ignorer {
    fn on_attach(&mut self, ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        let name = ctx.hijacker_name().to_string();
        let widget = ctx.widget();
        widget.set_prompt(">>>", 1);
        widget.set_theme(Theme::Green);
        widget.clear_screen(None);
        widget.parse_to_screen(&format!("<p>Welcome to <span class=\"error\">{}</span></p>", name));
        widget.clear_text(None);
        Ok(())
    }

    fn handle_submit(&mut self, ctx: &mut HijackContext<'_>, input: &str) -> anyhow::Result<()> {
        if matches!(input.trim().to_lowercase().as_str(), "q" | "quit" | "quit()") {
            ctx.detach();
            return Ok(());
        }

        let name = ctx.hijacker_name().to_string();
        ctx.widget().parse_output(&format!(
            "<span class=\"error\">{}</span> ignored <span class=\"themed\">{}</span>",
            name,
            escape(input)
        ));
        Ok(())
    }

    fn on_detach(&mut self, ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        let name = ctx.hijacker_name().to_string();
        let widget = ctx.widget();
        widget.set_prompt("$", 2);
        widget.set_theme(Theme::Default);
        widget.clear_screen(None);
        widget.echo(format!("{} disconnected...", name), StyleKind::Log);
        widget.clear_text(None);
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
