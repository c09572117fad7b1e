//! Bundled demos

mod basic;
mod game;

use std::fmt;
use std::str::FromStr;

use myterm::Widget;

/// Demo selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Demo {
    /// Builtin commands plus a `hijack` command
    #[default]
    Basic,
    /// A card-drawing game that hijacks the shell from the start
    Game,
}

impl Demo {
    /// Register the demo's commands and hijackers on `widget`
    pub fn install(self, widget: &mut Widget) -> myterm::Result<()> {
        tracing::info!("Installing {} demo", self);
        match self {
            Demo::Basic => basic::install(widget),
            Demo::Game => game::install(widget),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Demo::Basic => f.write_str("basic"),
            Demo::Game => f.write_str("game"),
        }
    }
}

impl FromStr for Demo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Demo::Basic),
            "game" => Ok(Demo::Game),
            other => anyhow::bail!("Unknown demo '{}' (expected basic or game)", other),
        }
    }
}
