//! Card game demo: the shell is hijacked from the start and every
//! submission draws a card

use std::fmt;

use rand::seq::SliceRandom;

use myterm::{HijackContext, HijackHandler, Hijacker, StyleKind, Theme, Widget};

const SUITS: [&str; 4] = ["Hearts", "Diamonds", "Clubs", "Spades"];
const RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Card {
    suit: &'static str,
    rank: &'static str,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// A shuffled 52-card deck
struct Game {
    deck: Vec<Card>,
}

impl Game {
    fn new() -> Self {
        let mut deck = Self::full_deck();
        deck.shuffle(&mut rand::thread_rng());
        Self { deck }
    }

    fn full_deck() -> Vec<Card> {
        SUITS
            .iter()
            .flat_map(|&suit| RANKS.iter().map(move |&rank| Card { suit, rank }))
            .collect()
    }

    fn draw(&mut self) -> Option<Card> {
        self.deck.pop()
    }
}

impl HijackHandler for Game {
    fn on_attach(&mut self, ctx: &mut HijackContext<'_>) -> anyhow::Result<()> {
        let widget = ctx.widget();
        widget.set_theme(Theme::Green);
        widget.clear_screen(None);
        widget.clear_text(None);
        widget.echo("Welcome to the Game", StyleKind::Log);
        Ok(())
    }

    fn handle_submit(&mut self, ctx: &mut HijackContext<'_>, input: &str) -> anyhow::Result<()> {
        let widget = ctx.widget();
        if input == "clear" {
            widget.clear_screen(None);
            widget.clear_text(None);
            return Ok(());
        }

        match self.draw() {
            Some(card) => widget.echo(format!("You drew the {}", card), StyleKind::Log),
            None => widget.echo("No more cards to draw", StyleKind::Log),
        }
        Ok(())
    }
}

pub fn install(widget: &mut Widget) -> myterm::Result<()> {
    widget.toggle_scrollbar();
    widget.attach_hijacker(&Hijacker::new("HIJACKER", Game::new()))?;
    widget.focus();
    Ok(())
}
