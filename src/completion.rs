//! Command Name Completion
//!
//! Case-insensitive prefix completion over registered command names,
//! preserving registration order.

/// Outcome of completing a partial command name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matched
    NoMatch,
    /// Exactly one name matched
    Unique(String),
    /// Several names matched, in registration order
    Ambiguous(Vec<String>),
}

impl Completion {
    /// Every matching name
    pub fn candidates(&self) -> Vec<&str> {
        match self {
            Completion::NoMatch => Vec::new(),
            Completion::Unique(name) => vec![name.as_str()],
            Completion::Ambiguous(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Complete `partial` against `names`
///
/// An empty partial matches every name.
pub fn complete<'a, I>(partial: &str, names: I) -> Completion
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = partial.to_lowercase();
    let mut matches: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().starts_with(&prefix))
        .map(str::to_string)
        .collect();

    match matches.len() {
        0 => Completion::NoMatch,
        1 => Completion::Unique(matches.remove(0)),
        _ => Completion::Ambiguous(matches),
    }
}
