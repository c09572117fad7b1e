//! Property-based tests for command autocompletion

#[path = "../test_utils/fixtures.rs"]
mod fixtures;

use fixtures::*;
use myterm::completion::{complete, Completion};
use myterm::{Key, StyleKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_complete_doesnt_panic(partial in "\\PC*", names in prop::collection::vec("\\PC{0,10}", 0..6)) {
        let _ = complete(&partial, names.iter().map(String::as_str));
    }

    #[test]
    fn test_candidates_match_prefix_in_order(
        partial in "[a-cA-C]{0,2}",
        names in prop::collection::vec("[a-c]{1,4}", 0..8),
    ) {
        let result = complete(&partial, names.iter().map(String::as_str));
        let expected: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| name.starts_with(&partial.to_lowercase()))
            .collect();

        match result {
            Completion::NoMatch => prop_assert!(expected.is_empty()),
            Completion::Unique(name) => prop_assert_eq!(vec![name.as_str()], expected),
            Completion::Ambiguous(found) => {
                prop_assert!(found.len() > 1);
                prop_assert_eq!(found.iter().map(String::as_str).collect::<Vec<_>>(), expected);
            }
        }
    }

    #[test]
    fn test_tab_behaviour_in_widget(
        partial in "[a-c]{1,2}",
        names in prop::collection::hash_set("[a-c]{1,4}", 1..6),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut widget = create_widget_with_commands(&refs);

        widget.set_input_value(partial.clone());
        let event = press(&mut widget, Key::Tab);
        prop_assert!(event.default_prevented());

        let matches: Vec<&str> = refs.iter().copied().filter(|n| n.starts_with(partial.as_str())).collect();
        match matches.len() {
            0 => {
                prop_assert_eq!(widget.input_value(), partial.as_str());
                prop_assert!(widget.transcript().is_empty());
            }
            1 => {
                prop_assert_eq!(widget.input_value(), matches[0]);
                prop_assert!(widget.transcript().is_empty());
            }
            _ => {
                prop_assert_eq!(widget.input_value(), partial.as_str());
                let line = widget.transcript().last().unwrap();
                prop_assert_eq!(line.kind, StyleKind::Info);
                prop_assert_eq!(line.plain_text(), format!("Available: {}", matches.join(", ")));
            }
        }
    }
}
