//! Property-based tests for history recording and navigation

#[path = "../test_utils/fixtures.rs"]
mod fixtures;

use fixtures::*;
use myterm::history::History;
use myterm::Key;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_distinct_submissions_are_all_recorded(
        lines in prop::collection::hash_set("[a-z]{1,8}", 1..12),
    ) {
        let lines: Vec<String> = lines.into_iter().collect();
        let mut widget = create_widget_with_commands(&[]);
        for line in &lines {
            submit(&mut widget, line);
        }

        let shell = widget.shell().unwrap();
        prop_assert_eq!(shell.history().len(), lines.len());
        prop_assert_eq!(shell.history_index(), lines.len() as isize);
        prop_assert_eq!(history_entries(&widget), lines);
    }

    #[test]
    fn test_blank_submissions_change_nothing(blanks in prop::collection::vec("[ \t]{0,6}", 1..8)) {
        let mut widget = create_widget_with_commands(&["help"]);
        for blank in &blanks {
            submit(&mut widget, blank);
        }

        prop_assert!(widget.transcript().is_empty());
        prop_assert!(history_entries(&widget).is_empty());
        prop_assert_eq!(widget.shell().unwrap().history_index(), -1);
    }

    #[test]
    fn test_up_presses_walk_back_then_pin(
        lines in prop::collection::vec("[a-z]{1,8}", 1..10),
        presses in 1usize..15,
    ) {
        let mut widget = create_widget_with_commands(&[]);
        for line in &lines {
            submit(&mut widget, line);
        }

        for _ in 0..presses {
            press(&mut widget, Key::ArrowUp);
        }

        let n = lines.len();
        let expected = &lines[n - presses.min(n)];
        prop_assert_eq!(widget.input_value(), expected.as_str());
    }

    #[test]
    fn test_cursor_stays_in_bounds(
        lines in prop::collection::vec("[a-z]{1,4}", 0..6),
        moves in prop::collection::vec(prop_oneof![Just(-1isize), Just(1isize)], 0..30),
    ) {
        let mut history = History::new();
        for line in &lines {
            history.push(line.clone());
        }

        for direction in moves {
            let before = history.index();
            match history.navigate(direction) {
                Some(value) => {
                    prop_assert_eq!(history.index(), before + direction);
                    let index = history.index() as usize;
                    let expected = history.get(index).unwrap_or("").to_string();
                    prop_assert_eq!(value, expected);
                }
                None => prop_assert_eq!(history.index(), before),
            }
            prop_assert!(history.index() >= -1);
            prop_assert!(history.index() <= history.len() as isize);
        }
    }

    #[test]
    fn test_limit_keeps_newest(
        lines in prop::collection::vec("[a-z]{1,4}", 0..40),
        limit in 1usize..10,
    ) {
        let mut history = History::with_limit(limit);
        for line in &lines {
            history.push(line.clone());
        }

        let kept: Vec<&str> = history.entries().collect();
        let start = lines.len().saturating_sub(limit);
        let expected: Vec<&str> = lines[start..].iter().map(String::as_str).collect();
        prop_assert_eq!(kept, expected);
    }
}
