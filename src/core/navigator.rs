//! Interactive cursor navigation over a tag-filtered history view.
//!
//! Transitions are pure: `apply` maps one line of input to a [`Transition`],
//! and the caller decides how to present it. That keeps the state machine
//! testable without a terminal.

use crate::core::history::ConversationRecord;

/// Parsed navigation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Select(u32),
    /// `select` with a non-numeric argument.
    MalformedSelect,
    Back,
    Unknown,
}

pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    match input {
        "next" => Command::Next,
        "previous" => Command::Previous,
        "back" => Command::Back,
        _ => match input.strip_prefix("select ") {
            Some(argument) => match argument.trim().parse::<u32>() {
                Ok(id) => Command::Select(id),
                Err(_) => Command::MalformedSelect,
            },
            None => Command::Unknown,
        },
    }
}

/// Outcome of applying one command.
#[derive(Debug, PartialEq, Eq)]
pub enum Transition {
    /// Cursor changed.
    Moved,
    /// `next` at the newest record; cursor unchanged.
    AtNewest,
    /// `previous` at the first record; cursor unchanged.
    AtOldest,
    /// `select` named an id not present in this view.
    UnknownId(u32),
    /// `select` argument was not a number.
    MalformedId,
    UnknownCommand,
    /// `back`: leave the loop.
    Exit,
}

/// Cursor over a non-empty filtered view, newest record first.
pub struct Navigator {
    view: Vec<ConversationRecord>,
    cursor: usize,
}

impl Navigator {
    /// Returns `None` for an empty view; there is no state to navigate.
    pub fn new(view: Vec<ConversationRecord>) -> Option<Self> {
        if view.is_empty() {
            return None;
        }
        let cursor = view.len() - 1;
        Some(Self { view, cursor })
    }

    pub fn current(&self) -> &ConversationRecord {
        &self.view[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn apply(&mut self, input: &str) -> Transition {
        match parse_command(input) {
            Command::Back => Transition::Exit,
            Command::Next => {
                if self.cursor + 1 < self.view.len() {
                    self.cursor += 1;
                    Transition::Moved
                } else {
                    Transition::AtNewest
                }
            }
            Command::Previous => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    Transition::Moved
                } else {
                    Transition::AtOldest
                }
            }
            Command::Select(id) => match self.view.iter().position(|r| r.id == id) {
                Some(index) => {
                    self.cursor = index;
                    Transition::Moved
                }
                None => Transition::UnknownId(id),
            },
            Command::MalformedSelect => Transition::MalformedId,
            Command::Unknown => Transition::UnknownCommand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(ids: &[u32]) -> Vec<ConversationRecord> {
        ids.iter()
            .map(|&id| ConversationRecord {
                id,
                prompt: format!("p{id}"),
                response: format!("r{id}"),
                timestamp: "2026-08-29T10:00:00+00:00".to_string(),
                tag: "t".to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_view_has_no_navigator() {
        assert!(Navigator::new(Vec::new()).is_none());
    }

    #[test]
    fn starts_at_most_recent() {
        let nav = Navigator::new(view(&[1, 2, 3])).unwrap();
        assert_eq!(nav.cursor(), 2);
        assert_eq!(nav.current().id, 3);
    }

    #[test]
    fn walks_backwards_and_bounds_at_first() {
        let mut nav = Navigator::new(view(&[1, 2, 3])).unwrap();
        assert_eq!(nav.apply("previous"), Transition::Moved);
        assert_eq!(nav.cursor(), 1);
        assert_eq!(nav.apply("previous"), Transition::Moved);
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.apply("previous"), Transition::AtOldest);
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn next_bounds_at_most_recent() {
        let mut nav = Navigator::new(view(&[1, 2])).unwrap();
        assert_eq!(nav.apply("next"), Transition::AtNewest);
        assert_eq!(nav.cursor(), 1);
        assert_eq!(nav.apply("previous"), Transition::Moved);
        assert_eq!(nav.apply("next"), Transition::Moved);
        assert_eq!(nav.cursor(), 1);
    }

    #[test]
    fn select_jumps_by_id_not_index() {
        // Ids in a filtered view are not contiguous.
        let mut nav = Navigator::new(view(&[2, 5, 9])).unwrap();
        assert_eq!(nav.apply("select 2"), Transition::Moved);
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.apply("select 9"), Transition::Moved);
        assert_eq!(nav.cursor(), 2);
    }

    #[test]
    fn select_unknown_id_reports_and_stays() {
        let mut nav = Navigator::new(view(&[1, 2, 3])).unwrap();
        assert_eq!(nav.apply("select 99"), Transition::UnknownId(99));
        assert_eq!(nav.cursor(), 2);
    }

    #[test]
    fn select_non_numeric_is_malformed() {
        let mut nav = Navigator::new(view(&[1])).unwrap();
        assert_eq!(nav.apply("select abc"), Transition::MalformedId);
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn unknown_input_leaves_cursor_alone() {
        let mut nav = Navigator::new(view(&[1, 2])).unwrap();
        assert_eq!(nav.apply("sideways"), Transition::UnknownCommand);
        assert_eq!(nav.apply("select"), Transition::UnknownCommand);
        assert_eq!(nav.cursor(), 1);
    }

    #[test]
    fn back_exits_without_moving() {
        let mut nav = Navigator::new(view(&[1, 2])).unwrap();
        assert_eq!(nav.apply("back"), Transition::Exit);
        assert_eq!(nav.cursor(), 1);
    }

    #[test]
    fn input_is_trimmed_before_parsing() {
        let mut nav = Navigator::new(view(&[1, 2])).unwrap();
        assert_eq!(nav.apply("  previous  "), Transition::Moved);
        assert_eq!(nav.apply("\tback\n"), Transition::Exit);
    }

    #[test]
    fn full_walk_over_three_records() {
        let mut nav = Navigator::new(view(&[1, 2, 3])).unwrap();
        assert_eq!(nav.apply("previous"), Transition::Moved);
        assert_eq!(nav.apply("previous"), Transition::Moved);
        assert_eq!(nav.apply("previous"), Transition::AtOldest);
        assert_eq!(nav.apply("select 2"), Transition::Moved);
        assert_eq!(nav.cursor(), 1);
        assert_eq!(nav.apply("select 99"), Transition::UnknownId(99));
        assert_eq!(nav.cursor(), 1);
        assert_eq!(nav.apply("back"), Transition::Exit);
    }
}
