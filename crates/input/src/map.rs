//! Line mapping from host text to commands.
//!
//! Indices typed by the player are 1-based, as shown by the host; they are
//! converted to the 0-based indices used by [`GameAction`].

use crate::types::{Direction, GameAction, GameKind};

/// Parsed host input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Action(GameAction),
    Start,
    Reset,
    Abort,
    Show,
    Help,
    Quit,
}

/// 1-based number to 0-based index
fn index(token: &str) -> Option<usize> {
    token.parse::<usize>().ok()?.checked_sub(1)
}

/// Quiz options can also be picked by letter
fn option(token: &str) -> Option<usize> {
    match token {
        "a" => Some(0),
        "b" => Some(1),
        "c" => Some(2),
        "d" => Some(3),
        _ => index(token),
    }
}

fn action(kind: GameKind, words: &[&str]) -> Option<GameAction> {
    // An optional leading verb is accepted: "flip 3", "dot 2", "sort 1 2"
    let args = match words {
        [verb, rest @ ..]
            if !rest.is_empty()
                && matches!(*verb, "sort" | "flip" | "pick" | "answer" | "place" | "go" | "dot" | "guess") =>
        {
            rest
        }
        _ => words,
    };

    match (kind, args) {
        (GameKind::Sorting, [item, bin]) => Some(GameAction::AssignItemToBin {
            item: index(item)?,
            bin: index(bin)?,
        }),
        (GameKind::MemoryMatch, [card]) => Some(GameAction::FlipCard { index: index(card)? }),
        (GameKind::Quiz, [choice]) => Some(GameAction::SelectOption {
            index: option(choice)?,
        }),
        (GameKind::ChoiceMatch, [choice]) => match *choice {
            "y" | "yes" | "green" | "swap" | "1" => Some(GameAction::ChooseSustainable),
            "n" | "no" | "keep" | "2" => Some(GameAction::KeepUnsustainable),
            _ => None,
        },
        (GameKind::Puzzle, [piece]) => Some(GameAction::PlacePiece { piece: index(piece)? }),
        (GameKind::Snake, [dir]) => Some(GameAction::SetDirection {
            direction: Direction::from_str(dir)?,
        }),
        (GameKind::ConnectDots, [dot]) => Some(GameAction::SelectDot { index: index(dot)? }),
        (GameKind::WordGuess, [letter]) => {
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Some(GameAction::GuessLetter {
                    letter: c.to_ascii_uppercase(),
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Parse one line of input for a session of `kind`.
///
/// Returns `None` for blank or unrecognised lines.
pub fn parse_command(kind: GameKind, line: &str) -> Option<HostCommand> {
    let line = line.trim().to_lowercase();
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        [] => None,
        ["start"] => Some(HostCommand::Start),
        ["reset" | "restart"] => Some(HostCommand::Reset),
        ["abort"] => Some(HostCommand::Abort),
        ["show" | "look"] => Some(HostCommand::Show),
        ["help" | "?"] => Some(HostCommand::Help),
        ["quit" | "exit"] => Some(HostCommand::Quit),
        // A single "q" is a letter guess in the word game
        ["q"] if kind != GameKind::WordGuess => Some(HostCommand::Quit),
        _ => action(kind, &words).map(HostCommand::Action),
    }
}

/// One-line help for the actions of `kind`
pub fn usage(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Sorting => "<item> <bin>   drop an item into a bin",
        GameKind::MemoryMatch => "<card>         flip a card",
        GameKind::Quiz => "<option>       answer with 1-4 or a-d",
        GameKind::ChoiceMatch => "y | n          choose the green option or keep the item",
        GameKind::Puzzle => "<piece>        place a piece in the next slot",
        GameKind::Snake => "w a s d        steer (or up/left/down/right)",
        GameKind::ConnectDots => "<dot>          select a dot",
        GameKind::WordGuess => "<letter>       guess a letter",
    }
}
