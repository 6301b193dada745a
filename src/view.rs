//! GameView: maps a [`SessionSnapshot`] into plain text.
//!
//! This module is pure (no I/O). Indices are shown 1-based, matching what
//! the input parser expects.

use std::fmt::Write;

use crate::core::games::{
    ChoiceGame, ConnectDotsGame, MemoryGame, PuzzleGame, QuizGame, SnakeGame, SortingGame,
    WordGuessGame,
};
use crate::core::{ModuleState, SessionSnapshot};
use crate::types::{Cell, SessionStatus};

/// Render the whole session: header, module body and result line
pub fn render(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ({}) ==", snapshot.title, snapshot.kind);

    let mut status = format!("score {}", snapshot.score);
    if snapshot.points_available > 0 {
        let _ = write!(status, " | worth {} pts", snapshot.points_available);
    }
    if let Some(secs) = snapshot.time_remaining {
        let _ = write!(status, " | time {}", format_time(secs));
    }
    let _ = writeln!(out, "{status}");

    match snapshot.status {
        SessionStatus::NotStarted => {
            let _ = writeln!(out, "Type 'start' to play.");
        }
        SessionStatus::Running | SessionStatus::Completed => {
            if let Some(module) = &snapshot.module {
                out.push_str(&render_module(module));
            }
        }
    }

    if let Some(report) = &snapshot.report {
        let _ = writeln!(
            out,
            "Finished ({}): {} points in {}, {} eco points{}",
            report.reason.as_str(),
            report.score,
            format_time(report.time_spent_secs),
            report.eco_points,
            match report.passed {
                Some(true) => ", passed",
                Some(false) => ", below the pass mark",
                None => "",
            }
        );
    }
    out
}

/// `m:ss`
pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn render_module(module: &ModuleState) -> String {
    match module {
        ModuleState::Sorting(game) => sorting(game),
        ModuleState::MemoryMatch(game) => memory(game),
        ModuleState::Quiz(game) => quiz(game),
        ModuleState::ChoiceMatch(game) => choice(game),
        ModuleState::Puzzle(game) => puzzle(game),
        ModuleState::Snake(game) => snake(game),
        ModuleState::ConnectDots(game) => connect_dots(game),
        ModuleState::WordGuess(game) => word_guess(game),
    }
}

fn sorting(game: &SortingGame) -> String {
    let mut out = String::new();
    let bins: Vec<String> = game
        .bins()
        .iter()
        .enumerate()
        .map(|(i, b)| format!("[{}] {} {}", i + 1, b.emoji, b.name))
        .collect();
    let _ = writeln!(out, "Bins: {}", bins.join("  "));
    for (i, slot) in game.items().iter().enumerate() {
        let mark = match slot.placed_bin.and_then(|b| game.bins().get(b)) {
            Some(bin) => format!("-> {}", bin.name),
            None => String::new(),
        };
        let _ = writeln!(out, "{:>2}. {} {} {}", i + 1, slot.item.emoji, slot.item.name, mark);
    }
    let _ = writeln!(out, "{} left, {} mistakes", game.remaining(), game.mistakes());
    out
}

fn memory(game: &MemoryGame) -> String {
    let mut out = String::new();
    for (row, chunk) in game.cards().chunks(4).enumerate() {
        let line: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(col, card)| {
                let n = row * 4 + col + 1;
                if card.matched {
                    format!("{n:>2}:({})", card.text)
                } else if card.face_up {
                    format!("{n:>2}:{} {}", card.emoji, card.text)
                } else {
                    format!("{n:>2}:??")
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  "));
    }
    let _ = writeln!(
        out,
        "Moves: {} | Matches: {}/{}",
        game.moves(),
        game.matched_pairs(),
        game.total_pairs()
    );
    out
}

fn quiz(game: &QuizGame) -> String {
    let mut out = String::new();
    let Some(question) = game.current_question() else {
        return out;
    };
    let _ = writeln!(
        out,
        "Question {} of {}: {}",
        game.current_index() + 1,
        game.questions().len(),
        question.question
    );
    for (i, option) in question.options.iter().enumerate() {
        let mark = match game.selection() {
            Some(_) if i == question.correct => " *",
            Some(sel) if sel == i => " x",
            _ => "",
        };
        let _ = writeln!(out, "  {}. {}{}", i + 1, option, mark);
    }
    if let Some(explanation) = game.explanation() {
        let _ = writeln!(out, "{explanation}");
    }
    out
}

fn choice(game: &ChoiceGame) -> String {
    let mut out = String::new();
    let Some(pair) = game.current_pair() else {
        return out;
    };
    let _ = writeln!(
        out,
        "Pair {} of {}: {} {}  or  {} {}?",
        game.current_index() + 1,
        game.pairs().len(),
        pair.item_emoji,
        pair.item,
        pair.alternative_emoji,
        pair.alternative
    );
    if let Some(selection) = game.selection() {
        let _ = writeln!(out, "You chose: {selection:?}");
    }
    out
}

fn puzzle(game: &PuzzleGame) -> String {
    let mut out = String::new();
    let board: Vec<String> = game
        .slots()
        .iter()
        .map(|slot| match slot.and_then(|p| game.pieces().get(p)) {
            Some(piece) => piece.emoji.clone(),
            None => "__".to_string(),
        })
        .collect();
    let _ = writeln!(out, "Board: {}", board.join(" "));
    let tray: Vec<String> = game
        .pieces()
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.placed)
        .map(|(i, p)| format!("{}:{} {}", i + 1, p.emoji, p.name))
        .collect();
    let _ = writeln!(out, "Tray: {}", tray.join("  "));
    out
}

fn snake(game: &SnakeGame) -> String {
    let mut out = String::new();
    let size = game.grid_size();
    let head = game.head();
    for y in 0..size {
        for x in 0..size {
            let cell = Cell::new(x, y);
            let c = if Some(cell) == head {
                '@'
            } else if game.body().contains(&cell) {
                'o'
            } else if game.good_food().is_some_and(|f| f.cell == cell) {
                '+'
            } else if game.bad_food().is_some_and(|f| f.cell == cell) {
                '-'
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Heading {} | length {}{}",
        game.direction().as_str(),
        game.body().len(),
        if game.is_alive() { "" } else { " | crashed" }
    );
    out
}

fn connect_dots(game: &ConnectDotsGame) -> String {
    let mut out = String::new();
    let Some(pattern) = game.current_pattern() else {
        return out;
    };
    let _ = writeln!(
        out,
        "Pattern {} of {}: {} {}",
        game.current_index() + 1,
        game.patterns().len(),
        pattern.emoji,
        pattern.name
    );
    let dots: Vec<String> = pattern
        .dots
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}{}", i + 1, if d.connected { "*" } else { "" }))
        .collect();
    let _ = writeln!(out, "Dots: {}", dots.join(" "));
    match game.next_connection() {
        Some((a, b)) => {
            let _ = writeln!(out, "Connect {} to {}", a + 1, b + 1);
        }
        None => {
            let _ = writeln!(out, "Pattern complete!");
        }
    }
    out
}

fn word_guess(game: &WordGuessGame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", game.emoji(), game.clue());
    let _ = writeln!(out, "Word: {}", game.masked());
    let board: String = game
        .board()
        .iter()
        .map(|c| if game.guessed().contains(c) { '.' } else { *c })
        .collect();
    let _ = writeln!(out, "Letters: {board}");
    let _ = writeln!(
        out,
        "Wrong guesses: {}/{}",
        game.wrong_guesses(),
        game.max_wrong_guesses()
    );
    out
}
