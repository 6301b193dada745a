//! Content generators - initial content for each game module
//!
//! Pure functions of a [`Catalog`] and a [`SimpleRng`]. The same seed always
//! produces the same deck, question order, tray, food and word, which is what
//! lets tests pin a whole game down by its seed.

use crate::catalog::{
    Catalog, ChoicePair, DotPatternSpec, FoodSpec, MemoryCardSpec, PuzzlePieceSpec, QuizQuestion,
    SortItem, WordEntry,
};
use crate::rng::SimpleRng;
use crate::types::{Cell, WORD_LETTER_BOARD_SIZE};

/// Sorting pool in random order
pub fn sorting_pool(catalog: &Catalog, rng: &mut SimpleRng) -> Vec<SortItem> {
    rng.shuffled(&catalog.sorting_items)
}

/// Every catalog card twice, shuffled
pub fn memory_deck(catalog: &Catalog, rng: &mut SimpleRng) -> Vec<MemoryCardSpec> {
    let mut deck = Vec::with_capacity(catalog.memory_cards.len() * 2);
    deck.extend_from_slice(&catalog.memory_cards);
    deck.extend_from_slice(&catalog.memory_cards);
    rng.shuffle(&mut deck);
    deck
}

pub fn quiz_order(catalog: &Catalog, rng: &mut SimpleRng) -> Vec<QuizQuestion> {
    rng.shuffled(&catalog.quiz_questions)
}

pub fn choice_order(catalog: &Catalog, rng: &mut SimpleRng) -> Vec<ChoicePair> {
    rng.shuffled(&catalog.choice_pairs)
}

/// Puzzle pieces in the order they appear in the tray
pub fn puzzle_tray(catalog: &Catalog, rng: &mut SimpleRng) -> Vec<PuzzlePieceSpec> {
    rng.shuffled(&catalog.puzzle_pieces)
}

/// Dot patterns are played in catalog order
pub fn dot_patterns(catalog: &Catalog) -> Vec<DotPatternSpec> {
    catalog.dot_patterns.clone()
}

/// Random target word, upper-cased
pub fn pick_word(catalog: &Catalog, rng: &mut SimpleRng) -> Option<WordEntry> {
    rng.pick(&catalog.words).map(|entry| WordEntry {
        word: entry.word.to_ascii_uppercase(),
        ..entry.clone()
    })
}

/// Shuffled letter board: every letter of `word` plus random fillers, up to
/// [`WORD_LETTER_BOARD_SIZE`] letters
pub fn letter_board(word: &str, rng: &mut SimpleRng) -> Vec<char> {
    let mut board: Vec<char> = Vec::with_capacity(WORD_LETTER_BOARD_SIZE);
    for c in word.chars().map(|c| c.to_ascii_uppercase()) {
        if !board.contains(&c) {
            board.push(c);
        }
    }

    let mut fillers: Vec<char> = ('A'..='Z').filter(|c| !board.contains(c)).collect();
    rng.shuffle(&mut fillers);
    let missing = WORD_LETTER_BOARD_SIZE.saturating_sub(board.len());
    board.extend(fillers.into_iter().take(missing));

    rng.shuffle(&mut board);
    board
}

/// Food placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Food {
    pub cell: Cell,
    pub name: String,
    pub emoji: String,
    pub points: i32,
}

/// Random food from `menu` on a random free cell.
///
/// Returns `None` when the menu is empty or no cell is free.
pub fn spawn_food(
    menu: &[FoodSpec],
    grid_size: i16,
    occupied: impl Fn(Cell) -> bool,
    rng: &mut SimpleRng,
) -> Option<Food> {
    let spec = rng.pick(menu)?.clone();
    let free: Vec<Cell> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Cell::new(x, y)))
        .filter(|&cell| !occupied(cell))
        .collect();
    let cell = *rng.pick(&free)?;

    Some(Food {
        cell,
        name: spec.name,
        emoji: spec.emoji,
        points: spec.points,
    })
}
